//! The diagram context: one connector model plus one class-box model plus
//! the canvas they are clamped into.
//!
//! This is the boundary the (external) input and rendering layers talk to.
//! Every mutation runs synchronously end-to-end; the context owns both
//! element lists exclusively.

use glam::{DVec2, dvec2};

use crate::classbox::{ClassBoxModel, Section};
use crate::connector::{ConnectorKind, ConnectorModel};
use crate::errors::{DocumentError, ModelError, Truncation};
use crate::geometry::{Canvas, Coord};
use crate::parse;

/// Which element list an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Box,
    Connector,
}

/// A complete diagram: canvas size, class boxes, connectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    canvas: Canvas,
    connectors: ConnectorModel,
    boxes: ClassBoxModel,
}

impl Diagram {
    /// An empty diagram on the default 2000 x 1000 canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty diagram on the given canvas.
    pub fn with_canvas(canvas: Canvas) -> Self {
        Diagram {
            canvas,
            ..Default::default()
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn connectors(&self) -> &ConnectorModel {
        &self.connectors
    }

    pub fn boxes(&self) -> &ClassBoxModel {
        &self.boxes
    }

    pub(crate) fn connectors_mut(&mut self) -> &mut ConnectorModel {
        &mut self.connectors
    }

    pub(crate) fn boxes_mut(&mut self) -> &mut ClassBoxModel {
        &mut self.boxes
    }

    /// Add a class box with empty sections at `(x, y)`.
    pub fn add_box(&mut self, x: f64, y: f64) {
        self.boxes.add(x, y, self.canvas);
    }

    /// Add a default-length connector of `kind` starting at `(x, y)`.
    pub fn add_connector(&mut self, kind: ConnectorKind, x: f64, y: f64) {
        self.connectors.add(kind, x, y);
    }

    /// Add a connector with explicit endpoints.
    pub fn add_connector_with_ends(&mut self, kind: ConnectorKind, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.connectors
            .add_with_ends(kind, dvec2(x0, y0), dvec2(x1, y1));
    }

    /// Add a connector by kind name, as the toolbar selection delivers it.
    pub fn add_connector_named(&mut self, kind: &str, x: f64, y: f64) -> Result<(), ModelError> {
        self.connectors.add(kind.parse()?, x, y);
        Ok(())
    }

    /// Remove element `index` from the named list, renumbering the rest.
    pub fn remove_at(&mut self, index: usize, kind: ElementKind) -> Result<(), ModelError> {
        match kind {
            ElementKind::Box => self.boxes.remove(index),
            ElementKind::Connector => self.connectors.remove(index),
        }
    }

    /// Replace one section's text on box `index`; the box resizes and
    /// re-clamps synchronously.
    pub fn set_section_text(
        &mut self,
        index: usize,
        section: Section,
        text: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.boxes.set_section_text(index, section, text, self.canvas)
    }

    /// Move box `index`, clamped into bounds.
    pub fn set_box_position(&mut self, index: usize, x: f64, y: f64) -> Result<(), ModelError> {
        self.boxes.set_position(index, x, y, self.canvas)
    }

    /// Move connector `index`'s endpoints, clamped into bounds.
    pub fn set_connector_position(
        &mut self,
        index: usize,
        origin: DVec2,
        end: DVec2,
    ) -> Result<(), ModelError> {
        self.connectors.set_position(index, origin, end, self.canvas)
    }

    /// Resize the canvas and re-clamp every element into the new bounds.
    pub fn resize_canvas(&mut self, width: f64, height: f64) {
        crate::log::debug!(width, height, "resize canvas");
        self.canvas = Canvas::new(width, height);
        self.boxes.clamp_to_bounds(self.canvas);
        self.connectors.clamp_to_bounds(self.canvas);
    }

    /// Clear both element lists and restore the default canvas size.
    pub fn reset(&mut self) {
        self.connectors.clear();
        self.boxes.clear();
        self.canvas = Canvas::DEFAULT;
    }

    /// The complete plain-text form: canvas line, connector records, box
    /// records. `deserialize` reads this back losslessly (provided no
    /// section line is a literal `[` or `]`).
    pub fn serialize(&self) -> String {
        format!(
            "{} {}\n{}{}",
            Coord(self.canvas.width),
            Coord(self.canvas.height),
            self.connectors.serialize(),
            self.boxes.serialize()
        )
    }

    /// Replace this diagram with one parsed from `text`.
    ///
    /// Lenient past the header: a structural mismatch keeps everything
    /// parsed so far and reports the cut point as `Ok(Some(truncation))`.
    /// An empty document or malformed header fails outright and leaves the
    /// diagram untouched.
    pub fn deserialize(&mut self, text: &str) -> Result<Option<Truncation>, DocumentError> {
        parse::deserialize_into(self, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_diagram_serializes_to_canvas_line() {
        assert_eq!(Diagram::new().serialize(), "2000.0 1000.0\n");
    }

    #[test]
    fn literal_association_example() {
        let mut diagram = Diagram::new();
        diagram.add_connector(ConnectorKind::Association, 0.0, 0.0);
        assert_eq!(
            diagram.connectors().serialize(),
            "0.0 0.0 50.0 0.0 Association\n"
        );
    }

    #[test]
    fn add_connector_named_rejects_unknown() {
        let mut diagram = Diagram::new();
        assert!(matches!(
            diagram.add_connector_named("Inheritance", 0.0, 0.0),
            Err(ModelError::InvalidKind { .. })
        ));
        assert!(diagram.connectors().is_empty());
    }

    #[test]
    fn remove_at_dispatches_by_kind() {
        let mut diagram = Diagram::new();
        diagram.add_box(0.0, 0.0);
        diagram.add_connector(ConnectorKind::Dependency, 0.0, 0.0);
        diagram.remove_at(0, ElementKind::Connector).unwrap();
        assert_eq!(diagram.boxes().len(), 1);
        assert!(diagram.connectors().is_empty());
        assert!(diagram.remove_at(3, ElementKind::Box).is_err());
    }

    #[test]
    fn reset_restores_default_canvas() {
        let mut diagram = Diagram::new();
        diagram.resize_canvas(640.0, 480.0);
        diagram.add_box(10.0, 10.0);
        diagram.reset();
        assert!(diagram.boxes().is_empty());
        assert_eq!(diagram.canvas(), Canvas::DEFAULT);
    }

    #[test]
    fn moving_elements_clamps_into_bounds() {
        let mut diagram = Diagram::new();
        diagram.add_box(0.0, 0.0);
        diagram.set_box_position(0, -50.0, 500.0).unwrap();
        let class_box = diagram.boxes().get(0).unwrap();
        assert_eq!(class_box.x, 0.0);
        assert_eq!(class_box.y, 500.0);

        diagram.add_connector(ConnectorKind::Association, 100.0, 100.0);
        diagram
            .set_connector_position(0, dvec2(-40.0, 60.0), dvec2(80.0, 60.0))
            .unwrap();
        let connector = diagram.connectors().get(0).unwrap();
        // Span of 120 preserved, slid off the left margin.
        assert_eq!(connector.origin, dvec2(25.0, 60.0));
        assert_eq!(connector.end, dvec2(145.0, 60.0));
        assert!(diagram.set_connector_position(4, dvec2(0.0, 0.0), dvec2(1.0, 1.0)).is_err());
    }

    #[test]
    fn resize_reclamps_elements() {
        let mut diagram = Diagram::new();
        diagram.add_box(1500.0, 800.0);
        diagram.resize_canvas(400.0, 300.0);
        let class_box = diagram.boxes().get(0).unwrap();
        assert!(class_box.x + class_box.outer_width() <= 400.0);
        assert!(class_box.y + class_box.outer_height() <= 300.0);
    }
}
