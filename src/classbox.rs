//! Class-box model: rectangles with three independently auto-sizing text
//! sections (header / attributes / methods).
//!
//! Section sizes are a pure function of the section text (see
//! [`crate::metrics`]); every text edit recomputes them synchronously and
//! then re-clamps the box into the canvas, replacing the original editor's
//! listener cascade.

use crate::errors::ModelError;
use crate::geometry::{Canvas, Coord, clamp, max_of};
use crate::metrics;

/// Minimum width of a section, in pixels.
pub const MIN_WIDTH: f64 = 100.0;
/// Minimum height of a section, in pixels.
pub const MIN_HEIGHT: f64 = 30.0;
/// Height of the title bar above the sections.
pub const BAR_HEIGHT: f64 = 15.0;
/// Border drawn around the stacked sections.
pub const BORDER_THICKNESS: f64 = 3.0;

/// One of a class box's three text sections, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Attributes,
    Methods,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Header, Section::Attributes, Section::Methods];

    fn slot(self) -> usize {
        match self {
            Section::Header => 0,
            Section::Attributes => 1,
            Section::Methods => 2,
        }
    }
}

/// Derived size of one section for the given text.
fn section_size(text: &str) -> (f64, f64) {
    let (text_width, text_height) = metrics::text_extent(text);
    (
        max_of(MIN_WIDTH, text_width + 20.0),
        max_of(MIN_HEIGHT, text_height * 1.08 + 10.0),
    )
}

/// A resizable labeled box with three stacked text sections.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassBox {
    /// Position in the owning list. Dense; renumbered on every removal.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    texts: [String; 3],
    widths: [f64; 3],
    heights: [f64; 3],
}

impl ClassBox {
    fn new(index: usize, x: f64, y: f64) -> Self {
        let (width, height) = section_size("");
        ClassBox {
            index,
            x,
            y,
            texts: Default::default(),
            widths: [width; 3],
            heights: [height; 3],
        }
    }

    pub fn section_text(&self, section: Section) -> &str {
        &self.texts[section.slot()]
    }

    /// Derived width of one section.
    pub fn section_width(&self, section: Section) -> f64 {
        self.widths[section.slot()]
    }

    /// Derived height of one section.
    pub fn section_height(&self, section: Section) -> f64 {
        self.heights[section.slot()]
    }

    /// Width of the widest section; all three render at this width.
    pub fn inner_width(&self) -> f64 {
        max_of(self.widths[0], max_of(self.widths[1], self.widths[2]))
    }

    /// Outer rectangle width, border included.
    pub fn outer_width(&self) -> f64 {
        self.inner_width() + 2.0 * BORDER_THICKNESS
    }

    /// Outer rectangle height: title bar, three sections, border.
    pub fn outer_height(&self) -> f64 {
        BAR_HEIGHT
            + self.heights[0]
            + self.heights[1]
            + self.heights[2]
            + 2.0 * BORDER_THICKNESS
    }

    fn max_x(&self, canvas: Canvas) -> f64 {
        canvas.width - self.outer_width()
    }

    fn max_y(&self, canvas: Canvas) -> f64 {
        canvas.height - self.outer_height()
    }

    /// Re-clamp the position so the whole footprint stays on the canvas.
    pub fn clamp_to_bounds(&mut self, canvas: Canvas) {
        self.x = clamp(self.x, 0.0, self.max_x(canvas));
        self.y = clamp(self.y, 0.0, self.max_y(canvas));
    }

    /// Move the box, clamped into bounds.
    pub fn set_position(&mut self, x: f64, y: f64, canvas: Canvas) {
        self.x = x;
        self.y = y;
        self.clamp_to_bounds(canvas);
    }

    pub(crate) fn set_section_text(&mut self, section: Section, text: String, canvas: Canvas) {
        let slot = section.slot();
        let (width, height) = section_size(&text);
        self.texts[slot] = text;
        self.widths[slot] = width;
        self.heights[slot] = height;
        self.clamp_to_bounds(canvas);
    }
}

/// Ordered list of class boxes. Indices are the only identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassBoxModel {
    boxes: Vec<ClassBox>,
}

impl ClassBoxModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a box with empty sections at `(x, y)`, clamped into bounds.
    pub fn add(&mut self, x: f64, y: f64, canvas: Canvas) {
        crate::log::debug!(x, y, "add class box");
        let mut class_box = ClassBox::new(self.boxes.len(), x, y);
        class_box.clamp_to_bounds(canvas);
        self.boxes.push(class_box);
    }

    /// Remove the box at `index` and renumber the rest.
    pub fn remove(&mut self, index: usize) -> Result<(), ModelError> {
        if index >= self.boxes.len() {
            return Err(ModelError::IndexOutOfRange {
                index,
                len: self.boxes.len(),
            });
        }
        self.boxes.remove(index);
        for (i, class_box) in self.boxes.iter_mut().enumerate().skip(index) {
            class_box.index = i;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClassBox> {
        self.boxes.get(index)
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut ClassBox> {
        self.boxes.last_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassBox> {
        self.boxes.iter()
    }

    /// Replace one section's text, recomputing the box size and re-clamping.
    pub fn set_section_text(
        &mut self,
        index: usize,
        section: Section,
        text: impl Into<String>,
        canvas: Canvas,
    ) -> Result<(), ModelError> {
        let len = self.boxes.len();
        let class_box = self
            .boxes
            .get_mut(index)
            .ok_or(ModelError::IndexOutOfRange { index, len })?;
        class_box.set_section_text(section, text.into(), canvas);
        Ok(())
    }

    /// Move a box, clamped into bounds.
    pub fn set_position(
        &mut self,
        index: usize,
        x: f64,
        y: f64,
        canvas: Canvas,
    ) -> Result<(), ModelError> {
        let len = self.boxes.len();
        let class_box = self
            .boxes
            .get_mut(index)
            .ok_or(ModelError::IndexOutOfRange { index, len })?;
        class_box.set_position(x, y, canvas);
        Ok(())
    }

    /// Re-clamp every box (canvas resize).
    pub fn clamp_to_bounds(&mut self, canvas: Canvas) {
        for class_box in &mut self.boxes {
            class_box.clamp_to_bounds(canvas);
        }
    }

    /// One record per box, oldest first: the position line followed by the
    /// three bracketed section bodies. Section text is trimmed; an empty
    /// section leaves one blank line between its brackets.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for class_box in &self.boxes {
            out.push_str(&format!(
                "{} {}\n",
                Coord(class_box.x),
                Coord(class_box.y)
            ));
            for section in Section::ALL {
                out.push_str("[\n");
                out.push_str(class_box.section_text(section).trim());
                out.push_str("\n]\n");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Canvas = Canvas::DEFAULT;

    #[test]
    fn new_box_has_default_sections() {
        let mut model = ClassBoxModel::new();
        model.add(40.0, 40.0, CANVAS);
        let class_box = model.get(0).unwrap();
        for section in Section::ALL {
            assert_eq!(class_box.section_width(section), MIN_WIDTH);
            assert_eq!(class_box.section_height(section), MIN_HEIGHT);
        }
        assert_eq!(class_box.outer_width(), MIN_WIDTH + 6.0);
        assert_eq!(class_box.outer_height(), BAR_HEIGHT + 3.0 * MIN_HEIGHT + 6.0);
    }

    #[test]
    fn size_tracking() {
        let mut model = ClassBoxModel::new();
        assert_eq!(model.len(), 0);
        model.add(0.0, 0.0, CANVAS);
        model.add(2.0, 2.0, CANVAS);
        assert_eq!(model.len(), 2);
        model.remove(0).unwrap();
        assert_eq!(model.len(), 1);
        assert_eq!(model.get(0).unwrap().index, 0);
        model.clear();
        assert!(model.is_empty());
    }

    #[test]
    fn remove_out_of_range() {
        let mut model = ClassBoxModel::new();
        model.add(0.0, 0.0, CANVAS);
        assert!(matches!(
            model.remove(1),
            Err(ModelError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn section_text_grows_box() {
        let mut model = ClassBoxModel::new();
        model.add(0.0, 0.0, CANVAS);
        model
            .set_section_text(
                0,
                Section::Attributes,
                "some attribute names that run long enough to matter",
                CANVAS,
            )
            .unwrap();
        let class_box = model.get(0).unwrap();
        assert!(class_box.section_width(Section::Attributes) > MIN_WIDTH);
        // The widest section dictates the shared inner width.
        assert_eq!(
            class_box.inner_width(),
            class_box.section_width(Section::Attributes)
        );
        assert_eq!(class_box.section_width(Section::Header), MIN_WIDTH);
    }

    #[test]
    fn growth_is_monotonic_past_minimum() {
        let mut model = ClassBoxModel::new();
        model.add(0.0, 0.0, CANVAS);
        let mut text = String::from("start from a line already wider than the minimum width");
        let mut prev_width = 0.0;
        let mut prev_height = 0.0;
        for chunk in ["\nmore", " text", "\nand more"] {
            text.push_str(chunk);
            model
                .set_section_text(0, Section::Methods, text.clone(), CANVAS)
                .unwrap();
            let class_box = model.get(0).unwrap();
            assert!(class_box.section_width(Section::Methods) >= prev_width);
            assert!(class_box.section_height(Section::Methods) >= prev_height);
            prev_width = class_box.section_width(Section::Methods);
            prev_height = class_box.section_height(Section::Methods);
        }
    }

    #[test]
    fn shrinking_canvas_keeps_footprint_inside() {
        let mut model = ClassBoxModel::new();
        model.add(760.0, 420.0, CANVAS);
        let small = Canvas::new(300.0, 200.0);
        model.clamp_to_bounds(small);
        let class_box = model.get(0).unwrap();
        assert!(class_box.x >= 0.0);
        assert!(class_box.y >= 0.0);
        assert!(class_box.x + class_box.outer_width() <= small.width);
        assert!(class_box.y + class_box.outer_height() <= small.height);
    }

    #[test]
    fn oversized_box_pins_to_origin() {
        let mut model = ClassBoxModel::new();
        model.add(50.0, 50.0, CANVAS);
        // Canvas smaller than the box itself: position saturates at zero,
        // never negative.
        model.clamp_to_bounds(Canvas::new(60.0, 60.0));
        let class_box = model.get(0).unwrap();
        assert_eq!(class_box.x, 0.0);
        assert_eq!(class_box.y, 0.0);
    }

    #[test]
    fn serialize_matches_legacy_format() {
        let mut model = ClassBoxModel::new();
        model.add(0.0, 0.0, CANVAS);
        model.add(0.0, 0.0, CANVAS);
        model
            .set_section_text(0, Section::Header, "testingTop", CANVAS)
            .unwrap();
        model
            .set_section_text(0, Section::Attributes, "testing1\n\nmoreTest!", CANVAS)
            .unwrap();
        model.set_section_text(1, Section::Header, "\n", CANVAS).unwrap();
        model
            .set_section_text(1, Section::Methods, "super\nduper\n", CANVAS)
            .unwrap();

        assert_eq!(
            model.serialize(),
            "0.0 0.0\n\
             [\n\
             testingTop\n\
             ]\n\
             [\n\
             testing1\n\
             \n\
             moreTest!\n\
             ]\n\
             [\n\
             \n\
             ]\n\
             0.0 0.0\n\
             [\n\
             \n\
             ]\n\
             [\n\
             \n\
             ]\n\
             [\n\
             super\n\
             duper\n\
             ]\n"
        );
    }
}
