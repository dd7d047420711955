//! Connector (arrow) model: the six UML connector kinds, the list that owns
//! them, and the visual geometry each one resolves to.
//!
//! A connector is two anchor points plus a kind. Everything the renderer
//! needs - the line segment, the head polygon, dash patterns, head fill -
//! is derived on demand from those three values.

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, dvec2};

use crate::errors::ModelError;
use crate::geometry::{Canvas, Coord, clamp};

/// Height of the head polygon, and with it the margin connectors keep from
/// the canvas edge so the head never leaves the drawable area.
pub const HEAD_HEIGHT: f64 = 25.0;

/// Horizontal span of a freshly added connector.
pub const DEFAULT_SPAN: f64 = 50.0;

/// Dash pattern for dashed connector lines.
const LINE_DASH: [f64; 2] = [15.0, 20.0];

/// Dash pattern for the outline of open (unfilled, non-closed) heads. The
/// on-segment is the slant length of the head, the off-segment the base, so
/// exactly the two slant edges of the triangle get stroked.
const OPEN_HEAD_DASH: [f64; 2] = [std::f64::consts::SQRT_2 * HEAD_HEIGHT, 2.0 * HEAD_HEIGHT];

/// Shape of the polygon drawn at a connector's terminal end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadShape {
    Triangle,
    Diamond,
}

/// The six UML connector kinds.
///
/// Each kind is a fixed combination of line style and head decoration; see
/// the per-kind accessors. `Display`/`FromStr` use the capitalized names the
/// save format stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    Association,
    Dependency,
    Generalization,
    Realization,
    Aggregation,
    Composition,
}

impl ConnectorKind {
    pub const ALL: [ConnectorKind; 6] = [
        ConnectorKind::Association,
        ConnectorKind::Dependency,
        ConnectorKind::Generalization,
        ConnectorKind::Realization,
        ConnectorKind::Aggregation,
        ConnectorKind::Composition,
    ];

    /// Canonical name, as stored in the save format.
    pub fn name(self) -> &'static str {
        match self {
            ConnectorKind::Association => "Association",
            ConnectorKind::Dependency => "Dependency",
            ConnectorKind::Generalization => "Generalization",
            ConnectorKind::Realization => "Realization",
            ConnectorKind::Aggregation => "Aggregation",
            ConnectorKind::Composition => "Composition",
        }
    }

    /// Whether the line itself is dashed.
    pub fn dashed_line(self) -> bool {
        matches!(self, ConnectorKind::Dependency | ConnectorKind::Realization)
    }

    pub fn head_shape(self) -> HeadShape {
        match self {
            ConnectorKind::Aggregation | ConnectorKind::Composition => HeadShape::Diamond,
            _ => HeadShape::Triangle,
        }
    }

    /// Open heads stroke only their slant edges (the `--->` look); closed
    /// heads get a solid outline.
    pub fn open_head(self) -> bool {
        matches!(self, ConnectorKind::Association | ConnectorKind::Dependency)
    }

    /// Only Composition fills its diamond.
    pub fn filled_head(self) -> bool {
        matches!(self, ConnectorKind::Composition)
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConnectorKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConnectorKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ModelError::InvalidKind {
                kind: s.to_string(),
            })
    }
}

/// The stroked portion of a connector. Ends at the head's base inset, not at
/// the anchor, so the line never pokes past an open head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: DVec2,
    pub end: DVec2,
    /// Empty for solid lines, `[on, off]` for dashed ones.
    pub dash: &'static [f64],
}

/// The head polygon at a connector's terminal end.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadPolygon {
    /// 3 vertices for triangles, 4 for diamonds, leading with the anchor.
    pub vertices: Vec<DVec2>,
    /// Empty for closed heads, `[on, off]` for open ones.
    pub outline_dash: &'static [f64],
    /// Solid black fill (Composition only).
    pub filled: bool,
}

/// A directed connector between two anchor points.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    /// Position in the owning list. Dense; renumbered on every removal.
    pub index: usize,
    pub kind: ConnectorKind,
    pub origin: DVec2,
    pub end: DVec2,
}

impl Connector {
    /// Point on the origin->end line `inset` units short of `end`.
    fn inset_point(&self, inset: f64) -> DVec2 {
        let length = self.origin.distance(self.end);
        if length == 0.0 {
            return self.end;
        }
        self.origin + (self.end - self.origin) * ((length - inset) / length)
    }

    /// The head polygon for this connector's kind.
    ///
    /// Triangle: base centered `HEAD_HEIGHT` short of the anchor, half-base
    /// equal to the height. Diamond: same wing vertices plus a proximal
    /// vertex another `HEAD_HEIGHT` in, mirroring the anchor.
    pub fn head_polygon(&self) -> HeadPolygon {
        let base = self.inset_point(HEAD_HEIGHT);
        // Perpendicular wing offset; zero-length connectors collapse the
        // whole head onto the anchor.
        let along = self.end - base;
        let wing = dvec2(-along.y, along.x);

        let vertices = match self.kind.head_shape() {
            HeadShape::Triangle => vec![self.end, base + wing, base - wing],
            HeadShape::Diamond => {
                let proximal = self.inset_point(2.0 * HEAD_HEIGHT);
                vec![self.end, base + wing, proximal, base - wing]
            }
        };

        HeadPolygon {
            vertices,
            outline_dash: if self.kind.open_head() {
                &OPEN_HEAD_DASH
            } else {
                &[]
            },
            filled: self.kind.filled_head(),
        }
    }

    /// The stroked line, running from the origin to the head's base inset
    /// (the proximal diamond vertex for diamond heads).
    pub fn line_segment(&self) -> LineSegment {
        let inset = match self.kind.head_shape() {
            HeadShape::Triangle => HEAD_HEIGHT,
            HeadShape::Diamond => 2.0 * HEAD_HEIGHT,
        };
        LineSegment {
            start: self.origin,
            end: self.inset_point(inset),
            dash: if self.kind.dashed_line() {
                &LINE_DASH
            } else {
                &[]
            },
        }
    }

    /// Re-clamp both endpoints into the canvas, head margin included.
    ///
    /// Per axis, the endpoint nearer the low edge is clamped first and the
    /// other one is held at the preserved span where the bounds allow, so a
    /// canvas shrink slides the connector instead of folding it.
    pub fn clamp_to_bounds(&mut self, canvas: Canvas) {
        let span_x = (self.origin.x - self.end.x).abs();
        if self.origin.x < self.end.x {
            self.origin.x = clamp(
                self.origin.x,
                HEAD_HEIGHT,
                canvas.width - HEAD_HEIGHT - span_x,
            );
            self.end.x = clamp(self.end.x, span_x + HEAD_HEIGHT, canvas.width - HEAD_HEIGHT);
        } else {
            self.end.x = clamp(self.end.x, HEAD_HEIGHT, canvas.width - HEAD_HEIGHT - span_x);
            self.origin.x = clamp(
                self.origin.x,
                span_x + HEAD_HEIGHT,
                canvas.width - HEAD_HEIGHT,
            );
        }

        let span_y = (self.origin.y - self.end.y).abs();
        if self.origin.y < self.end.y {
            self.origin.y = clamp(
                self.origin.y,
                HEAD_HEIGHT,
                canvas.height - HEAD_HEIGHT - span_y,
            );
            self.end.y = clamp(
                self.end.y,
                span_y + HEAD_HEIGHT,
                canvas.height - HEAD_HEIGHT,
            );
        } else {
            self.end.y = clamp(
                self.end.y,
                HEAD_HEIGHT,
                canvas.height - HEAD_HEIGHT - span_y,
            );
            self.origin.y = clamp(
                self.origin.y,
                span_y + HEAD_HEIGHT,
                canvas.height - HEAD_HEIGHT,
            );
        }
    }
}

/// Ordered list of connectors. Indices are the only identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectorModel {
    connectors: Vec<Connector>,
}

impl ConnectorModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a default-length horizontal connector starting at `(x, y)`.
    ///
    /// The raw position is kept verbatim; clamping only runs on explicit
    /// endpoint moves and canvas resizes.
    pub fn add(&mut self, kind: ConnectorKind, x: f64, y: f64) {
        self.add_with_ends(kind, dvec2(x, y), dvec2(x + DEFAULT_SPAN, y));
    }

    /// Append a connector with explicit endpoints.
    pub fn add_with_ends(&mut self, kind: ConnectorKind, origin: DVec2, end: DVec2) {
        crate::log::debug!(kind = %kind, ?origin, ?end, "add connector");
        self.connectors.push(Connector {
            index: self.connectors.len(),
            kind,
            origin,
            end,
        });
    }

    /// Remove the connector at `index` and renumber the rest.
    pub fn remove(&mut self, index: usize) -> Result<(), ModelError> {
        if index >= self.connectors.len() {
            return Err(ModelError::IndexOutOfRange {
                index,
                len: self.connectors.len(),
            });
        }
        self.connectors.remove(index);
        for (i, connector) in self.connectors.iter_mut().enumerate().skip(index) {
            connector.index = i;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.connectors.clear();
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Connector> {
        self.connectors.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.iter()
    }

    /// Move a connector's endpoints, then re-clamp it into the canvas.
    pub fn set_position(
        &mut self,
        index: usize,
        origin: DVec2,
        end: DVec2,
        canvas: Canvas,
    ) -> Result<(), ModelError> {
        let len = self.connectors.len();
        let connector = self
            .connectors
            .get_mut(index)
            .ok_or(ModelError::IndexOutOfRange { index, len })?;
        connector.origin = origin;
        connector.end = end;
        connector.clamp_to_bounds(canvas);
        Ok(())
    }

    /// Re-clamp every connector (canvas resize).
    pub fn clamp_to_bounds(&mut self, canvas: Canvas) {
        for connector in &mut self.connectors {
            connector.clamp_to_bounds(canvas);
        }
    }

    /// One `"{x0} {y0} {x1} {y1} {Kind}"` line per connector, oldest first.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for c in &self.connectors {
            out.push_str(&format!(
                "{} {} {} {} {}\n",
                Coord(c.origin.x),
                Coord(c.origin.y),
                Coord(c.end.x),
                Coord(c.end.y),
                c.kind
            ));
        }
        out
    }
}
