//! Diagram model for a simple UML class-diagram editor.
//!
//! The model is two element lists - auto-sizing class boxes and typed
//! connectors - clamped into a bounded canvas, composed by [`Diagram`],
//! which also speaks the plain-text save format (lossless round trip,
//! lenient load). Rendering, input handling and file I/O live outside this
//! crate; see `DESIGN.md` for the boundary.
//!
//! ```
//! use suml::{ConnectorKind, Diagram, Section};
//!
//! let mut diagram = Diagram::new();
//! diagram.add_box(120.0, 80.0);
//! diagram.set_section_text(0, Section::Header, "Shape").unwrap();
//! diagram.add_connector(ConnectorKind::Generalization, 300.0, 200.0);
//!
//! let saved = diagram.serialize();
//! let mut restored = Diagram::new();
//! restored.deserialize(&saved).unwrap();
//! assert_eq!(restored, diagram);
//! ```

use pest_derive::Parser;

/// Line classifier for the save format; rules live in `suml.pest`.
#[derive(Parser)]
#[grammar = "suml.pest"]
pub struct SumlParser;

pub mod classbox;
pub mod connector;
pub mod context;
pub mod errors;
pub mod geometry;
pub mod log;
pub mod metrics;
pub mod mode;
mod parse;

pub use classbox::{ClassBox, ClassBoxModel, Section};
pub use connector::{Connector, ConnectorKind, ConnectorModel, HeadPolygon, HeadShape, LineSegment};
pub use context::{Diagram, ElementKind};
pub use errors::{DocumentError, ModelError, Truncation, TruncationReason};
pub use geometry::Canvas;
pub use mode::{EditMode, ToolState};
