//! Toolbar mode state.
//!
//! Plain data consumed by the input layer to decide which diagram operation
//! a click triggers. The model itself never reads it; the previous editor's
//! global "current mode" / "current connector" singletons become values the
//! caller passes around.

use crate::connector::ConnectorKind;

/// What a click on the canvas currently does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Select and drag existing elements.
    #[default]
    Pointer,
    /// Click places a new class box.
    AddBox,
    /// Click places a new connector of the selected kind.
    AddConnector,
    /// Click removes the element under the cursor.
    Delete,
}

/// The toolbar's full selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolState {
    pub mode: EditMode,
    /// Kind used by [`EditMode::AddConnector`].
    pub connector_kind: ConnectorKind,
}

impl Default for ToolState {
    fn default() -> Self {
        ToolState {
            mode: EditMode::Pointer,
            connector_kind: ConnectorKind::Association,
        }
    }
}
