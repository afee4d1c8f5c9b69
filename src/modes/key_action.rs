use crate::view_state::{NavDirection, SentenceStep};

/// Represents a pure action to be executed by the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// Key not handled here; let GTK propagate it
    None,

    // === File Operations ===
    OpenFile,
    CloseFile,

    // === Navigation ===
    TurnPage(NavDirection),
    MoveSentence(SentenceStep),

    // === Zoom ===
    ZoomIn,
    ZoomOut,
    FitWidth,

    // === Window ===
    ToggleFullscreen,
}

impl KeyAction {
    pub fn is_handled(&self) -> bool {
        !matches!(self, KeyAction::None)
    }

    /// Actions that do nothing without an open document, so their keys propagate
    pub fn needs_document(&self) -> bool {
        matches!(
            self,
            KeyAction::CloseFile
                | KeyAction::TurnPage(_)
                | KeyAction::MoveSentence(_)
                | KeyAction::ZoomIn
                | KeyAction::ZoomOut
                | KeyAction::FitWidth
        )
    }
}
