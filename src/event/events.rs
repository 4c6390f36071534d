use egui::Vec2;

use crate::id_generator::ElementId;

/// Undo history changes, named by the command involved.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEvent {
    Executed { command: &'static str },
    Undone { command: &'static str },
    Redone { command: &'static str },
    Cleared,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    History(HistoryEvent),
    SelectionChanged {
        old: Option<ElementId>,
        new: Option<ElementId>,
    },
    PageChanged {
        index: usize,
    },
    ViewChanged {
        scale: f32,
        pan: Vec2,
    },
    TextEditStarted {
        element: ElementId,
    },
    TextEditCommitted {
        element: ElementId,
        changed: bool,
    },
    DocumentReplaced,
}
