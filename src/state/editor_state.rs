use serde::{Deserialize, Serialize};

use crate::id_generator::{ElementId, PageId};

/// Inline text edit in progress. The element keeps its old text until the edit is committed, so the
/// commit can be recorded as a single undoable change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEditSession {
    pub page: PageId,
    pub element: ElementId,
    pub buffer: String,
}

impl TextEditSession {
    /// Start editing `text`. A box still showing the placeholder starts out empty.
    pub fn new(page: PageId, element: ElementId, text: &str, placeholder: &str) -> Self {
        let buffer = if text == placeholder {
            String::new()
        } else {
            text.to_owned()
        };
        Self {
            page,
            element,
            buffer,
        }
    }

    pub fn insert_text(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn insert_newline(&mut self) {
        self.buffer.push('\n');
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Text to store on commit: blank input falls back to the placeholder.
    pub fn committed_text(&self, placeholder: &str) -> String {
        if self.buffer.trim().is_empty() {
            placeholder.to_owned()
        } else {
            self.buffer.clone()
        }
    }
}

/// Editor state shared by the tools: what is selected, whether text is being edited and whether
/// the pan key is held.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    selected: Option<ElementId>,
    text_edit: Option<TextEditSession>,
    pan_key_held: bool,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Replace the selection, returning the previous one.
    pub fn select(&mut self, element: Option<ElementId>) -> Option<ElementId> {
        std::mem::replace(&mut self.selected, element)
    }

    pub fn clear_selection(&mut self) -> Option<ElementId> {
        self.select(None)
    }

    pub fn text_edit(&self) -> Option<&TextEditSession> {
        self.text_edit.as_ref()
    }

    pub fn text_edit_mut(&mut self) -> Option<&mut TextEditSession> {
        self.text_edit.as_mut()
    }

    pub fn is_editing_text(&self) -> bool {
        self.text_edit.is_some()
    }

    pub fn begin_text_edit(&mut self, session: TextEditSession) {
        self.text_edit = Some(session);
    }

    pub fn take_text_edit(&mut self) -> Option<TextEditSession> {
        self.text_edit.take()
    }

    pub fn pan_key_held(&self) -> bool {
        self.pan_key_held
    }

    pub fn set_pan_key_held(&mut self, held: bool) {
        self.pan_key_held = held;
    }
}
