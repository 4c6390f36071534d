use log::{debug, warn};

use crate::command::{Command, CommandResult, UndoManager};
use crate::config::EditorConfig;
use crate::document::Deck;
use crate::element::{ElementProperty, ElementType, TextMeasure};
use crate::event::EditorEvent;
use crate::id_generator::{ElementId, PageId};
use crate::state::{EditorState, TextEditSession};
use crate::view::ViewTransform;

mod selection_tool;
pub use selection_tool::{ActiveHandle, SelectionState, SelectionTool};

/// Everything a tool may read or change while handling one input event.
pub struct ToolContext<'a> {
    pub deck: &'a mut Deck,
    pub history: &'a mut UndoManager,
    pub view: &'a mut ViewTransform,
    pub editor: &'a mut EditorState,
    pub config: &'a EditorConfig,
    pub measure: &'a dyn TextMeasure,
}

impl ToolContext<'_> {
    pub fn current_page_id(&self) -> PageId {
        self.deck.current_page().id()
    }

    pub fn emit(&self, event: EditorEvent) {
        self.history.event_bus().emit(event);
    }

    /// Change the selection, announcing it when it actually changes.
    pub fn select(&mut self, element: Option<ElementId>) {
        let old = self.editor.select(element);
        if old != element {
            debug!("Selection {:?} -> {:?}", old, element);
            self.emit(EditorEvent::SelectionChanged { old, new: element });
        }
    }

    /// Start inline editing of a text box on the current page.
    pub fn begin_text_edit(&mut self, element: ElementId) {
        let page = self.deck.current_page();
        let Some(text) = page.get_element(element).and_then(ElementType::as_text) else {
            warn!("Cannot edit text of {}: not a text box on this page", element);
            return;
        };
        let session = TextEditSession::new(
            page.id(),
            element,
            text.text(),
            &self.config.text_placeholder,
        );
        debug!("Editing text of {}", element);
        self.editor.begin_text_edit(session);
        self.emit(EditorEvent::TextEditStarted { element });
    }

    /// Finish the inline edit, if any, recording a text change when the text differs.
    pub fn commit_text_edit(&mut self) -> CommandResult {
        let Some(session) = self.editor.take_text_edit() else {
            return Ok(());
        };
        let new_text = session.committed_text(&self.config.text_placeholder);

        let command = {
            let Some(page) = self.deck.page(session.page) else {
                warn!("Page of edited text {} is gone, dropping edit", session.element);
                return Ok(());
            };
            let Some(text) = page.get_element(session.element).and_then(ElementType::as_text) else {
                warn!("Edited text {} is gone, dropping edit", session.element);
                return Ok(());
            };
            if text.text() == new_text {
                None
            } else {
                Some(Command::change_property(
                    page,
                    session.element,
                    ElementProperty::Text(new_text),
                )?)
            }
        };

        let changed = command.is_some();
        if let Some(command) = command {
            self.history.execute(command, self.deck)?;
        }
        debug!("Committed text of {} (changed: {})", session.element, changed);
        self.emit(EditorEvent::TextEditCommitted {
            element: session.element,
            changed,
        });
        Ok(())
    }
}
