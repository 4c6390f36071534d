use log::{info, warn};

use super::{Command, CommandResult};
use crate::document::Deck;
use crate::event::{EditorEvent, EventBus, EventHandler, HistoryEvent};

/// Undo and redo stacks of executed commands.
///
/// Every execute/undo/redo/clear is announced on the manager's [`EventBus`] so previews and
/// toolbars can refresh.
#[derive(Debug, Default)]
pub struct UndoManager {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
    event_bus: EventBus,
}

impl UndoManager {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a command and push it onto the undo stack. A new command invalidates the redo stack.
    /// A command that fails is not recorded.
    pub fn execute(&mut self, command: Command, deck: &mut Deck) -> CommandResult {
        command.execute(deck)?;
        info!("Executed {}", command.name());
        let name = command.name();
        self.undo_stack.push(command);
        self.redo_stack.clear();
        self.event_bus
            .emit(EditorEvent::History(HistoryEvent::Executed { command: name }));
        Ok(())
    }

    /// Undo the last executed command. Nothing to undo is not an error.
    pub fn undo(&mut self, deck: &mut Deck) -> CommandResult {
        let Some(command) = self.undo_stack.pop() else {
            return Ok(());
        };
        if let Err(err) = command.undo(deck) {
            warn!("Undo of {} failed: {}", command.name(), err);
            self.undo_stack.push(command);
            return Err(err);
        }
        info!("Undid {}", command.name());
        let name = command.name();
        self.redo_stack.push(command);
        self.event_bus
            .emit(EditorEvent::History(HistoryEvent::Undone { command: name }));
        Ok(())
    }

    /// Redo the last undone command. Nothing to redo is not an error.
    pub fn redo(&mut self, deck: &mut Deck) -> CommandResult {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(());
        };
        if let Err(err) = command.execute(deck) {
            warn!("Redo of {} failed: {}", command.name(), err);
            self.redo_stack.push(command);
            return Err(err);
        }
        info!("Redid {}", command.name());
        let name = command.name();
        self.undo_stack.push(command);
        self.event_bus
            .emit(EditorEvent::History(HistoryEvent::Redone { command: name }));
        Ok(())
    }

    /// Drop all history, e.g. when a different document is opened.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        info!("Cleared command history");
        self.event_bus.emit(EditorEvent::History(HistoryEvent::Cleared));
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// The command the next `undo` would revert.
    pub fn last_command(&self) -> Option<&Command> {
        self.undo_stack.last()
    }

    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        self.event_bus.subscribe(Box::new(handler));
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
