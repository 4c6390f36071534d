use std::cell::RefCell;
use std::collections::VecDeque;

use log::trace;

use crate::event::{EditorEvent, EventHandler};

/// Broadcasts editor events to registered handlers.
///
/// Handlers may call back into the bus while they run. An event emitted from inside a handler is
/// queued and delivered, in order, once the current event has reached every handler. A handler
/// subscribed from inside a handler starts receiving with the next queued event.
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
    /// Subscribed while `handlers` was busy delivering
    joining: RefCell<Vec<Box<dyn EventHandler>>>,
    queue: RefCell<VecDeque<EditorEvent>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handler_count())
            .field("queued", &self.queue.borrow().len())
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            joining: RefCell::new(Vec::new()),
            queue: RefCell::new(VecDeque::new()),
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        match self.handlers.try_borrow_mut() {
            Ok(mut handlers) => handlers.push(handler),
            Err(_) => self.joining.borrow_mut().push(handler),
        }
    }

    /// Deliver `event` to every handler. Called from inside a handler, the event is queued behind
    /// the one being delivered.
    pub fn emit(&self, event: EditorEvent) {
        self.queue.borrow_mut().push_back(event);
        let Ok(mut handlers) = self.handlers.try_borrow_mut() else {
            trace!("Queued event while another is being delivered");
            return;
        };

        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            for handler in handlers.iter_mut() {
                handler.handle_event(&event);
            }
            handlers.append(&mut self.joining.borrow_mut());
        }
    }

    pub fn handler_count(&self) -> usize {
        let delivering = self.handlers.try_borrow().map_or(0, |h| h.len());
        delivering + self.joining.borrow().len()
    }
}
