use egui::{CursorIcon, Key, Modifiers, Pos2, Vec2};
use log::{debug, info};

use super::EditorState;
use crate::command::{Command, CommandError, CommandResult, UndoManager};
use crate::config::EditorConfig;
use crate::document::Deck;
use crate::element::{ApproxTextMeasure, Element, ElementProperty, ElementType, TextMeasure};
use crate::event::{EditorEvent, EventHandler};
use crate::id_generator::{ElementId, PageId};
use crate::input::InputEvent;
use crate::layout::PageLayout;
use crate::page::Page;
use crate::selection::{HandleGeometry, handle_geometry};
use crate::tools::{SelectionState, SelectionTool, ToolContext};
use crate::view::ViewTransform;

/// The editing core behind one canvas.
///
/// `EditorContext` owns the deck, the undo history, the view transform, the selection and the
/// gesture state machine. A shell feeds it [`InputEvent`]s and calls the toolbar operations; it
/// reads back what to draw through the query methods. Operations that change the scene go through
/// the undo history, and any gesture or text edit in progress is completed first so the history
/// stays in order.
pub struct EditorContext {
    deck: Deck,
    history: UndoManager,
    view: ViewTransform,
    editor: EditorState,
    tool: SelectionTool,
    config: EditorConfig,
    measure: Box<dyn TextMeasure>,
}

impl std::fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorContext")
            .field("deck", &self.deck)
            .field("history", &self.history)
            .field("view", &self.view)
            .field("editor", &self.editor)
            .field("tool", &self.tool)
            .finish_non_exhaustive()
    }
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorContext {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            deck: Deck::new(config.slide_size()),
            history: UndoManager::new(),
            view: ViewTransform::new(&config),
            editor: EditorState::new(),
            tool: SelectionTool::new(),
            config,
            measure: Box::new(ApproxTextMeasure),
        }
    }

    /// Replace the font metrics used for text hit-testing.
    pub fn set_text_measure(&mut self, measure: impl TextMeasure + 'static) {
        self.measure = Box::new(measure);
    }

    fn split(&mut self) -> (&mut SelectionTool, ToolContext<'_>) {
        (
            &mut self.tool,
            ToolContext {
                deck: &mut self.deck,
                history: &mut self.history,
                view: &mut self.view,
                editor: &mut self.editor,
                config: &self.config,
                measure: self.measure.as_ref(),
            },
        )
    }

    fn context(&mut self) -> ToolContext<'_> {
        self.split().1
    }

    // Input

    pub fn handle_input(&mut self, event: InputEvent) -> CommandResult {
        match event {
            InputEvent::PointerDown {
                position, button, ..
            } => {
                let (tool, mut ctx) = self.split();
                tool.on_pointer_down(&mut ctx, position, button)
            }
            InputEvent::PointerMove {
                position,
                modifiers,
            } => {
                let (tool, mut ctx) = self.split();
                tool.on_pointer_move(&mut ctx, position, modifiers)
            }
            InputEvent::PointerUp { .. } => {
                let (tool, mut ctx) = self.split();
                tool.on_pointer_up(&mut ctx)
            }
            InputEvent::Zoom { steps } => self.zoom_by(steps).map(|_| ()),
            InputEvent::KeyDown { key, modifiers } => self.on_key_down(key, modifiers),
            InputEvent::KeyUp { key } => {
                if key == Key::Space {
                    self.editor.set_pan_key_held(false);
                }
                Ok(())
            }
            InputEvent::Text(text) => {
                if let Some(session) = self.editor.text_edit_mut() {
                    session.insert_text(&text);
                }
                Ok(())
            }
            InputEvent::FocusLost => {
                self.editor.set_pan_key_held(false);
                self.finish_interaction()
            }
        }
    }

    fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> CommandResult {
        if let Some(session) = self.editor.text_edit_mut() {
            match key {
                Key::Backspace => session.backspace(),
                Key::Enter => session.insert_newline(),
                Key::Escape => return self.context().commit_text_edit(),
                _ => {}
            }
            return Ok(());
        }

        match key {
            Key::Space => self.editor.set_pan_key_held(true),
            Key::Delete | Key::Backspace => return self.delete_selected(),
            Key::Z if modifiers.command && modifiers.shift => return self.redo(),
            Key::Z if modifiers.command => return self.undo(),
            Key::Y if modifiers.command => return self.redo(),
            _ => {}
        }
        Ok(())
    }

    /// Cursor to show for a pointer hovering at `screen`.
    pub fn hover_cursor(&self, screen: Pos2) -> CursorIcon {
        self.tool.cursor(
            &self.deck,
            &self.view,
            &self.editor,
            &self.config,
            self.measure.as_ref(),
            screen,
        )
    }

    /// Complete the gesture and the text edit in progress, if any.
    pub fn finish_interaction(&mut self) -> CommandResult {
        let (tool, mut ctx) = self.split();
        tool.finish_gesture(&mut ctx)?;
        ctx.commit_text_edit()
    }

    // History

    pub fn undo(&mut self) -> CommandResult {
        self.finish_interaction()?;
        let result = self.history.undo(&mut self.deck);
        self.revalidate_selection();
        result
    }

    pub fn redo(&mut self) -> CommandResult {
        self.finish_interaction()?;
        let result = self.history.redo(&mut self.deck);
        self.revalidate_selection();
        result
    }

    /// Drop the selection if undo/redo took the element off the current page.
    fn revalidate_selection(&mut self) {
        if let Some(id) = self.editor.selected() {
            if !self.deck.current_page().contains_element(id) {
                debug!("Selected element {} left the page", id);
                self.context().select(None);
            }
        }
    }

    // Scene edits

    /// Add `element` on top of the current page and select it.
    pub fn insert_element(&mut self, element: ElementType) -> Result<ElementId, CommandError> {
        self.finish_interaction()?;
        let id = element.id();
        let command = Command::add_element(self.deck.current_page().id(), element);
        let mut ctx = self.context();
        ctx.history.execute(command, ctx.deck)?;
        ctx.select(Some(id));
        Ok(id)
    }

    pub fn delete_selected(&mut self) -> CommandResult {
        self.finish_interaction()?;
        let Some(id) = self.editor.selected() else {
            return Ok(());
        };
        let command = Command::remove_element(self.deck.current_page(), id)?;
        let mut ctx = self.context();
        ctx.history.execute(command, ctx.deck)?;
        ctx.select(None);
        Ok(())
    }

    pub fn bring_selected_to_front(&mut self) -> CommandResult {
        self.reorder_selected(Command::bring_to_front)
    }

    pub fn send_selected_to_back(&mut self) -> CommandResult {
        self.reorder_selected(Command::send_to_back)
    }

    fn reorder_selected(
        &mut self,
        build: fn(&Page, ElementId) -> Result<Command, CommandError>,
    ) -> CommandResult {
        self.finish_interaction()?;
        let Some(id) = self.editor.selected() else {
            return Ok(());
        };
        let command = build(self.deck.current_page(), id)?;
        self.history.execute(command, &mut self.deck)
    }

    pub fn set_selected_rotation(&mut self, degrees: f32) -> CommandResult {
        self.change_selected_property(ElementProperty::Rotation(degrees))
    }

    /// Change one property of the selected element as a single undoable step. Setting the value it
    /// already has records nothing.
    pub fn change_selected_property(&mut self, value: ElementProperty) -> CommandResult {
        self.finish_interaction()?;
        let Some(id) = self.editor.selected() else {
            return Ok(());
        };
        let command = Command::change_property(self.deck.current_page(), id, value)?;
        if let Command::ChangeProperty { before, after, .. } = &command {
            if before == after {
                return Ok(());
            }
        }
        self.history.execute(command, &mut self.deck)
    }

    /// Replace the current page's elements with the placeholders of `layout`.
    pub fn apply_layout(&mut self, layout: PageLayout) -> CommandResult {
        self.finish_interaction()?;
        info!("Applying layout {}", layout.as_str());
        let command = Command::apply_layout(self.deck.current_page(), layout.elements());
        let mut ctx = self.context();
        ctx.select(None);
        ctx.history.execute(command, ctx.deck)
    }

    // Pages

    pub fn next_page(&mut self) -> Result<bool, CommandError> {
        self.change_page(Deck::next_page)
    }

    pub fn previous_page(&mut self) -> Result<bool, CommandError> {
        self.change_page(Deck::previous_page)
    }

    /// Go to page `index`. Out of range indices are ignored.
    pub fn go_to_page(&mut self, index: usize) -> Result<bool, CommandError> {
        self.change_page(|deck| deck.set_current_page_index(index))
    }

    /// Append a blank page and make it current.
    pub fn add_page(&mut self) -> Result<PageId, CommandError> {
        self.change_page(|deck| {
            deck.add_page(Page::new());
            true
        })?;
        Ok(self.deck.current_page().id())
    }

    fn change_page(&mut self, navigate: impl FnOnce(&mut Deck) -> bool) -> Result<bool, CommandError> {
        self.finish_interaction()?;
        let before = self.deck.current_page_index();
        if !navigate(&mut self.deck) {
            return Ok(false);
        }
        let index = self.deck.current_page_index();
        info!("Page {} -> {}", before, index);
        let mut ctx = self.context();
        ctx.select(None);
        ctx.emit(EditorEvent::PageChanged { index });
        Ok(true)
    }

    // Documents

    /// Start over with a single blank page.
    pub fn new_document(&mut self) -> CommandResult {
        let deck = Deck::new(self.config.slide_size());
        self.open_document(deck)
    }

    /// Replace the whole deck, e.g. after loading it from disk. History does not survive this.
    pub fn open_document(&mut self, deck: Deck) -> CommandResult {
        self.finish_interaction()?;
        info!("Opening document with {} pages", deck.page_count());
        self.deck = deck;
        self.history.clear();
        let mut ctx = self.context();
        ctx.select(None);
        ctx.editor.set_pan_key_held(false);
        ctx.emit(EditorEvent::DocumentReplaced);
        Ok(())
    }

    // View

    /// Zoom by `steps` notches of the configured step. Returns whether the zoom changed.
    pub fn zoom_by(&mut self, steps: f32) -> Result<bool, CommandError> {
        self.context().commit_text_edit()?;
        let changed = self.view.zoom_by(steps, self.config.zoom_step);
        if changed {
            self.emit_view_changed();
        }
        Ok(changed)
    }

    /// Fit the slide into the viewport with the configured margin.
    pub fn zoom_to_fit(&mut self) -> Result<bool, CommandError> {
        self.context().commit_text_edit()?;
        let fitted = self
            .view
            .zoom_to_fit(self.deck.page_size(), self.config.fit_margin);
        if fitted {
            self.emit_view_changed();
        }
        Ok(fitted)
    }

    pub fn set_zoom_and_center(&mut self, scale: f32) -> CommandResult {
        self.context().commit_text_edit()?;
        self.view.set_zoom_and_center(scale, self.deck.page_size());
        self.emit_view_changed();
        Ok(())
    }

    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.view.set_viewport_size(size);
    }

    fn emit_view_changed(&self) {
        self.history.event_bus().emit(EditorEvent::ViewChanged {
            scale: self.view.scale(),
            pan: self.view.pan(),
        });
    }

    // Queries

    pub fn selected(&self) -> Option<ElementId> {
        self.editor.selected()
    }

    pub fn selected_element(&self) -> Option<&ElementType> {
        self.editor
            .selected()
            .and_then(|id| self.deck.current_page().get_element(id))
    }

    /// Selection chrome of the selected element, for drawing.
    pub fn selection_handles(&self) -> Option<HandleGeometry> {
        self.selected_element()
            .map(|element| handle_geometry(element, &self.view, &self.config))
    }

    pub fn current_page(&self) -> &Page {
        self.deck.current_page()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn history(&self) -> &UndoManager {
        &self.history
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn editor_state(&self) -> &EditorState {
        &self.editor
    }

    pub fn tool_state(&self) -> &SelectionState {
        self.tool.state()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn text_measure(&self) -> &dyn TextMeasure {
        self.measure.as_ref()
    }

    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        self.history.subscribe(handler);
    }
}
