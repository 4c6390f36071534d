//! Direct-manipulation gesture state machine.
//!
//! One gesture is a press, any number of drags and a release. The press decides what the gesture
//! does; drags mutate the element live; the release compares the element with the snapshot taken
//! at the press and records a single undoable command when something changed.
//!
//! ```text
//!              press (pan button / pan key)
//!          ┌──────────────────────────────► Panning ──┐
//!          │   press on rotation handle               │
//!          ├──────────────────────────────► Rotating ─┤
//!  ┌──────┐│   press on resize/endpoint handle        │ release  ┌──────┐
//!  │ Idle ├┼──────────────────────────────► Resizing ─┼─────────►│ Idle │
//!  └──────┘│   press on an element body               │          └──────┘
//!          └──────────────────────────────► Moving ───┘
//! ```
//!
//! A press on the text of a text box starts inline editing instead and leaves the machine idle.

use egui::{CursorIcon, Modifiers, PointerButton, Pos2};
use log::{debug, warn};

use super::ToolContext;
use crate::command::{Command, CommandResult};
use crate::config::EditorConfig;
use crate::document::Deck;
use crate::element::{Element, ElementProperty, ElementType, Geometry, TextMeasure};
use crate::geometry::{angle_from, rect_contains, rotate_vector};
use crate::id_generator::ElementId;
use crate::selection::{HandleHit, LineEnd, ResizeHandle, hit_test_handles};
use crate::state::EditorState;
use crate::view::ViewTransform;

/// Handle being dragged in a resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveHandle {
    Box(ResizeHandle),
    Line(LineEnd),
}

/// Current gesture, with the snapshots it needs to build its command on release.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionState {
    Idle,
    Moving {
        element: ElementId,
        before: Geometry,
        last: Pos2,
    },
    /// Each step is recomputed from `before` and the travel since `origin`, so size lost to the
    /// minimum clamp comes back when the pointer returns.
    Resizing {
        element: ElementId,
        handle: ActiveHandle,
        before: Geometry,
        origin: Pos2,
    },
    Rotating {
        element: ElementId,
        before: f32,
    },
    Panning {
        /// Last pointer position in screen pixels.
        last: Pos2,
    },
}

impl SelectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Moving { .. } => "moving",
            Self::Resizing { .. } => "resizing",
            Self::Rotating { .. } => "rotating",
            Self::Panning { .. } => "panning",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectionTool {
    state: SelectionState,
}

impl Default for SelectionTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionTool {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Idle,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SelectionState::Idle)
    }

    fn transition(&mut self, state: SelectionState) {
        debug!("Selection tool {} -> {}", self.state.as_str(), state.as_str());
        self.state = state;
    }

    /// Handle a button press at `screen` (canvas pixels).
    pub fn on_pointer_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        screen: Pos2,
        button: PointerButton,
    ) -> CommandResult {
        if !self.is_idle() {
            // Second button during a gesture
            return Ok(());
        }

        if button != PointerButton::Primary || ctx.editor.pan_key_held() {
            ctx.commit_text_edit()?;
            self.transition(SelectionState::Panning { last: screen });
            return Ok(());
        }

        let p = ctx.view.to_logical(screen);

        if let Some(editing) = ctx.editor.text_edit().map(|s| s.element) {
            let page = ctx.deck.current_page();
            if page
                .get_element(editing)
                .is_some_and(|e| in_text_content(e, p, ctx.measure))
            {
                return Ok(());
            }
            ctx.commit_text_edit()?;
        }

        if let Some(selected) = ctx.editor.selected() {
            match ctx.deck.current_page().get_element(selected) {
                Some(element) => {
                    if let Some(hit) = hit_test_handles(element, p, ctx.view, ctx.config) {
                        let state = match hit {
                            HandleHit::Rotate => SelectionState::Rotating {
                                element: selected,
                                before: element.rotation(),
                            },
                            HandleHit::Resize(handle) => SelectionState::Resizing {
                                element: selected,
                                handle: ActiveHandle::Box(handle),
                                before: element.geometry(),
                                origin: p,
                            },
                            HandleHit::LineEnd(end) => SelectionState::Resizing {
                                element: selected,
                                handle: ActiveHandle::Line(end),
                                before: element.geometry(),
                                origin: p,
                            },
                        };
                        self.transition(state);
                        return Ok(());
                    }
                }
                None => {
                    warn!("Selected element {} is no longer on the page", selected);
                    ctx.select(None);
                }
            }
        }

        let hit = ctx
            .deck
            .current_page()
            .element_at_position(p)
            .map(|e| (e.id(), e.geometry(), in_text_content(e, p, ctx.measure)));

        match hit {
            Some((id, _, true)) => {
                ctx.select(Some(id));
                ctx.begin_text_edit(id);
            }
            Some((id, before, false)) => {
                ctx.select(Some(id));
                self.transition(SelectionState::Moving {
                    element: id,
                    before,
                    last: p,
                });
            }
            None => ctx.select(None),
        }
        Ok(())
    }

    /// Handle pointer motion. Only does something while a gesture is active.
    pub fn on_pointer_move(
        &mut self,
        ctx: &mut ToolContext<'_>,
        screen: Pos2,
        modifiers: Modifiers,
    ) -> CommandResult {
        let p = ctx.view.to_logical(screen);
        let min_size = ctx.config.min_element_size;

        match &mut self.state {
            SelectionState::Idle => {}

            SelectionState::Panning { last } => {
                ctx.view.pan_by(screen - *last);
                *last = screen;
                ctx.emit(crate::event::EditorEvent::ViewChanged {
                    scale: ctx.view.scale(),
                    pan: ctx.view.pan(),
                });
            }

            SelectionState::Moving { element, last, .. } => {
                let delta = p - *last;
                *last = p;
                if let Some(element) = ctx.deck.current_page_mut().get_element_mut(*element) {
                    element.translate(delta);
                }
            }

            SelectionState::Rotating { element, .. } => {
                if let Some(element) = ctx.deck.current_page_mut().get_element_mut(*element) {
                    let angle = angle_from(element.pivot(), p) + 90.0;
                    element.set_rotation(angle);
                }
            }

            SelectionState::Resizing {
                element,
                handle,
                before,
                origin,
            } => {
                let Some(element) = ctx.deck.current_page_mut().get_element_mut(*element) else {
                    return Ok(());
                };
                // Handles live in the unrotated frame, so the drag is measured there too.
                let local_delta = rotate_vector(p - *origin, -element.rotation());
                match (*handle, *before) {
                    (
                        ActiveHandle::Line(end),
                        Geometry::Endpoints {
                            start: before_start,
                            end: before_end,
                        },
                    ) => {
                        let (start, finish) = match end {
                            LineEnd::Start => (before_start + local_delta, before_end),
                            LineEnd::End => (before_start, before_end + local_delta),
                        };
                        let pivot = before_start + (before_end - before_start) / 2.0;
                        reshape(element, pivot, |element| {
                            if let Some(line) = element.as_line_mut() {
                                line.set_endpoints(start, finish);
                            }
                        });
                    }
                    (ActiveHandle::Box(handle), Geometry::Bounds(original)) => {
                        let mut bounds = handle.apply_delta(original, local_delta, min_size);
                        if modifiers.shift {
                            let aspect = original.height() / original.width();
                            bounds = handle.lock_aspect(bounds, aspect, min_size);
                        }
                        reshape(element, original.center(), |element| element.set_bounds(bounds));
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Handle a button release, completing the gesture.
    pub fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>) -> CommandResult {
        self.finish_gesture(ctx)
    }

    /// End the current gesture as if the pointer had been released: record what changed and
    /// return to idle.
    pub fn finish_gesture(&mut self, ctx: &mut ToolContext<'_>) -> CommandResult {
        let state = std::mem::replace(&mut self.state, SelectionState::Idle);
        if !matches!(state, SelectionState::Idle) {
            debug!("Selection tool {} -> idle", state.as_str());
        }

        let page = ctx.deck.current_page();
        let command = match state {
            SelectionState::Idle | SelectionState::Panning { .. } => None,

            SelectionState::Rotating { element, before } => {
                match page.get_element(element).map(|e| e.rotation()) {
                    Some(after) if after != before => Some(Command::ChangeProperty {
                        page: page.id(),
                        element,
                        before: ElementProperty::Rotation(before),
                        after: ElementProperty::Rotation(after),
                    }),
                    _ => None,
                }
            }

            SelectionState::Moving { element, before, .. }
            | SelectionState::Resizing { element, before, .. } => {
                let after = page.get_element(element).map(ElementType::geometry);
                match (before, after) {
                    (Geometry::Bounds(before), Some(Geometry::Bounds(after))) if before != after => {
                        Some(Command::ChangeBounds {
                            page: page.id(),
                            element,
                            before,
                            after,
                        })
                    }
                    (
                        Geometry::Endpoints { start, end },
                        Some(Geometry::Endpoints {
                            start: new_start,
                            end: new_end,
                        }),
                    ) if (start, end) != (new_start, new_end) => Some(Command::ChangeLineEndpoints {
                        page: page.id(),
                        element,
                        before: [start, end],
                        after: [new_start, new_end],
                    }),
                    _ => None,
                }
            }
        };

        match command {
            // Already applied live; executing again only records it.
            Some(command) => ctx.history.execute(command, ctx.deck),
            None => Ok(()),
        }
    }

    /// Cursor for a pointer hovering at `screen`. Mirrors the press priorities without changing
    /// anything.
    pub fn cursor(
        &self,
        deck: &Deck,
        view: &ViewTransform,
        editor: &EditorState,
        config: &EditorConfig,
        measure: &dyn TextMeasure,
        screen: Pos2,
    ) -> CursorIcon {
        let page = deck.current_page();
        match &self.state {
            SelectionState::Panning { .. } => return CursorIcon::Grabbing,
            SelectionState::Moving { .. } => return CursorIcon::Move,
            SelectionState::Rotating { .. } => return CursorIcon::Grabbing,
            SelectionState::Resizing { element, handle, .. } => {
                return match handle {
                    ActiveHandle::Line(_) => CursorIcon::Crosshair,
                    ActiveHandle::Box(handle) => {
                        let rotation = page.get_element(*element).map_or(0.0, |e| e.rotation());
                        handle.cursor_icon(rotation)
                    }
                };
            }
            SelectionState::Idle => {}
        }

        if editor.pan_key_held() {
            return CursorIcon::Grab;
        }

        let p = view.to_logical(screen);

        if let Some(element) = editor.selected().and_then(|id| page.get_element(id)) {
            if let Some(hit) = hit_test_handles(element, p, view, config) {
                return hit.cursor_icon(element.rotation());
            }
        }

        match page.element_at_position(p) {
            Some(element) if editor.text_edit().is_some_and(|s| s.element == element.id()) => {
                if in_text_content(element, p, measure) {
                    CursorIcon::Text
                } else {
                    CursorIcon::Move
                }
            }
            Some(_) => CursorIcon::Move,
            None => CursorIcon::Default,
        }
    }
}

/// Whether logical point `p` lies on the text of a text box (not just inside its box).
fn in_text_content(element: &ElementType, p: Pos2, measure: &dyn TextMeasure) -> bool {
    match element.as_text() {
        Some(text) => rect_contains(text.content_bounds(measure), element.to_local(p)),
        None => false,
    }
}

/// Replace the element's geometry with one derived from the gesture snapshot, whose pivot was
/// `before_pivot`.
///
/// A rotated element is drawn turned about its pivot, and the pivot moves with the new geometry.
/// Shifting the element by the rotated pivot offset minus the offset itself keeps the untouched
/// edges (or the untouched line end) where they were on screen at the press.
fn reshape(
    element: &mut ElementType,
    before_pivot: Pos2,
    change: impl FnOnce(&mut ElementType),
) {
    let rotation = element.rotation();
    change(element);
    if rotation != 0.0 {
        let fix = element.pivot() - before_pivot;
        element.translate(rotate_vector(fix, rotation) - fix);
    }
}
