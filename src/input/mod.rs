use egui::{Context, Event, Key, Modifiers, PointerButton, Pos2, Rect};

/// Input the editor reacts to. Pointer positions are screen pixels relative to the canvas origin.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        position: Pos2,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        position: Pos2,
        modifiers: Modifiers,
    },
    /// Mouse button was released
    PointerUp {
        position: Pos2,
        button: PointerButton,
    },
    /// Zoom request, positive steps zoom in
    Zoom { steps: f32 },
    KeyDown { key: Key, modifiers: Modifiers },
    KeyUp { key: Key },
    /// Typed text
    Text(String),
    /// The window lost keyboard focus
    FocusLost,
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// Buttons pressed inside the canvas, so their release is delivered even outside it.
    pressed_in_canvas: Vec<PointerButton>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process raw egui input for a canvas occupying `canvas` and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context, canvas: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let origin = canvas.min.to_vec2();

        ctx.input(|input| {
            let modifiers = input.modifiers;
            let hover = input.pointer.hover_pos();

            if let Some(pos) = hover {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        position: pos - origin,
                        modifiers,
                    });
                }
            }
            self.last_pointer_pos = hover;

            for button in [PointerButton::Primary, PointerButton::Secondary, PointerButton::Middle] {
                if input.pointer.button_pressed(button) {
                    if let Some(pos) = hover.filter(|p| canvas.contains(*p)) {
                        self.pressed_in_canvas.push(button);
                        events.push(InputEvent::PointerDown {
                            position: pos - origin,
                            button,
                            modifiers,
                        });
                    }
                }
                if input.pointer.button_released(button) && self.pressed_in_canvas.contains(&button) {
                    self.pressed_in_canvas.retain(|b| *b != button);
                    let pos = hover
                        .or(input.pointer.interact_pos())
                        .unwrap_or(canvas.min);
                    events.push(InputEvent::PointerUp {
                        position: pos - origin,
                        button,
                    });
                }
            }

            // Ctrl+scroll and pinch both show up here, one notch per frame
            let zoom = input.zoom_delta();
            if zoom != 1.0 && hover.is_some_and(|p| canvas.contains(p)) {
                let steps = if zoom > 1.0 { 1.0 } else { -1.0 };
                events.push(InputEvent::Zoom { steps });
            }

            for event in &input.events {
                match event {
                    Event::Key { key, pressed: true, modifiers, .. } => {
                        events.push(InputEvent::KeyDown {
                            key: *key,
                            modifiers: *modifiers,
                        });
                    }
                    Event::Key { key, pressed: false, .. } => {
                        events.push(InputEvent::KeyUp { key: *key });
                    }
                    Event::Text(text) => events.push(InputEvent::Text(text.clone())),
                    Event::WindowFocused(false) => events.push(InputEvent::FocusLost),
                    _ => {}
                }
            }
        });

        events
    }
}
