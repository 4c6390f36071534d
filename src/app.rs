use egui::{Color32, Pos2, Sense};
use log::{info, warn};

use crate::command::CommandError;
use crate::config::EditorConfig;
use crate::element::{Element, ElementProperty, PropertyKind, factory};
use crate::input::InputHandler;
use crate::layout::PageLayout;
use crate::renderer::Renderer;
use crate::state::EditorContext;

/// Demo window around the editing core: a tools panel on the left and the slide canvas.
pub struct SlideEditorApp {
    editor: EditorContext,
    input: InputHandler,
    renderer: Renderer,
    /// Zoom-to-fit runs once the canvas size is known.
    fitted: bool,
    last_error: Option<String>,
}

impl SlideEditorApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            editor: EditorContext::new(config),
            input: InputHandler::new(),
            renderer: Renderer::new(),
            fitted: false,
            last_error: None,
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    fn report<T>(&mut self, result: Result<T, CommandError>) {
        if let Err(err) = result {
            warn!("Edit failed: {}", err);
            self.last_error = Some(err.to_string());
        }
    }

    /// Spot for a newly inserted element: near the slide centre.
    fn insert_origin(&self) -> Pos2 {
        let size = self.editor.deck().page_size();
        Pos2::new(size.x / 2.0 - 100.0, size.y / 2.0 - 50.0)
    }

    fn tools_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Insert");
        let origin = self.insert_origin();
        ui.horizontal_wrapped(|ui| {
            let placeholder = self.editor.config().text_placeholder.clone();
            let mut element = None;
            if ui.button("Text").clicked() {
                element = Some(factory::create_text(origin.x, origin.y, 200.0, 100.0, &placeholder));
            }
            if ui.button("Rectangle").clicked() {
                element = Some(factory::create_rectangle(origin.x, origin.y, 200.0, 100.0));
            }
            if ui.button("Oval").clicked() {
                element = Some(factory::create_oval(origin.x, origin.y, 200.0, 100.0));
            }
            if ui.button("Circle").clicked() {
                element = Some(factory::create_circle(origin + egui::vec2(50.0, 50.0), 50.0));
            }
            if ui.button("Line").clicked() {
                let end = origin + egui::vec2(200.0, 0.0);
                element = Some(factory::create_line(origin, end, Color32::BLACK, 2.0));
            }
            if let Some(element) = element {
                let result = self.editor.insert_element(element);
                self.report(result);
            }
        });

        ui.separator();
        ui.heading("Arrange");
        let has_selection = self.editor.selected().is_some();
        ui.add_enabled_ui(has_selection, |ui| {
            ui.horizontal_wrapped(|ui| {
                if ui.button("Bring to front").clicked() {
                    let result = self.editor.bring_selected_to_front();
                    self.report(result);
                }
                if ui.button("Send to back").clicked() {
                    let result = self.editor.send_selected_to_back();
                    self.report(result);
                }
                if ui.button("Delete").clicked() {
                    let result = self.editor.delete_selected();
                    self.report(result);
                }
            });
            if let Some(rotation) = self.editor.selected_element().map(|e| e.rotation()) {
                let mut degrees = rotation;
                let slider = ui.add(egui::Slider::new(&mut degrees, -180.0..=180.0).text("Rotation"));
                if slider.drag_stopped() || (slider.changed() && !slider.dragged()) {
                    let result = self.editor.set_selected_rotation(degrees);
                    self.report(result);
                }
            }
            if ui.button("Dashed border").clicked() {
                let thickness = match self
                    .editor
                    .selected_element()
                    .and_then(|e| e.property(PropertyKind::Thickness))
                {
                    Some(ElementProperty::Thickness(thickness)) => thickness,
                    _ => 0.0,
                };
                let style = ElementProperty::border_style(Some(vec![6.0, 4.0]), thickness);
                let result = self.editor.change_selected_property(style);
                self.report(result);
            }
        });

        ui.separator();
        ui.heading("Layout");
        ui.horizontal_wrapped(|ui| {
            for layout in [PageLayout::TitleOnly, PageLayout::TitleAndContent, PageLayout::TwoColumns] {
                if ui.button(layout.as_str()).clicked() {
                    let result = self.editor.apply_layout(layout);
                    self.report(result);
                }
            }
        });

        ui.separator();
        ui.heading("History");
        ui.horizontal(|ui| {
            let history = self.editor.history();
            let (can_undo, can_redo) = (history.can_undo(), history.can_redo());
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                let result = self.editor.undo();
                self.report(result);
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                let result = self.editor.redo();
                self.report(result);
            }
        });
        let history = self.editor.history();
        ui.label(format!(
            "Undo stack size: {}   Redo stack size: {}",
            history.undo_len(),
            history.redo_len()
        ));
        if let Some(command) = history.last_command() {
            ui.label(format!("Last: {}", command.name()));
        }

        ui.separator();
        ui.heading("Pages");
        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                let result = self.editor.previous_page();
                self.report(result);
            }
            let deck = self.editor.deck();
            ui.label(format!("{} / {}", deck.current_page_index() + 1, deck.page_count()));
            if ui.button("▶").clicked() {
                let result = self.editor.next_page();
                self.report(result);
            }
            if ui.button("New page").clicked() {
                let result = self.editor.add_page();
                self.report(result);
            }
        });

        ui.separator();
        ui.heading("View");
        ui.horizontal(|ui| {
            if ui.button("Fit").clicked() {
                let result = self.editor.zoom_to_fit();
                self.report(result);
            }
            if ui.button("100%").clicked() {
                let result = self.editor.set_zoom_and_center(1.0);
                self.report(result);
            }
            ui.label(format!("{:.0}%", self.editor.view().scale() * 100.0));
        });
        if ui.button("New document").clicked() {
            let result = self.editor.new_document();
            self.report(result);
        }

        if let Some(error) = &self.last_error {
            ui.separator();
            ui.colored_label(Color32::LIGHT_RED, error);
        }
    }

    fn canvas(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        self.editor.set_viewport_size(rect.size());
        if !self.fitted {
            let result = self.editor.zoom_to_fit();
            self.fitted = matches!(result, Ok(true));
            self.report(result);
        }

        for event in self.input.process_input(ctx, rect) {
            let result = self.editor.handle_input(event);
            self.report(result);
        }

        if let Some(pos) = response.hover_pos() {
            ctx.set_cursor_icon(self.editor.hover_cursor(pos - rect.min.to_vec2()));
        }

        self.renderer.render(&painter, rect, &self.editor);
    }
}

impl eframe::App for SlideEditorApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("tools_panel")
            .resizable(true)
            .default_width(200.0)
            .show(ctx, |ui| self.tools_panel(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.canvas(ctx, ui));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!(
            "Closing with {} pages and {} undoable edits",
            self.editor.deck().page_count(),
            self.editor.history().undo_len()
        );
    }
}
