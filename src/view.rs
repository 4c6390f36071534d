use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;

/// Mapping between screen pixels and logical slide units: `screen = logical * scale + pan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    scale: f32,
    pan: Vec2,
    min_scale: f32,
    max_scale: f32,
    /// Size of the canvas the slide is shown in, needed to centre the slide.
    viewport: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl ViewTransform {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            scale: 1.0,
            pan: Vec2::ZERO,
            min_scale: config.min_zoom,
            max_scale: config.max_zoom,
            viewport: Vec2::ZERO,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport = size;
    }

    pub fn to_logical(&self, screen: Pos2) -> Pos2 {
        ((screen - self.pan).to_vec2() / self.scale).to_pos2()
    }

    pub fn to_screen(&self, logical: Pos2) -> Pos2 {
        (logical.to_vec2() * self.scale + self.pan).to_pos2()
    }

    pub fn to_screen_rect(&self, logical: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(logical.min), self.to_screen(logical.max))
    }

    /// Logical length covering `screen_px` pixels at the current zoom. Handles use this so they keep a
    /// constant on-screen size.
    pub fn logical_length(&self, screen_px: f32) -> f32 {
        screen_px / self.scale
    }

    pub fn pan_by(&mut self, screen_delta: Vec2) {
        self.pan += screen_delta;
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    /// Set the zoom, clamped to the allowed range, leaving the pan untouched.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.clamp(self.min_scale, self.max_scale);
    }

    /// Step the zoom by `steps * step` (ctrl+scroll). Returns whether the zoom changed.
    pub fn zoom_by(&mut self, steps: f32, step: f32) -> bool {
        let old = self.scale;
        self.set_scale(self.scale + steps * step);
        self.scale != old
    }

    /// Set the zoom and pan so a slide of `slide_size` sits centred in the viewport.
    pub fn set_zoom_and_center(&mut self, scale: f32, slide_size: Vec2) {
        self.set_scale(scale);
        self.recenter(slide_size);
    }

    /// Largest zoom that shows the whole slide with `margin` pixels to spare, centred. Does nothing
    /// until the viewport size is known.
    pub fn zoom_to_fit(&mut self, slide_size: Vec2, margin: f32) -> bool {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return false;
        }
        let scale_x = (self.viewport.x - 2.0 * margin) / slide_size.x;
        let scale_y = (self.viewport.y - 2.0 * margin) / slide_size.y;
        self.set_zoom_and_center(scale_x.min(scale_y), slide_size);
        true
    }

    fn recenter(&mut self, slide_size: Vec2) {
        self.pan = (self.viewport - slide_size * self.scale) / 2.0;
    }
}
