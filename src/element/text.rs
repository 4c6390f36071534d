use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::Element;
use super::common::{self, TEXT_INSET_X, TEXT_WRAP_INSET};
use super::property::FontSpec;
use crate::id_generator::ElementId;

/// Font metrics needed to find where the text of a text box actually sits.
///
/// Real glyph metrics live with the renderer; the editor core only needs widths and line height.
pub trait TextMeasure {
    fn char_width(&self, c: char, font: &FontSpec) -> f32;
    fn line_height(&self, font: &FontSpec) -> f32;

    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().map(|c| self.char_width(c, font)).sum()
    }
}

/// Monospace estimate: narrow glyphs are 0.6 em, wide (CJK and friends) glyphs a full em.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMeasure;

impl TextMeasure for ApproxTextMeasure {
    fn char_width(&self, c: char, font: &FontSpec) -> f32 {
        if is_wide(c) { font.size } else { font.size * 0.6 }
    }

    fn line_height(&self, font: &FontSpec) -> f32 {
        (font.size * 1.2).ceil()
    }
}

fn is_wide(c: char) -> bool {
    matches!(c as u32, 0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60)
}

/// Text box: a rotatable box holding wrapped text with an optional border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    id: ElementId,
    position: Pos2,
    size: Vec2,
    rotation: f32,
    text: String,
    font: FontSpec,
    color: Color32,
    border_color: Option<Color32>,
    border_thickness: f32,
    border_dash: Option<Vec<f32>>,
}

impl TextBox {
    pub fn new(bounds: Rect, text: impl Into<String>) -> Self {
        let bounds = common::non_negative(bounds);
        Self {
            id: ElementId::new(),
            position: bounds.min,
            size: bounds.size(),
            rotation: 0.0,
            text: text.into(),
            font: FontSpec::default(),
            color: Color32::BLACK,
            border_color: None,
            border_thickness: 0.0,
            border_dash: None,
        }
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn set_font(&mut self, font: FontSpec) {
        self.font = font;
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn border_color(&self) -> Option<Color32> {
        self.border_color
    }

    pub fn set_border_color(&mut self, color: Option<Color32>) {
        self.border_color = color;
    }

    pub fn border_thickness(&self) -> f32 {
        self.border_thickness
    }

    pub fn set_border_thickness(&mut self, thickness: f32) {
        self.border_thickness = thickness.max(0.0);
    }

    pub fn border_dash(&self) -> Option<&[f32]> {
        self.border_dash.as_deref()
    }

    pub fn set_border_dash(&mut self, dash: Option<Vec<f32>>) {
        self.border_dash = dash;
    }

    /// Wrap the text into lines no wider than the box minus its insets.
    ///
    /// Paragraph breaks are kept, empty paragraphs produce empty lines, and wrapping happens per
    /// character so long words still break.
    pub fn wrapped_lines(&self, measure: &dyn TextMeasure) -> Vec<String> {
        let max_width = self.size.x - TEXT_WRAP_INSET;
        let mut lines = Vec::new();

        for paragraph in self.text.split('\n') {
            if paragraph.is_empty() {
                lines.push(String::new());
                continue;
            }
            let mut current = String::new();
            let mut width = 0.0;
            for c in paragraph.chars() {
                let w = measure.char_width(c, &self.font);
                if width + w > max_width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    width = 0.0;
                }
                current.push(c);
                width += w;
            }
            lines.push(current);
        }

        lines
    }

    /// Unrotated region actually covered by the wrapped text, clipped to the box.
    ///
    /// Presses inside this region start inline editing; presses elsewhere in the box only select.
    pub fn content_bounds(&self, measure: &dyn TextMeasure) -> Rect {
        let line_count = self.wrapped_lines(measure).len() as f32;
        let height = (line_count * measure.line_height(&self.font)).min(self.size.y);
        let width = (self.size.x - TEXT_WRAP_INSET).max(0.0);
        Rect::from_min_size(
            Pos2::new(self.position.x + TEXT_INSET_X, self.position.y),
            Vec2::new(width, height),
        )
    }
}

impl Element for TextBox {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "text"
    }

    fn bounds(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    fn set_bounds(&mut self, bounds: Rect) {
        let bounds = common::non_negative(bounds);
        self.position = bounds.min;
        self.size = bounds.size();
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }
}
