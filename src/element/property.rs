use egui::Color32;
use serde::{Deserialize, Serialize};

/// Font description carried by text boxes. Glyph rendering is the renderer's business; the core only
/// needs the size for text-region hit testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_owned(),
            size: 16.0,
            bold: false,
            italic: false,
        }
    }
}

/// Which property a [`ElementProperty`] value addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    Rotation,
    Text,
    Font,
    TextColor,
    LineColor,
    FillColor,
    BorderColor,
    Thickness,
    BorderStyle,
}

impl PropertyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rotation => "rotation",
            Self::Text => "text",
            Self::Font => "font",
            Self::TextColor => "text color",
            Self::LineColor => "line color",
            Self::FillColor => "fill color",
            Self::BorderColor => "border color",
            Self::Thickness => "thickness",
            Self::BorderStyle => "border style",
        }
    }
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete value of one element property.
///
/// `ChangeProperty` commands store one of these for the old value and one for the new value, so a
/// property edit is plain data rather than a pair of closures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementProperty {
    /// Rotation in degrees about the element's pivot.
    Rotation(f32),
    Text(String),
    Font(FontSpec),
    TextColor(Color32),
    LineColor(Color32),
    /// `None` means no fill.
    FillColor(Option<Color32>),
    /// `None` means no border.
    BorderColor(Option<Color32>),
    /// Line thickness for lines, border thickness for boxes.
    Thickness(f32),
    /// Dash pattern together with the border thickness it was applied with: choosing a dash style
    /// on a borderless box also gives it a 1 unit border, and undo must restore both.
    BorderStyle {
        dash: Option<Vec<f32>>,
        thickness: f32,
    },
}

impl ElementProperty {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Rotation(_) => PropertyKind::Rotation,
            Self::Text(_) => PropertyKind::Text,
            Self::Font(_) => PropertyKind::Font,
            Self::TextColor(_) => PropertyKind::TextColor,
            Self::LineColor(_) => PropertyKind::LineColor,
            Self::FillColor(_) => PropertyKind::FillColor,
            Self::BorderColor(_) => PropertyKind::BorderColor,
            Self::Thickness(_) => PropertyKind::Thickness,
            Self::BorderStyle { .. } => PropertyKind::BorderStyle,
        }
    }

    /// Value of a dash-style change as the original application applied it: a zero border becomes 1.
    pub fn border_style(dash: Option<Vec<f32>>, current_thickness: f32) -> Self {
        let thickness = if current_thickness <= 0.0 { 1.0 } else { current_thickness };
        Self::BorderStyle { dash, thickness }
    }
}
