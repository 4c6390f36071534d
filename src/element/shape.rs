use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::Element;
use super::common;
use crate::id_generator::ElementId;

/// Outline drawn inside a shape's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Oval,
    /// Drawn as an ellipse filling the box; a circle is only a circle while the box stays square.
    Circle,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Oval => "oval",
            Self::Circle => "circle",
        }
    }
}

/// Filled/bordered box shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    id: ElementId,
    kind: ShapeKind,
    position: Pos2,
    size: Vec2,
    rotation: f32,
    fill_color: Option<Color32>,
    border_color: Option<Color32>,
    border_thickness: f32,
    border_dash: Option<Vec<f32>>,
}

impl Shape {
    pub fn new(kind: ShapeKind, bounds: Rect) -> Self {
        let bounds = common::non_negative(bounds);
        Self {
            id: ElementId::new(),
            kind,
            position: bounds.min,
            size: bounds.size(),
            rotation: 0.0,
            fill_color: None,
            border_color: Some(Color32::BLACK),
            border_thickness: 1.0,
            border_dash: None,
        }
    }

    pub fn rectangle(bounds: Rect) -> Self {
        Self::new(ShapeKind::Rectangle, bounds)
    }

    pub fn oval(bounds: Rect) -> Self {
        Self::new(ShapeKind::Oval, bounds)
    }

    pub fn circle(center: Pos2, radius: f32) -> Self {
        Self::new(
            ShapeKind::Circle,
            Rect::from_center_size(center, Vec2::splat(radius * 2.0)),
        )
    }

    pub fn with_fill(mut self, fill: Option<Color32>) -> Self {
        self.fill_color = fill;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn fill_color(&self) -> Option<Color32> {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Option<Color32>) {
        self.fill_color = color;
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
}

impl Element for Shape {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        self.kind.as_str()
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
