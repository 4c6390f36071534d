use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::Element;
use super::common::{LINE_MARGIN, calculate_bounds};
use crate::id_generator::ElementId;

/// Straight segment between two endpoints. Has no width/height of its own; its bounds are the box
/// around both endpoints grown by a small margin so thin lines stay clickable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    id: ElementId,
    start: Pos2,
    end: Pos2,
    rotation: f32,
    color: Color32,
    thickness: f32,
}

impl Line {
    pub fn new(start: Pos2, end: Pos2) -> Self {
        Self {
            id: ElementId::new(),
            start,
            end,
            rotation: 0.0,
            color: Color32::BLACK,
            thickness: 2.0,
        }
    }

    pub fn with_style(mut self, color: Color32, thickness: f32) -> Self {
        self.color = color;
        self.thickness = thickness;
        self
    }

    pub fn start_point(&self) -> Pos2 {
        self.start
    }

    pub fn end_point(&self) -> Pos2 {
        self.end
    }

    pub fn endpoints(&self) -> (Pos2, Pos2) {
        (self.start, self.end)
    }

    pub fn move_start_point(&mut self, delta: Vec2) {
        self.start += delta;
    }

    pub fn move_end_point(&mut self, delta: Vec2) {
        self.end += delta;
    }

    pub fn set_endpoints(&mut self, start: Pos2, end: Pos2) {
        self.start = start;
        self.end = end;
    }

    pub fn midpoint(&self) -> Pos2 {
        self.start.lerp(self.end, 0.5)
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness.max(0.0);
    }
}

impl Element for Line {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "line"
    }

    fn bounds(&self) -> Rect {
        calculate_bounds(&[self.start, self.end], LINE_MARGIN)
    }

    /// Lossy: the start point becomes the box's top-left corner and the end point its bottom-right,
    /// so direction and margin are not preserved. Undo of line edits goes through the endpoint
    /// snapshot instead.
    fn set_bounds(&mut self, bounds: Rect) {
        self.start = bounds.min;
        self.end = bounds.max;
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    fn pivot(&self) -> Pos2 {
        self.midpoint()
    }
}
