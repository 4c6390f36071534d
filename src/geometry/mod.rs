pub mod hit_testing;
mod rotation;

pub use rotation::{angle_from, normalize_degrees, rotate_point, rotate_vector};

use egui::{Pos2, Rect, Vec2};

/// Rectangle from the `x, y, width, height` quadruple used throughout the scene model.
pub fn rect_xywh(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::from_min_size(Pos2::new(x, y), Vec2::new(width, height))
}

/// Half-open containment test matching the slide coordinate convention: the left/top edges are
/// inside, the right/bottom edges are not.
pub fn rect_contains(rect: Rect, p: Pos2) -> bool {
    p.x >= rect.min.x && p.y >= rect.min.y && p.x < rect.max.x && p.y < rect.max.y
}

/// Square of side `size` centred on `center`.
pub fn square_around(center: Pos2, size: f32) -> Rect {
    Rect::from_center_size(center, Vec2::splat(size))
}
