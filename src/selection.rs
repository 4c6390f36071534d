use egui::{CursorIcon, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::element::{Element, ElementType};
use crate::geometry::hit_testing::{
    hit_handle, line_handle_rects, resize_handle_rects, rotation_handle_center,
};
use crate::geometry::{angle_from, normalize_degrees, rect_contains, rotate_vector, square_around};
use crate::view::ViewTransform;

/// One of the eight resize handles of a box element, clockwise from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top_left",
            Self::Top => "top",
            Self::TopRight => "top_right",
            Self::Right => "right",
            Self::BottomRight => "bottom_right",
            Self::Bottom => "bottom",
            Self::BottomLeft => "bottom_left",
            Self::Left => "left",
        }
    }

    /// Outward direction of the handle from the box centre, in the unrotated frame.
    fn direction(self) -> Vec2 {
        match self {
            Self::TopLeft => Vec2::new(-1.0, -1.0),
            Self::Top => Vec2::new(0.0, -1.0),
            Self::TopRight => Vec2::new(1.0, -1.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::BottomRight => Vec2::new(1.0, 1.0),
            Self::Bottom => Vec2::new(0.0, 1.0),
            Self::BottomLeft => Vec2::new(-1.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
        }
    }

    /// Position of the point that stays fixed while this handle is dragged, as a fraction of the
    /// box size measured from its top-left corner. Always the opposite corner or edge midpoint.
    pub fn anchor_fraction(self) -> Vec2 {
        Vec2::new(0.5, 0.5) - self.direction() * 0.5
    }

    /// Point that stays fixed while this handle is dragged.
    pub fn anchor(self, bounds: Rect) -> Pos2 {
        bounds.min + bounds.size() * self.anchor_fraction()
    }

    /// Resize cursor for this handle on an element rotated by `rotation` degrees, snapped to the
    /// nearest of the eight compass directions so the arrow follows the rotated box.
    pub fn cursor_icon(self, rotation: f32) -> CursorIcon {
        let dir = rotate_vector(self.direction(), rotation);
        let angle = normalize_degrees(angle_from(Pos2::ZERO, dir.to_pos2()));
        let octant = ((angle / 45.0).round() as usize) % 8;
        match octant {
            0 => CursorIcon::ResizeEast,
            1 => CursorIcon::ResizeSouthEast,
            2 => CursorIcon::ResizeSouth,
            3 => CursorIcon::ResizeSouthWest,
            4 => CursorIcon::ResizeWest,
            5 => CursorIcon::ResizeNorthWest,
            6 => CursorIcon::ResizeNorth,
            _ => CursorIcon::ResizeNorthEast,
        }
    }

    /// Move the edges this handle controls by `delta` (in the element's unrotated frame), then
    /// clamp the size to `min_size` keeping the opposite edge in place.
    pub fn apply_delta(self, bounds: Rect, delta: Vec2, min_size: f32) -> Rect {
        let (mut x, mut y) = (bounds.min.x, bounds.min.y);
        let (mut w, mut h) = (bounds.width(), bounds.height());
        let (dx, dy) = (delta.x, delta.y);

        match self {
            Self::TopLeft => {
                x += dx;
                y += dy;
                w -= dx;
                h -= dy;
            }
            Self::Top => {
                y += dy;
                h -= dy;
            }
            Self::TopRight => {
                w += dx;
                y += dy;
                h -= dy;
            }
            Self::Right => w += dx,
            Self::BottomRight => {
                w += dx;
                h += dy;
            }
            Self::Bottom => h += dy,
            Self::BottomLeft => {
                x += dx;
                w -= dx;
                h += dy;
            }
            Self::Left => {
                x += dx;
                w -= dx;
            }
        }

        let resized = Rect::from_min_size(Pos2::new(x, y), Vec2::new(w, h));
        self.place(self.anchor(resized), Vec2::new(w, h).max(Vec2::splat(min_size)))
    }

    /// Reshape `bounds` to `aspect` (height / width), keeping this handle's anchor fixed.
    ///
    /// Corner and side handles keep the width and derive the height; top and bottom handles keep the
    /// height and derive the width. The result is clamped to `min_size` again.
    pub fn lock_aspect(self, bounds: Rect, aspect: f32, min_size: f32) -> Rect {
        if !(aspect > 0.0) || aspect.is_infinite() {
            return bounds;
        }
        let (mut w, mut h) = (bounds.width(), bounds.height());
        match self {
            Self::Top | Self::Bottom => w = h / aspect,
            _ => h = w * aspect,
        }
        self.place(self.anchor(bounds), Vec2::new(w, h).max(Vec2::splat(min_size)))
    }

    fn place(self, anchor: Pos2, size: Vec2) -> Rect {
        Rect::from_min_size(anchor - size * self.anchor_fraction(), size)
    }
}

/// Endpoint handle of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineEnd {
    Start,
    End,
}

impl LineEnd {
    pub fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::End => 1,
        }
    }
}

/// What a pointer landed on among the selected element's handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleHit {
    Rotate,
    Resize(ResizeHandle),
    LineEnd(LineEnd),
}

impl HandleHit {
    pub fn cursor_icon(self, rotation: f32) -> CursorIcon {
        match self {
            HandleHit::Rotate => CursorIcon::Grab,
            HandleHit::Resize(handle) => handle.cursor_icon(rotation),
            HandleHit::LineEnd(_) => CursorIcon::Crosshair,
        }
    }
}

/// Selection chrome of one element, in its unrotated frame. The renderer rotates everything by
/// `rotation` degrees about `pivot` when drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleGeometry {
    pub bounds: Rect,
    pub rotation: f32,
    pub pivot: Pos2,
    /// Eight resize handles, empty for lines.
    pub resize: Vec<Rect>,
    /// Start and end handles, only for lines.
    pub line_ends: Option<[Rect; 2]>,
    /// Rotation handle, absent for lines.
    pub rotate: Option<Rect>,
}

/// Handle squares keep their on-screen size, so their logical size depends on the zoom.
pub fn handle_geometry(
    element: &ElementType,
    view: &ViewTransform,
    config: &EditorConfig,
) -> HandleGeometry {
    let bounds = element.bounds();
    let pivot = element.pivot();
    let size = view.logical_length(config.handle_size);

    match element.as_line() {
        Some(line) => HandleGeometry {
            bounds,
            rotation: element.rotation(),
            pivot,
            resize: Vec::new(),
            line_ends: Some(line_handle_rects(line.start_point(), line.end_point(), size)),
            rotate: None,
        },
        None => HandleGeometry {
            bounds,
            rotation: element.rotation(),
            pivot,
            resize: resize_handle_rects(bounds, size).to_vec(),
            line_ends: None,
            rotate: Some(square_around(
                rotation_handle_center(bounds, pivot, config.rotation_handle_offset),
                view.logical_length(config.rotation_handle_size),
            )),
        },
    }
}

/// Hit-test the selected element's handles at logical point `p`.
///
/// The point is taken into the element's local frame first. The rotation handle wins over resize
/// handles; among resize handles the lowest index wins.
pub fn hit_test_handles(
    element: &ElementType,
    p: Pos2,
    view: &ViewTransform,
    config: &EditorConfig,
) -> Option<HandleHit> {
    let local = element.to_local(p);
    let geometry = handle_geometry(element, view, config);

    if let Some(rotate) = geometry.rotate {
        if rect_contains(rotate, local) {
            return Some(HandleHit::Rotate);
        }
    }

    if let Some(ends) = geometry.line_ends {
        return match hit_handle(&ends, local) {
            Some(0) => Some(HandleHit::LineEnd(LineEnd::Start)),
            Some(_) => Some(HandleHit::LineEnd(LineEnd::End)),
            None => None,
        };
    }

    hit_handle(&geometry.resize, local)
        .and_then(ResizeHandle::from_index)
        .map(HandleHit::Resize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rect_xywh;

    #[test]
    fn anchors_are_opposite_the_handle() {
        let bounds = rect_xywh(0.0, 0.0, 100.0, 50.0);
        assert_eq!(ResizeHandle::TopLeft.anchor(bounds), Pos2::new(100.0, 50.0));
        assert_eq!(ResizeHandle::Top.anchor(bounds), Pos2::new(50.0, 50.0));
        assert_eq!(ResizeHandle::Right.anchor(bounds), Pos2::new(0.0, 25.0));
        assert_eq!(ResizeHandle::BottomLeft.anchor(bounds), Pos2::new(100.0, 0.0));
    }

    #[test]
    fn shrinking_past_the_minimum_holds_the_opposite_edge() {
        let bounds = rect_xywh(10.0, 10.0, 100.0, 50.0);
        let resized = ResizeHandle::TopLeft.apply_delta(bounds, Vec2::new(95.0, 45.0), 20.0);
        assert_eq!(resized, rect_xywh(90.0, 40.0, 20.0, 20.0));
    }

    #[test]
    fn cursor_follows_rotation() {
        assert_eq!(ResizeHandle::Right.cursor_icon(0.0), CursorIcon::ResizeEast);
        assert_eq!(ResizeHandle::Right.cursor_icon(90.0), CursorIcon::ResizeSouth);
        assert_eq!(ResizeHandle::TopLeft.cursor_icon(45.0), CursorIcon::ResizeNorth);
    }
}
