use egui::{Pos2, Rect};

use super::{rect_contains, square_around};

/// Handle centres on `bounds`, clockwise from the top-left corner:
/// top-left, top, top-right, right, bottom-right, bottom, bottom-left, left.
pub fn handle_positions(bounds: Rect) -> [Pos2; 8] {
    let center = bounds.center();
    [
        bounds.left_top(),
        Pos2::new(center.x, bounds.min.y),
        bounds.right_top(),
        Pos2::new(bounds.max.x, center.y),
        bounds.right_bottom(),
        Pos2::new(center.x, bounds.max.y),
        bounds.left_bottom(),
        Pos2::new(bounds.min.x, center.y),
    ]
}

/// The eight resize handle squares of side `size`, in [`handle_positions`] order.
pub fn resize_handle_rects(bounds: Rect, size: f32) -> [Rect; 8] {
    handle_positions(bounds).map(|p| square_around(p, size))
}

/// Endpoint handle squares for a line: index 0 is the start point, 1 the end point.
pub fn line_handle_rects(start: Pos2, end: Pos2, size: f32) -> [Rect; 2] {
    [square_around(start, size), square_around(end, size)]
}

/// Centre of the rotation handle in the element's unrotated frame: above the top edge, in line
/// with the pivot.
pub fn rotation_handle_center(bounds: Rect, pivot: Pos2, offset: f32) -> Pos2 {
    Pos2::new(pivot.x, bounds.min.y - offset)
}

/// Index of the first handle containing `p`.
pub fn hit_handle(handles: &[Rect], p: Pos2) -> Option<usize> {
    handles.iter().position(|handle| rect_contains(*handle, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rect_xywh;

    #[test]
    fn handles_run_clockwise_from_top_left() {
        let positions = handle_positions(rect_xywh(0.0, 0.0, 100.0, 50.0));
        assert_eq!(positions[0], Pos2::new(0.0, 0.0));
        assert_eq!(positions[1], Pos2::new(50.0, 0.0));
        assert_eq!(positions[3], Pos2::new(100.0, 25.0));
        assert_eq!(positions[4], Pos2::new(100.0, 50.0));
        assert_eq!(positions[7], Pos2::new(0.0, 25.0));
    }

    #[test]
    fn first_matching_handle_wins() {
        // Tiny box: the top-left and top handles overlap.
        let handles = resize_handle_rects(rect_xywh(0.0, 0.0, 4.0, 4.0), 8.0);
        assert_eq!(hit_handle(&handles, Pos2::new(1.0, 0.0)), Some(0));
        assert_eq!(hit_handle(&handles, Pos2::new(50.0, 50.0)), None);
    }
}
