use egui::{Pos2, Rect};

// Defaults shared by every element variant. The interaction layer reads the live values from
// `EditorConfig`; these are the fallbacks used when building elements outside an editor.
pub const MIN_ELEMENT_SIZE: f32 = 20.0;
pub const LINE_MARGIN: f32 = 5.0;

/// Left inset of text inside a text box, and the total horizontal inset used for wrapping.
pub const TEXT_INSET_X: f32 = 5.0;
pub const TEXT_WRAP_INSET: f32 = 10.0;

/// Axis-aligned box around `points`, grown by `padding` on every side.
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}

/// `rect` with a width/height that can never be negative.
pub(crate) fn non_negative(rect: Rect) -> Rect {
    Rect::from_min_size(rect.min, rect.size().max(egui::Vec2::ZERO))
}
