use egui::{Pos2, Vec2};

/// Rotate `p` about `center` by `angle_degrees`.
///
/// Uses the same convention as the renderer: in a y-down space a positive angle turns clockwise on
/// screen, which is exactly how a rotated element is drawn. `rotate_point(rotate_point(p, c, a), c, -a)`
/// returns `p` up to float rounding.
pub fn rotate_point(p: Pos2, center: Pos2, angle_degrees: f32) -> Pos2 {
    center + rotate_vector(p - center, angle_degrees)
}

/// Rotate a free vector by `angle_degrees` (no pivot).
///
/// Used to carry a drag delta into, or out of, an element's unrotated frame.
pub fn rotate_vector(v: Vec2, angle_degrees: f32) -> Vec2 {
    if angle_degrees == 0.0 {
        return v;
    }
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Angle in degrees of the ray from `pivot` to `point`, measured like `atan2(dy, dx)`.
pub fn angle_from(pivot: Pos2, point: Pos2) -> f32 {
    let d = point - pivot;
    d.y.atan2(d.x).to_degrees()
}

/// Normalise an angle into `[0, 360)`.
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle % 360.0;
    if a < 0.0 { a + 360.0 } else { a }
}
