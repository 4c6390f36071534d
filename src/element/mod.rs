use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

mod common;
pub(crate) mod image;
pub(crate) mod line;
pub(crate) mod property;
pub(crate) mod shape;
pub(crate) mod text;

pub use common::{LINE_MARGIN, MIN_ELEMENT_SIZE, TEXT_INSET_X, TEXT_WRAP_INSET};
pub use self::image::Image;
pub use self::line::Line;
pub use self::property::{ElementProperty, FontSpec, PropertyKind};
pub use self::shape::{Shape, ShapeKind};
pub use self::text::{ApproxTextMeasure, TextBox, TextMeasure};

use crate::error::CommandError;
use crate::geometry::{rect_contains, rotate_point};
use crate::id_generator::ElementId;

/// Capabilities every slide element provides to the editor core.
pub trait Element {
    /// Get the unique identifier for this element
    fn id(&self) -> ElementId;

    /// Get the element type as a string
    fn element_type(&self) -> &'static str;

    /// Unrotated axis-aligned box in logical coordinates.
    fn bounds(&self) -> Rect;

    /// Replace the unrotated box.
    fn set_bounds(&mut self, bounds: Rect);

    /// Translate the element by the given delta
    fn translate(&mut self, delta: Vec2);

    /// Rotation in degrees about [`Element::pivot`].
    fn rotation(&self) -> f32;

    fn set_rotation(&mut self, degrees: f32);

    /// Point the element is rotated about.
    fn pivot(&self) -> Pos2 {
        self.bounds().center()
    }

    /// Map a logical point into the element's own unrotated frame.
    fn to_local(&self, p: Pos2) -> Pos2 {
        rotate_point(p, self.pivot(), -self.rotation())
    }

    /// Rotation-aware containment: the point is taken into the local frame and tested against the
    /// unrotated bounds.
    fn contains(&self, p: Pos2) -> bool {
        rect_contains(self.bounds(), self.to_local(p))
    }
}

/// Enumeration of all element types on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementType {
    Text(TextBox),
    Line(Line),
    Shape(Shape),
    Image(Image),
}

/// Snapshot of the geometry a gesture can change.
///
/// Boxes are captured as their bounds, lines as their exact endpoints since a line's bounds cannot
/// be turned back into endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Bounds(Rect),
    Endpoints { start: Pos2, end: Pos2 },
}

impl ElementType {
    pub fn is_line(&self) -> bool {
        matches!(self, ElementType::Line(_))
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            ElementType::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_line_mut(&mut self) -> Option<&mut Line> {
        match self {
            ElementType::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextBox> {
        match self {
            ElementType::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextBox> {
        match self {
            ElementType::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn geometry(&self) -> Geometry {
        match self {
            ElementType::Line(line) => Geometry::Endpoints {
                start: line.start_point(),
                end: line.end_point(),
            },
            other => Geometry::Bounds(other.bounds()),
        }
    }

    /// Restore a snapshot taken with [`ElementType::geometry`]. Returns `false` when the snapshot
    /// kind does not match the element.
    pub fn set_geometry(&mut self, geometry: Geometry) -> bool {
        match (self, geometry) {
            (ElementType::Line(line), Geometry::Endpoints { start, end }) => {
                line.set_endpoints(start, end);
                true
            }
            (ElementType::Line(_), Geometry::Bounds(_)) => false,
            (element, Geometry::Bounds(bounds)) => {
                element.set_bounds(bounds);
                true
            }
            (_, Geometry::Endpoints { .. }) => false,
        }
    }

    /// Current value of `kind`, or `None` when the element has no such property.
    pub fn property(&self, kind: PropertyKind) -> Option<ElementProperty> {
        use ElementProperty as P;
        match (self, kind) {
            (element, PropertyKind::Rotation) => Some(P::Rotation(element.rotation())),

            (ElementType::Text(t), PropertyKind::Text) => Some(P::Text(t.text().to_owned())),
            (ElementType::Text(t), PropertyKind::Font) => Some(P::Font(t.font().clone())),
            (ElementType::Text(t), PropertyKind::TextColor) => Some(P::TextColor(t.color())),
            (ElementType::Text(t), PropertyKind::BorderColor) => {
                Some(P::BorderColor(t.border_color()))
            }
            (ElementType::Text(t), PropertyKind::Thickness) => {
                Some(P::Thickness(t.border_thickness()))
            }
            (ElementType::Text(t), PropertyKind::BorderStyle) => Some(P::BorderStyle {
                dash: t.border_dash().map(<[f32]>::to_vec),
                thickness: t.border_thickness(),
            }),

            (ElementType::Line(l), PropertyKind::LineColor) => Some(P::LineColor(l.color())),
            (ElementType::Line(l), PropertyKind::Thickness) => Some(P::Thickness(l.thickness())),

            (ElementType::Shape(s), PropertyKind::FillColor) => Some(P::FillColor(s.fill_color())),
            (ElementType::Shape(s), PropertyKind::BorderColor) => {
                Some(P::BorderColor(s.border_color()))
            }
            (ElementType::Shape(s), PropertyKind::Thickness) => {
                Some(P::Thickness(s.border_thickness()))
            }
            (ElementType::Shape(s), PropertyKind::BorderStyle) => Some(P::BorderStyle {
                dash: s.border_dash().map(<[f32]>::to_vec),
                thickness: s.border_thickness(),
            }),

            _ => None,
        }
    }

    /// Assign a property value. Re-assigning the current value is a no-op, which is what makes
    /// re-executing a property command safe.
    pub fn apply_property(&mut self, value: &ElementProperty) -> Result<(), CommandError> {
        use ElementProperty as P;
        match (&mut *self, value) {
            (element, P::Rotation(degrees)) => element.set_rotation(*degrees),

            (ElementType::Text(t), P::Text(text)) => t.set_text(text.clone()),
            (ElementType::Text(t), P::Font(font)) => t.set_font(font.clone()),
            (ElementType::Text(t), P::TextColor(color)) => t.set_color(*color),
            (ElementType::Text(t), P::BorderColor(color)) => t.set_border_color(*color),
            (ElementType::Text(t), P::Thickness(thickness)) => t.set_border_thickness(*thickness),
            (ElementType::Text(t), P::BorderStyle { dash, thickness }) => {
                t.set_border_dash(dash.clone());
                t.set_border_thickness(*thickness);
            }

            (ElementType::Line(l), P::LineColor(color)) => l.set_color(*color),
            (ElementType::Line(l), P::Thickness(thickness)) => l.set_thickness(*thickness),

            (ElementType::Shape(s), P::FillColor(color)) => s.set_fill_color(*color),
            (ElementType::Shape(s), P::BorderColor(color)) => s.set_border_color(*color),
            (ElementType::Shape(s), P::Thickness(thickness)) => s.set_border_thickness(*thickness),
            (ElementType::Shape(s), P::BorderStyle { dash, thickness }) => {
                s.set_border_dash(dash.clone());
                s.set_border_thickness(*thickness);
            }

            (element, value) => {
                return Err(CommandError::PropertyMismatch {
                    property: value.kind(),
                    element: element.element_type(),
                });
            }
        }
        Ok(())
    }
}

impl Element for ElementType {
    fn id(&self) -> ElementId {
        match self {
            ElementType::Text(t) => t.id(),
            ElementType::Line(l) => l.id(),
            ElementType::Shape(s) => s.id(),
            ElementType::Image(i) => i.id(),
        }
    }

    fn element_type(&self) -> &'static str {
        match self {
            ElementType::Text(t) => t.element_type(),
            ElementType::Line(l) => l.element_type(),
            ElementType::Shape(s) => s.element_type(),
            ElementType::Image(i) => i.element_type(),
        }
    }

    fn bounds(&self) -> Rect {
        match self {
            ElementType::Text(t) => t.bounds(),
            ElementType::Line(l) => l.bounds(),
            ElementType::Shape(s) => s.bounds(),
            ElementType::Image(i) => i.bounds(),
        }
    }

    fn set_bounds(&mut self, bounds: Rect) {
        match self {
            ElementType::Text(t) => t.set_bounds(bounds),
            ElementType::Line(l) => l.set_bounds(bounds),
            ElementType::Shape(s) => s.set_bounds(bounds),
            ElementType::Image(i) => i.set_bounds(bounds),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            ElementType::Text(t) => t.translate(delta),
            ElementType::Line(l) => l.translate(delta),
            ElementType::Shape(s) => s.translate(delta),
            ElementType::Image(i) => i.translate(delta),
        }
    }

    fn rotation(&self) -> f32 {
        match self {
            ElementType::Text(t) => t.rotation(),
            ElementType::Line(l) => l.rotation(),
            ElementType::Shape(s) => s.rotation(),
            ElementType::Image(i) => i.rotation(),
        }
    }

    fn set_rotation(&mut self, degrees: f32) {
        match self {
            ElementType::Text(t) => t.set_rotation(degrees),
            ElementType::Line(l) => l.set_rotation(degrees),
            ElementType::Shape(s) => s.set_rotation(degrees),
            ElementType::Image(i) => i.set_rotation(degrees),
        }
    }

    fn pivot(&self) -> Pos2 {
        match self {
            ElementType::Line(l) => l.pivot(),
            other => other.bounds().center(),
        }
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;
    use crate::error::ElementError;
    use crate::geometry::rect_xywh;
    use egui::Color32;

    pub fn create_text(x: f32, y: f32, width: f32, height: f32, text: &str) -> ElementType {
        ElementType::Text(TextBox::new(rect_xywh(x, y, width, height), text))
    }

    pub fn create_line(start: Pos2, end: Pos2, color: Color32, thickness: f32) -> ElementType {
        ElementType::Line(Line::new(start, end).with_style(color, thickness))
    }

    pub fn create_rectangle(x: f32, y: f32, width: f32, height: f32) -> ElementType {
        ElementType::Shape(Shape::rectangle(rect_xywh(x, y, width, height)))
    }

    pub fn create_oval(x: f32, y: f32, width: f32, height: f32) -> ElementType {
        ElementType::Shape(Shape::oval(rect_xywh(x, y, width, height)))
    }

    pub fn create_circle(center: Pos2, radius: f32) -> ElementType {
        ElementType::Shape(Shape::circle(center, radius))
    }

    pub fn create_image(data: Vec<u8>, position: Pos2) -> Result<ElementType, ElementError> {
        Ok(ElementType::Image(Image::from_bytes(data, position)?))
    }
}
