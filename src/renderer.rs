use egui::emath::Rot2;
use egui::epaint::{Mesh, TextShape};
use egui::{Color32, FontFamily, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use log::warn;

use crate::element::{Element, ElementType, FontSpec, Image, Line, Shape as SlideShape, ShapeKind, TextBox};
use crate::geometry::rotate_point;
use crate::selection::HandleGeometry;
use crate::state::EditorContext;
use crate::texture_manager::TextureManager;
use crate::view::ViewTransform;

const SELECTION_COLOR: Color32 = Color32::from_rgb(30, 120, 230);
const ELLIPSE_SEGMENTS: usize = 48;

/// Paints the current page and the selection chrome of an [`EditorContext`] with egui.
#[derive(Debug, Default)]
pub struct Renderer {
    textures: TextureManager,
}

/// Logical to canvas-pixel mapping for one frame.
struct Canvas<'a> {
    painter: &'a Painter,
    view: &'a ViewTransform,
    origin: Vec2,
}

impl Canvas<'_> {
    fn to_screen(&self, p: Pos2) -> Pos2 {
        self.view.to_screen(p) + self.origin
    }

    /// Corners of `bounds` rotated about `pivot`, in screen space, clockwise from top-left.
    fn rotated_corners(&self, bounds: Rect, pivot: Pos2, rotation: f32) -> Vec<Pos2> {
        [
            bounds.left_top(),
            bounds.right_top(),
            bounds.right_bottom(),
            bounds.left_bottom(),
        ]
        .into_iter()
        .map(|p| self.to_screen(rotate_point(p, pivot, rotation)))
        .collect()
    }

    fn length(&self, logical: f32) -> f32 {
        logical * self.view.scale()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, painter: &Painter, canvas_rect: Rect, editor: &EditorContext) {
        self.textures.begin_frame();
        let canvas = Canvas {
            painter,
            view: editor.view(),
            origin: canvas_rect.min.to_vec2(),
        };

        painter.rect_filled(canvas_rect, 0.0, Color32::from_gray(60));
        let slide = Rect::from_min_size(Pos2::ZERO, editor.deck().page_size());
        let slide_screen = Rect::from_min_max(canvas.to_screen(slide.min), canvas.to_screen(slide.max));
        painter.rect_filled(slide_screen, 0.0, Color32::WHITE);

        let editing = editor.editor_state().text_edit();
        for element in editor.current_page().elements() {
            match element {
                ElementType::Text(text) => {
                    let buffer = editing
                        .filter(|session| session.element == text.id())
                        .map(|session| session.buffer.as_str());
                    paint_text(&canvas, text, buffer, editor);
                }
                ElementType::Line(line) => paint_line(&canvas, line),
                ElementType::Shape(shape) => paint_shape(&canvas, shape),
                ElementType::Image(image) => self.paint_image(&canvas, image),
            }
        }

        painter.rect_stroke(slide_screen, 0.0, Stroke::new(1.0, Color32::from_gray(120)));

        if let Some(handles) = editor.selection_handles() {
            paint_selection(&canvas, &handles);
        }
    }

    fn paint_image(&mut self, canvas: &Canvas<'_>, image: &Image) {
        let bounds = image.bounds();
        let screen = Rect::from_min_max(canvas.to_screen(bounds.min), canvas.to_screen(bounds.max));
        match self.textures.texture_for(canvas.painter.ctx(), image) {
            Ok(texture) => {
                let mut mesh = Mesh::with_texture(texture);
                mesh.add_rect_with_uv(
                    screen,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
                mesh.rotate(
                    Rot2::from_angle(image.rotation().to_radians()),
                    canvas.to_screen(image.pivot()),
                );
                canvas.painter.add(Shape::mesh(mesh));
            }
            Err(err) => {
                warn!("Cannot draw image {}: {}", image.id(), err);
                let corners = canvas.rotated_corners(bounds, image.pivot(), image.rotation());
                canvas.painter.add(Shape::convex_polygon(
                    corners,
                    Color32::from_gray(200),
                    Stroke::new(1.0, Color32::from_gray(100)),
                ));
            }
        }
    }
}

fn paint_line(canvas: &Canvas<'_>, line: &Line) {
    let pivot = line.pivot();
    let (start, end) = line.endpoints();
    let points = [start, end].map(|p| canvas.to_screen(rotate_point(p, pivot, line.rotation())));
    canvas.painter.line_segment(
        points,
        Stroke::new(canvas.length(line.thickness()), line.color()),
    );
}

fn paint_shape(canvas: &Canvas<'_>, shape: &SlideShape) {
    let bounds = shape.bounds();
    let pivot = shape.pivot();
    let outline: Vec<Pos2> = match shape.kind() {
        ShapeKind::Rectangle => canvas.rotated_corners(bounds, pivot, shape.rotation()),
        ShapeKind::Oval | ShapeKind::Circle => (0..ELLIPSE_SEGMENTS)
            .map(|i| {
                let t = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
                let p = bounds.center() + Vec2::new(t.cos(), t.sin()) * bounds.size() / 2.0;
                canvas.to_screen(rotate_point(p, pivot, shape.rotation()))
            })
            .collect(),
    };

    let fill = shape.fill_color().unwrap_or(Color32::TRANSPARENT);
    canvas
        .painter
        .add(Shape::convex_polygon(outline.clone(), fill, Stroke::NONE));

    if let Some(color) = shape.border_color() {
        let stroke = Stroke::new(canvas.length(shape.border_thickness()), color);
        paint_border(canvas, outline, stroke, shape.border_dash());
    }
}

fn paint_text(canvas: &Canvas<'_>, text: &TextBox, buffer: Option<&str>, editor: &EditorContext) {
    let bounds = text.bounds();
    let pivot = text.pivot();
    let rotation = text.rotation();

    if let Some(color) = text.border_color() {
        let stroke = Stroke::new(canvas.length(text.border_thickness()), color);
        let outline = canvas.rotated_corners(bounds, pivot, rotation);
        paint_border(canvas, outline, stroke, text.border_dash());
    }

    let measure = editor.text_measure();
    // While editing, the buffer is laid out in place of the stored text.
    let shown = match buffer {
        Some(buffer) => {
            let mut preview = text.clone();
            preview.set_text(buffer);
            preview
        }
        None => text.clone(),
    };
    let font = font_id(text.font(), canvas.view.scale());
    let line_height = measure.line_height(text.font());
    let content = shown.content_bounds(measure);

    for (i, line) in shown.wrapped_lines(measure).into_iter().enumerate() {
        let top_left = Pos2::new(content.min.x, bounds.min.y + i as f32 * line_height);
        if top_left.y >= bounds.max.y {
            break;
        }
        let origin = canvas.to_screen(rotate_point(top_left, pivot, rotation));
        let galley = canvas
            .painter
            .layout_no_wrap(line, font.clone(), text.color());
        canvas.painter.add(
            TextShape::new(origin, galley, text.color()).with_angle(rotation.to_radians()),
        );
    }

    if buffer.is_some() {
        let outline = canvas.rotated_corners(bounds, pivot, rotation);
        paint_border(canvas, outline, Stroke::new(1.0, SELECTION_COLOR), Some(&[4.0, 4.0]));
    }
}

fn font_id(font: &FontSpec, scale: f32) -> FontId {
    let family = match font.family.as_str() {
        "monospace" | "Monospaced" => FontFamily::Monospace,
        _ => FontFamily::Proportional,
    };
    FontId::new(font.size * scale, family)
}

fn paint_border(canvas: &Canvas<'_>, mut outline: Vec<Pos2>, stroke: Stroke, dash: Option<&[f32]>) {
    match dash {
        Some([dash, gap, ..]) => {
            if let Some(first) = outline.first().copied() {
                outline.push(first);
            }
            let scale = canvas.view.scale();
            canvas.painter.extend(Shape::dashed_line(
                &outline,
                stroke,
                dash * scale,
                gap * scale,
            ));
        }
        Some([dash]) => paint_border(canvas, outline, stroke, Some(&[*dash, *dash])),
        _ => {
            canvas.painter.add(Shape::closed_line(outline, stroke));
        }
    }
}

fn paint_selection(canvas: &Canvas<'_>, handles: &HandleGeometry) {
    let stroke = Stroke::new(1.0, SELECTION_COLOR);
    let square = |rect: Rect| {
        let corners = canvas.rotated_corners(rect, handles.pivot, handles.rotation);
        canvas
            .painter
            .add(Shape::convex_polygon(corners, Color32::WHITE, stroke));
    };

    if let Some(ends) = handles.line_ends {
        ends.into_iter().for_each(square);
        return;
    }

    let outline = canvas.rotated_corners(handles.bounds, handles.pivot, handles.rotation);
    canvas.painter.add(Shape::closed_line(outline, stroke));

    if let Some(rotate) = handles.rotate {
        let top_middle = Pos2::new(rotate.center().x, handles.bounds.min.y);
        let points = [top_middle, rotate.center()]
            .map(|p| canvas.to_screen(rotate_point(p, handles.pivot, handles.rotation)));
        canvas.painter.line_segment(points, stroke);
        canvas
            .painter
            .circle(points[1], rotate.width() * canvas.view.scale() / 2.0, Color32::WHITE, stroke);
    }

    handles.resize.iter().copied().for_each(square);
}
