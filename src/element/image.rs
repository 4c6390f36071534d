use egui::{Pos2, Rect, Vec2};
use log::info;
use serde::{Deserialize, Serialize};

use super::Element;
use super::common;
use crate::error::ElementError;
use crate::id_generator::ElementId;

/// Bitmap placed on a slide. Keeps the encoded bytes so the renderer (and any persistence layer)
/// can decode them again; the editor core only cares about the box.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    id: ElementId,
    data: Vec<u8>,
    natural_size: [u32; 2],
    position: Pos2,
    size: Vec2,
    rotation: f32,
}

// Debug without dumping the pixel data
impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("id", &self.id)
            .field("data_len", &self.data.len())
            .field("natural_size", &self.natural_size)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("rotation", &self.rotation)
            .finish()
    }
}

impl Image {
    /// Image with an explicit display box, for callers that already know the pixel size.
    pub fn new(data: Vec<u8>, natural_size: [u32; 2], bounds: Rect) -> Self {
        let bounds = common::non_negative(bounds);
        Self {
            id: ElementId::new(),
            data,
            natural_size,
            position: bounds.min,
            size: bounds.size(),
            rotation: 0.0,
        }
    }

    /// Decode `data` to learn its pixel size and place it at `position` at natural size.
    pub fn from_bytes(data: Vec<u8>, position: Pos2) -> Result<Self, ElementError> {
        let decoded = image::load_from_memory(&data)?;
        let natural_size = [decoded.width(), decoded.height()];
        info!(
            "Decoded image element {}x{} ({} bytes)",
            natural_size[0],
            natural_size[1],
            data.len()
        );
        let bounds = Rect::from_min_size(
            position,
            Vec2::new(natural_size[0] as f32, natural_size[1] as f32),
        );
        Ok(Self::new(data, natural_size, bounds))
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn natural_size(&self) -> [u32; 2] {
        self.natural_size
    }
}

impl Element for Image {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "image"
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
