use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use log::debug;

use crate::element::{Element, Image};
use crate::error::ElementError;
use crate::id_generator::ElementId;

/// GPU textures of image elements, decoded once and dropped when unused for a while.
pub struct TextureManager {
    /// Texture and the frame it was last drawn in, per image element
    textures: HashMap<ElementId, (TextureHandle, u64)>,
    current_frame: u64,
    max_cache_size: usize,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("textures", &self.textures.len())
            .field("current_frame", &self.current_frame)
            .field("max_cache_size", &self.max_cache_size)
            .finish()
    }
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new(64)
    }
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            textures: HashMap::new(),
            current_frame: 0,
            max_cache_size,
        }
    }

    /// Should be called once at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Texture showing `image`, decoding and uploading it on first use.
    pub fn texture_for(&mut self, ctx: &Context, image: &Image) -> Result<TextureId, ElementError> {
        let id = image.id();
        if let Some((handle, last_used)) = self.textures.get_mut(&id) {
            *last_used = self.current_frame;
            return Ok(handle.id());
        }

        self.prune_cache_if_needed();

        let color_image = decode(image.data())?;
        let handle = ctx.load_texture(format!("image_{id}"), color_image, TextureOptions::LINEAR);
        debug!("Uploaded texture for image {}", id);
        let texture_id = handle.id();
        self.textures.insert(id, (handle, self.current_frame));
        Ok(texture_id)
    }

    pub fn invalidate_element(&mut self, id: ElementId) {
        self.textures.remove(&id);
    }

    fn prune_cache_if_needed(&mut self) {
        if self.textures.len() < self.max_cache_size {
            return;
        }
        let mut entries: Vec<(ElementId, u64)> = self
            .textures
            .iter()
            .map(|(id, (_, frame))| (*id, *frame))
            .collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = self.textures.len() + 1 - self.max_cache_size.max(1);
        for (id, _) in entries.into_iter().take(to_remove) {
            self.textures.remove(&id);
        }
    }

    pub fn clear_cache(&mut self) {
        self.textures.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.textures.len()
    }
}

fn decode(data: &[u8]) -> Result<ColorImage, ElementError> {
    let image = image::load_from_memory(data)?;
    let size = [image.width() as usize, image.height() as usize];
    let rgba = image.to_rgba8();
    Ok(ColorImage::from_rgba_unmultiplied(
        size,
        rgba.as_flat_samples().as_slice(),
    ))
}
