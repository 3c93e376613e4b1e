use crate::{
    layers::image::{ImageId, ImageStore},
    prelude::HashMap,
};
use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

/// GPU textures for the sprite bitmaps of one map.
///
/// Each bitmap is uploaded lazily, once per sampling mode. Image ids are only
/// unique within a map, so the cache empties itself when the viewer's map
/// generation changes.
#[derive(Default)]
pub struct TextureCache {
    generation: u64,
    textures: HashMap<(ImageId, bool), TextureHandle>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every texture if `generation` differs from the cached one
    pub fn sync_generation(&mut self, generation: u64) {
        if self.generation != generation {
            if !self.textures.is_empty() {
                log::debug!("dropping {} sprite textures", self.textures.len());
            }
            self.textures.clear();
            self.generation = generation;
        }
    }

    /// Texture for `id`, uploading it on first use
    pub fn texture_for(
        &mut self,
        ctx: &Context,
        images: &ImageStore,
        id: ImageId,
        smoothing: bool,
    ) -> Option<TextureId> {
        if let Some(handle) = self.textures.get(&(id, smoothing)) {
            return Some(handle.id());
        }

        let decoded = images.get(id)?;
        let color_image = ColorImage::from_rgba_unmultiplied(
            [decoded.width as usize, decoded.height as usize],
            &decoded.pixels,
        );
        let handle = ctx.load_texture(
            format!("sprite_{}_{}", self.generation, id.0),
            color_image,
            sampling(smoothing),
        );
        let texture_id = handle.id();
        self.textures.insert((id, smoothing), handle);
        Some(texture_id)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// Nearest-neighbour sampling keeps pixel art crisp when scaled
pub(crate) fn sampling(smoothing: bool) -> TextureOptions {
    if smoothing {
        TextureOptions::LINEAR
    } else {
        TextureOptions::NEAREST
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::image::DecodedImage;

    #[test]
    fn test_sampling_modes() {
        assert_eq!(sampling(false), TextureOptions::NEAREST);
        assert_eq!(sampling(true), TextureOptions::LINEAR);
    }

    #[test]
    fn test_textures_cached_per_generation() {
        let ctx = Context::default();
        let mut store = ImageStore::new();
        let sprite = store.insert(DecodedImage {
            width: 1,
            height: 1,
            pixels: vec![255, 0, 0, 255],
        });

        let mut cache = TextureCache::new();
        let first = cache.texture_for(&ctx, &store, sprite.id, false).unwrap();
        let second = cache.texture_for(&ctx, &store, sprite.id, false).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        assert!(cache.texture_for(&ctx, &store, ImageId(7), false).is_none());

        cache.sync_generation(1);
        assert!(cache.is_empty());
    }
}
