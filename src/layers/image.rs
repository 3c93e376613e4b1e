use crate::core::geo::Size;

/// Index of a decoded bitmap inside an [`ImageStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub usize);

/// Handle to a decoded bitmap together with its natural size.
///
/// This is what sprites and draw commands carry around; the pixels stay in the
/// store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteImage {
    pub id: ImageId,
    pub width: u32,
    pub height: u32,
}

impl SpriteImage {
    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}

/// Straight-alpha RGBA8 pixels
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Owns every bitmap of a loaded map
#[derive(Debug, Default)]
pub struct ImageStore {
    images: Vec<DecodedImage>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a bitmap and returns the handle sprites use to refer to it
    pub fn insert(&mut self, image: DecodedImage) -> SpriteImage {
        let handle = SpriteImage {
            id: ImageId(self.images.len()),
            width: image.width,
            height: image.height,
        };
        self.images.push(image);
        handle
    }

    pub fn get(&self, id: ImageId) -> Option<&DecodedImage> {
        self.images.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
