use crate::{
    core::{bounds::Bounds, geo::Point},
    layers::image::SpriteImage,
};

/// A bitmap placed at a map-space position (its top-left corner)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub image: SpriteImage,
    pub position: Point,
}

impl Sprite {
    pub fn new(image: SpriteImage, position: Point) -> Self {
        Self { image, position }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_origin_size(self.position, self.image.size())
    }
}

/// A placed map object owned by exactly one layer.
///
/// Either visual may be missing; an object with neither still counts towards
/// the map's object total but never produces a draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct MapObject {
    pub layer: String,
    pub image: Option<Sprite>,
    pub shade: Option<Sprite>,
}

impl MapObject {
    pub fn new(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            image: None,
            shade: None,
        }
    }

    pub fn with_image(mut self, image: SpriteImage, position: Point) -> Self {
        self.image = Some(Sprite::new(image, position));
        self
    }

    pub fn with_shade(mut self, shade: SpriteImage, position: Point) -> Self {
        self.shade = Some(Sprite::new(shade, position));
        self
    }

    /// Union of the image and shade rectangles, if the object has any visual
    pub fn bounds(&self) -> Option<Bounds> {
        let sprites = [self.image.as_ref(), self.shade.as_ref()];
        let bounds = sprites
            .into_iter()
            .flatten()
            .fold(Bounds::empty(), |acc, sprite| acc.extend_with(&sprite.bounds()));
        bounds.is_valid().then_some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::image::ImageId;

    fn image(id: usize, width: u32, height: u32) -> SpriteImage {
        SpriteImage {
            id: ImageId(id),
            width,
            height,
        }
    }

    #[test]
    fn test_object_bounds_cover_both_visuals() {
        let object = MapObject::new("walls")
            .with_image(image(0, 16, 16), Point::new(32.0, 32.0))
            .with_shade(image(1, 24, 8), Point::new(28.0, 44.0));

        assert_eq!(
            object.bounds(),
            Some(Bounds::from_coords(28.0, 32.0, 52.0, 52.0))
        );
    }

    #[test]
    fn test_object_without_visuals_has_no_bounds() {
        assert_eq!(MapObject::new("walls").bounds(), None);
    }
}
