pub mod base;
pub mod image;
pub mod manager;
pub mod object;

pub use base::Layer;
pub use image::{DecodedImage, ImageId, ImageStore, SpriteImage};
pub use manager::LayerManager;
pub use object::{MapObject, Sprite};
