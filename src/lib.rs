//! # spritemap
//!
//! A layered 2D sprite map viewer.
//!
//! A map document (layers plus positioned sprites with optional shadows) is
//! loaded in the background, composited shadow-pass-then-sprite-pass in layer
//! order, and navigated with cursor-anchored wheel zoom and drag panning.
//! Rendering goes through the [`Canvas`] trait so the same frame logic drives
//! the egui front-end, the browser canvas and the recording context used in
//! tests.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
#[cfg(feature = "egui")]
pub mod ui;
#[cfg(feature = "wasm")]
pub mod web;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    config::{RedrawPolicy, ViewerConfig},
    geo::{Point, Size},
    map::{MapState, SpriteMap},
    viewer::Viewer,
    viewport::ViewTransform,
};

pub use layers::{Layer, LayerManager, MapObject, Sprite, SpriteImage};

pub use input::{events::InputEvent, handler::InputHandler};

pub use rendering::{
    canvas::{Canvas, Color},
    context::{DrawCommand, RenderContext},
};

pub use data::{document::MapDocument, loader::MapLoader, source::MapSource};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger`, honouring `RUST_LOG` and defaulting to `info`.
///
/// Calling it more than once is harmless.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
