//! Prelude module for common spritemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use spritemap::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    config::{DebugConfig, InteractionConfig, RedrawPolicy, ViewerConfig},
    geo::{Point, Size},
    map::{MapState, SpriteMap},
    viewer::Viewer,
    viewport::{accumulator_for_scale, scale_for_accumulator, ViewTransform},
};

pub use crate::layers::{
    DecodedImage, ImageId, ImageStore, Layer, LayerManager, MapObject, Sprite, SpriteImage,
};

pub use crate::input::{
    events::{EventHandled, InputEvent, PointerButtons},
    handler::InputHandler,
};

pub use crate::rendering::{
    canvas::{Canvas, Color},
    context::{DrawCommand, RenderContext},
    frame::FrameClock,
    renderer::{render_frame, FrameStats, RenderOptions},
};

pub use crate::data::{
    document::{MapDimensions, MapDocument, ObjectRecord},
    loader::{load_map, MapLoader, PendingLoad},
    source::{source_for, HttpSource, MapSource, MemorySource},
};

#[cfg(all(feature = "tokio-runtime", not(target_arch = "wasm32")))]
pub use crate::data::source::FileSource;

#[cfg(feature = "egui")]
pub use crate::ui::{layer_list::layer_list, widget::MapView, UiViewerExt};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
