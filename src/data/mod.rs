//! Map documents: where they come from, how they parse, how images decode

pub mod decode;
pub mod document;
pub mod loader;
pub mod source;

pub use document::{MapDimensions, MapDocument, ObjectRecord};
pub use loader::{load_map, MapLoader, PendingLoad};
pub use source::{source_for, HttpSource, MapSource, MemorySource};

#[cfg(all(feature = "tokio-runtime", not(target_arch = "wasm32")))]
pub use source::FileSource;
