pub mod canvas;
pub mod context;
pub mod frame;
pub mod renderer;

// Re-export main types
pub use canvas::{Canvas, Color};
pub use context::{DrawCommand, RenderContext};
pub use frame::FrameClock;
pub use renderer::{render_frame, FrameStats, RenderOptions};
