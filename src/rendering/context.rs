use crate::{
    core::geo::{Point, Size},
    layers::image::SpriteImage,
    rendering::canvas::{Canvas, Color},
    MapError, Result,
};

/// Commands recorded by [`RenderContext`], already resolved to screen pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        origin: Point,
        size: Size,
        color: Color,
    },
    Image {
        image: SpriteImage,
        origin: Point,
        size: Size,
        smoothing: bool,
    },
    StrokeRect {
        origin: Point,
        size: Size,
        /// Screen pixels
        line_width: f64,
        color: Color,
    },
    Text {
        text: String,
        position: Point,
        color: Color,
    },
}

/// A canvas that records what was drawn instead of rasterising it.
///
/// Front-ends without a transform stack of their own (egui) replay the queue;
/// tests inspect it directly.
pub struct RenderContext {
    size: Size,
    /// Current uniform scale
    scale: f64,
    /// Current offset, in screen pixels
    offset: Point,
    smoothing: bool,
    drawing_queue: Vec<DrawCommand>,
}

impl RenderContext {
    /// Create a new render context
    pub fn new(size: Size) -> Self {
        Self {
            size,
            scale: 1.0,
            offset: Point::ZERO,
            smoothing: true,
            drawing_queue: Vec::new(),
        }
    }

    /// Begin a frame
    pub fn begin_frame(&mut self) {
        self.drawing_queue.clear();
        self.scale = 1.0;
        self.offset = Point::ZERO;
        self.smoothing = true;
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Get the current drawing queue
    pub fn get_drawing_queue(&self) -> &[DrawCommand] {
        &self.drawing_queue
    }

    /// Takes the recorded commands, leaving the queue empty
    pub fn take_drawing_queue(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.drawing_queue)
    }

    /// Maps a point through the current transform
    pub fn to_screen(&self, point: &Point) -> Point {
        point.multiply(self.scale).add(&self.offset)
    }
}

impl Canvas for RenderContext {
    fn size(&self) -> Size {
        self.size
    }

    fn reset_transform(&mut self) -> Result<()> {
        self.scale = 1.0;
        self.offset = Point::ZERO;
        Ok(())
    }

    fn scale(&mut self, factor: f64) -> Result<()> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(MapError::Render(format!("invalid scale factor {factor}")));
        }
        self.scale *= factor;
        Ok(())
    }

    fn translate(&mut self, offset: Point) -> Result<()> {
        self.offset = self.offset.add(&offset.multiply(self.scale));
        Ok(())
    }

    fn set_image_smoothing(&mut self, enabled: bool) {
        self.smoothing = enabled;
    }

    fn fill_rect(&mut self, origin: Point, size: Size, color: Color) -> Result<()> {
        self.drawing_queue.push(DrawCommand::FillRect {
            origin: self.to_screen(&origin),
            size: size.scaled(self.scale),
            color,
        });
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        origin: Point,
        size: Size,
        line_width: f64,
        color: Color,
    ) -> Result<()> {
        self.drawing_queue.push(DrawCommand::StrokeRect {
            origin: self.to_screen(&origin),
            size: size.scaled(self.scale),
            line_width: line_width * self.scale,
            color,
        });
        Ok(())
    }

    fn draw_image(&mut self, image: &SpriteImage, position: Point) -> Result<()> {
        self.drawing_queue.push(DrawCommand::Image {
            image: *image,
            origin: self.to_screen(&position),
            size: image.size().scaled(self.scale),
            smoothing: self.smoothing,
        });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, position: Point, color: Color) -> Result<()> {
        self.drawing_queue.push(DrawCommand::Text {
            text: text.to_string(),
            position: self.to_screen(&position),
            color,
        });
        Ok(())
    }
}
