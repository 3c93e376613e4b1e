use crate::{
    core::geo::{Point, Size},
    layers::image::SpriteImage,
    Result,
};
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const CORNFLOWER_BLUE: Color = Color::rgb(100, 149, 237);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const LIME: Color = Color::rgb(0, 255, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgba()` notation, used by the browser canvas
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }
}

#[cfg(feature = "egui")]
impl From<Color> for egui::Color32 {
    fn from(color: Color) -> Self {
        egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

/// A 2D drawing surface with a resettable uniform scale + translate transform.
///
/// Transform calls compose the way a browser canvas does: `scale(s)` followed
/// by `translate(t)` maps a point `p` to `s * (p + t)`. Text and rectangles
/// filled after `reset_transform` are in screen pixels.
pub trait Canvas {
    /// Size of the surface in screen pixels
    fn size(&self) -> Size;

    /// Drops any scale or translation
    fn reset_transform(&mut self) -> Result<()>;

    /// Multiplies the current transform by a uniform scale
    fn scale(&mut self, factor: f64) -> Result<()>;

    /// Translates the current transform, in current (pre-scale) units
    fn translate(&mut self, offset: Point) -> Result<()>;

    /// Enables or disables bitmap filtering when images are stretched
    fn set_image_smoothing(&mut self, enabled: bool);

    fn fill_rect(&mut self, origin: Point, size: Size, color: Color) -> Result<()>;

    fn stroke_rect(&mut self, origin: Point, size: Size, line_width: f64, color: Color)
        -> Result<()>;

    /// Draws an image with its top-left corner at `position`, at natural size
    fn draw_image(&mut self, image: &SpriteImage, position: Point) -> Result<()>;

    fn fill_text(&mut self, text: &str, position: Point, color: Color) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color() {
        assert_eq!(Color::YELLOW.to_css(), "rgba(255, 255, 0, 1)");
        assert_eq!(Color::rgba(0, 0, 0, 0).to_css(), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn test_color_alpha_defaults_to_opaque() {
        let color: Color = serde_json::from_str(r#"{"r": 1, "g": 2, "b": 3}"#).unwrap();
        assert_eq!(color, Color::rgb(1, 2, 3));
    }
}
