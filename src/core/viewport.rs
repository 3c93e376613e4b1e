use crate::core::{
    bounds::Bounds,
    constants::{ACCUMULATOR_EPSILON, ZOOM_STEP},
    geo::{Point, Size},
};
use serde::{Deserialize, Serialize};

/// Maps a scroll accumulator to a scale factor.
///
/// Zooming in is linear (`0.2 * a + 1`); zooming out follows
/// `-1 / (0.2 * a - 1)`, which approaches zero without reaching it. Both
/// branches meet at `scale(0) == 1`.
pub fn scale_for_accumulator(accumulator: f64) -> f64 {
    if accumulator < 0.0 {
        -1.0 / (ZOOM_STEP * accumulator - 1.0)
    } else {
        ZOOM_STEP * accumulator + 1.0
    }
}

/// Back-solves the scroll accumulator for a target scale.
///
/// The zoom-in branch rounds down and the zoom-out branch rounds up, so the
/// result always lands on a whole tick. `scale` must be positive.
pub fn accumulator_for_scale(scale: f64) -> f64 {
    if scale >= 1.0 {
        ((scale - 1.0) / ZOOM_STEP + ACCUMULATOR_EPSILON).floor()
    } else {
        ((1.0 - 1.0 / scale) / ZOOM_STEP - ACCUMULATOR_EPSILON).ceil()
    }
}

/// Scale and translation applied to map space before drawing.
///
/// A world point `w` lands on screen at `scale * (w + translation)`: the
/// drawing surface is scaled first and translated second, so the translation
/// is expressed in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Cached `scale_for_accumulator(scroll_accumulator)`
    scale: f64,
    /// Offset applied after scaling, in world units
    translation: Point,
    /// Running tally of wheel ticks
    scroll_accumulator: f64,
}

impl ViewTransform {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            translation: Point::ZERO,
            scroll_accumulator: 0.0,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translation(&self) -> Point {
        self.translation
    }

    pub fn scroll_accumulator(&self) -> f64 {
        self.scroll_accumulator
    }

    pub fn set_translation(&mut self, translation: Point) {
        self.translation = translation;
    }

    /// Replaces the accumulator and recomputes the scale from it
    pub fn set_scroll_accumulator(&mut self, accumulator: f64) {
        self.scroll_accumulator = accumulator;
        self.scale = scale_for_accumulator(accumulator);
    }

    /// Converts a screen pixel to the world point drawn under it
    pub fn screen_to_world(&self, pixel: &Point) -> Point {
        pixel.divide(self.scale).subtract(&self.translation)
    }

    /// Converts a world point to the screen pixel it is drawn at
    pub fn world_to_screen(&self, world: &Point) -> Point {
        world.add(&self.translation).multiply(self.scale)
    }

    /// Applies one wheel step anchored at `cursor` (screen pixels).
    ///
    /// Only the sign of the delta counts, so the accumulator stays on whole
    /// ticks. The world point under the cursor is the same before and after
    /// the step. Returns `false` when the step had no effect.
    pub fn zoom_at(&mut self, wheel_delta: f64, cursor: &Point) -> bool {
        if wheel_delta == 0.0 || wheel_delta.is_nan() {
            return false;
        }
        let delta = wheel_delta.signum();

        let before = cursor.divide(self.scale);
        self.set_scroll_accumulator(self.scroll_accumulator + delta);
        let after = cursor.divide(self.scale);

        self.translation = self.translation.add(&after.subtract(&before));
        true
    }

    /// Moves the view by a pointer delta given in screen pixels
    pub fn pan(&mut self, delta: &Point) {
        self.translation = self.translation.add(&delta.divide(self.scale));
    }

    /// Fits `extent` into a viewport of `viewport` pixels.
    ///
    /// The scale snaps to the nearest whole accumulator tick (see
    /// [`accumulator_for_scale`]) and the extent is centered. Returns `false`
    /// and leaves the view untouched when either size is degenerate.
    pub fn fit(&mut self, extent: &Bounds, viewport: Size) -> bool {
        let size = extent.size();
        if size.is_degenerate() || viewport.is_degenerate() {
            return false;
        }

        let target = (viewport.width / size.width).min(viewport.height / size.height);
        self.set_scroll_accumulator(accumulator_for_scale(target));

        let center = extent.center();
        self.translation = Point::new(
            viewport.width / (2.0 * self.scale) - center.x,
            viewport.height / (2.0 * self.scale) - center.y,
        );
        true
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}
