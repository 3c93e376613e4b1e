//! Viewer-wide constants carried over from the browser viewer.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// Scale gained per wheel tick while zoomed in, and the curvature of the
/// zoom-out branch.
pub const ZOOM_STEP: f64 = 0.2;

/// Slack applied before rounding a back-solved scroll accumulator so that
/// exact tick values do not fall to the neighbouring integer.
pub const ACCUMULATOR_EPSILON: f64 = 1e-9;

/// Relative path the map document is fetched from when nothing else is configured.
pub const DEFAULT_MAP_PATH: &str = "maps/main.json";

/// Layer id given to objects in documents that declare no layers.
pub const DEFAULT_LAYER_ID: &str = "default";

/// Top-left anchor of the debug overlay, in screen pixels.
pub const OVERLAY_ORIGIN: (f64, f64) = (10.0, 10.0);

/// Vertical distance between overlay lines, in screen pixels.
pub const OVERLAY_LINE_HEIGHT: f64 = 14.0;
