use crate::core::geo::{Point, Size};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in map space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Creates bounds anchored at `origin` spanning `size`
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin,
            Point::new(origin.x + size.width, origin.y + size.height),
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// False for [`Bounds::empty`] and for inverted rectangles
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Identity for [`Bounds::extend_with`]: min at +inf, max at -inf
    pub fn empty() -> Self {
        Self::new(
            Point::new(f64::INFINITY, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        )
    }

    /// Smallest bounds covering both; an invalid side is ignored
    pub fn extend_with(&self, other: &Bounds) -> Bounds {
        if !self.is_valid() {
            return other.clone();
        }
        if !other.is_valid() {
            return self.clone();
        }

        Bounds::new(
            Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Point::ZERO, Point::ZERO)
    }
}
