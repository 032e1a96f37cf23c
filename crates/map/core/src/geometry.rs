//! Coordinate types: logical grid offsets and percentage-space points.

use core::ops::{Add, Sub};

/// Lower edge of the percentage coordinate space.
pub const PERCENT_MIN: f64 = 0.0;
/// Upper edge of the percentage coordinate space.
pub const PERCENT_MAX: f64 = 100.0;
/// Midpoint of the percentage coordinate space on both axes.
pub const PERCENT_MID: f64 = 50.0;

/// Signed 3-axis offset of a room relative to the start room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOffset {
    /// Negative is north, positive is south.
    pub north_south: i32,
    /// Negative is west, positive is east.
    pub east_west: i32,
    /// Negative is up, positive is down.
    pub up_down: i32,
}

impl GridOffset {
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    pub const fn new(north_south: i32, east_west: i32, up_down: i32) -> Self {
        Self {
            north_south,
            east_west,
            up_down,
        }
    }

    /// Projects the offset onto the 2D plane, shifting each level by `skew`
    /// so that "up" lands up and to the right of its floor.
    pub fn project(self, skew: f64) -> Point {
        let level = f64::from(self.up_down);
        Point::new(
            f64::from(self.east_west) - level * skew,
            f64::from(self.north_south) + level * skew,
        )
    }
}

impl Add for GridOffset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.north_south + rhs.north_south,
            self.east_west + rhs.east_west,
            self.up_down + rhs.up_down,
        )
    }
}

/// A 2D point. Layout output is always in `[0, 100]` percentage space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const CENTER: Self = Self::new(PERCENT_MID, PERCENT_MID);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Square drawing area inside the percentage space, `[min, max]` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Full percentage space minus `margin` on every side.
    ///
    /// The margin is clamped so the area never inverts.
    pub fn from_margin(margin: f64) -> Self {
        let margin = margin.clamp(PERCENT_MIN, PERCENT_MID);
        Self {
            min: PERCENT_MIN + margin,
            max: PERCENT_MAX - margin,
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn center(&self) -> Point {
        let mid = (self.min + self.max) / 2.0;
        Point::new(mid, mid)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(self.clamp(point.x), self.clamp(point.y))
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.min..=self.max).contains(&point.x) && (self.min..=self.max).contains(&point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_projects_up_and_right() {
        let up = GridOffset::new(0, 0, -1).project(0.5);
        assert!(up.x > 0.0);
        assert!(up.y < 0.0);
        assert_eq!(GridOffset::ORIGIN.project(0.5), Point::new(0.0, 0.0));
    }

    #[test]
    fn bounds_clamp_into_margin() {
        let bounds = Bounds::from_margin(10.0);
        assert_eq!(bounds.span(), 80.0);
        assert_eq!(bounds.clamp_point(Point::new(-5.0, 120.0)), Point::new(10.0, 90.0));
        assert_eq!(bounds.center(), Point::CENTER);
    }

    #[test]
    fn oversized_margin_collapses_to_midpoint() {
        let bounds = Bounds::from_margin(80.0);
        assert_eq!(bounds.span(), 0.0);
        assert_eq!(bounds.clamp(3.0), PERCENT_MID);
    }
}
