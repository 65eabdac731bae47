//! Geometric primitives: Point, Size, Rect

use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f32 {
        distance(*self, other)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };
}

/// Axis-aligned rectangle. `right()`/`bottom()` are edge coordinates, so the
/// corners of a rectangle are `(x, y)`, `(right, y)`, `(x, bottom)` and
/// `(right, bottom)`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from its four edges.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when either dimension is zero (or negative).
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// Grows the rectangle by `dx` on the left and right and by `dy` on the
    /// top and bottom.
    pub fn outset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x - dx,
            y: self.y - dy,
            width: self.width + 2.0 * dx,
            height: self.height + 2.0 * dy,
        }
    }

    /// Region where the top-left origin of an element of `size` may sit while
    /// the element stays inside `self`.
    ///
    /// The right and bottom edges move in by the element's size. An axis where
    /// the element is larger than the container collapses to zero length at
    /// the container's leading edge.
    pub fn shrink_to_movable(&self, size: Size) -> Self {
        Self {
            x: self.x,
            y: self.y,
            width: (self.width - size.width).max(0.0),
            height: (self.height - size.height).max(0.0),
        }
    }

    /// Clamps `point` into the rectangle, edges included.
    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(
            coerce_in(point.x, self.left(), self.right()),
            coerce_in(point.y, self.top(), self.bottom()),
        )
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }
}

/// Clamps `value` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics: when `min > max` the result is
/// `max`, matching a `min(max(value, min), max)` evaluation.
pub fn coerce_in(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
