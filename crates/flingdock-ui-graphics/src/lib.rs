//! Pure geometry for flingdock
//!
//! Points, sizes and rectangles in logical pixels, plus the small numeric
//! helpers (clamping, distance) the gesture engine builds on.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{coerce_in, distance, Point, Rect, Size};
}
