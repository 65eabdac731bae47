//! Platform gesture constants.
//!
//! Values are in logical pixels and logical pixels per second. Hosts on
//! high-density screens scale them before building their listeners.

/// Movement from the down point at which a press becomes a drag.
pub const TOUCH_SLOP: f32 = 8.0;

/// Release speed below which an axis is treated as not flung.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Release speed is clamped to this magnitude on each axis.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Touch slop and fling limits handed to every listener at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfiguration {
    pub touch_slop: f32,
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
}

impl ViewConfiguration {
    pub const fn new(touch_slop: f32, min_fling_velocity: f32, max_fling_velocity: f32) -> Self {
        Self {
            touch_slop,
            min_fling_velocity,
            max_fling_velocity,
        }
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_min_fling_velocity(mut self, velocity: f32) -> Self {
        self.min_fling_velocity = velocity;
        self
    }

    pub fn with_max_fling_velocity(mut self, velocity: f32) -> Self {
        self.max_fling_velocity = velocity;
        self
    }
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self::new(TOUCH_SLOP, MIN_FLING_VELOCITY, MAX_FLING_VELOCITY)
    }
}
