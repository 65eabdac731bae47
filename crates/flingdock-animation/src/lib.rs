//! Animation primitives for flingdock
//!
//! - [`AxisSpring`]: one axis of a damped spring, stepped per frame with the
//!   closed-form solution of the damped harmonic oscillator.
//! - [`Animatable`]: a frame-clock driven tween with easing, used for scale
//!   pulses.
//! - [`Easing`]: cubic-bezier curves plus the overshoot family of
//!   interpolators.

mod animation;
mod easing;
mod spring;

pub use animation::{Animatable, AnimationSpec, Lerp};
pub use easing::Easing;
pub use spring::{
    AxisSpring, SpringFrame, SpringSpec, DAMPING_RATIO_HIGH_BOUNCY, DAMPING_RATIO_LOW_BOUNCY,
    DAMPING_RATIO_MEDIUM_BOUNCY, DAMPING_RATIO_NO_BOUNCY, MIN_VISIBLE_CHANGE_PIXELS,
    STIFFNESS_HIGH, STIFFNESS_LOW, STIFFNESS_MEDIUM, STIFFNESS_VERY_LOW,
};
