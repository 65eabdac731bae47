//! Time-based tween animations driven by a [`FrameClock`].

use std::cell::RefCell;
use std::rc::Rc;

use flingdock_core::{FrameCallbackRegistration, FrameClock};

use crate::easing::Easing;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

type ValueSink<T> = Rc<dyn Fn(&T)>;

/// Frame-driven tween. The end value is held once the tween finishes.
pub struct Animatable<T: Lerp + Clone + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: Lerp + Clone + 'static> {
    frame_clock: FrameClock,
    current: T,
    start: T,
    target: T,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_value: Option<ValueSink<T>>,
}

impl<T: Lerp + Clone + 'static> Animatable<T> {
    /// Create a new animatable with the given initial value.
    pub fn new(initial: T, frame_clock: FrameClock) -> Self {
        let inner = AnimatableInner {
            frame_clock,
            current: initial.clone(),
            start: initial.clone(),
            target: initial,
            spec: AnimationSpec::default(),
            start_time_nanos: None,
            registration: None,
            on_value: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Registers a sink receiving every value the animation produces.
    pub fn set_on_value(&self, sink: impl Fn(&T) + 'static) {
        self.inner.borrow_mut().on_value = Some(Rc::new(sink));
    }

    /// Jumps to `from`, then tweens to `to`.
    pub fn animate_from_to(&self, from: T, to: T, spec: AnimationSpec) {
        let sink = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.current = from.clone();
            inner.on_value.clone()
        };
        if let Some(sink) = sink {
            sink(&from);
        }
        self.animate_to(to, spec);
    }

    /// Tweens from the current value to `target`.
    pub fn animate_to(&self, target: T, spec: AnimationSpec) {
        {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.start = inner.current.clone();
            inner.target = target;
            inner.spec = spec;
            inner.start_time_nanos = None;
        }
        Self::schedule_frame(&self.inner);
    }

    /// Snap immediately to the target value without animating.
    pub fn snap_to(&self, target: T) {
        let sink = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.current = target.clone();
            inner.start = target.clone();
            inner.target = target.clone();
            inner.start_time_nanos = None;
            inner.on_value.clone()
        };
        if let Some(sink) = sink {
            sink(&target);
        }
    }

    /// Stops at the current value.
    pub fn stop(&self) {
        if let Some(registration) = self.inner.borrow_mut().registration.take() {
            registration.cancel();
        }
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn spec(&self) -> AnimationSpec {
        self.inner.borrow().spec
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let frame_clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.frame_clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = frame_clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let emitted = {
            let mut inner = this.borrow_mut();
            inner.registration = None;

            let spec = inner.spec;
            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
            let delay_nanos = spec.delay_millis * 1_000_000;

            if elapsed_nanos < delay_nanos {
                schedule_next = true;
                None
            } else {
                let animation_elapsed = elapsed_nanos - delay_nanos;
                let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
                let linear_progress =
                    (animation_elapsed as f32 / duration_nanos as f32).clamp(0.0, 1.0);

                if linear_progress >= 1.0 {
                    inner.current = inner.target.clone();
                    inner.start = inner.target.clone();
                    inner.start_time_nanos = None;
                } else {
                    let progress = spec.easing.transform(linear_progress);
                    inner.current = inner.start.lerp(&inner.target, progress);
                    schedule_next = true;
                }
                inner
                    .on_value
                    .clone()
                    .map(|sink| (sink, inner.current.clone()))
            }
        };

        if let Some((sink, value)) = emitted {
            sink(&value);
        }

        if schedule_next {
            Self::schedule_frame(this);
        }
    }
}

impl<T: Lerp + Clone + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
