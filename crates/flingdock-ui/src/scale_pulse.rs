//! Press-and-release scale feedback.

use std::cell::RefCell;
use std::rc::Rc;

use flingdock_animation::{Animatable, AnimationSpec, Easing};
use flingdock_core::FrameClock;
use flingdock_foundation::{
    Gesture, GestureHandler, GestureState, PointerEvent, PointerEventKind, TouchListener,
};
use flingdock_ui_graphics::Rect;
use log::debug;

use crate::config::{ConfigError, ScalePulseConfig, ScaleType};
use crate::element::ScalableElement;

/// Shrinks (or grows) the element while pressed and springs it back on
/// release. The element never moves.
///
/// Dragging the pointer out of the element's bounds, widened by the release
/// offsets, releases early. A release happens at most once per gesture.
pub struct ScalePulseHandler<E> {
    element: Rc<RefCell<E>>,
    config: ScalePulseConfig,
    scale: Animatable<f32>,
    released: bool,
}

impl<E: ScalableElement + 'static> ScalePulseHandler<E> {
    pub fn new(
        element: Rc<RefCell<E>>,
        frame_clock: FrameClock,
        config: ScalePulseConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let scale = Animatable::new(config.real_scale, frame_clock);
        let weak = Rc::downgrade(&element);
        scale.set_on_value(move |value| {
            if let Some(element) = weak.upgrade() {
                element.borrow_mut().set_scale(*value);
            }
        });
        Ok(Self {
            element,
            config,
            scale,
            released: true,
        })
    }

    pub fn into_listener(self) -> TouchListener<Self> {
        let view_configuration = self.config.view_configuration;
        TouchListener::new(self, &view_configuration)
    }

    pub fn element(&self) -> Rc<RefCell<E>> {
        Rc::clone(&self.element)
    }

    pub fn config(&self) -> &ScalePulseConfig {
        &self.config
    }

    /// Latest animated scale.
    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    pub fn is_animating(&self) -> bool {
        self.scale.is_running()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn tween(&self, easing: Easing) -> AnimationSpec {
        AnimationSpec::tween(self.config.duration_ms, easing)
    }

    /// Tweens back to the resting scale, kicking past it first when the
    /// gesture ended in a click.
    pub fn release(&mut self, had_click: bool) {
        self.released = true;
        let config = &self.config;
        let extra = if had_click { config.release_delta } else { 0.0 };
        let delta = (config.press_delta + extra) * config.scale_type.sign();
        let to = config.real_scale;
        let from = (to + delta).max(0.0);
        let easing = match (had_click, config.scale_type) {
            (true, ScaleType::Grow) => Easing::overshoot(),
            (true, ScaleType::Shrink) => Easing::anticipate_overshoot(),
            (false, _) => Easing::AccelerateDecelerate,
        };
        debug!("scale release from {from} to {to}, click = {had_click}");
        self.scale.animate_from_to(from, to, self.tween(easing));
    }

    fn release_bounds(&self) -> Rect {
        let element = self.element.borrow();
        Rect::from_origin_size(element.location_on_screen(), element.size())
            .outset(self.config.release_offset_x, self.config.release_offset_y)
    }
}

impl<E: ScalableElement + 'static> GestureHandler for ScalePulseHandler<E> {
    fn on_down(&mut self, _gesture: &Gesture, _event: &PointerEvent) -> bool {
        self.released = false;
        let from = self.config.real_scale;
        let to = from + self.config.press_delta * self.config.scale_type.sign();
        self.scale
            .animate_from_to(from, to, self.tween(Easing::AccelerateDecelerate));
        true
    }

    fn on_move(&mut self, _gesture: &Gesture, event: &PointerEvent) -> bool {
        if self.released {
            return true;
        }
        if !self.release_bounds().contains(event.x(), event.y()) {
            debug!("pointer left {:?}, releasing", self.release_bounds());
            self.release(false);
        }
        true
    }

    fn on_stop(&mut self, gesture: &Gesture, event: &PointerEvent) -> bool {
        if self.released {
            return true;
        }
        let had_click =
            event.kind == PointerEventKind::Up && gesture.state == GestureState::Down;
        if had_click {
            let mut element = self.element.borrow_mut();
            if event.elapsed_since_down_ms() <= self.config.tap_timeout_ms {
                element.perform_click();
            } else {
                element.perform_long_click();
            }
        }
        self.release(had_click);
        true
    }

    fn set_pressed(&mut self, pressed: bool) {
        self.element.borrow_mut().set_pressed(pressed);
    }
}

#[cfg(test)]
#[path = "tests/scale_pulse_tests.rs"]
mod tests;
