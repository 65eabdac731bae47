//! Tap-versus-drag classification.
//!
//! [`TouchListener`] owns the per-gesture bookkeeping (down point and
//! state) and forwards every phase to a [`GestureHandler`]. A gesture starts
//! in [`GestureState::Down`] and switches to [`GestureState::Moving`] the
//! first time the pointer strays at least the touch slop from the down point
//! on either axis. The switch is one-way until the gesture ends.

use flingdock_ui_graphics::Point;
use log::debug;

use crate::gesture_constants::ViewConfiguration;
use crate::pointer::{PointerEvent, PointerEventKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Down,
    Moving,
}

/// What the classifier knows about the gesture in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Gesture {
    pub state: GestureState,
    /// Screen position of the down event. `None` between gestures.
    pub down_position: Option<Point>,
}

impl Gesture {
    pub fn is_touching(&self) -> bool {
        self.state == GestureState::Moving
    }

    fn reset(&mut self, down_position: Option<Point>) {
        self.state = GestureState::Down;
        self.down_position = down_position;
    }
}

/// Phase callbacks driven by a [`TouchListener`].
///
/// The boolean returned from the phase hooks is handed back to the host as
/// the "consumed" flag. Every hook has a no-op default.
pub trait GestureHandler {
    /// Runs before the phase hook on every event, including the first one.
    fn on_event(&mut self, _gesture: &Gesture, _event: &PointerEvent) {}

    fn on_down(&mut self, _gesture: &Gesture, _event: &PointerEvent) -> bool {
        false
    }

    fn on_move(&mut self, _gesture: &Gesture, _event: &PointerEvent) -> bool {
        false
    }

    /// Up or cancel. `gesture` still holds the state the gesture ended in.
    fn on_stop(&mut self, _gesture: &Gesture, _event: &PointerEvent) -> bool {
        false
    }

    fn set_pressed(&mut self, _pressed: bool) {}
}

pub struct TouchListener<H: GestureHandler> {
    touch_slop: f32,
    gesture: Gesture,
    handler: H,
}

impl<H: GestureHandler> TouchListener<H> {
    pub fn new(handler: H, configuration: &ViewConfiguration) -> Self {
        Self {
            touch_slop: configuration.touch_slop,
            gesture: Gesture::default(),
            handler,
        }
    }

    /// Feeds one pointer event. Returns whether the handler consumed it.
    pub fn on_touch(&mut self, event: &PointerEvent) -> bool {
        self.handler.on_event(&self.gesture, event);
        match event.kind {
            PointerEventKind::Down => self.on_down(event),
            PointerEventKind::Move => self.on_move(event),
            PointerEventKind::Up | PointerEventKind::Cancel => self.on_stop(event),
        }
    }

    fn on_down(&mut self, event: &PointerEvent) -> bool {
        debug!("down at {:?}, state = Down", event.position);
        self.gesture.reset(Some(event.position));
        self.handler.set_pressed(true);
        self.handler.on_down(&self.gesture, event)
    }

    fn on_move(&mut self, event: &PointerEvent) -> bool {
        let down = match self.gesture.down_position {
            Some(down) => down,
            None => {
                // The down event never reached us: start tracking here.
                self.gesture.reset(Some(event.position));
                self.handler.set_pressed(true);
                event.position
            }
        };

        if self.gesture.state == GestureState::Down
            && ((event.x() - down.x).abs() >= self.touch_slop
                || (event.y() - down.y).abs() >= self.touch_slop)
        {
            debug!("moved past touch slop, state = Moving");
            self.gesture.state = GestureState::Moving;
        }

        self.handler.on_move(&self.gesture, event)
    }

    fn on_stop(&mut self, event: &PointerEvent) -> bool {
        let consumed = self.handler.on_stop(&self.gesture, event);
        self.gesture.reset(None);
        self.handler.set_pressed(false);
        consumed
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn state(&self) -> GestureState {
        self.gesture.state
    }

    pub fn is_touching(&self) -> bool {
        self.gesture.is_touching()
    }

    pub fn touch_slop(&self) -> f32 {
        self.touch_slop
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
