use std::cell::RefCell;
use std::rc::Rc;

use flingdock_core::{FrameClock, Runtime};
use flingdock_foundation::{GestureHandler, PointerEvent, TouchListener};
use flingdock_ui::DockTarget;
use flingdock_ui_graphics::{Point, Size};

use crate::element::FakeElement;

/// One 60 Hz frame.
pub const FRAME_NANOS: u64 = 16_666_667;

const MAX_IDLE_FRAMES: usize = 10_000;

/// Headless harness for driving listeners in tests.
///
/// The rule owns a [`Runtime`] and a single clock. Pointer events are
/// stamped with the clock in milliseconds and frames are drained at the
/// clock in nanoseconds, so velocity tracking and spring stepping see one
/// consistent timeline.
pub struct DockTestRule {
    runtime: Runtime,
    time_nanos: u64,
    down_time_ms: i64,
}

impl DockTestRule {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::default(),
            time_nanos: 0,
            down_time_ms: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    /// A fake element at `position` inside a parent at the screen origin.
    pub fn element(&self, position: Point, size: Size) -> Rc<RefCell<FakeElement>> {
        Rc::new(RefCell::new(FakeElement::new(position, size)))
    }

    pub fn now_ms(&self) -> i64 {
        (self.time_nanos / 1_000_000) as i64
    }

    pub fn advance_time_ms(&mut self, millis: u64) {
        self.time_nanos += millis * 1_000_000;
    }

    fn event(&self, event: PointerEvent) -> PointerEvent {
        event.with_down_time(self.down_time_ms)
    }

    pub fn down<H: GestureHandler>(&mut self, listener: &mut TouchListener<H>, x: f32, y: f32) -> bool {
        self.down_time_ms = self.now_ms();
        let event = self.event(PointerEvent::down(x, y, self.now_ms()));
        listener.on_touch(&event)
    }

    pub fn move_to<H: GestureHandler>(
        &mut self,
        listener: &mut TouchListener<H>,
        x: f32,
        y: f32,
    ) -> bool {
        let event = self.event(PointerEvent::moved(x, y, self.now_ms()));
        listener.on_touch(&event)
    }

    pub fn up<H: GestureHandler>(&mut self, listener: &mut TouchListener<H>, x: f32, y: f32) -> bool {
        let event = self.event(PointerEvent::up(x, y, self.now_ms()));
        listener.on_touch(&event)
    }

    pub fn cancel<H: GestureHandler>(
        &mut self,
        listener: &mut TouchListener<H>,
        x: f32,
        y: f32,
    ) -> bool {
        let event = self.event(PointerEvent::cancel(x, y, self.now_ms()));
        listener.on_touch(&event)
    }

    /// Moves from `from` to `to` in `steps` equal moves, `step_ms` apart,
    /// draining a frame after each one. The pointer stays down.
    pub fn drag<H: GestureHandler>(
        &mut self,
        listener: &mut TouchListener<H>,
        from: Point,
        to: Point,
        steps: usize,
        step_ms: u64,
    ) {
        let steps = steps.max(1);
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            self.advance_time_ms(step_ms);
            self.move_to(
                listener,
                from.x + (to.x - from.x) * fraction,
                from.y + (to.y - from.y) * fraction,
            );
            self.runtime.drain_frame_callbacks(self.time_nanos);
        }
    }

    /// Taps at `point`, holding for `hold_ms`.
    pub fn tap<H: GestureHandler>(
        &mut self,
        listener: &mut TouchListener<H>,
        point: Point,
        hold_ms: u64,
    ) -> bool {
        self.down(listener, point.x, point.y);
        self.advance_time_ms(hold_ms);
        self.up(listener, point.x, point.y)
    }

    /// Drains one frame at the current time, then advances the clock.
    pub fn advance_frame(&mut self) {
        self.runtime.drain_frame_callbacks(self.time_nanos);
        self.time_nanos += FRAME_NANOS;
    }

    /// Advances frames until no frame callback is queued. Returns the number
    /// of frames drained.
    pub fn pump_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() {
            frames += 1;
            if frames > MAX_IDLE_FRAMES {
                panic!("pump_until_idle looped too many times!");
            }
            self.advance_frame();
        }
        frames
    }
}

impl Default for DockTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared list a test can hand to callbacks and inspect afterwards.
pub struct EventLog<T> {
    events: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone + 'static> EventLog<T> {
    pub fn new() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn push(&self, event: T) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<T> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn last(&self) -> Option<T> {
        self.events.borrow().last().cloned()
    }
}

impl EventLog<(DockTarget, Point)> {
    /// Callback suitable for `with_on_dock_start` / `with_on_docked`.
    pub fn dock_sink(&self) -> impl Fn(DockTarget, Point) + 'static {
        let events = Rc::clone(&self.events);
        move |target, point| events.borrow_mut().push((target, point))
    }
}

impl<T> Clone for EventLog<T> {
    fn clone(&self) -> Self {
        Self {
            events: Rc::clone(&self.events),
        }
    }
}

impl<T: Clone + 'static> Default for EventLog<T> {
    fn default() -> Self {
        Self::new()
    }
}
