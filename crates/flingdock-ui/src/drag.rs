//! Drag-and-dock controller.
//!
//! While the pointer is down the element follows it through a stiff,
//! bounce-free spring per axis. On release an un-dragged tap near a resting
//! spot clicks; anything else asks the [`DockStrategy`] for a target,
//! optionally predicted from the release velocity, and lets a softer spring
//! carry the element there.
//!
//! Springs advance on frame callbacks. The shared state lives behind
//! `Rc<RefCell<..>>` so the frame callback can reach it through a weak
//! handle; host callbacks always run after the borrow is released.

use std::cell::RefCell;
use std::rc::Rc;

use flingdock_animation::AxisSpring;
use flingdock_core::{CompletionSource, FrameCallbackRegistration, FrameClock};
use flingdock_foundation::{
    Corner, Gesture, GestureHandler, MoveMode, PointerEvent, PointerEventKind, TouchListener,
    VelocityTracker, Wall,
};
use flingdock_ui_graphics::{Point, Rect};
use log::{debug, trace, warn};

use crate::config::{ConfigError, DragConfig};
use crate::dock::{
    CornerDock, DockAreas, DockCompletion, DockOutcome, DockStrategy, DockTarget, WallDock,
};
use crate::element::{AxisProperty, Element, ViewAxis, ViewPosition};

type DockCallback = Rc<dyn Fn(DockTarget, Point)>;
type PointerHook = Box<dyn FnMut(&PointerEvent) -> bool>;
type AreaProvider<E> = Box<dyn Fn(&E) -> Rect>;
type AnimAreaProvider<E> = Box<dyn Fn(&E, &Rect) -> Rect>;

struct PendingDock {
    target: DockTarget,
    point: Point,
    source: CompletionSource<DockOutcome>,
}

impl PendingDock {
    fn cancel(self) {
        debug!("dock to {:?} cancelled", self.target);
        self.source.resolve(DockOutcome::Cancelled);
    }
}

struct DragState<E, S, A> {
    element: Rc<RefCell<E>>,
    strategy: S,
    x_axis: A,
    y_axis: A,
    config: DragConfig,
    frame_clock: FrameClock,
    spring_x: AxisSpring,
    spring_y: AxisSpring,
    registration: Option<FrameCallbackRegistration>,
    tracker: Option<VelocityTracker>,
    areas: Option<DockAreas>,
    area_provider: AreaProvider<E>,
    anim_area_provider: Option<AnimAreaProvider<E>>,
    down_offset: Point,
    pending: Option<PendingDock>,
    last_completion: Option<DockCompletion>,
    on_dock_start: Option<DockCallback>,
    on_docked: Option<DockCallback>,
}

impl<E, S, A> DragState<E, S, A>
where
    E: Element + 'static,
    S: DockStrategy + 'static,
    A: AxisProperty<E> + 'static,
{
    fn position(&self) -> Point {
        let element = self.element.borrow();
        Point::new(self.x_axis.get(&*element), self.y_axis.get(&*element))
    }

    /// Current areas, rebuilt when the element size changed since they were
    /// derived.
    fn ensure_areas(&mut self) -> DockAreas {
        let size = self.element.borrow().size();
        let current = self.areas;
        match current {
            Some(areas) if areas.size == size => areas,
            Some(areas) => {
                debug!("element resized to {size:?}, rebuilding areas");
                self.rebuild_areas(areas.area)
            }
            None => {
                let area = (self.area_provider)(&*self.element.borrow());
                self.rebuild_areas(area)
            }
        }
    }

    fn rebuild_areas(&mut self, area: Rect) -> DockAreas {
        let areas = {
            let element = self.element.borrow();
            let areas = DockAreas::new(area, element.size());
            match &self.anim_area_provider {
                Some(provider) => areas.with_anim_area(provider(&*element, &area)),
                None => areas,
            }
        };
        if areas.move_area.is_degenerate() {
            warn!(
                "element does not fit in {:?}; move area collapsed to {:?}",
                areas.area, areas.move_area
            );
        }
        let anim = areas.anim_area;
        self.spring_x.set_bounds(anim.left(), anim.right());
        self.spring_y.set_bounds(anim.top(), anim.bottom());
        self.areas = Some(areas);
        areas
    }

    fn set_area(&mut self, area: Rect) -> bool {
        let size = self.element.borrow().size();
        if self.areas.is_some_and(|current| current.matches(&area, size)) {
            return false;
        }
        self.rebuild_areas(area);
        true
    }

    /// Stops both springs. The interrupted dock, if any, is handed back so
    /// the caller can resolve it outside the borrow.
    fn clear_animation(&mut self) -> Option<PendingDock> {
        self.spring_x.cancel();
        self.spring_y.cancel();
        self.registration = None;
        self.pending.take()
    }

    fn reset_force(&mut self, settle: bool) {
        if settle {
            self.spring_x.set_spec(self.config.settle_spring_x);
            self.spring_y.set_spec(self.config.settle_spring_y);
        } else {
            self.spring_x.set_spec(self.config.follow_spring);
            self.spring_y.set_spec(self.config.follow_spring);
        }
    }

    /// Prepares a new gesture whose down point is `pointer`.
    fn begin_gesture(&mut self, pointer: Point) -> Option<PendingDock> {
        self.down_offset = self.position() - pointer;
        let interrupted = self.clear_animation();
        self.reset_force(false);
        interrupted
    }

    /// Points both springs at `point`. Returns where they will actually
    /// settle once the animation bounds are applied.
    fn retarget(&mut self, point: Point) -> Point {
        let current = self.position();
        self.spring_x.animate_to_final_position(point.x, current.x);
        self.spring_y.animate_to_final_position(point.y, current.y);
        Point::new(self.spring_x.final_value(), self.spring_y.final_value())
    }

    /// Where the element is heading, from the release velocity.
    ///
    /// Components slower than the minimum fling velocity count as zero, so a
    /// slow release settles from where the element is instead of drifting.
    fn predict(&self, position: Point, areas: &DockAreas) -> Option<Point> {
        let tracker = self.tracker.as_ref()?;
        let view = &self.config.view_configuration;
        let velocity = tracker
            .compute_velocity(view.max_fling_velocity)
            .with_min_magnitude(view.min_fling_velocity)
            .scaled(self.config.retained_velocity_fraction());
        trace!("release velocity retained {velocity:?}");
        Some(areas.move_area.clamp_point(position + velocity.as_offset()))
    }

    fn is_animating(&self) -> bool {
        self.spring_x.is_running() || self.spring_y.is_running()
    }

    fn schedule_frame(this: &Rc<RefCell<Self>>) {
        let frame_clock = {
            let state = this.borrow();
            if state.registration.is_some() || !state.is_animating() {
                return;
            }
            state.frame_clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = frame_clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<Self>>, frame_time_nanos: u64) {
        let docked = {
            let mut guard = this.borrow_mut();
            let state = &mut *guard;
            state.registration = None;

            let frame_x = state.spring_x.step(frame_time_nanos);
            let frame_y = state.spring_y.step(frame_time_nanos);
            trace!("spring frame x={frame_x:?} y={frame_y:?}");
            if frame_x.is_some() || frame_y.is_some() {
                let mut element = state.element.borrow_mut();
                if let Some(frame) = frame_x {
                    state.x_axis.set(&mut *element, frame.value);
                }
                if let Some(frame) = frame_y {
                    state.y_axis.set(&mut *element, frame.value);
                }
            }

            if state.is_animating() {
                None
            } else {
                state
                    .pending
                    .take()
                    .map(|pending| (pending, state.on_docked.clone()))
            }
        };

        Self::schedule_frame(this);

        if let Some((pending, on_docked)) = docked {
            debug!("docked to {:?} at {:?}", pending.target, pending.point);
            pending.source.resolve(DockOutcome::Docked {
                target: pending.target,
                point: pending.point,
            });
            if let Some(callback) = on_docked {
                callback(pending.target, pending.point);
            }
        }
    }

    /// Sends the element to `target`. `position` supplies the coordinate a
    /// wall target leaves untouched.
    fn start_dock(this: &Rc<RefCell<Self>>, target: DockTarget, position: Point) -> DockCompletion {
        let source = CompletionSource::new();
        let completion = source.completion();
        let (superseded, point, on_dock_start) = {
            let mut state = this.borrow_mut();
            let areas = state.ensure_areas();
            let resting = target.resting_point(position, &areas.move_area);
            let point = state.retarget(resting);
            if point != resting {
                debug!("{resting:?} lies outside {:?}, settling at {point:?}", areas.anim_area);
            }
            let superseded = state.pending.replace(PendingDock {
                target,
                point,
                source,
            });
            state.last_completion = Some(completion.clone());
            (superseded, point, state.on_dock_start.clone())
        };
        debug!("docking to {target:?} at {point:?}");

        if let Some(pending) = superseded {
            pending.cancel();
        }
        Self::schedule_frame(this);
        if let Some(callback) = on_dock_start {
            callback(target, point);
        }
        completion
    }

    /// Lets the strategy pick a target from `predicted`, or from the current
    /// position when there is no prediction.
    fn dock_from(this: &Rc<RefCell<Self>>, predicted: Option<Point>) -> DockCompletion {
        let (target, position) = {
            let mut state = this.borrow_mut();
            let areas = state.ensure_areas();
            let position = predicted.unwrap_or_else(|| state.position());
            let size = state.element.borrow().size();
            (state.strategy.choose_target(position, size, &areas), position)
        };
        Self::start_dock(this, target, position)
    }
}

/// [`GestureHandler`] that drags an element and docks it on release.
///
/// `E` is the host element, `S` the docking strategy and `A` the axis
/// property used to read and write the element position.
pub struct DragHandler<E, S, A = ViewAxis> {
    state: Rc<RefCell<DragState<E, S, A>>>,
    element: Rc<RefCell<E>>,
    on_down: Option<PointerHook>,
    on_move: Option<PointerHook>,
    on_stop: Option<PointerHook>,
}

impl<E, S> DragHandler<E, S, ViewAxis>
where
    E: ViewPosition + 'static,
    S: DockStrategy + 'static,
{
    /// Drags a view inside its parent. `area_provider` is asked for the
    /// containing region on the first event.
    pub fn new(
        element: Rc<RefCell<E>>,
        strategy: S,
        frame_clock: FrameClock,
        config: DragConfig,
        area_provider: impl Fn(&E) -> Rect + 'static,
    ) -> Result<Self, ConfigError> {
        Self::with_axes(
            element,
            strategy,
            (ViewAxis::X, ViewAxis::Y),
            frame_clock,
            config,
            area_provider,
        )
    }
}

impl<E, S, A> DragHandler<E, S, A>
where
    E: Element + 'static,
    S: DockStrategy + 'static,
    A: AxisProperty<E> + 'static,
{
    pub fn with_axes(
        element: Rc<RefCell<E>>,
        strategy: S,
        (x_axis, y_axis): (A, A),
        frame_clock: FrameClock,
        config: DragConfig,
        area_provider: impl Fn(&E) -> Rect + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = DragState {
            element: Rc::clone(&element),
            strategy,
            x_axis,
            y_axis,
            config,
            frame_clock,
            spring_x: AxisSpring::new(config.settle_spring_x),
            spring_y: AxisSpring::new(config.settle_spring_y),
            registration: None,
            tracker: None,
            areas: None,
            area_provider: Box::new(area_provider),
            anim_area_provider: None,
            down_offset: Point::ZERO,
            pending: None,
            last_completion: None,
            on_dock_start: None,
            on_docked: None,
        };
        Ok(Self {
            state: Rc::new(RefCell::new(state)),
            element,
            on_down: None,
            on_move: None,
            on_stop: None,
        })
    }

    /// Overrides the default animation bounds. The provider receives the
    /// containing area; it runs whenever the areas are built or rebuilt.
    pub fn with_anim_area(self, provider: impl Fn(&E, &Rect) -> Rect + 'static) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.anim_area_provider = Some(Box::new(provider));
            state.areas = None;
        }
        self
    }

    /// Called with the target and resting point each time a dock starts.
    pub fn with_on_dock_start(self, callback: impl Fn(DockTarget, Point) + 'static) -> Self {
        self.state.borrow_mut().on_dock_start = Some(Rc::new(callback));
        self
    }

    /// Called once per dock that reaches its resting point.
    pub fn with_on_docked(self, callback: impl Fn(DockTarget, Point) + 'static) -> Self {
        self.state.borrow_mut().on_docked = Some(Rc::new(callback));
        self
    }

    pub fn with_on_down(mut self, hook: impl FnMut(&PointerEvent) -> bool + 'static) -> Self {
        self.on_down = Some(Box::new(hook));
        self
    }

    /// Runs for moves once the gesture is a drag.
    pub fn with_on_move(mut self, hook: impl FnMut(&PointerEvent) -> bool + 'static) -> Self {
        self.on_move = Some(Box::new(hook));
        self
    }

    pub fn with_on_stop(mut self, hook: impl FnMut(&PointerEvent) -> bool + 'static) -> Self {
        self.on_stop = Some(Box::new(hook));
        self
    }

    /// Wraps the handler in a [`TouchListener`] using the configured slop.
    pub fn into_listener(self) -> TouchListener<Self> {
        let view_configuration = self.state.borrow().config.view_configuration;
        TouchListener::new(self, &view_configuration)
    }

    pub fn element(&self) -> Rc<RefCell<E>> {
        Rc::clone(&self.element)
    }

    pub fn config(&self) -> DragConfig {
        self.state.borrow().config
    }

    /// Current element origin as seen through the axis properties.
    pub fn position(&self) -> Point {
        self.state.borrow().position()
    }

    pub fn areas(&self) -> DockAreas {
        self.state.borrow_mut().ensure_areas()
    }

    pub fn area(&self) -> Rect {
        self.areas().area
    }

    pub fn move_area(&self) -> Rect {
        self.areas().move_area
    }

    pub fn anim_area(&self) -> Rect {
        self.areas().anim_area
    }

    /// Replaces the containing area and rebuilds the derived areas. Returns
    /// `false` when neither `area` nor the element size changed.
    pub fn set_area(&self, area: Rect) -> bool {
        let changed = self.state.borrow_mut().set_area(area);
        if changed {
            debug!("area set to {area:?}");
        }
        changed
    }

    /// Stops any running animation; a pending dock resolves as cancelled.
    pub fn clear_animation(&self) {
        let interrupted = self.state.borrow_mut().clear_animation();
        if let Some(pending) = interrupted {
            pending.cancel();
        }
    }

    pub fn is_animating(&self) -> bool {
        self.state.borrow().is_animating()
    }

    /// Whether a velocity tracker is alive, i.e. a gesture is in progress.
    pub fn is_tracking_velocity(&self) -> bool {
        self.state.borrow().tracker.is_some()
    }

    /// Docks from the current position using the strategy's choice.
    pub fn dock_now(&self) -> DockCompletion {
        DragState::dock_from(&self.state, None)
    }

    /// Completion of the most recently started dock.
    pub fn last_completion(&self) -> Option<DockCompletion> {
        self.state.borrow().last_completion.clone()
    }

    fn perform_click(&self, long: bool) {
        let mut element = self.element.borrow_mut();
        if long {
            debug!("long click");
            element.perform_long_click();
        } else {
            debug!("click");
            element.perform_click();
        }
    }
}

impl<E, A> DragHandler<E, CornerDock, A>
where
    E: Element + 'static,
    A: AxisProperty<E> + 'static,
{
    /// Corner the element would dock to from `predicted`, or from where it
    /// is now.
    pub fn corner_for(&self, predicted: Option<Point>) -> Corner {
        let mut state = self.state.borrow_mut();
        let areas = state.ensure_areas();
        let position = predicted.unwrap_or_else(|| state.position());
        let size = state.element.borrow().size();
        state.strategy.corner_for(position, size, &areas)
    }

    pub fn move_to_corner(&self, corner: Corner) -> DockCompletion {
        let position = self.position();
        DragState::start_dock(&self.state, DockTarget::Corner(corner), position)
    }
}

impl<E, A> DragHandler<E, WallDock, A>
where
    E: Element + 'static,
    A: AxisProperty<E> + 'static,
{
    pub fn wall_for(&self, predicted: Option<Point>) -> Wall {
        let mut state = self.state.borrow_mut();
        let areas = state.ensure_areas();
        let position = predicted.unwrap_or_else(|| state.position());
        let size = state.element.borrow().size();
        state.strategy.wall_for(position, size, &areas)
    }

    /// Docks against the wall chosen for `predicted` (or the current
    /// position). The coordinate along the wall comes from the same point.
    pub fn move_to_wall(&self, predicted: Option<Point>) -> DockCompletion {
        let position = predicted.unwrap_or_else(|| self.position());
        let wall = self.wall_for(Some(position));
        DragState::start_dock(&self.state, DockTarget::Wall(wall), position)
    }

    pub fn move_mode(&self) -> MoveMode {
        self.state.borrow().strategy.mode
    }

    /// Takes effect from the next release.
    pub fn set_move_mode(&self, mode: MoveMode) {
        self.state.borrow_mut().strategy.mode = mode;
    }
}

impl<E, S, A> GestureHandler for DragHandler<E, S, A>
where
    E: Element + 'static,
    S: DockStrategy + 'static,
    A: AxisProperty<E> + 'static,
{
    fn on_event(&mut self, gesture: &Gesture, event: &PointerEvent) {
        let orphan_move = event.kind == PointerEventKind::Move && gesture.down_position.is_none();
        let interrupted = {
            let mut state = self.state.borrow_mut();
            state.ensure_areas();
            if event.kind == PointerEventKind::Down || orphan_move {
                state.tracker = Some(VelocityTracker::new());
            }
            state
                .tracker
                .get_or_insert_with(VelocityTracker::new)
                .add_sample(event.x(), event.y(), event.event_time_ms);
            if orphan_move {
                state.begin_gesture(event.position)
            } else {
                None
            }
        };
        if let Some(pending) = interrupted {
            pending.cancel();
        }
    }

    fn on_down(&mut self, _gesture: &Gesture, event: &PointerEvent) -> bool {
        let interrupted = self.state.borrow_mut().begin_gesture(event.position);
        if let Some(pending) = interrupted {
            pending.cancel();
        }
        match self.on_down.as_mut() {
            Some(hook) => hook(event),
            None => true,
        }
    }

    fn on_move(&mut self, gesture: &Gesture, event: &PointerEvent) -> bool {
        let interrupted = {
            let mut state = self.state.borrow_mut();
            let areas = state.ensure_areas();
            let mut target = event.position + state.down_offset;
            if !state.config.can_move_outside_area {
                target = areas.move_area.clamp_point(target);
            }
            // A programmatic dock started mid-drag loses to the finger.
            let interrupted = state.pending.take();
            state.retarget(target);
            interrupted
        };
        if let Some(pending) = interrupted {
            pending.cancel();
        }
        DragState::schedule_frame(&self.state);

        if !gesture.is_touching() {
            return true;
        }
        match self.on_move.as_mut() {
            Some(hook) => hook(event),
            None => true,
        }
    }

    fn on_stop(&mut self, gesture: &Gesture, event: &PointerEvent) -> bool {
        let click = {
            let mut state = self.state.borrow_mut();
            let areas = state.ensure_areas();
            let position = state.position();
            let eligible = !gesture.is_touching()
                && event.kind == PointerEventKind::Up
                && state
                    .strategy
                    .is_eligible_for_click(position, &areas, &state.config);
            eligible.then(|| event.elapsed_since_down_ms() > state.config.tap_timeout_ms)
        };

        match click {
            Some(long) => self.perform_click(long),
            None => {
                let predicted = {
                    let mut state = self.state.borrow_mut();
                    let areas = state.ensure_areas();
                    let position = state.position();
                    let predicted = state.predict(position, &areas);
                    state.reset_force(true);
                    predicted
                };
                DragState::dock_from(&self.state, predicted);
            }
        }

        self.state.borrow_mut().tracker = None;
        match self.on_stop.as_mut() {
            Some(hook) => hook(event),
            None => true,
        }
    }

    fn set_pressed(&mut self, pressed: bool) {
        self.element.borrow_mut().set_pressed(pressed);
    }
}

#[cfg(test)]
#[path = "tests/drag_tests.rs"]
mod tests;
