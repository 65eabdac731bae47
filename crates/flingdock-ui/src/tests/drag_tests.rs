use super::*;

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use flingdock_core::Runtime;
use flingdock_foundation::{GestureState, PointerEvent, ViewConfiguration};
use flingdock_ui_graphics::Size;

use crate::element::{Element, WindowAxis, WindowPosition};

const FRAME_NANOS: u64 = 16_666_667;

#[derive(Debug, Default)]
struct Bubble {
    position: Point,
    size: Size,
    clicks: usize,
    long_clicks: usize,
    pressed: bool,
    layouts: usize,
}

impl Bubble {
    fn at(x: f32, y: f32) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            position: Point::new(x, y),
            size: Size::new(100.0, 100.0),
            ..Self::default()
        }))
    }
}

impl Element for Bubble {
    fn size(&self) -> Size {
        self.size
    }

    fn location_on_screen(&self) -> Point {
        self.position
    }

    fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    fn perform_click(&mut self) {
        self.clicks += 1;
    }

    fn perform_long_click(&mut self) {
        self.long_clicks += 1;
    }
}

impl ViewPosition for Bubble {
    fn position(&self) -> Point {
        self.position
    }

    fn set_x(&mut self, x: f32) {
        self.position.x = x;
    }

    fn set_y(&mut self, y: f32) {
        self.position.y = y;
    }
}

impl WindowPosition for Bubble {
    fn window_position(&self) -> (i32, i32) {
        (self.position.x as i32, self.position.y as i32)
    }

    fn set_window_x(&mut self, x: i32) {
        self.position.x = x as f32;
    }

    fn set_window_y(&mut self, y: i32) {
        self.position.y = y as f32;
    }

    fn update_layout(&mut self) {
        self.layouts += 1;
    }
}

fn screen() -> Rect {
    Rect::from_ltrb(0.0, 0.0, 1080.0, 1920.0)
}

struct Harness {
    runtime: Runtime,
    time_nanos: u64,
}

impl Harness {
    fn new() -> Self {
        Self {
            runtime: Runtime::default(),
            time_nanos: 0,
        }
    }

    fn corner_listener(
        &self,
        element: &Rc<RefCell<Bubble>>,
        config: DragConfig,
    ) -> TouchListener<DragHandler<Bubble, CornerDock>> {
        DragHandler::new(
            Rc::clone(element),
            CornerDock,
            self.runtime.frame_clock(),
            config,
            |_| screen(),
        )
        .expect("valid config")
        .into_listener()
    }

    fn wall_listener(
        &self,
        element: &Rc<RefCell<Bubble>>,
        mode: MoveMode,
    ) -> TouchListener<DragHandler<Bubble, WallDock>> {
        DragHandler::new(
            Rc::clone(element),
            WallDock::new(mode),
            self.runtime.frame_clock(),
            DragConfig::default(),
            |_| screen(),
        )
        .expect("valid config")
        .into_listener()
    }

    fn now_ms(&self) -> i64 {
        (self.time_nanos / 1_000_000) as i64
    }

    fn advance_ms(&mut self, millis: u64) {
        self.time_nanos += millis * 1_000_000;
    }

    fn frame(&mut self) {
        self.runtime.drain_frame_callbacks(self.time_nanos);
        self.time_nanos += FRAME_NANOS;
    }

    fn pump(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() {
            frames += 1;
            assert!(frames < 5_000, "animation never settled");
            self.frame();
        }
        frames
    }
}

fn poll_once(completion: &mut DockCompletion) -> Poll<DockOutcome> {
    let mut cx = Context::from_waker(futures_task::noop_waker_ref());
    Pin::new(completion).poll(&mut cx)
}

#[test]
fn tap_on_a_corner_clicks_without_docking() {
    let mut harness = Harness::new();
    let element = Bubble::at(0.0, 0.0);
    let mut listener = harness.corner_listener(&element, DragConfig::default());

    listener.on_touch(&PointerEvent::down(50.0, 50.0, harness.now_ms()));
    assert!(element.borrow().pressed);
    harness.advance_ms(120);
    listener.on_touch(&PointerEvent::up(50.0, 50.0, harness.now_ms()).with_down_time(0));

    let element = element.borrow();
    assert_eq!(element.clicks, 1);
    assert_eq!(element.long_clicks, 0);
    assert!(!element.pressed);
    assert!(listener.handler().last_completion().is_none());
    assert!(!harness.runtime.has_frame_callbacks());
}

#[test]
fn long_press_on_a_corner_long_clicks() {
    let mut harness = Harness::new();
    let element = Bubble::at(980.0, 1820.0);
    let mut listener = harness.corner_listener(&element, DragConfig::default());

    listener.on_touch(&PointerEvent::down(1000.0, 1850.0, 0));
    harness.advance_ms(1_001);
    listener.on_touch(&PointerEvent::up(1000.0, 1850.0, harness.now_ms()).with_down_time(0));

    assert_eq!(element.borrow().long_clicks, 1);
    assert_eq!(element.borrow().clicks, 0);
}

#[test]
fn tap_away_from_corners_docks_to_the_nearest_one() {
    let mut harness = Harness::new();
    let element = Bubble::at(400.0, 900.0);
    let starts = Rc::new(RefCell::new(Vec::new()));
    let docked = Rc::new(RefCell::new(Vec::new()));
    let mut listener = {
        let starts = Rc::clone(&starts);
        let docked = Rc::clone(&docked);
        TouchListener::new(
            DragHandler::new(
                Rc::clone(&element),
                CornerDock,
                harness.runtime.frame_clock(),
                DragConfig::default(),
                |_| screen(),
            )
            .expect("valid config")
            .with_on_dock_start(move |target, point| starts.borrow_mut().push((target, point)))
            .with_on_docked(move |target, point| docked.borrow_mut().push((target, point))),
            &ViewConfiguration::default(),
        )
    };

    listener.on_touch(&PointerEvent::down(450.0, 950.0, 0));
    harness.advance_ms(50);
    listener.on_touch(&PointerEvent::up(450.0, 950.0, harness.now_ms()));

    let expected = (DockTarget::Corner(Corner::TopLeft), Point::ZERO);
    assert_eq!(*starts.borrow(), vec![expected]);
    assert!(docked.borrow().is_empty());
    assert!(!listener.handler().is_tracking_velocity());

    harness.pump();

    assert_eq!(element.borrow().position, Point::ZERO);
    assert_eq!(element.borrow().clicks, 0);
    assert_eq!(*docked.borrow(), vec![expected]);
    let outcome = listener
        .handler()
        .last_completion()
        .and_then(|completion| completion.try_get());
    assert_eq!(
        outcome,
        Some(DockOutcome::Docked {
            target: expected.0,
            point: expected.1
        })
    );
}

#[test]
fn cancel_never_clicks() {
    let mut harness = Harness::new();
    let element = Bubble::at(0.0, 0.0);
    let mut listener = harness.corner_listener(&element, DragConfig::default());

    listener.on_touch(&PointerEvent::down(50.0, 50.0, 0));
    harness.advance_ms(30);
    listener.on_touch(&PointerEvent::cancel(50.0, 50.0, harness.now_ms()));
    harness.pump();

    assert_eq!(element.borrow().clicks, 0);
    let completion = listener.handler().last_completion().expect("docked");
    assert!(completion.try_get().is_some_and(|outcome| outcome.is_docked()));
}

#[test]
fn moving_can_click_clicks_anywhere() {
    let harness = Harness::new();
    let element = Bubble::at(400.0, 900.0);
    let config = DragConfig::default().with_moving_can_click(true);
    let mut listener = harness.corner_listener(&element, config);

    listener.on_touch(&PointerEvent::down(450.0, 950.0, 0));
    listener.on_touch(&PointerEvent::up(450.0, 950.0, 10));

    assert_eq!(element.borrow().clicks, 1);
    assert!(listener.handler().last_completion().is_none());
}

#[test]
fn drag_follows_the_pointer_with_the_down_offset() {
    let mut harness = Harness::new();
    let element = Bubble::at(100.0, 100.0);
    let mut listener = harness.corner_listener(&element, DragConfig::default());

    listener.on_touch(&PointerEvent::down(130.0, 140.0, 0));
    harness.advance_ms(16);
    listener.on_touch(&PointerEvent::moved(330.0, 540.0, harness.now_ms()));
    assert_eq!(listener.state(), GestureState::Moving);
    harness.pump();

    assert_eq!(element.borrow().position, Point::new(300.0, 500.0));
}

#[test]
fn drag_is_clamped_when_leaving_the_area_is_disallowed() {
    let mut harness = Harness::new();
    let element = Bubble::at(0.0, 0.0);
    let config = DragConfig::default().with_can_move_outside_area(false);
    let mut listener = harness.corner_listener(&element, config);

    listener.on_touch(&PointerEvent::down(50.0, 50.0, 0));
    listener.on_touch(&PointerEvent::moved(2_000.0, 50.0, 16));
    harness.pump();

    assert_eq!(element.borrow().position, Point::new(980.0, 0.0));
}

#[test]
fn unclamped_drag_stops_at_the_animation_bounds() {
    let mut harness = Harness::new();
    let element = Bubble::at(0.0, 0.0);
    let mut listener = harness.corner_listener(&element, DragConfig::default());

    listener.on_touch(&PointerEvent::down(50.0, 50.0, 0));
    listener.on_touch(&PointerEvent::moved(2_000.0, 50.0, 16));
    harness.pump();

    assert_eq!(element.borrow().position, Point::new(1_180.0, 0.0));
}

#[test]
fn move_hook_runs_only_once_dragging() {
    let harness = Harness::new();
    let element = Bubble::at(0.0, 0.0);
    let moves = Rc::new(Cell::new(0));
    let mut listener = {
        let moves = Rc::clone(&moves);
        DragHandler::new(
            Rc::clone(&element),
            CornerDock,
            harness.runtime.frame_clock(),
            DragConfig::default(),
            |_| screen(),
        )
        .expect("valid config")
        .with_on_move(move |_| {
            moves.set(moves.get() + 1);
            false
        })
        .into_listener()
    };

    listener.on_touch(&PointerEvent::down(50.0, 50.0, 0));
    assert!(listener.on_touch(&PointerEvent::moved(53.0, 50.0, 5)));
    assert_eq!(moves.get(), 0);
    assert!(!listener.on_touch(&PointerEvent::moved(70.0, 50.0, 10)));
    assert_eq!(moves.get(), 1);
}

#[test]
fn release_velocity_pushes_the_prediction() {
    // A quick flick to the right lands on the right wall even though the
    // element itself is still in the left half when the finger lifts.
    let mut harness = Harness::new();
    let element = Bubble::at(100.0, 900.0);
    let mut listener = harness.wall_listener(&element, MoveMode::Vertical);

    listener.on_touch(&PointerEvent::down(150.0, 950.0, 0));
    for step in 1..=5 {
        let x = 150.0 + 40.0 * step as f32;
        listener.on_touch(&PointerEvent::moved(x, 950.0, step * 10));
    }
    listener.on_touch(&PointerEvent::up(350.0, 950.0, 50));

    let position = listener.handler().position();
    assert!(position.x < 440.0, "element at {position:?}");
    assert_eq!(listener.handler().wall_for(None), Wall::Left);

    harness.pump();
    assert_eq!(element.borrow().position.x, 980.0);
    assert_eq!(element.borrow().position.y, 900.0);
}

#[test]
fn slow_release_settles_from_the_current_position() {
    let mut harness = Harness::new();
    let element = Bubble::at(100.0, 900.0);
    let mut listener = harness.wall_listener(&element, MoveMode::Vertical);

    listener.on_touch(&PointerEvent::down(150.0, 950.0, 0));
    for step in 1..=5 {
        let x = 150.0 + 40.0 * step as f32;
        listener.on_touch(&PointerEvent::moved(x, 950.0, step * 10));
    }
    harness.time_nanos = 50_000_000;
    harness.pump();
    harness.advance_ms(200);
    listener.on_touch(&PointerEvent::up(350.0, 950.0, harness.now_ms()));
    harness.pump();

    assert_eq!(element.borrow().position, Point::new(0.0, 900.0));
}

#[test]
fn new_down_cancels_the_pending_dock() {
    let mut harness = Harness::new();
    let element = Bubble::at(400.0, 900.0);
    let docked = Rc::new(Cell::new(0));
    let mut listener = {
        let docked = Rc::clone(&docked);
        DragHandler::new(
            Rc::clone(&element),
            CornerDock,
            harness.runtime.frame_clock(),
            DragConfig::default(),
            |_| screen(),
        )
        .expect("valid config")
        .with_on_docked(move |_, _| docked.set(docked.get() + 1))
        .into_listener()
    };

    listener.on_touch(&PointerEvent::down(450.0, 950.0, 0));
    listener.on_touch(&PointerEvent::up(450.0, 950.0, 20));
    let mut first = listener.handler().last_completion().expect("dock started");
    harness.frame();
    harness.frame();
    harness.frame();
    assert_eq!(poll_once(&mut first), Poll::Pending);

    let position = element.borrow().position;
    listener.on_touch(&PointerEvent::down(position.x + 50.0, position.y + 50.0, 100));
    assert_eq!(poll_once(&mut first), Poll::Ready(DockOutcome::Cancelled));
    assert!(!harness.runtime.has_frame_callbacks());

    harness.pump();
    assert_eq!(docked.get(), 0);
}

#[test]
fn clear_animation_cancels_and_stops() {
    let mut harness = Harness::new();
    let element = Bubble::at(400.0, 900.0);
    let listener = harness.corner_listener(&element, DragConfig::default());

    let completion = listener.handler().dock_now();
    harness.frame();
    harness.frame();
    listener.handler().clear_animation();

    assert_eq!(completion.try_get(), Some(DockOutcome::Cancelled));
    assert!(!listener.handler().is_animating());
    let frozen = element.borrow().position;
    harness.pump();
    assert_eq!(element.borrow().position, frozen);
}

#[test]
fn newer_dock_supersedes_the_older_one() {
    let mut harness = Harness::new();
    let element = Bubble::at(400.0, 900.0);
    let listener = harness.corner_listener(&element, DragConfig::default());

    let first = listener.handler().move_to_corner(Corner::TopRight);
    harness.frame();
    let second = listener.handler().move_to_corner(Corner::BottomLeft);
    harness.pump();

    assert_eq!(first.try_get(), Some(DockOutcome::Cancelled));
    assert_eq!(
        second.try_get(),
        Some(DockOutcome::Docked {
            target: DockTarget::Corner(Corner::BottomLeft),
            point: Point::new(0.0, 1820.0),
        })
    );
    assert_eq!(element.borrow().position, Point::new(0.0, 1820.0));
}

#[test]
fn completion_future_resolves_after_the_last_frame() {
    let mut harness = Harness::new();
    let element = Bubble::at(10.0, 10.0);
    let listener = harness.corner_listener(&element, DragConfig::default());

    let mut completion = listener.handler().move_to_corner(Corner::TopLeft);
    assert_eq!(poll_once(&mut completion), Poll::Pending);
    let frames = harness.pump();

    assert!(frames >= 2);
    assert!(matches!(
        poll_once(&mut completion),
        Poll::Ready(DockOutcome::Docked { .. })
    ));
}

#[test]
fn areas_are_built_once_and_set_area_is_idempotent() {
    let harness = Harness::new();
    let element = Bubble::at(0.0, 0.0);
    let calls = Rc::new(Cell::new(0));
    let handler = {
        let calls = Rc::clone(&calls);
        DragHandler::new(
            Rc::clone(&element),
            CornerDock,
            harness.runtime.frame_clock(),
            DragConfig::default(),
            move |_| {
                calls.set(calls.get() + 1);
                screen()
            },
        )
        .expect("valid config")
    };
    assert_eq!(calls.get(), 0);

    assert_eq!(handler.move_area(), Rect::from_ltrb(0.0, 0.0, 980.0, 1820.0));
    assert_eq!(handler.anim_area(), Rect::from_ltrb(-200.0, -200.0, 1180.0, 2020.0));
    assert_eq!(handler.area(), screen());
    assert_eq!(calls.get(), 1);

    assert!(!handler.set_area(screen()));
    let smaller = Rect::from_ltrb(0.0, 0.0, 500.0, 500.0);
    assert!(handler.set_area(smaller));
    assert!(!handler.set_area(smaller));
    assert_eq!(handler.move_area(), Rect::from_ltrb(0.0, 0.0, 400.0, 400.0));
    assert_eq!(handler.anim_area(), Rect::from_ltrb(-200.0, -200.0, 600.0, 600.0));
    assert_eq!(calls.get(), 1);
}

#[test]
fn resized_element_rebuilds_the_areas() {
    let mut harness = Harness::new();
    let element = Bubble::at(0.0, 0.0);
    let handler = DragHandler::new(
        Rc::clone(&element),
        CornerDock,
        harness.runtime.frame_clock(),
        DragConfig::default(),
        |_| screen(),
    )
    .expect("valid config");
    assert_eq!(handler.move_area(), Rect::from_ltrb(0.0, 0.0, 980.0, 1820.0));

    element.borrow_mut().size = Size::new(300.0, 300.0);
    assert!(handler.set_area(screen()));
    assert!(!handler.set_area(screen()));
    assert_eq!(handler.move_area(), Rect::from_ltrb(0.0, 0.0, 780.0, 1620.0));
    assert_eq!(handler.anim_area(), Rect::from_ltrb(-600.0, -600.0, 1380.0, 2220.0));

    // Without a new area the next query notices the resize on its own.
    element.borrow_mut().size = Size::new(200.0, 200.0);
    assert_eq!(handler.move_area(), Rect::from_ltrb(0.0, 0.0, 880.0, 1720.0));

    handler.move_to_corner(Corner::BottomRight);
    harness.pump();
    assert_eq!(element.borrow().position, Point::new(880.0, 1720.0));
}

#[test]
fn growing_the_area_widens_the_animation_bounds() {
    let mut harness = Harness::new();
    let element = Bubble::at(0.0, 0.0);
    let docked = Rc::new(RefCell::new(Vec::new()));
    let handler = {
        let docked = Rc::clone(&docked);
        DragHandler::new(
            Rc::clone(&element),
            CornerDock,
            harness.runtime.frame_clock(),
            DragConfig::default(),
            |_| Rect::from_ltrb(0.0, 0.0, 500.0, 500.0),
        )
        .expect("valid config")
        .with_on_docked(move |target, point| docked.borrow_mut().push((target, point)))
    };
    assert_eq!(handler.anim_area(), Rect::from_ltrb(-200.0, -200.0, 600.0, 600.0));

    assert!(handler.set_area(screen()));
    assert_eq!(handler.anim_area(), Rect::from_ltrb(-200.0, -200.0, 1180.0, 2020.0));
    handler.move_to_corner(Corner::BottomRight);
    harness.pump();

    let corner = Point::new(980.0, 1820.0);
    assert_eq!(element.borrow().position, corner);
    assert_eq!(
        *docked.borrow(),
        vec![(DockTarget::Corner(Corner::BottomRight), corner)]
    );
}

#[test]
fn anim_area_override_is_rerun_for_a_new_area() {
    let harness = Harness::new();
    let element = Bubble::at(0.0, 0.0);
    let handler = DragHandler::new(
        Rc::clone(&element),
        CornerDock,
        harness.runtime.frame_clock(),
        DragConfig::default(),
        |_| screen(),
    )
    .expect("valid config")
    .with_anim_area(|_, area| *area);
    assert_eq!(handler.anim_area(), screen());

    let smaller = Rect::from_ltrb(0.0, 0.0, 500.0, 500.0);
    assert!(handler.set_area(smaller));
    assert_eq!(handler.anim_area(), smaller);
}

#[test]
fn dock_reports_the_point_the_springs_settle_at() {
    let mut harness = Harness::new();
    let element = Bubble::at(0.0, 0.0);
    let starts = Rc::new(RefCell::new(Vec::new()));
    let handler = {
        let starts = Rc::clone(&starts);
        DragHandler::new(
            Rc::clone(&element),
            CornerDock,
            harness.runtime.frame_clock(),
            DragConfig::default(),
            |_| screen(),
        )
        .expect("valid config")
        .with_anim_area(|_, area| Rect::from_ltrb(area.left(), area.top(), 600.0, 600.0))
        .with_on_dock_start(move |target, point| starts.borrow_mut().push((target, point)))
    };

    let completion = handler.move_to_corner(Corner::BottomRight);
    harness.pump();

    let settled = Point::new(600.0, 600.0);
    let target = DockTarget::Corner(Corner::BottomRight);
    assert_eq!(element.borrow().position, settled);
    assert_eq!(*starts.borrow(), vec![(target, settled)]);
    assert_eq!(
        completion.try_get(),
        Some(DockOutcome::Docked {
            target,
            point: settled
        })
    );
}

#[test]
fn anim_area_override_bounds_the_springs() {
    let mut harness = Harness::new();
    let element = Bubble::at(0.0, 0.0);
    let mut listener = DragHandler::new(
        Rc::clone(&element),
        CornerDock,
        harness.runtime.frame_clock(),
        DragConfig::default(),
        |_| screen(),
    )
    .expect("valid config")
    .with_anim_area(|_, area| Rect::from_ltrb(area.left(), area.top(), 600.0, 600.0))
    .into_listener();

    listener.on_touch(&PointerEvent::down(50.0, 50.0, 0));
    listener.on_touch(&PointerEvent::moved(2_000.0, 50.0, 16));
    harness.pump();

    assert_eq!(element.borrow().position.x, 600.0);
}

#[test]
fn corner_for_uses_the_prediction_when_given() {
    let harness = Harness::new();
    let element = Bubble::at(0.0, 0.0);
    let listener = harness.corner_listener(&element, DragConfig::default());

    assert_eq!(listener.handler().corner_for(None), Corner::TopLeft);
    assert_eq!(
        listener.handler().corner_for(Some(Point::new(950.0, 1800.0))),
        Corner::BottomRight
    );
}

#[test]
fn wall_mode_can_change_between_releases() {
    let mut harness = Harness::new();
    let element = Bubble::at(400.0, 300.0);
    let listener = harness.wall_listener(&element, MoveMode::Vertical);
    assert_eq!(listener.handler().wall_for(None), Wall::Left);

    listener.handler().set_move_mode(MoveMode::Horizontal);
    assert_eq!(listener.handler().move_mode(), MoveMode::Horizontal);
    listener.handler().move_to_wall(None);
    harness.pump();

    assert_eq!(element.borrow().position, Point::new(400.0, 0.0));
}

#[test]
fn window_axes_write_whole_pixels() {
    let mut harness = Harness::new();
    let element = Bubble::at(400.0, 900.0);
    let handler = DragHandler::with_axes(
        Rc::clone(&element),
        CornerDock,
        (WindowAxis::X, WindowAxis::Y),
        harness.runtime.frame_clock(),
        DragConfig::default(),
        |_| screen(),
    )
    .expect("valid config");

    handler.move_to_corner(Corner::BottomRight);
    let mut saw_fraction = false;
    while harness.runtime.has_frame_callbacks() {
        harness.frame();
        let position = element.borrow().position;
        saw_fraction |= position.x.fract() != 0.0 || position.y.fract() != 0.0;
    }

    assert!(!saw_fraction);
    assert!(element.borrow().layouts > 0);
    assert_eq!(element.borrow().position, Point::new(980.0, 1820.0));
}

#[test]
fn invalid_config_is_rejected() {
    let harness = Harness::new();
    let result = DragHandler::new(
        Bubble::at(0.0, 0.0),
        CornerDock,
        harness.runtime.frame_clock(),
        DragConfig::default().with_lost_velocity_percent(150),
        |_| screen(),
    );
    assert!(matches!(result, Err(ConfigError::LostVelocityPercent(150))));
}
