use flingdock_ui::{Element, ScalableElement, ViewPosition, WindowPosition};
use flingdock_ui_graphics::{Point, Size};

/// In-memory element that records everything a listener does to it.
///
/// The element sits inside a parent whose top-left corner is at
/// `parent_origin` on screen, so `location_on_screen` is
/// `parent_origin + position`. The window-position view of the same element
/// truncates `position` to integers.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeElement {
    pub position: Point,
    pub size: Size,
    pub parent_origin: Point,
    pub scale: f32,
    pub pressed: bool,
    pub clicks: usize,
    pub long_clicks: usize,
    pub layout_updates: usize,
    pub pressed_history: Vec<bool>,
    pub scale_history: Vec<f32>,
}

impl FakeElement {
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            parent_origin: Point::ZERO,
            scale: 1.0,
            pressed: false,
            clicks: 0,
            long_clicks: 0,
            layout_updates: 0,
            pressed_history: Vec::new(),
            scale_history: Vec::new(),
        }
    }

    pub fn with_parent_origin(mut self, origin: Point) -> Self {
        self.parent_origin = origin;
        self
    }

    /// Screen-space centre, where a test would put its finger.
    pub fn center_on_screen(&self) -> Point {
        let origin = self.location_on_screen();
        Point::new(
            origin.x + self.size.width / 2.0,
            origin.y + self.size.height / 2.0,
        )
    }
}

impl Element for FakeElement {
    fn size(&self) -> Size {
        self.size
    }

    fn location_on_screen(&self) -> Point {
        self.parent_origin + self.position
    }

    fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
        self.pressed_history.push(pressed);
    }

    fn perform_click(&mut self) {
        self.clicks += 1;
    }

    fn perform_long_click(&mut self) {
        self.long_clicks += 1;
    }
}

impl ViewPosition for FakeElement {
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

impl WindowPosition for FakeElement {
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
        self.layout_updates += 1;
    }
}

impl ScalableElement for FakeElement {
    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.scale_history.push(scale);
    }
}
