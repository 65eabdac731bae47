use flingdock_ui_graphics::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerEventKind {
    /// `Up` or `Cancel`: the gesture ends with this event.
    pub fn ends_gesture(self) -> bool {
        matches!(self, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}

/// A single-pointer event in absolute screen coordinates.
///
/// `down_time_ms` is the time of the down event that started the gesture,
/// so a listener can measure press duration from any later event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
    pub event_time_ms: i64,
    pub down_time_ms: i64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, event_time_ms: i64) -> Self {
        Self {
            kind,
            position,
            event_time_ms,
            down_time_ms: event_time_ms,
        }
    }

    pub fn down(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y), time_ms)
    }

    pub fn moved(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y), time_ms)
    }

    pub fn up(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y), time_ms)
    }

    pub fn cancel(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Cancel, Point::new(x, y), time_ms)
    }

    pub fn with_down_time(mut self, down_time_ms: i64) -> Self {
        self.down_time_ms = down_time_ms;
        self
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Milliseconds since the gesture's down event.
    pub fn elapsed_since_down_ms(&self) -> i64 {
        self.event_time_ms - self.down_time_ms
    }
}
