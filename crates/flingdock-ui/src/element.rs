//! Host-side element abstraction.
//!
//! The listeners never own a view tree. They reach the element through these
//! traits, and its position through an [`AxisProperty`] per axis, so the
//! same controller drives a view inside its parent or a floating window.

use flingdock_ui_graphics::{Point, Size};

/// What every listener needs from the element it is attached to.
pub trait Element {
    fn size(&self) -> Size;

    /// Top-left corner in absolute screen coordinates.
    fn location_on_screen(&self) -> Point;

    fn set_pressed(&mut self, _pressed: bool) {}

    fn perform_click(&mut self) {}

    fn perform_long_click(&mut self) {}
}

/// An element positioned with float coordinates inside its parent.
pub trait ViewPosition: Element {
    fn position(&self) -> Point;

    fn set_x(&mut self, x: f32);

    fn set_y(&mut self, y: f32);
}

/// An element hosted in its own window, positioned by integer layout
/// parameters.
pub trait WindowPosition: Element {
    fn window_position(&self) -> (i32, i32);

    fn set_window_x(&mut self, x: i32);

    fn set_window_y(&mut self, y: i32);

    /// Pushes changed layout parameters to the window manager.
    fn update_layout(&mut self);
}

/// An element that can be drawn scaled about its centre.
pub trait ScalableElement: Element {
    fn set_scale(&mut self, scale: f32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Reads and writes one coordinate of an element.
pub trait AxisProperty<E: ?Sized> {
    fn get(&self, element: &E) -> f32;

    fn set(&self, element: &mut E, value: f32);
}

/// Float position inside the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewAxis(pub Axis);

impl ViewAxis {
    pub const X: ViewAxis = ViewAxis(Axis::X);
    pub const Y: ViewAxis = ViewAxis(Axis::Y);
}

impl<E: ViewPosition + ?Sized> AxisProperty<E> for ViewAxis {
    fn get(&self, element: &E) -> f32 {
        let position = element.position();
        match self.0 {
            Axis::X => position.x,
            Axis::Y => position.y,
        }
    }

    fn set(&self, element: &mut E, value: f32) {
        match self.0 {
            Axis::X => element.set_x(value),
            Axis::Y => element.set_y(value),
        }
    }
}

/// Integer window position. Writes truncate toward zero and refresh the
/// window layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowAxis(pub Axis);

impl WindowAxis {
    pub const X: WindowAxis = WindowAxis(Axis::X);
    pub const Y: WindowAxis = WindowAxis(Axis::Y);
}

impl<E: WindowPosition + ?Sized> AxisProperty<E> for WindowAxis {
    fn get(&self, element: &E) -> f32 {
        let (x, y) = element.window_position();
        match self.0 {
            Axis::X => x as f32,
            Axis::Y => y as f32,
        }
    }

    fn set(&self, element: &mut E, value: f32) {
        let value = value as i32;
        match self.0 {
            Axis::X => element.set_window_x(value),
            Axis::Y => element.set_window_y(value),
        }
        element.update_layout();
    }
}
