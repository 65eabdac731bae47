//! Touch listeners that drag, dock and pulse host elements.
//!
//! Each listener is a [`TouchListener`] around a handler:
//!
//! * [`CornerDockListener`] drags an element and docks it to the nearest
//!   corner on release.
//! * [`WallDockListener`] docks it against a wall picked by [`MoveMode`].
//! * [`ScalePulseListener`] leaves the element in place and animates its
//!   scale on press and release.
//!
//! Animations advance when the host drains the frame callbacks of the
//! [`Runtime`](flingdock_core::Runtime) whose [`FrameClock`] the listener was
//! built with.

pub mod config;
pub mod dock;
pub mod drag;
pub mod element;
pub mod scale_pulse;

pub use config::{ConfigError, DragConfig, ScalePulseConfig, ScaleType};
pub use dock::{
    default_anim_area, CornerDock, DockAreas, DockCompletion, DockOutcome, DockStrategy,
    DockTarget, WallDock,
};
pub use drag::DragHandler;
pub use element::{
    Axis, AxisProperty, Element, ScalableElement, ViewAxis, ViewPosition, WindowAxis,
    WindowPosition,
};
pub use scale_pulse::ScalePulseHandler;

pub use flingdock_core::FrameClock;
pub use flingdock_foundation::{
    Corner, GestureState, MoveMode, PointerEvent, PointerEventKind, TouchListener,
    ViewConfiguration, Wall,
};
pub use flingdock_ui_graphics::{Point, Rect, Size};

pub type CornerDockListener<E, A = ViewAxis> = TouchListener<DragHandler<E, CornerDock, A>>;
pub type WallDockListener<E, A = ViewAxis> = TouchListener<DragHandler<E, WallDock, A>>;
pub type ScalePulseListener<E> = TouchListener<ScalePulseHandler<E>>;

pub mod prelude {
    pub use crate::config::{DragConfig, ScalePulseConfig, ScaleType};
    pub use crate::dock::{CornerDock, DockOutcome, DockTarget, WallDock};
    pub use crate::drag::DragHandler;
    pub use crate::element::{Element, ScalableElement, ViewPosition, WindowPosition};
    pub use crate::scale_pulse::ScalePulseHandler;
    pub use crate::{CornerDockListener, ScalePulseListener, WallDockListener};
    pub use flingdock_foundation::prelude::*;
}
