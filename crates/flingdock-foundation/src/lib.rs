//! Input-side building blocks for flingdock.
//!
//! Raw pointer events enter through a [`TouchListener`], which classifies the
//! gesture as a tap (`Down`) or a drag (`Moving`) and forwards each phase to a
//! pluggable [`GestureHandler`]. The velocity tracker and docking geometry
//! here carry no UI state and can be used on their own.

pub mod dispatcher;
pub mod docking;
pub mod gesture;
pub mod gesture_constants;
pub mod pointer;
pub mod velocity_tracker;

pub use dispatcher::PointerDispatcher;
pub use docking::{
    choose_wall, corner_distances, corner_point, element_center, is_near_corner, is_near_wall,
    nearest_corner, wall_distances, wall_point, Corner, MoveMode, Wall,
};
pub use gesture::{Gesture, GestureHandler, GestureState, TouchListener};
pub use gesture_constants::ViewConfiguration;
pub use pointer::{PointerEvent, PointerEventKind};
pub use velocity_tracker::{Velocity, VelocityTracker, VelocityTracker1D};

pub use flingdock_ui_graphics::{Point, Rect, Size};

pub mod prelude {
    pub use crate::docking::{Corner, MoveMode, Wall};
    pub use crate::gesture::{Gesture, GestureHandler, GestureState, TouchListener};
    pub use crate::gesture_constants::ViewConfiguration;
    pub use crate::pointer::{PointerEvent, PointerEventKind};
}
