//! Single-threaded frame runtime for flingdock.
//!
//! The host owns the vsync source: it calls [`Runtime::drain_frame_callbacks`]
//! once per frame and every animation registered through a [`FrameClock`]
//! advances by one step. Nothing here spawns threads or blocks.

mod completion;
mod frame_clock;
mod runtime;

pub use completion::{Completion, CompletionSource};
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{DefaultScheduler, FrameScheduler, Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;

pub mod prelude {
    pub use crate::completion::{Completion, CompletionSource};
    pub use crate::frame_clock::FrameClock;
    pub use crate::runtime::{Runtime, RuntimeHandle};
}
