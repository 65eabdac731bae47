//! Testing utilities and harness for flingdock

pub mod element;
pub mod testing;

pub use element::FakeElement;
pub use testing::*;

pub mod prelude {
    pub use crate::element::FakeElement;
    pub use crate::testing::*;
}
