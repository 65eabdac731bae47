//! Queue for hosts that collect pointer events before handing them over.
//!
//! Platform glue pushes events as they arrive and drains them into a
//! listener once per frame, so listener callbacks never run re-entrantly
//! inside the platform's own input callback.

use smallvec::SmallVec;

use crate::pointer::PointerEvent;

#[derive(Default)]
pub struct PointerDispatcher {
    queue: SmallVec<[PointerEvent; 4]>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self {
            queue: SmallVec::new(),
        }
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.queue.push(event);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Hands every queued event to `handler` in arrival order. Returns
    /// whether any of them was consumed.
    pub fn drain<F>(&mut self, mut handler: F) -> bool
    where
        F: FnMut(&PointerEvent) -> bool,
    {
        let mut consumed = false;
        for event in self.queue.drain(..) {
            consumed |= handler(&event);
        }
        consumed
    }
}
