//! One-shot completion values.
//!
//! A [`CompletionSource`] resolves exactly once; every [`Completion`] cloned
//! from it observes the same value. Resolution after the first is ignored,
//! so callers can report "done" from several places without producing a
//! second notification.

use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

struct CompletionState<T> {
    value: Option<T>,
    wakers: SmallVec<[Waker; 1]>,
}

/// Write side of a one-shot completion.
pub struct CompletionSource<T> {
    state: Rc<RefCell<CompletionState<T>>>,
}

impl<T: Clone> CompletionSource<T> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(CompletionState {
                value: None,
                wakers: SmallVec::new(),
            })),
        }
    }

    pub fn completion(&self) -> Completion<T> {
        Completion {
            state: Rc::clone(&self.state),
        }
    }

    /// Stores `value` unless a value is already present. Returns `true` when
    /// this call performed the resolution.
    pub fn resolve(&self, value: T) -> bool {
        let wakers = {
            let mut state = self.state.borrow_mut();
            if state.value.is_some() {
                return false;
            }
            state.value = Some(value);
            std::mem::take(&mut state.wakers)
        };
        for waker in wakers {
            waker.wake();
        }
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.state.borrow().value.is_some()
    }
}

impl<T: Clone> Default for CompletionSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read side of a one-shot completion. Also a [`Future`] yielding a clone of
/// the resolved value.
pub struct Completion<T> {
    state: Rc<RefCell<CompletionState<T>>>,
}

impl<T: Clone> Completion<T> {
    pub fn try_get(&self) -> Option<T> {
        self.state.borrow().value.clone()
    }

    pub fn is_resolved(&self) -> bool {
        self.state.borrow().value.is_some()
    }
}

impl<T> Clone for Completion<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("value", &self.state.borrow().value)
            .finish()
    }
}

impl<T: Clone> Future for Completion<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.borrow_mut();
        if let Some(value) = state.value.as_ref() {
            return Poll::Ready(value.clone());
        }
        if !state.wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
            state.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}
