use crate::runtime::RuntimeHandle;
use crate::FrameCallbackId;

/// Hands out one-shot frame callbacks on a [`Runtime`](crate::Runtime).
///
/// Cloning is cheap; every clone queues on the same runtime.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    /// Queues `callback` for the next drained frame. It receives the frame
    /// time in nanoseconds. The callback stays queued only while the
    /// returned registration is alive.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let id = self.runtime.register_frame_callback(callback);
        FrameCallbackRegistration {
            runtime: self.runtime.clone(),
            id,
        }
    }
}

/// Keeps a frame callback queued. Dropping or cancelling it removes the
/// callback from the runtime.
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    /// `false` when the runtime was already gone at registration time.
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn cancel(mut self) {
        self.unregister();
    }

    fn unregister(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.unregister();
    }
}
