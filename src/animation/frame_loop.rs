//! Frame scheduling with cooperative cancellation.

use std::cell::Cell;
use std::rc::Rc;
use web_time::Instant;

/// Monotonic clock started when the scene is created.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        FrameClock {
            start: now,
            last: now,
        }
    }

    /// Seconds since the previous tick, or since creation for the first one.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }

    /// Seconds since creation.
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// A shared switch that stops a [`FrameLoop`] for good.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    cancelled: Rc<Cell<bool>>,
}

impl CancelHandle {
    /// Cancels the loop.
    ///
    /// Returns `true` for the call that actually cancelled it; later calls
    /// return `false` and have no effect.
    pub fn cancel(&self) -> bool {
        !self.cancelled.replace(true)
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Tracks the one pending frame callback of a mounted scene.
///
/// The host asks for a frame with [`schedule`](Self::schedule) and, when the
/// display is ready, runs it only if [`fire`](Self::fire) says so. Once the
/// loop is cancelled neither succeeds again, so no frame can run after
/// disposal.
#[derive(Debug, Default)]
pub struct FrameLoop {
    cancel: CancelHandle,
    pending: bool,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle able to cancel this loop from elsewhere.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Requests the next frame. Returns `false` if the loop is cancelled.
    pub fn schedule(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            self.pending = false;
            return false;
        }

        self.pending = true;
        true
    }

    /// Consumes the pending request. Returns `true` if a frame must run now.
    pub fn fire(&mut self) -> bool {
        let run = std::mem::take(&mut self.pending) && !self.cancel.is_cancelled();
        if run {
            self.frames += 1;
        }
        run
    }

    /// Cancels the loop and drops any pending request. Idempotent.
    pub fn cancel(&mut self) -> bool {
        self.pending = false;
        self.cancel.cancel()
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of frames run so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_consumes_the_request() {
        let mut frames = FrameLoop::new();
        assert!(!frames.fire());
        assert!(frames.schedule());
        assert!(frames.fire());
        assert!(!frames.fire());
        assert_eq!(frames.frames(), 1);
    }

    #[test]
    fn test_cancel_through_a_handle_blocks_pending_frames() {
        let mut frames = FrameLoop::new();
        let handle = frames.cancel_handle();

        assert!(frames.schedule());
        assert!(handle.cancel());
        assert!(!handle.cancel());
        assert!(!frames.fire());
        assert!(!frames.schedule());
        assert!(!frames.cancel());
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert!(a >= 0.0 && b >= 0.0);
        assert!(clock.elapsed() + 1.0e-3 >= a + b);
    }
}
