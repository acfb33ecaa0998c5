//! Frame scheduling seam between the session and the host's animation loop.
//!
//! The session requests one frame at a time while playing and cancels the
//! outstanding request on pause. Hosts deliver frames back through
//! [`crate::Session::on_frame`] with the token they were issued.

use serde::{Deserialize, Serialize};

/// Identifies one requested frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameToken(pub u64);

/// Source of animation frames (e.g. `requestAnimationFrame`, a game loop, a test).
pub trait FrameScheduler {
    /// Ask for the next frame to be delivered.
    fn request_frame(&mut self) -> FrameToken;
    /// Withdraw a request; a cancelled frame must not be delivered.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Scheduler for hosts that pump frames themselves.
///
/// Requests queue up until [`ManualScheduler::take_next`] hands them out.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameToken>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding requests, oldest first.
    pub fn pending(&self) -> &[FrameToken] {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Remove and return the oldest outstanding request.
    pub fn take_next(&mut self) -> Option<FrameToken> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next_id);
        self.next_id += 1;
        self.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|t| *t != token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_fifo() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame();
        let b = s.request_frame();
        assert_ne!(a, b);
        assert_eq!(s.take_next(), Some(a));
        assert_eq!(s.take_next(), Some(b));
        assert_eq!(s.take_next(), None);
    }

    #[test]
    fn cancel_removes_request() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame();
        s.cancel_frame(a);
        assert!(!s.has_pending());
        // cancelling twice is harmless
        s.cancel_frame(a);
        assert!(s.pending().is_empty());
    }
}
