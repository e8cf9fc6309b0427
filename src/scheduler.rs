//! Per-frame callback scheduling.
//!
//! Works like a display-refresh callback queue: a client asks for the next
//! frame with [`FrameScheduler::request_frame`] and receives a
//! [`FrameRequest`] it can later cancel. At every display refresh the host
//! calls [`FrameScheduler::begin_frame`], which hands out everything requested
//! so far. Requests made while a frame is running land in the next frame, so
//! a client that re-requests from inside its frame runs exactly once per
//! refresh.
//!
//! ```ignore
//! let mut scheduler = FrameScheduler::new();
//! effect.mount(&mut scheduler, &mut canvas);
//!
//! // Once per display refresh:
//! let due = scheduler.begin_frame();
//! effect.frame(&due, &mut scheduler, &mut canvas, time.delta());
//! ```

/// Handle for one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

/// Requests that are due in the current frame.
#[derive(Debug, Clone, Default)]
pub struct DueFrames {
    requests: Vec<FrameRequest>,
}

impl DueFrames {
    pub fn contains(&self, request: FrameRequest) -> bool {
        self.requests.contains(&request)
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Vec<FrameRequest>,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask to be called back on the next frame.
    pub fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id);
        self.next_id += 1;
        self.pending.push(request);
        request
    }

    /// Cancel a request that has not run yet.
    ///
    /// Returns `false` if the request already ran or was cancelled.
    pub fn cancel_frame(&mut self, request: FrameRequest) -> bool {
        let before = self.pending.len();
        self.pending.retain(|r| *r != request);
        self.pending.len() != before
    }

    /// Whether anything is waiting for the next frame.
    ///
    /// Hosts use this to decide whether to keep asking the window for redraws.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Start a frame, taking every request made so far.
    pub fn begin_frame(&mut self) -> DueFrames {
        self.frames += 1;
        DueFrames {
            requests: std::mem::take(&mut self.pending),
        }
    }

    /// Frames started since creation.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
