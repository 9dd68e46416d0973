//! Redraw coalescing.

/// Tracks whether the canvas needs repainting.
///
/// Mutations call [`mark_dirty`](Self::mark_dirty); the host requests an
/// animation frame only when [`take_request`](Self::take_request) returns
/// `true`, and calls [`begin_frame`](Self::begin_frame) when the frame fires.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    dirty: bool,
    requested: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the canvas dirty. Returns `true` if a frame must be requested.
    pub fn mark_dirty(&mut self) -> bool {
        let request = !self.dirty;
        self.dirty = true;
        self.requested |= request;
        request
    }

    /// Take the pending frame request, if any.
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }

    /// Consume the dirty flag at paint time. Returns `true` if a repaint is due.
    pub fn begin_frame(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutations_coalesce() {
        let mut frames = FrameScheduler::new();
        assert!(frames.mark_dirty());
        assert!(!frames.mark_dirty());
        assert!(!frames.mark_dirty());
        assert!(frames.take_request());
        assert!(!frames.take_request());

        assert!(frames.begin_frame());
        assert!(!frames.is_dirty());
        assert!(!frames.begin_frame());

        assert!(frames.mark_dirty());
    }
}
