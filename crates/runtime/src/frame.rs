use foundation::time::Time;

/// Deterministic frame metadata.
///
/// This is the timebase for the scene. Every per-frame mutation is driven
/// from a `Frame`, so a session can be replayed exactly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Fixed delta time (seconds).
    pub dt_s: f64,
    /// Scene time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn first(fps: f64) -> Self {
        Self::new(0, 1.0 / fps.max(1.0))
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }

    /// Scene time at the end of the frame.
    pub fn end_time(self) -> Time {
        Time(self.time.0 + self.dt_s)
    }
}

/// Fixed-rate frame sequence covering `duration_s` of scene time.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    next: Frame,
    frame_count: u64,
}

impl FrameLoop {
    pub fn new(fps: f64, duration_s: f64) -> Self {
        let first = Frame::first(fps);
        let frame_count = (duration_s.max(0.0) / first.dt_s - 1e-9).ceil().max(0.0) as u64;
        Self {
            next: first,
            frame_count,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Iterator for FrameLoop {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.next.index >= self.frame_count {
            return None;
        }
        let frame = self.next;
        self.next = frame.next();
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, FrameLoop};
    use foundation::time::Time;

    #[test]
    fn frame_time_is_deterministic() {
        let a = Frame::new(10, 1.0 / 60.0);
        let b = Frame::new(10, 1.0 / 60.0);
        assert_eq!(a, b);
        assert_eq!(a.time, Time(10.0 / 60.0));
    }

    #[test]
    fn next_advances_index_and_time() {
        let f1 = Frame::new(0, 0.5).next();
        assert_eq!(f1.index, 1);
        assert_eq!(f1.time, Time(0.5));
        assert_eq!(f1.end_time(), Time(1.0));
    }

    #[test]
    fn frame_loop_covers_duration() {
        let frames: Vec<Frame> = FrameLoop::new(4.0, 2.0).collect();
        assert_eq!(frames.len(), 8);
        assert_eq!(frames.last().map(|f| f.end_time()), Some(Time(2.0)));
    }

    #[test]
    fn empty_loop_for_zero_duration() {
        assert_eq!(FrameLoop::new(60.0, 0.0).count(), 0);
    }
}
