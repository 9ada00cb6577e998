use crate::foundation::error::{FoldmarkError, FoldmarkResult};

/// Opaque id of a pending display-frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// Opaque id of a pending one-shot timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

/// Host capability for "call me back later".
///
/// Implementations deliver callbacks by handing the matching handle back to
/// whichever component requested it. Cancelling a handle that already fired,
/// was already cancelled, or was never issued is a no-op.
pub trait Scheduler {
    /// Ask for a callback on the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a frame request.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Ask for a callback after `delay_ms` milliseconds.
    fn set_timeout(&mut self, delay_ms: f64) -> TimerHandle;

    /// Withdraw a timer.
    fn clear_timeout(&mut self, handle: TimerHandle);
}

/// A callback that came due on a [`ManualScheduler`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Wakeup {
    /// Display refresh for `handle` at `timestamp_ms`.
    Frame {
        /// The request being answered.
        handle: FrameHandle,
        /// Refresh timestamp in milliseconds.
        timestamp_ms: f64,
    },
    /// Timer `handle` elapsed.
    Timer {
        /// The timer that fired.
        handle: TimerHandle,
    },
}

#[derive(Clone, Copy, Debug)]
enum PendingKind {
    Frame(FrameHandle),
    Timer(TimerHandle),
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    at_ms: f64,
    seq: u64,
    kind: PendingKind,
}

/// Deterministic virtual-clock [`Scheduler`].
///
/// Display refreshes happen at every multiple of `frame_interval_ms`; a frame
/// request made at time `now` fires at the first refresh strictly after
/// `now`, and all requests pending for the same refresh share its timestamp.
/// Time only moves when the host drains it with [`next_due`](Self::next_due).
#[derive(Clone, Debug)]
pub struct ManualScheduler {
    now_ms: f64,
    frame_interval_ms: f64,
    next_id: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    /// Refresh rate used when none is given (60 Hz).
    pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

    /// A 60 Hz scheduler starting at `t = 0`.
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            frame_interval_ms: Self::DEFAULT_FRAME_INTERVAL_MS,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// A scheduler refreshing every `frame_interval_ms`, starting at `start_ms`.
    pub fn with_interval(frame_interval_ms: f64, start_ms: f64) -> FoldmarkResult<Self> {
        if !frame_interval_ms.is_finite() || frame_interval_ms <= 0.0 {
            return Err(FoldmarkError::schedule(
                "frame interval must be finite and > 0",
            ));
        }
        if !start_ms.is_finite() {
            return Err(FoldmarkError::schedule("start time must be finite"));
        }
        Ok(Self {
            now_ms: start_ms,
            frame_interval_ms,
            ..Self::new()
        })
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Refresh period in milliseconds.
    pub fn frame_interval_ms(&self) -> f64 {
        self.frame_interval_ms
    }

    /// Number of callbacks still pending.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether a frame request is still pending.
    pub fn has_pending_frame(&self) -> bool {
        self.pending
            .iter()
            .any(|p| matches!(p.kind, PendingKind::Frame(_)))
    }

    /// Pop the earliest callback due at or before `until_ms`, moving the clock
    /// to its due time. When nothing is due the clock moves to `until_ms` and
    /// `None` is returned.
    ///
    /// Callbacks requested while handling a wakeup are considered by the next
    /// call, so a drain loop sees a self-rescheduling frame loop tick by tick.
    pub fn next_due(&mut self, until_ms: f64) -> Option<Wakeup> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.at_ms <= until_ms)
            .min_by(|(_, a), (_, b)| a.at_ms.total_cmp(&b.at_ms).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i);

        let Some(idx) = idx else {
            if until_ms > self.now_ms {
                self.now_ms = until_ms;
            }
            return None;
        };

        let p = self.pending.remove(idx);
        if p.at_ms > self.now_ms {
            self.now_ms = p.at_ms;
        }
        Some(match p.kind {
            PendingKind::Frame(handle) => Wakeup::Frame {
                handle,
                timestamp_ms: p.at_ms,
            },
            PendingKind::Timer(handle) => Wakeup::Timer { handle },
        })
    }

    /// Drain every callback due up to `until_ms` without dispatching them.
    pub fn advance_to(&mut self, until_ms: f64) -> Vec<Wakeup> {
        let mut out = Vec::new();
        while let Some(w) = self.next_due(until_ms) {
            out.push(w);
        }
        out
    }

    fn next_refresh_after(&self, t: f64) -> f64 {
        ((t / self.frame_interval_ms).floor() + 1.0) * self.frame_interval_ms
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let id = self.alloc_id();
        let handle = FrameHandle(id);
        self.pending.push(Pending {
            at_ms: self.next_refresh_after(self.now_ms),
            seq: id,
            kind: PendingKind::Frame(handle),
        });
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending
            .retain(|p| !matches!(p.kind, PendingKind::Frame(h) if h == handle));
    }

    fn set_timeout(&mut self, delay_ms: f64) -> TimerHandle {
        let id = self.alloc_id();
        let handle = TimerHandle(id);
        let delay = if delay_ms.is_finite() { delay_ms.max(0.0) } else { 0.0 };
        self.pending.push(Pending {
            at_ms: self.now_ms + delay,
            seq: id,
            kind: PendingKind::Timer(handle),
        });
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.pending
            .retain(|p| !matches!(p.kind, PendingKind::Timer(h) if h == handle));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/scheduler.rs"]
mod tests;
