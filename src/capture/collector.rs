use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::capture::frame::Frame;
use crate::capture::tap::Tap;

/// Per-trigger accumulator of analyser snapshots.
///
/// A collector is created when a drum is triggered, filled in place by the
/// capture loop (one frame per display refresh), consumed exactly once by
/// [`reconcile`](crate::capture::reconcile::reconcile), then discarded. The
/// frame set is allocated up front and never grows or shrinks; the loop only
/// overwrites frames by ascending index.
pub struct SampleCollector {
    sample_rate: f64,
    frame_width: usize,
    frames: Vec<Frame>,
}

impl SampleCollector {
    pub fn new(sample_rate: f64, frame_width: usize, capacity: usize) -> Self {
        Self {
            sample_rate,
            frame_width,
            frames: (0..capacity)
                .map(|_| Frame::unpopulated(frame_width))
                .collect(),
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn frame_width(&self) -> usize {
        self.frame_width
    }

    /// Fixed frame count; equals the `capacity` passed at construction.
    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn populated_frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(|f| f.is_populated())
    }

    /// Overwrite the frame at `index` with the tap's current state.
    fn record(&mut self, index: usize, tap: &mut impl Tap) {
        let frame = &mut self.frames[index];
        frame.time_start = tap.now();
        tap.read_into(&mut frame.samples);
    }
}

/// Cooperative cancellation for an in-flight capture.
///
/// The demo UI never cancels mid-capture (a stale capture's render can
/// still overwrite a later clear, same as the behavior this port keeps),
/// but the token makes a "stop early" feature structurally possible.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Where a capture task currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Sampling(usize),
    Done,
}

/// The per-frame sampling loop, restated as an explicit state machine.
///
/// One `tick` per display-refresh opportunity; the driver (the TUI redraw
/// loop, or a test harness) supplies the ticks. Each tick either records a
/// frame and advances `Sampling(index)`, or hits a stop condition and moves
/// to `Done`:
///
/// - the tap clock has reached the deadline,
/// - every frame slot has been written (`index >= capacity`),
/// - the cancel token fired.
///
/// Ticking a `Done` task is a no-op, so a driver may keep ticking
/// unconditionally.
pub struct CaptureTask {
    collector: SampleCollector,
    deadline: f64,
    state: CaptureState,
    cancel: CancelToken,
}

impl CaptureTask {
    pub fn new(collector: SampleCollector, deadline: f64) -> Self {
        Self {
            collector,
            deadline,
            state: CaptureState::Idle,
            cancel: CancelToken::new(),
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == CaptureState::Done
    }

    /// Advance by one scheduler tick. Returns the state after the tick.
    pub fn tick(&mut self, tap: &mut impl Tap) -> CaptureState {
        let index = match self.state {
            CaptureState::Idle => 0,
            CaptureState::Sampling(index) => index,
            CaptureState::Done => return CaptureState::Done,
        };

        if self.cancel.is_cancelled()
            || tap.now() >= self.deadline
            || index >= self.collector.capacity()
        {
            self.state = CaptureState::Done;
            return self.state;
        }

        self.collector.record(index, tap);
        self.state = CaptureState::Sampling(index + 1);
        self.state
    }

    /// Consume the task and hand the frame set to reconciliation.
    pub fn into_collector(self) -> SampleCollector {
        self.collector
    }
}
