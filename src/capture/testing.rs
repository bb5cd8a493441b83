//! Scripted taps for driving the capture loop without an audio stream.
//!
//! Shared by the unit tests, the integration suite, and the reconcile
//! bench, so the exact same loop code runs against deterministic input.

use std::collections::VecDeque;

use crate::capture::tap::Tap;

enum Source {
    /// Clock starts at `time` and advances by `dt` per read; sample bytes
    /// follow a per-read ramp.
    Uniform { time: f64, dt: f64 },
    /// Explicit (time, samples) pairs, one per read. Once exhausted the
    /// clock reports infinity so any deadline fires.
    Script(VecDeque<(f64, Vec<u8>)>),
}

pub struct ScriptedTap {
    frame_width: usize,
    source: Source,
    reads: usize,
}

impl ScriptedTap {
    /// Evenly ticking tap, one synthetic frame per `dt` seconds.
    pub fn new(frame_width: usize, start: f64, dt: f64) -> Self {
        Self {
            frame_width,
            source: Source::Uniform { time: start, dt },
            reads: 0,
        }
    }

    /// Tap that replays an exact sequence of timestamped frames.
    pub fn from_script(frame_width: usize, script: Vec<(f64, Vec<u8>)>) -> Self {
        Self {
            frame_width,
            source: Source::Script(script.into()),
            reads: 0,
        }
    }

    /// How many frames have been read off this tap.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl Tap for ScriptedTap {
    fn frame_width(&self) -> usize {
        self.frame_width
    }

    fn read_into(&mut self, out: &mut [u8]) {
        match &mut self.source {
            Source::Uniform { time, dt } => {
                // Distinct, deterministic bytes per frame
                let base = (self.reads * 8) as u8;
                for (i, byte) in out.iter_mut().enumerate() {
                    *byte = base.wrapping_add(i as u8);
                }
                *time += *dt;
            }
            Source::Script(frames) => {
                if let Some((_, samples)) = frames.pop_front() {
                    let n = out.len().min(samples.len());
                    out[..n].copy_from_slice(&samples[..n]);
                }
            }
        }
        self.reads += 1;
    }

    fn now(&self) -> f64 {
        match &self.source {
            Source::Uniform { time, .. } => *time,
            Source::Script(frames) => frames.front().map_or(f64::INFINITY, |(t, _)| *t),
        }
    }
}
