use std::collections::HashMap;

use crate::capture::collector::SampleCollector;

/*
Waveform Reconciliation
=======================

Frames arrive once per display refresh, so their coverage of the waveform is
jittery: consecutive frames can overlap in time or leave gaps, while the
samples inside each frame are exactly one sample period apart starting at
the frame's timestamp. Reconciliation flattens that into a single
deduplicated, evenly-paced sequence in two steps:

1. Every sample of every populated frame lands in a time->amplitude map
   keyed by its absolute time (`time_start + i / sample_rate`). Writes at a
   colliding key overwrite the amplitude but keep the key's original
   position, so the map's order is the order keys were first inserted.

2. A half-open acceptance window of half-width epsilon (one sample period)
   starts centered on the first frame's timestamp and slides forward by
   2*epsilon each time an entry falls inside it. Entries outside the window
   are dropped. The result keeps at most one sample per 2*epsilon bucket.

This is selection, not resampling: no interpolation, no averaging. Step 2
walks the map in insertion order, which approximates time order only as
well as the frames arrived in order. That matches the behavior this port
preserves; sorting by time first would change the output whenever frames
overlap (see DESIGN.md).
*/

/// Insertion-ordered map from sample time to amplitude byte.
///
/// Last write wins; an overwrite keeps the original insertion position.
/// Keys are compared by exact bit pattern, so two times must collide to
/// the same float to dedupe in this step (near-misses are left to the
/// thinning window).
#[derive(Default)]
pub struct TimeMap {
    entries: Vec<(f64, u8)>,
    index: HashMap<u64, usize>,
}

impl TimeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, time: f64, amplitude: u8) {
        match self.index.get(&time.to_bits()) {
            Some(&slot) => self.entries[slot].1 = amplitude,
            None => {
                self.index.insert(time.to_bits(), self.entries.len());
                self.entries.push((time, amplitude));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, u8)> + '_ {
        self.entries.iter().copied()
    }
}

/// Spread every populated frame into the intermediate time map.
fn build_time_map(collector: &SampleCollector) -> TimeMap {
    let mut map = TimeMap::new();
    let period = 1.0 / collector.sample_rate();

    for frame in collector.populated_frames() {
        for (i, &amplitude) in frame.samples.iter().enumerate() {
            map.insert(frame.time_start + i as f64 * period, amplitude);
        }
    }

    map
}

/// Merge a collector's populated frames into one deduplicated,
/// evenly-paced amplitude sequence.
///
/// A collector with zero populated frames (sampling never started, e.g. a
/// zero-decay trigger) reconciles to an empty sequence.
pub fn reconcile(collector: &SampleCollector) -> Vec<u8> {
    let first = match collector.populated_frames().next() {
        Some(frame) => frame.time_start,
        None => return Vec::new(),
    };

    let map = build_time_map(collector);
    let epsilon = 1.0 / collector.sample_rate();

    let mut start = first - epsilon;
    let mut end = first + epsilon;
    let mut merged = Vec::with_capacity(map.len());

    for (time, amplitude) in map.iter() {
        if start <= time && time <= end {
            merged.push(amplitude);
            start += 2.0 * epsilon;
            end += 2.0 * epsilon;
        }
    }

    merged
}
