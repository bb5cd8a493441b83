//! Snare drum voice.
//!
//! Real snares have metal wires stretched across the bottom head that buzz
//! when the drum is struck; filtered noise stands in for the wires here.
//!
//! 1. Triangle wave provides the tonal "body" (the drum head)
//! 2. Band-passed noise provides the rattle
//! 3. Each branch has its own amplitude envelope, mixed at the end
//!
//! More rattle gives a trashy lo-fi snare; less makes it more tom-like.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode};

/// Fixed parameter record for the snare voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct SnareParams {
    /// Body pitch (Hz).
    pub tone: f32,
    /// Amplitude decay time (seconds). Doubles as the capture deadline.
    pub decay: f32,
    /// Body/rattle balance: 0.0 is all body, 1.0 is all rattle.
    pub rattle: f32,
    /// Output gain.
    pub volume: f32,
}

impl Default for SnareParams {
    fn default() -> Self {
        Self {
            tone: 180.0,
            decay: 0.12,
            rattle: 0.7,
            volume: 1.0,
        }
    }
}

/// Create a snare drum voice from a parameter record.
pub fn snare(params: SnareParams) -> impl crate::graph::GraphNode {
    // Noise for the snare rattle, band-pass filtered
    let rattle = OscNode::noise()
        .amplify(EnvNode::adsr(0.001, params.decay, 0.0, 0.08))
        .through(FilterNode::bandpass(3_000.0));

    // Triangle for the tonal body
    let body = OscNode::triangle()
        .with_frequency(params.tone)
        .amplify(EnvNode::adsr(0.001, params.decay * 0.7, 0.0, 0.05))
        .through(FilterNode::lowpass(400.0));

    body.mix(rattle, params.rattle).gain(params.volume)
}
