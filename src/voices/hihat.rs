//! Hi-hat voice (closed).
//!
//! A tight burst of high-passed white noise. A longer decay turns it into
//! an open hat; a lower cutoff makes it darker and jazzier.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode};

/// Fixed parameter record for the hi-hat voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct HatParams {
    /// High-pass cutoff (Hz); hats live above this.
    pub cutoff: f32,
    /// Amplitude decay time (seconds). Doubles as the capture deadline.
    pub decay: f32,
    /// Output gain.
    pub volume: f32,
}

impl Default for HatParams {
    fn default() -> Self {
        Self {
            cutoff: 7_000.0,
            decay: 0.05,
            volume: 0.8,
        }
    }
}

/// Create a closed hi-hat voice from a parameter record.
pub fn hihat(params: HatParams) -> impl crate::graph::GraphNode {
    OscNode::noise()
        .amplify(EnvNode::adsr(0.001, params.decay, 0.0, 0.03))
        .through(FilterNode::highpass(params.cutoff))
        .gain(params.volume)
}
