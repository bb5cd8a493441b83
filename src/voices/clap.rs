//! Clap voice - punchy, bright hand clap.
//!
//! Filtered noise with a sharp envelope. The bandpass is the key move: it
//! removes both the low rumble and the ultra-high hiss, leaving the
//! characteristic "crack" frequencies around the center. The slight 5ms
//! attack is what separates a clap from a snare hit.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode};

/// Fixed parameter record for the clap voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct ClapParams {
    /// Bandpass center (Hz). Higher is thinner, lower is fuller.
    pub center: f32,
    /// Amplitude decay time (seconds). Doubles as the capture deadline.
    pub decay: f32,
    /// Output gain; boosted by default to cut through the mix.
    pub volume: f32,
}

impl Default for ClapParams {
    fn default() -> Self {
        Self {
            center: 1_500.0,
            decay: 0.08,
            volume: 1.5,
        }
    }
}

/// Create a clap voice from a parameter record.
///
/// The trigger pitch is ignored - claps are unpitched percussion.
pub fn clap(params: ClapParams) -> impl crate::graph::GraphNode {
    OscNode::noise()
        // Bandpass focuses on the "crack" frequencies
        .through(FilterNode::bandpass(params.center))
        // Quick envelope with slight attack for clap character
        .amplify(EnvNode::adsr(0.005, params.decay, 0.0, 0.1))
        .gain(params.volume)
}
