//! Kick drum voice.
//!
//! A classic synthesized kick: a sine wave whose pitch starts high and
//! quickly drops to the fundamental, creating the characteristic "punch"
//! of an electronic kick.
//!
//! 1. Sine oscillator provides the body (pure, deep tone)
//! 2. Fast pitch envelope sweeps from `tone + punch` down to `tone`
//! 3. Amplitude envelope with instant attack, quick decay
//! 4. Low-pass filter removes any harshness
//!
//! Longer decay gives a boomy 808-style kick; more punch gives more "click"
//! at the attack.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::{
    envelope::EnvNode,
    extensions::NodeExt,
    filter::FilterNode,
    oscillator::{OscNode, OscParam},
};

/// Fixed parameter record for the kick voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct KickParams {
    /// Fundamental the pitch sweep settles on (Hz).
    pub tone: f32,
    /// Pitch sweep depth above the fundamental (Hz).
    pub punch: f32,
    /// Amplitude decay time (seconds). Doubles as the capture deadline.
    pub decay: f32,
    /// Output gain.
    pub volume: f32,
}

impl Default for KickParams {
    fn default() -> Self {
        Self {
            tone: 50.0,
            punch: 100.0,
            decay: 0.15,
            volume: 1.0,
        }
    }
}

/// Create a kick drum voice from a parameter record.
///
/// The trigger pitch is ignored - kicks are tuned by the voice itself.
pub fn kick(params: KickParams) -> impl crate::graph::GraphNode {
    OscNode::sine()
        .with_frequency(params.tone)
        // Pitch envelope: start at tone + punch, land on the fundamental
        .modulate(
            EnvNode::adsr(0.001, 0.08, 0.0, 0.01),
            OscParam::Frequency,
            params.punch,
        )
        // Punchy amplitude: instant attack, quick decay
        .amplify(EnvNode::adsr(0.001, params.decay, 0.0, 0.05))
        // Low-pass to keep it smooth
        .through(FilterNode::lowpass(200.0))
        .gain(params.volume)
}
