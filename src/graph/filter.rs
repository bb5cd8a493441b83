use crate::graph::node::{GraphNode, RenderCtx};
use std::f32::consts::PI;

/*
State-Variable Filter
=====================

The subtractive half of every drum voice: start from a harmonically rich
source (noise, triangle) and carve away what the sound shouldn't have.

Lowpass keeps kick bodies smooth, highpass makes hats bright, bandpass
focuses snare rattle and clap "crack" around their center frequency.

This is the classic Chamberlin two-integrator topology. Per sample:

    low  += f * band
    high  = in - low - damp * band
    band += f * high

with f = 2 sin(pi * cutoff / sample_rate). All three responses fall out of
the same state, we just pick which one to emit.
*/

#[derive(Clone, Copy, Debug)]
enum FilterMode {
    Lowpass,
    Highpass,
    Bandpass,
}

pub struct FilterNode {
    mode: FilterMode,
    cutoff_hz: f32,
    damp: f32,
    low: f32,
    band: f32,
}

impl FilterNode {
    fn new(mode: FilterMode, cutoff_hz: f32) -> Self {
        Self {
            mode,
            cutoff_hz: cutoff_hz.clamp(20.0, 20_000.0),
            damp: 1.0,
            low: 0.0,
            band: 0.0,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterMode::Lowpass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterMode::Highpass, cutoff_hz)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterMode::Bandpass, cutoff_hz)
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        // Coefficient capped below the topology's stability limit
        let f = (2.0 * (PI * self.cutoff_hz / ctx.sample_rate).sin()).min(1.0);

        for sample in out.iter_mut() {
            let input = *sample;
            self.low += f * self.band;
            let high = input - self.low - self.damp * self.band;
            self.band += f * high;

            *sample = match self.mode {
                FilterMode::Lowpass => self.low,
                FilterMode::Highpass => high,
                FilterMode::Bandpass => self.band,
            };
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        // Flush state so a retrigger doesn't carry the previous hit's tail
        self.low = 0.0;
        self.band = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{extensions::NodeExt, oscillator::OscNode};

    fn rms(buffer: &[f32]) -> f32 {
        (buffer.iter().map(|s| s * s).sum::<f32>() / buffer.len() as f32).sqrt()
    }

    #[test]
    fn lowpass_attenuates_high_frequencies() {
        let ctx = RenderCtx::from_freq(48_000.0, 8_000.0, 1.0);
        let mut plain = OscNode::sine();
        let mut filtered = OscNode::sine().through(FilterNode::lowpass(200.0));

        let mut a = vec![0.0f32; 4096];
        let mut b = vec![0.0f32; 4096];
        plain.render_block(&mut a, &ctx);
        filtered.render_block(&mut b, &ctx);

        assert!(
            rms(&b) < rms(&a) * 0.2,
            "8kHz tone should be well below a 200Hz lowpass"
        );
    }

    #[test]
    fn highpass_attenuates_low_frequencies() {
        let ctx = RenderCtx::from_freq(48_000.0, 60.0, 1.0);
        let mut plain = OscNode::sine();
        let mut filtered = OscNode::sine().through(FilterNode::highpass(7_000.0));

        let mut a = vec![0.0f32; 4096];
        let mut b = vec![0.0f32; 4096];
        plain.render_block(&mut a, &ctx);
        filtered.render_block(&mut b, &ctx);

        assert!(rms(&b) < rms(&a) * 0.2);
    }

    #[test]
    fn output_stays_finite() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut node = OscNode::noise().through(FilterNode::bandpass(3_000.0));

        let mut buffer = vec![0.0f32; 2048];
        node.render_block(&mut buffer, &ctx);

        assert!(buffer.iter().all(|s| s.is_finite()));
    }
}
