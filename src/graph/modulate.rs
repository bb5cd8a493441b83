use crate::{
    graph::node::{GraphNode, Modulatable, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Drive a node parameter from another node's output.
///
/// The modulator runs at control rate: one value per block, scaled by
/// `depth` and added to the parameter's base value. The pitch-envelope kick
/// is the canonical use: an envelope sweeps the oscillator from
/// `base + depth` down to `base` over its decay.
pub struct Modulate<N: Modulatable, M> {
    target: N,
    modulator: M,
    param: N::Param,
    depth: f32,
    base: f32,
    temp_buffer: Vec<f32>,
}

impl<N: Modulatable + GraphNode, M> Modulate<N, M> {
    pub fn new(target: N, modulator: M, param: N::Param, depth: f32) -> Self {
        let base = target.get_param(param);
        Self {
            target,
            modulator,
            param,
            depth,
            base,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: Modulatable + GraphNode, M: GraphNode> GraphNode for Modulate<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.modulator.render_block(frames, ctx);

        // Control-rate update: first sample of the block steers the whole block
        let modulation = frames[0] * self.depth;
        self.target.apply_modulation(self.param, self.base, modulation);

        self.target.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.target.note_on(ctx);
        self.modulator.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.target.note_off(ctx);
        self.modulator.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.target.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{
        envelope::EnvNode,
        extensions::NodeExt,
        oscillator::{OscNode, OscParam},
    };

    #[test]
    fn envelope_sweeps_oscillator_pitch() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut node = OscNode::sine().with_frequency(50.0).modulate(
            EnvNode::adsr(0.001, 0.05, 0.0, 0.01),
            OscParam::Frequency,
            100.0,
        );

        node.note_on(&ctx);

        // The modulator is read once per block, so the first block still
        // sees the envelope near zero. Let the 1ms attack finish first.
        let mut warmup = vec![0.0; 64];
        node.render_block(&mut warmup, &ctx);

        // Envelope near peak: this whole block renders around 150Hz
        let mut early = vec![0.0; 2048];
        node.render_block(&mut early, &ctx);

        // Let the envelope die out, then render again at the 50Hz base
        let mut rest = vec![0.0; 2048];
        for _ in 0..4 {
            node.render_block(&mut rest, &ctx);
        }
        let mut late = vec![0.0; 2048];
        node.render_block(&mut late, &ctx);

        // The swept block completes roughly three times as many cycles
        let crossings = |buf: &[f32]| {
            buf.windows(2)
                .filter(|w| w[0].signum() != w[1].signum())
                .count()
        };
        assert!(crossings(&early) > crossings(&late));
    }
}
