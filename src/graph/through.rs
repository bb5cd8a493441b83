use crate::graph::node::{GraphNode, RenderCtx};

/// Serial chaining: render the source, then let the effect process the
/// buffer in place. The classic subtractive path is
/// `osc.amplify(env).through(filter)`.
pub struct Through<S, F> {
    source: S,
    filter: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, filter: F) -> Self {
        Self { source, filter }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.filter.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.filter.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
        self.filter.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{extensions::NodeExt, filter::FilterNode, oscillator::OscNode};

    #[test]
    fn renders_source_then_filter() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut node = OscNode::sine().through(FilterNode::lowpass(1_000.0));

        let mut buffer = vec![1.0; 128];
        node.render_block(&mut buffer, &ctx);

        assert!(buffer.iter().any(|&sample| sample != 1.0));
        assert!(buffer.iter().all(|&sample| sample.is_finite()));
    }
}
