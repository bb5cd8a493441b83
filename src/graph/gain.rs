use crate::graph::node::{GraphNode, RenderCtx};

/// Fixed linear gain stage. Claps get a boost to cut through, quieter
/// voices scale down; the factor never changes after construction.
pub struct Gain<N> {
    source: N,
    factor: f32,
}

impl<N> Gain<N> {
    pub fn new(source: N, factor: f32) -> Self {
        Self { source, factor }
    }
}

impl<N: GraphNode> GraphNode for Gain<N> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        for sample in out.iter_mut() {
            *sample *= self.factor;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}
