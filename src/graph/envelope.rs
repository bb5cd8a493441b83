use crate::{
    graph::node::{GraphNode, RenderCtx},
    MIN_TIME,
};

/*
ADSR Envelope
=============

Linear ADSR generator that shapes drum amplitude (and, through Modulate,
pitch). The stage state machine:

    Idle --note_on--> Attack --level=1--> Decay --level=S--> Sustain
                         \__________note_off__________/
                                      |
                                   Release --level=0--> Idle

note_off starts Release from the CURRENT level, whatever the stage, so a
release during attack doesn't click. Release pre-computes its total sample
count at note_off time and interpolates, which guarantees it lands exactly
on zero.

note_on captures ctx.velocity as the peak: attack ramps 0 -> velocity and
sustain holds sustain_level * velocity, so a soft trigger is a quiet hit
rather than a slow one.

Drum envelopes here are one-shot: sustain is usually 0.0, so a trigger is
note_on followed by the natural decay to silence.
*/

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

pub struct EnvNode {
    attack_time: f32,   // seconds to ramp 0 -> 1
    decay_time: f32,    // seconds to ramp 1 -> sustain
    sustain_level: f32, // level to hold (0.0 - 1.0)
    release_time: f32,  // seconds to ramp current -> 0

    stage: EnvelopeStage,
    level: f32,

    // Trigger velocity captured at note_on; the attack target
    peak: f32,

    decay_start_level: f32,

    // Release bookkeeping (pre-calculated at note_off for precision)
    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl EnvNode {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack_time: attack.max(MIN_TIME),
            decay_time: decay.max(MIN_TIME),
            sustain_level: sustain.clamp(0.0, 1.0),
            release_time: release.max(MIN_TIME),

            stage: EnvelopeStage::Idle,
            level: 0.0,
            peak: 1.0,
            decay_start_level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        }
    }

    fn next_sample(&mut self, ctx: &RenderCtx) {
        match self.stage {
            EnvelopeStage::Idle => {
                self.level = 0.0;
            }

            EnvelopeStage::Attack => {
                let increment = self.peak / (self.attack_time * ctx.sample_rate);
                self.level += increment;

                if self.level >= self.peak {
                    self.level = self.peak;
                    self.decay_start_level = self.peak;
                    self.stage = EnvelopeStage::Decay;
                }
            }

            EnvelopeStage::Decay => {
                let target = self.sustain_level * self.peak;
                let total_drop = self.decay_start_level - target;
                let decrement = total_drop / (self.decay_time * ctx.sample_rate);
                self.level -= decrement;

                if self.level <= target {
                    self.level = target;
                    self.stage = if target <= 0.0 {
                        EnvelopeStage::Idle
                    } else {
                        EnvelopeStage::Sustain
                    };
                }
            }

            EnvelopeStage::Sustain => {
                self.level = self.sustain_level * self.peak;
            }

            EnvelopeStage::Release => {
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);

                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);

                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
    }

    /// Get the current envelope level (0.0 to 1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Get the current envelope stage
    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            self.next_sample(ctx);
            *sample = self.level;
        }
    }

    /// Gate high: restart the attack from zero for a clean retrigger,
    /// peaking at the trigger velocity.
    fn note_on(&mut self, ctx: &RenderCtx) {
        self.level = 0.0;
        self.peak = ctx.velocity.clamp(0.0, 1.0);
        self.stage = EnvelopeStage::Attack;
        self.release_elapsed_samples = 0;
    }

    /// Gate low: release from the current level.
    fn note_off(&mut self, ctx: &RenderCtx) {
        if matches!(self.stage, EnvelopeStage::Idle) {
            return;
        }

        self.release_start_level = self.level;
        self.release_total_samples = (self.release_time * ctx.sample_rate).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeStage::Release;
    }

    fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeStage::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::RenderCtx;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn render_samples(env: &mut EnvNode, samples: usize) {
        let ctx = RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0);
        let mut buffer = vec![0.0; samples];
        env.render_block(&mut buffer, &ctx);
    }

    #[test]
    fn attack_reaches_full_level() {
        let mut env = EnvNode::adsr(0.01, 0.1, 0.7, 0.2);
        let ctx = RenderCtx::from_freq(SAMPLE_RATE, 220.0, 1.0);

        env.note_on(&ctx);
        render_samples(&mut env, (0.01 * SAMPLE_RATE) as usize);

        assert!(env.level() > 0.99, "expected attack to reach full level");
        assert!(!matches!(env.stage(), EnvelopeStage::Attack));
    }

    #[test]
    fn sustain_holds_target_level() {
        let sustain = 0.6;
        let mut env = EnvNode::adsr(0.01, 0.05, sustain, 0.2);
        let ctx = RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0);

        env.note_on(&ctx);
        let attack_decay_samples = ((0.01 + 0.05) * SAMPLE_RATE) as usize + 5;
        render_samples(&mut env, attack_decay_samples);

        assert!(matches!(env.stage(), EnvelopeStage::Sustain));
        assert!(
            (env.level() - sustain).abs() < 0.05,
            "sustain level should be held"
        );
    }

    #[test]
    fn velocity_scales_the_peak() {
        let mut full = EnvNode::adsr(0.01, 0.1, 0.7, 0.2);
        let mut soft = EnvNode::adsr(0.01, 0.1, 0.7, 0.2);
        let full_ctx = RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0);
        let soft_ctx = RenderCtx::from_freq(SAMPLE_RATE, 440.0, 0.5);

        full.note_on(&full_ctx);
        soft.note_on(&soft_ctx);
        render_samples(&mut full, (0.01 * SAMPLE_RATE) as usize);
        render_samples(&mut soft, (0.01 * SAMPLE_RATE) as usize);

        assert!(full.level() > 0.99);
        assert!(
            (soft.level() - 0.5).abs() < 0.05,
            "half velocity should peak at half level"
        );
    }

    #[test]
    fn zero_sustain_decays_to_idle() {
        // Drum envelopes: no gate hold, the hit rings out by itself
        let mut env = EnvNode::adsr(0.001, 0.05, 0.0, 0.03);
        let ctx = RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0);

        env.note_on(&ctx);
        render_samples(&mut env, (0.1 * SAMPLE_RATE) as usize);

        assert!(!env.is_active(), "one-shot envelope should go idle");
        assert!(env.level() <= 0.001);
    }

    #[test]
    fn release_falls_back_to_idle() {
        let release = 0.03;
        let mut env = EnvNode::adsr(0.01, 0.05, 0.5, release);
        let ctx = RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0);

        env.note_on(&ctx);
        render_samples(&mut env, (0.02 * SAMPLE_RATE) as usize);

        env.note_off(&ctx);
        render_samples(&mut env, (release * SAMPLE_RATE) as usize + 2);

        assert!(env.level() <= 0.001, "release should fall back to zero");
        assert!(matches!(env.stage(), EnvelopeStage::Idle));
    }
}
