use crate::graph::node::{GraphNode, Modulatable, RenderCtx};
use std::f32::consts::TAU;

/*
Audio Oscillator
================

The raw sound source of every voice in the kit:

Sine: pure tone, fundamental only. Kick bodies, sub thump.
Square: hollow odd harmonics at full strength. Raw and buzzy.
Triangle: soft odd harmonics falling off as 1/n^2. Snare body.
Noise: every frequency at once, no pitch. Snare rattle, hats, claps.

The oscillator is a phase accumulator: phase runs 0..1 per cycle and advances
by frequency / sample_rate each sample. Noise ignores phase and pulls from a
xorshift generator so rendering stays allocation- and syscall-free.
*/

#[derive(Clone, Copy, Debug)]
enum Waveform {
    Sine,
    Square,
    Triangle,
    Noise,
}

/// Parameters that can be modulated on an oscillator
#[derive(Clone, Copy, Debug)]
pub enum OscParam {
    /// Oscillator frequency in Hz
    Frequency,
}

pub struct OscNode {
    waveform: Waveform,
    phase: f32,
    noise_state: u32,
    /// Fixed frequency (Hz). If Some, ignores ctx.frequency and uses this instead.
    /// Used for drums and other sounds that shouldn't track note pitch.
    base_frequency: Option<f32>,
    /// Current frequency after modulation (only used when base_frequency is Some)
    current_frequency: f32,
}

impl OscNode {
    fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            noise_state: 0x9e37_79b9,
            base_frequency: None,
            current_frequency: 440.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    pub fn noise() -> Self {
        Self::new(Waveform::Noise)
    }

    /// Set a fixed frequency, ignoring the pitch from RenderCtx.
    ///
    /// Drums are tuned by the voice itself, not the trigger. The frequency
    /// can then be swept with `.modulate()` for pitch-envelope kicks.
    pub fn with_frequency(mut self, freq: f32) -> Self {
        self.base_frequency = Some(freq);
        self.current_frequency = freq;
        self
    }

    fn next_noise(&mut self) -> f32 {
        // xorshift32
        let mut x = self.noise_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.noise_state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let freq = if self.base_frequency.is_some() {
            self.current_frequency
        } else {
            ctx.frequency
        };
        let step = freq / ctx.sample_rate;

        for sample in out.iter_mut() {
            *sample = match self.waveform {
                Waveform::Sine => (TAU * self.phase).sin(),
                Waveform::Square => {
                    if self.phase < 0.5 {
                        1.0
                    } else {
                        -1.0
                    }
                }
                Waveform::Triangle => 1.0 - 4.0 * (self.phase - 0.5).abs(),
                Waveform::Noise => self.next_noise(),
            };
            self.phase += step;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        // Restart the cycle and reset any pitch modulation for a clean hit
        self.phase = 0.0;
        if let Some(base) = self.base_frequency {
            self.current_frequency = base;
        }
    }
}

impl Modulatable for OscNode {
    type Param = OscParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            OscParam::Frequency => self.base_frequency.unwrap_or(440.0),
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            OscParam::Frequency => {
                // Clamp to audible range (20 Hz - 20 kHz)
                self.current_frequency = (base + modulation).clamp(20.0, 20_000.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::RenderCtx;

    #[test]
    fn valid_sine() {
        let sample_rate = 48_000.0;
        let block_size = 128;

        let ctx = RenderCtx::from_freq(sample_rate, 440.0, 1.0);
        let mut osc = OscNode::sine();

        let mut buffer = vec![0.0f32; block_size];
        osc.render_block(&mut buffer, &ctx);

        // sample n should be sin(2pi f n / sr)
        let sample_index = 12;
        let expected = (TAU * ctx.frequency * sample_index as f32 / sample_rate).sin();
        let actual = buffer[sample_index];
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn fixed_frequency_ignores_ctx_pitch() {
        let sample_rate = 48_000.0;
        let ctx = RenderCtx::from_freq(sample_rate, 10_000.0, 1.0);

        let mut free = OscNode::sine();
        let mut fixed = OscNode::sine().with_frequency(50.0);

        let mut a = vec![0.0f32; 64];
        let mut b = vec![0.0f32; 64];
        free.render_block(&mut a, &ctx);
        fixed.render_block(&mut b, &ctx);

        assert!(a != b, "fixed-frequency oscillator should not track ctx");
        let expected = (TAU * 50.0 * 32.0 / sample_rate).sin();
        assert!((b[32] - expected).abs() < 1e-5);
    }

    #[test]
    fn square_alternates_between_rails() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut osc = OscNode::square();
        let mut buffer = vec![0.0f32; 512];
        osc.render_block(&mut buffer, &ctx);

        assert!(buffer.iter().all(|&s| s == 1.0 || s == -1.0));
        assert!(buffer.contains(&1.0) && buffer.contains(&-1.0));
    }

    #[test]
    fn noise_stays_in_range() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut osc = OscNode::noise();
        let mut buffer = vec![0.0f32; 512];
        osc.render_block(&mut buffer, &ctx);

        assert!(buffer.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert!(buffer.iter().any(|s| s.abs() > 0.01), "noise should not be silent");
    }
}
