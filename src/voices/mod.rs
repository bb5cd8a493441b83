//! Pre-built drum voices.
//!
//! Each voice is a pure function of a fixed parameter record, returning a
//! ready-to-use node graph:
//!
//! ```ignore
//! use drumscope::voices;
//!
//! let kick = voices::kick(voices::KickParams::default());
//! let snare = voices::snare(voices::SnareParams::default());
//! let hihat = voices::hihat(voices::HatParams::default());
//! let clap = voices::clap(voices::ClapParams::default());
//! ```

mod clap;
mod hihat;
mod kick;
mod snare;

pub use clap::{clap, ClapParams};
pub use hihat::{hihat, HatParams};
pub use kick::{kick, KickParams};
pub use snare::{snare, SnareParams};

/// The four drums the demo can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrumKind {
    Kick,
    Hihat,
    Clap,
    Snare,
}

impl DrumKind {
    pub fn label(self) -> &'static str {
        match self {
            DrumKind::Kick => "kick",
            DrumKind::Hihat => "hihat",
            DrumKind::Clap => "clap",
            DrumKind::Snare => "snare",
        }
    }

    /// Decay deadline for the default parameter record, in seconds.
    /// The capture loop samples until this much audio time has elapsed.
    pub fn decay(self) -> f64 {
        match self {
            DrumKind::Kick => KickParams::default().decay as f64,
            DrumKind::Hihat => HatParams::default().decay as f64,
            DrumKind::Clap => ClapParams::default().decay as f64,
            DrumKind::Snare => SnareParams::default().decay as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphNode, RenderCtx};

    fn ctx() -> RenderCtx {
        RenderCtx::from_freq(48_000.0, 440.0, 1.0)
    }

    fn renders_sound(node: &mut impl GraphNode) -> bool {
        let ctx = ctx();
        node.note_on(&ctx);
        let mut buffer = vec![0.0f32; 2048];
        node.render_block(&mut buffer, &ctx);
        buffer.iter().any(|s| s.abs() > 0.001) && buffer.iter().all(|s| s.is_finite())
    }

    #[test]
    fn every_voice_produces_sound_when_triggered() {
        assert!(renders_sound(&mut kick(KickParams::default())));
        assert!(renders_sound(&mut hihat(HatParams::default())));
        assert!(renders_sound(&mut clap(ClapParams::default())));
        assert!(renders_sound(&mut snare(SnareParams::default())));
    }

    #[test]
    fn voices_go_quiet_after_their_decay() {
        let ctx = ctx();
        let mut node = hihat(HatParams::default());
        node.note_on(&ctx);

        // Render one second, well past decay + release, in audio-size blocks
        let mut buffer = vec![0.0f32; 1024];
        for _ in 0..47 {
            node.render_block(&mut buffer, &ctx);
        }

        assert!(!node.is_active(), "one-shot voice should go idle");
    }

    #[test]
    fn silent_before_first_trigger() {
        let ctx = ctx();
        let mut node = snare(SnareParams::default());

        let mut buffer = vec![0.0f32; 512];
        node.render_block(&mut buffer, &ctx);

        assert!(buffer.iter().all(|&s| s == 0.0));
    }
}
