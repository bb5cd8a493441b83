//! Process-wide audio state, made explicit.
//!
//! Instead of an ambient, lazily-created audio context, everything lives in
//! an [`AudioSession`] value: the cpal output stream, the drum kit on the
//! audio thread, and the analysis tap the capture loop reads from. The
//! session is created on first use by the caller that owns it and torn down
//! when dropped.
//!
//! Cross-thread plumbing is two rtrb rings and one atomic: triggers flow UI
//! to audio thread, rendered samples flow audio thread to tap, and the
//! sample counter is the monotonic clock both sides agree on.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

use crate::capture::Tap;
use crate::graph::{GraphNode, RenderCtx};
use crate::voices::{self, DrumKind};
use crate::{DEFAULT_FRAME_WIDTH, MAX_BLOCK_SIZE};

/// Sample capacity of the tap ring. A few analyser windows of slack so a
/// slow UI frame doesn't immediately drop audio.
const TAP_RING_CAPACITY: usize = DEFAULT_FRAME_WIDTH * 8;
const TRIGGER_QUEUE_SIZE: usize = 64;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no default output device available")]
    NoOutputDevice,
    #[error("failed to fetch default output config")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build output stream")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start output stream")]
    PlayStream(#[from] cpal::PlayStreamError),
}

/// Map a `[-1, 1]` float sample to an analyser amplitude byte (128 is
/// silence, full negative swing is 0, full positive clips to 255).
pub fn sample_to_byte(sample: f32) -> u8 {
    (sample * 128.0 + 128.0).clamp(0.0, 255.0) as u8
}

/// The four drum voices, owned by the audio thread.
///
/// Each voice keeps its default parameter record; a trigger is a note_on
/// into the matching graph. Idle voices are skipped during rendering.
pub struct DrumKit {
    kick: Box<dyn GraphNode>,
    hihat: Box<dyn GraphNode>,
    clap: Box<dyn GraphNode>,
    snare: Box<dyn GraphNode>,
    scratch: Vec<f32>,
}

impl DrumKit {
    pub fn new() -> Self {
        Self {
            kick: Box::new(voices::kick(voices::KickParams::default())),
            hihat: Box::new(voices::hihat(voices::HatParams::default())),
            clap: Box::new(voices::clap(voices::ClapParams::default())),
            snare: Box::new(voices::snare(voices::SnareParams::default())),
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    fn voice_mut(&mut self, kind: DrumKind) -> &mut Box<dyn GraphNode> {
        match kind {
            DrumKind::Kick => &mut self.kick,
            DrumKind::Hihat => &mut self.hihat,
            DrumKind::Clap => &mut self.clap,
            DrumKind::Snare => &mut self.snare,
        }
    }

    pub fn trigger(&mut self, kind: DrumKind, ctx: &RenderCtx) {
        self.voice_mut(kind).note_on(ctx);
    }

    /// Mix every active voice into `out`. `out` is cleared first and must
    /// not exceed [`MAX_BLOCK_SIZE`] samples.
    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        out.fill(0.0);

        let Self {
            kick,
            hihat,
            clap,
            snare,
            scratch,
        } = self;
        let scratch = &mut scratch[..out.len()];

        for voice in [kick, hihat, clap, snare] {
            if !voice.is_active() {
                continue;
            }
            scratch.fill(0.0);
            voice.render_block(scratch, ctx);
            for (o, &s) in out.iter_mut().zip(scratch.iter()) {
                *o += s;
            }
        }
    }
}

impl Default for DrumKit {
    fn default() -> Self {
        Self::new()
    }
}

/// Live analysis tap over the output stream.
///
/// Keeps a rolling window of the most recent `frame_width` amplitude
/// bytes; each read drains whatever the audio thread has produced since
/// the last one. The clock is the number of samples the audio thread has
/// rendered, divided by the sample rate.
pub struct SessionTap {
    consumer: rtrb::Consumer<f32>,
    /// Ring of the latest bytes; `cursor` points at the oldest one.
    window: Vec<u8>,
    cursor: usize,
    rendered_samples: Arc<AtomicU64>,
    sample_rate: f64,
}

impl SessionTap {
    fn new(
        consumer: rtrb::Consumer<f32>,
        rendered_samples: Arc<AtomicU64>,
        sample_rate: f64,
    ) -> Self {
        Self {
            consumer,
            window: vec![128; DEFAULT_FRAME_WIDTH],
            cursor: 0,
            rendered_samples,
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

impl Tap for SessionTap {
    fn frame_width(&self) -> usize {
        self.window.len()
    }

    fn read_into(&mut self, out: &mut [u8]) {
        // Roll the ring forward over everything rendered since last read
        while let Ok(sample) = self.consumer.pop() {
            self.window[self.cursor] = sample_to_byte(sample);
            self.cursor = (self.cursor + 1) % self.window.len();
        }

        // Unroll oldest-first into the caller's buffer
        let n = out.len().min(self.window.len());
        for (i, byte) in out[..n].iter_mut().enumerate() {
            *byte = self.window[(self.cursor + i) % self.window.len()];
        }
    }

    fn now(&self) -> f64 {
        self.rendered_samples.load(Ordering::Relaxed) as f64 / self.sample_rate
    }
}

/// The running audio output plus the UI-side handles into it.
pub struct AudioSession {
    _stream: cpal::Stream,
    triggers: rtrb::Producer<DrumKind>,
    sample_rate: f64,
}

impl AudioSession {
    /// Open the default output device and start rendering the kit.
    ///
    /// Returns the session handle and its analysis tap. The tap is handed
    /// out separately so the capture loop can own it mutably while the
    /// session keeps accepting triggers.
    pub fn start() -> Result<(Self, SessionTap), SessionError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(SessionError::NoOutputDevice)?;
        let config = device.default_output_config()?;

        let sample_rate = config.sample_rate().0 as f64;
        let channels = config.channels() as usize;

        let (trigger_tx, mut trigger_rx) = rtrb::RingBuffer::<DrumKind>::new(TRIGGER_QUEUE_SIZE);
        let (mut tap_tx, tap_rx) = rtrb::RingBuffer::<f32>::new(TAP_RING_CAPACITY);
        let rendered_samples = Arc::new(AtomicU64::new(0));
        let clock = rendered_samples.clone();

        let mut kit = DrumKit::new();
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let ctx = RenderCtx::from_freq(sample_rate as f32, 440.0, 1.0);

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                while let Ok(kind) = trigger_rx.pop() {
                    kit.trigger(kind, &ctx);
                }

                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    kit.render(block, &ctx);

                    // Mono to all channels, and a copy into the tap ring.
                    // A full ring drops samples; the tap just goes stale.
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                        let _ = tap_tx.push(s);
                    }

                    frames_written += frames_to_render;
                }

                clock.fetch_add(total_frames as u64, Ordering::Relaxed);
            },
            |err| eprintln!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;

        let tap = SessionTap::new(tap_rx, rendered_samples, sample_rate);
        Ok((
            Self {
                _stream: stream,
                triggers: trigger_tx,
                sample_rate,
            },
            tap,
        ))
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Queue a drum hit for the audio thread. A full queue drops the hit;
    /// by then there are already 64 unserviced triggers in flight.
    pub fn trigger(&mut self, kind: DrumKind) {
        let _ = self.triggers.push(kind);
    }
}
