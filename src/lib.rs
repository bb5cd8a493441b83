pub mod capture; // Sample collector + waveform reconciler
pub mod graph; // Composable audio graph nodes
pub mod scope; // Waveform plotting onto a drawing surface
pub mod session; // Process-wide audio session (cpal output + analysis tap)
pub mod voices; // Drum voices (kick, hihat, clap, snare)

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;

/// Default number of frames a collector retains per trigger.
pub const DEFAULT_CAPACITY: usize = 100;
/// Default analysis-tap resolution (samples per captured frame).
pub const DEFAULT_FRAME_WIDTH: usize = 1024;
