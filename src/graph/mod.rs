//! Composable building blocks for constructing audio-processing graphs.
//!
//! Graph nodes wrap the DSP primitives with what instrument design needs:
//! trigger events, modulation, and block-based rendering. The `extensions`
//! module adds fluent helpers so voices read as a chain
//! (`osc.amplify(env).through(filter)`).

/// Multiply two signals together (amplitude shaping).
pub mod amplify;
/// Envelope generator node exposing ADSR state.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.through()`, `.mix()`, `.gain()`).
pub mod extensions;
/// State-variable filter node with multiple responses.
pub mod filter;
/// Fixed linear gain stage.
pub mod gain;
/// Linear blending of two parallel sources.
pub mod mix;
/// Connect modulation sources to node parameters.
pub mod modulate;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators and the noise source.
pub mod oscillator;
/// Serial chaining of two nodes (source -> effect).
pub mod through;

pub use node::{GraphNode, RenderCtx};
