//! The capture pipeline: per-frame analyser snapshots in, one merged
//! waveform out.
//!
//! A drum trigger creates a [`SampleCollector`] bound to the session's
//! analysis tap and wraps it in a [`CaptureTask`]. The display loop ticks
//! the task once per refresh until a stop condition fires, then
//! [`reconcile`] merges the collected frames into the evenly-paced
//! amplitude sequence the scope plots.

pub mod collector;
pub mod frame;
pub mod reconcile;
pub mod tap;
pub mod testing;

pub use collector::{CancelToken, CaptureState, CaptureTask, SampleCollector};
pub use frame::Frame;
pub use reconcile::{reconcile, TimeMap};
pub use tap::Tap;
