/// Analysis point on a synthesis graph.
///
/// The capture loop only needs three things from the audio side: the tap's
/// fixed resolution, the latest time-domain bytes, and a clock it can
/// compare against deadlines. `SessionTap` implements this over the live
/// cpal stream; tests drive the loop with scripted taps.
pub trait Tap {
    /// Samples per analyser read. Fixed for the tap's lifetime.
    fn frame_width(&self) -> usize;

    /// Copy the latest time-domain amplitude bytes into `out`.
    ///
    /// `out.len()` equals `frame_width()`. 128 means silence; a tap that
    /// has produced no audio yet fills with 128.
    fn read_into(&mut self, out: &mut [u8]);

    /// Monotonically increasing audio-clock time in seconds.
    fn now(&self) -> f64;
}
