/// One timestamped analyser snapshot.
///
/// `samples` holds `frame_width` time-domain amplitude bytes (128 is
/// silence), spaced exactly one sample period apart starting at
/// `time_start`. A frame with `time_start < 0.0` has never been written;
/// collectors allocate every frame up front with the sentinel in place.
#[derive(Clone, Debug)]
pub struct Frame {
    pub time_start: f64,
    pub samples: Vec<u8>,
}

impl Frame {
    pub const UNPOPULATED: f64 = -1.0;

    pub fn unpopulated(frame_width: usize) -> Self {
        Self {
            time_start: Self::UNPOPULATED,
            samples: vec![0; frame_width],
        }
    }

    pub fn is_populated(&self) -> bool {
        self.time_start >= 0.0
    }
}
