//! Waveform data description
//!
//! Only the shape of the precomputed waveform matters here: how many pixel
//! columns exist at the current scale and how many channels are stacked.
//! Decoding audio into peaks happens elsewhere.

/// Precomputed waveform summary at a given zoom scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformData {
    /// Audio sample rate in Hz
    pub sample_rate: u32,
    /// Audio samples summarized by one pixel column
    pub scale: u32,
    /// Total number of pixel columns available
    pub length: i64,
    /// Number of amplitude channels stacked vertically (always >= 1)
    pub channels: u32,
}

impl WaveformData {
    /// Create waveform data, clamping degenerate inputs
    pub fn new(sample_rate: u32, scale: u32, length: i64, channels: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            scale: scale.max(1),
            length: length.max(0),
            channels: channels.max(1),
        }
    }

    /// Describe a track of `duration` seconds summarized at `scale` samples per pixel
    pub fn for_duration(sample_rate: u32, scale: u32, duration: f64, channels: u32) -> Self {
        let mut data = Self::new(sample_rate, scale, 0, channels);
        data.length = data.columns_for(duration);
        data
    }

    /// Track duration in seconds
    pub fn duration(&self) -> f64 {
        self.length as f64 * self.scale as f64 / self.sample_rate as f64
    }

    /// Same audio summarized at a different scale
    ///
    /// Only the column count is recomputed; the duration is preserved up to
    /// one column of rounding.
    pub fn resample(&self, scale: u32) -> Self {
        let duration = self.duration();
        let mut data = Self::new(self.sample_rate, scale, 0, self.channels);
        data.length = data.columns_for(duration);
        data
    }

    fn columns_for(&self, duration: f64) -> i64 {
        if duration <= 0.0 {
            return 0;
        }
        (duration * self.sample_rate as f64 / self.scale as f64).ceil() as i64
    }
}
