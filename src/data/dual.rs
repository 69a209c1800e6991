//! Dual-channel (stereo) audio container

use ndarray::{stack, Array2, ArrayD, ArrayView1, Axis, Ix2};
use tracing::trace;

use super::kind::Kind;
use super::payload::{shape_error, AudioData, AudioPayload};
use super::single::SingleChannelAudio;
use crate::error::{AudioError, Result};

/// Index of the left channel column
pub const LEFT: usize = 0;

/// Index of the right channel column
pub const RIGHT: usize = 1;

/// Stereo audio wrapping a two-dimensional buffer shaped (samples, channels)
///
/// Only the arity of the buffer is validated. Column 0 is the left channel
/// and column 1 the right channel.
#[derive(Debug, Clone, PartialEq)]
pub struct DualChannelAudio {
    data: Array2<f64>,
}

impl DualChannelAudio {
    /// Wrap a buffer of arbitrary dimensionality
    ///
    /// # Errors
    /// Returns [`AudioError::Shape`] if the buffer is not two-dimensional.
    pub fn new(buffer: ArrayD<f64>) -> Result<Self> {
        if buffer.ndim() != Kind::DualChannel.ndim() {
            return Err(shape_error(Kind::DualChannel, buffer.shape()));
        }
        let shape = buffer.shape().to_vec();
        let data = buffer
            .into_dimensionality::<Ix2>()
            .map_err(|_| shape_error(Kind::DualChannel, &shape))?;
        trace!(
            samples = data.nrows(),
            channels = data.ncols(),
            "dual-channel audio constructed"
        );
        Ok(Self { data })
    }

    /// Wrap an already two-dimensional array
    pub fn from_array(data: Array2<f64>) -> Self {
        Self { data }
    }

    /// Build from separate left and right channels
    ///
    /// # Errors
    /// Returns [`AudioError::InvalidBuffer`] if the channels differ in length.
    pub fn from_channels<'a>(
        left: ArrayView1<'a, f64>,
        right: ArrayView1<'a, f64>,
    ) -> Result<Self> {
        if left.len() != right.len() {
            return Err(AudioError::InvalidBuffer {
                reason: format!(
                    "left channel has {} samples, right channel has {}",
                    left.len(),
                    right.len()
                ),
            });
        }
        let data = stack(Axis(1), &[left, right]).map_err(|e| AudioError::InvalidBuffer {
            reason: e.to_string(),
        })?;
        Ok(Self { data })
    }

    /// Build from interleaved samples: [L0, R0, L1, R1, ...]
    ///
    /// # Errors
    /// Returns [`AudioError::InvalidBuffer`] if the sample count is odd.
    pub fn from_interleaved(samples: Vec<f64>) -> Result<Self> {
        let channels = Kind::DualChannel.channels();
        if samples.len() % channels != 0 {
            return Err(AudioError::InvalidBuffer {
                reason: format!(
                    "Sample count {} is not divisible by channel count {}",
                    samples.len(),
                    channels
                ),
            });
        }
        let frames = samples.len() / channels;
        let data = Array2::from_shape_vec((frames, channels), samples).map_err(|e| {
            AudioError::InvalidBuffer {
                reason: e.to_string(),
            }
        })?;
        Ok(Self { data })
    }

    /// Read access to the underlying buffer
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Number of samples per channel
    pub fn num_samples(&self) -> usize {
        self.data.nrows()
    }

    /// Number of channel columns in the buffer
    pub fn num_channels(&self) -> usize {
        self.data.ncols()
    }

    /// Check if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// View of one channel column
    pub fn channel(&self, channel: usize) -> Result<ArrayView1<'_, f64>> {
        if channel >= self.num_channels() {
            return Err(AudioError::ChannelOutOfRange {
                channel,
                channels: self.num_channels(),
            });
        }
        Ok(self.data.column(channel))
    }

    /// View of the left channel
    pub fn left(&self) -> Result<ArrayView1<'_, f64>> {
        self.channel(LEFT)
    }

    /// View of the right channel
    pub fn right(&self) -> Result<ArrayView1<'_, f64>> {
        self.channel(RIGHT)
    }

    /// Copy one channel out into its own container
    pub fn channel_audio(&self, channel: usize) -> Result<SingleChannelAudio> {
        Ok(SingleChannelAudio::from_array(self.channel(channel)?.to_owned()))
    }

    /// Iterate over channel columns in order
    pub fn channels(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> + '_ {
        self.data.axis_iter(Axis(1))
    }

    /// Copy the samples out in interleaved order
    pub fn to_interleaved(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// Release the underlying buffer
    pub fn into_inner(self) -> Array2<f64> {
        self.data
    }

    /// Release the underlying buffer as a dynamic-dimensional array
    pub fn into_dyn(self) -> ArrayD<f64> {
        self.data.into_dyn()
    }
}

impl AudioData for DualChannelAudio {
    const KIND: Kind = Kind::DualChannel;

    fn num_samples(&self) -> usize {
        self.data.nrows()
    }

    fn into_payload(self) -> AudioPayload {
        AudioPayload::DualChannel(self)
    }

    fn try_from_payload(payload: AudioPayload) -> std::result::Result<Self, AudioPayload> {
        match payload {
            AudioPayload::DualChannel(audio) => Ok(audio),
            other => Err(other),
        }
    }

    fn from_payload_ref(payload: &AudioPayload) -> Option<&Self> {
        payload.as_dual()
    }
}

impl From<Array2<f64>> for DualChannelAudio {
    fn from(data: Array2<f64>) -> Self {
        Self::from_array(data)
    }
}

impl TryFrom<ArrayD<f64>> for DualChannelAudio {
    type Error = AudioError;

    fn try_from(buffer: ArrayD<f64>) -> Result<Self> {
        Self::new(buffer)
    }
}
