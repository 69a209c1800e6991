//! Single-channel (mono) audio container

use ndarray::{Array1, ArrayD, Ix1};
use tracing::trace;

use super::kind::Kind;
use super::payload::{shape_error, AudioData, AudioPayload};
use crate::error::{AudioError, Result};

/// Mono audio wrapping a one-dimensional sample buffer
///
/// The buffer is validated once when the container is built and is never
/// mutated afterwards. Operators always return a new container.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleChannelAudio {
    data: Array1<f64>,
}

impl SingleChannelAudio {
    /// Wrap a buffer of arbitrary dimensionality
    ///
    /// # Errors
    /// Returns [`AudioError::Shape`] if the buffer is not one-dimensional.
    pub fn new(buffer: ArrayD<f64>) -> Result<Self> {
        if buffer.ndim() != Kind::SingleChannel.ndim() {
            return Err(shape_error(Kind::SingleChannel, buffer.shape()));
        }
        let shape = buffer.shape().to_vec();
        let data = buffer
            .into_dimensionality::<Ix1>()
            .map_err(|_| shape_error(Kind::SingleChannel, &shape))?;
        trace!(samples = data.len(), "single-channel audio constructed");
        Ok(Self { data })
    }

    /// Wrap an already one-dimensional array
    pub fn from_array(data: Array1<f64>) -> Self {
        Self { data }
    }

    /// Wrap a vector of samples
    pub fn from_vec(samples: Vec<f64>) -> Self {
        Self {
            data: Array1::from(samples),
        }
    }

    /// Create a sine tone, mainly useful for tests and generators
    pub fn sine_wave(frequency: f64, num_samples: usize, sample_rate: f64) -> Self {
        let data = Array1::from_shape_fn(num_samples, |i| {
            (2.0 * std::f64::consts::PI * frequency * i as f64 / sample_rate).sin()
        });
        Self { data }
    }

    /// Read access to the underlying buffer
    pub fn data(&self) -> &Array1<f64> {
        &self.data
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over samples in order
    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.data.iter()
    }

    /// Copy the samples into a vector
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.to_vec()
    }

    /// Release the underlying buffer
    pub fn into_inner(self) -> Array1<f64> {
        self.data
    }

    /// Release the underlying buffer as a dynamic-dimensional array
    pub fn into_dyn(self) -> ArrayD<f64> {
        self.data.into_dyn()
    }
}

impl AudioData for SingleChannelAudio {
    const KIND: Kind = Kind::SingleChannel;

    fn num_samples(&self) -> usize {
        self.len()
    }

    fn into_payload(self) -> AudioPayload {
        AudioPayload::SingleChannel(self)
    }

    fn try_from_payload(payload: AudioPayload) -> std::result::Result<Self, AudioPayload> {
        match payload {
            AudioPayload::SingleChannel(audio) => Ok(audio),
            other => Err(other),
        }
    }

    fn from_payload_ref(payload: &AudioPayload) -> Option<&Self> {
        payload.as_single()
    }
}

impl From<Vec<f64>> for SingleChannelAudio {
    fn from(samples: Vec<f64>) -> Self {
        Self::from_vec(samples)
    }
}

impl From<Array1<f64>> for SingleChannelAudio {
    fn from(data: Array1<f64>) -> Self {
        Self::from_array(data)
    }
}

impl TryFrom<ArrayD<f64>> for SingleChannelAudio {
    type Error = AudioError;

    fn try_from(buffer: ArrayD<f64>) -> Result<Self> {
        Self::new(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, IxDyn};

    #[test]
    fn test_one_dimensional_buffer_accepted() {
        let buffer = ArrayD::from_shape_vec(IxDyn(&[4]), vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        let audio = SingleChannelAudio::new(buffer).unwrap();
        assert_eq!(audio.len(), 4);
        assert_eq!(audio.kind(), Kind::SingleChannel);
        assert_eq!(audio.data(), &arr1(&[0.1, 0.2, 0.3, 0.4]));
    }

    #[test]
    fn test_two_dimensional_buffer_rejected() {
        let buffer = ArrayD::<f64>::zeros(IxDyn(&[10, 2]));
        let err = SingleChannelAudio::new(buffer).unwrap_err();
        match err {
            AudioError::Shape {
                kind,
                expected,
                actual,
                shape,
            } => {
                assert_eq!(kind, Kind::SingleChannel);
                assert_eq!(expected, 1);
                assert_eq!(actual, 2);
                assert_eq!(shape, vec![10, 2]);
            }
            other => panic!("expected shape error, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_buffer_rejected() {
        let buffer = ArrayD::<f64>::zeros(IxDyn(&[]));
        assert!(matches!(
            SingleChannelAudio::new(buffer),
            Err(AudioError::Shape { actual: 0, .. })
        ));
    }

    #[test]
    fn test_empty_buffer_allowed() {
        let audio = SingleChannelAudio::from_vec(Vec::new());
        assert!(audio.is_empty());
        assert_eq!(audio.num_samples(), 0);
    }

    #[test]
    fn test_sine_wave() {
        let audio = SingleChannelAudio::sine_wave(440.0, 1000, 44100.0);
        assert_eq!(audio.len(), 1000);
        assert_eq!(audio.data()[0], 0.0);
        assert!(audio.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn test_payload_conversion() {
        let audio = SingleChannelAudio::from_vec(vec![1.0, 2.0]);
        let payload = audio.clone().into_payload();
        assert_eq!(SingleChannelAudio::from_payload_ref(&payload), Some(&audio));
        assert_eq!(SingleChannelAudio::try_from_payload(payload).unwrap(), audio);
    }
}
