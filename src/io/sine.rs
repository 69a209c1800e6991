//! Sine tone generator

use ndarray::Array1;

use super::AudioSource;
use crate::data::SingleChannelAudio;
use crate::error::{AudioError, Result};

/// Endless mono sine tone, handed out in fixed-length blocks
///
/// Phase carries over from one block to the next.
#[derive(Debug, Clone)]
pub struct SineSource {
    frequency: f64,
    sample_rate: f64,
    block_len: usize,
    position: u64,
}

impl SineSource {
    /// # Errors
    /// Returns [`AudioError::InvalidParameter`] for a non-positive sample rate.
    pub fn new(frequency: f64, sample_rate: f64, block_len: usize) -> Result<Self> {
        if !(sample_rate > 0.0) {
            return Err(AudioError::InvalidParameter {
                operator: "sine_source".to_string(),
                param: "sample_rate".to_string(),
                reason: format!("must be positive, got {}", sample_rate),
            });
        }
        Ok(Self {
            frequency,
            sample_rate,
            block_len,
            position: 0,
        })
    }

    /// Samples generated so far
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl AudioSource for SineSource {
    type Output = SingleChannelAudio;

    fn get_data(&mut self) -> Result<SingleChannelAudio> {
        let start = self.position;
        let step = 2.0 * std::f64::consts::PI * self.frequency / self.sample_rate;
        let block = Array1::from_shape_fn(self.block_len, |i| ((start + i as u64) as f64 * step).sin());
        self.position += self.block_len as u64;
        Ok(SingleChannelAudio::from_array(block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_blocks_are_continuous() {
        let mut source = SineSource::new(440.0, 44100.0, 64).unwrap();
        let reference = SingleChannelAudio::sine_wave(440.0, 128, 44100.0);

        let first = source.get_data().unwrap();
        let second = source.get_data().unwrap();
        assert_eq!(source.position(), 128);

        let joined: Vec<f64> = first.iter().chain(second.iter()).copied().collect();
        for (generated, expected) in joined.iter().zip(reference.iter()) {
            assert_abs_diff_eq!(*generated, *expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert!(SineSource::new(440.0, 0.0, 64).is_err());
        assert!(SineSource::new(440.0, f64::NAN, 64).is_err());
    }
}
