//! Scalar multiplication of audio samples

use std::fmt::Debug;

use ndarray::Array2;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::{required_param, FromParams};
use crate::contract::Operator;
use crate::data::{DualChannelAudio, SingleChannelAudio};
use crate::error::{AudioError, Result};

/// Module identifier listed in the component registry
pub const MODULE: &str = module_path!();

fn convert_factor<T: ToPrimitive + Debug>(operator: &str, factor: T) -> Result<f64> {
    factor.to_f64().ok_or_else(|| AudioError::InvalidParameter {
        operator: operator.to_string(),
        param: "factor".to_string(),
        reason: format!("{:?} cannot be represented as a sample factor", factor),
    })
}

// ============================================================================
// Single channel
// ============================================================================

/// Multiplies every sample of mono audio by a factor
///
/// The factor is not range checked: negative values invert polarity and
/// zero silences the signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SingleChannelMultiply {
    factor: f64,
}

impl SingleChannelMultiply {
    /// Create a multiplier with the given factor
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Build from any primitive numeric factor
    pub fn with_factor<T: ToPrimitive + Debug>(factor: T) -> Result<Self> {
        convert_factor(Self::NAME, factor).map(Self::new)
    }

    /// Get the multiplication factor
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl Operator for SingleChannelMultiply {
    type Input = SingleChannelAudio;
    type Output = SingleChannelAudio;

    const NAME: &'static str = "single_channel_multiply";

    fn apply(&self, input: &SingleChannelAudio) -> Result<SingleChannelAudio> {
        debug!(factor = self.factor, samples = input.len(), "single-channel multiply");
        let factor = self.factor;
        Ok(SingleChannelAudio::from_array(
            input.data().mapv(|sample| sample * factor),
        ))
    }
}

impl FromParams for SingleChannelMultiply {
    fn from_params(params: &Value) -> Result<Self> {
        required_param(Self::NAME, params, "factor").map(Self::new)
    }
}

// ============================================================================
// Dual channel
// ============================================================================

/// Multiplies every sample of stereo audio by a factor
///
/// Each channel column goes through [`SingleChannelMultiply`] on its own and
/// the results are written back in column order, so the two operators
/// cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualChannelMultiply {
    factor: f64,
}

impl DualChannelMultiply {
    /// Create a multiplier with the given factor
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Build from any primitive numeric factor
    pub fn with_factor<T: ToPrimitive + Debug>(factor: T) -> Result<Self> {
        convert_factor(Self::NAME, factor).map(Self::new)
    }

    /// Get the multiplication factor
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl Operator for DualChannelMultiply {
    type Input = DualChannelAudio;
    type Output = DualChannelAudio;

    const NAME: &'static str = "dual_channel_multiply";

    fn apply(&self, input: &DualChannelAudio) -> Result<DualChannelAudio> {
        debug!(
            factor = self.factor,
            samples = input.num_samples(),
            channels = input.num_channels(),
            "dual-channel multiply"
        );
        let single_channel_multiplier = SingleChannelMultiply::new(self.factor);
        let mut output = Array2::zeros(input.data().raw_dim());
        for (index, column) in input.channels().enumerate() {
            let channel = SingleChannelAudio::from_array(column.to_owned());
            let scaled = single_channel_multiplier.apply(&channel)?;
            output.column_mut(index).assign(scaled.data());
        }
        Ok(DualChannelAudio::from_array(output))
    }
}

impl FromParams for DualChannelMultiply {
    fn from_params(params: &Value) -> Result<Self> {
        required_param(Self::NAME, params, "factor").map(Self::new)
    }
}

// ============================================================================
// Tests
// ============================================================================
