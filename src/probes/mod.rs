//! Inspection probes
//!
//! Probes read a container and return a summary value. They never return a
//! container and never touch their input. What the host does with the
//! result (stash it, publish it into an execution context) is its own
//! business.

use std::marker::PhantomData;

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::{param_object, FromParams};
use crate::contract::Probe;
use crate::data::{AudioData, DualChannelAudio, SingleChannelAudio};
use crate::error::Result;

/// Module identifier listed in the component registry
pub const MODULE: &str = module_path!();

// ============================================================================
// Sample count
// ============================================================================

/// Number of samples along the primary axis
pub struct SampleCount<A> {
    _kind: PhantomData<fn() -> A>,
}

impl<A> SampleCount<A> {
    /// Create the probe
    pub fn new() -> Self {
        Self { _kind: PhantomData }
    }
}

impl<A> Default for SampleCount<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for SampleCount<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleCount").finish()
    }
}

impl<A> Clone for SampleCount<A> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

fn count<A: AudioData>(probe: &str, input: &A) -> usize {
    let samples = input.num_samples();
    debug!(probe, samples, "sample count");
    samples
}

impl Probe for SampleCount<SingleChannelAudio> {
    type Input = SingleChannelAudio;
    type Output = usize;

    const NAME: &'static str = "single_channel_sample_count";

    fn apply(&self, input: &SingleChannelAudio) -> usize {
        count(Self::NAME, input)
    }
}

impl Probe for SampleCount<DualChannelAudio> {
    type Input = DualChannelAudio;
    type Output = usize;

    const NAME: &'static str = "dual_channel_sample_count";

    fn apply(&self, input: &DualChannelAudio) -> usize {
        count(Self::NAME, input)
    }
}

impl<A> FromParams for SampleCount<A>
where
    Self: Probe,
{
    fn from_params(params: &Value) -> Result<Self> {
        param_object(Self::NAME, params)?;
        Ok(Self::new())
    }
}

// ============================================================================
// Levels
// ============================================================================

/// Peak and RMS level of one channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub peak: f64,
    pub rms: f64,
}

impl ChannelStats {
    /// Levels of a run of samples; silence for an empty run, NaN if any
    /// sample is NaN
    pub fn from_samples(samples: ArrayView1<'_, f64>) -> Self {
        if samples.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        // NaN anywhere makes the peak NaN
        let peak = samples.iter().map(|s| s.abs()).fold(0.0, |peak: f64, s| {
            if peak.is_nan() || s.is_nan() {
                f64::NAN
            } else {
                peak.max(s)
            }
        });
        let mean_square = samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64;
        Self {
            peak,
            rms: mean_square.sqrt(),
        }
    }
}

/// Largest absolute sample value of mono audio
#[derive(Debug, Clone, Copy, Default)]
pub struct PeakAmplitude;

impl Probe for PeakAmplitude {
    type Input = SingleChannelAudio;
    type Output = f64;

    const NAME: &'static str = "peak_amplitude";

    fn apply(&self, input: &SingleChannelAudio) -> f64 {
        let peak = ChannelStats::from_samples(input.data().view()).peak;
        debug!(peak, samples = input.len(), "peak amplitude");
        peak
    }
}

impl FromParams for PeakAmplitude {
    fn from_params(params: &Value) -> Result<Self> {
        param_object(Self::NAME, params)?;
        Ok(Self)
    }
}

/// Per-channel levels of stereo audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualChannelSummary {
    pub samples: usize,
    /// One entry per channel column, in column order
    pub channels: Vec<ChannelStats>,
}

impl DualChannelSummary {
    /// Levels of the left channel
    pub fn left(&self) -> Option<&ChannelStats> {
        self.channels.first()
    }

    /// Levels of the right channel
    pub fn right(&self) -> Option<&ChannelStats> {
        self.channels.get(1)
    }
}

/// Peak and RMS of every channel of stereo audio
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelSummary;

impl Probe for ChannelSummary {
    type Input = DualChannelAudio;
    type Output = DualChannelSummary;

    const NAME: &'static str = "channel_summary";

    fn apply(&self, input: &DualChannelAudio) -> DualChannelSummary {
        debug!(
            samples = input.num_samples(),
            channels = input.num_channels(),
            "channel summary"
        );
        DualChannelSummary {
            samples: input.num_samples(),
            channels: input.channels().map(ChannelStats::from_samples).collect(),
        }
    }
}

impl FromParams for ChannelSummary {
    fn from_params(params: &Value) -> Result<Self> {
        param_object(Self::NAME, params)?;
        Ok(Self)
    }
}
