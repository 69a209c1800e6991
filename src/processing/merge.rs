//! Dual-channel to single-channel merge

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::{optional_param, FromParams};
use crate::contract::Operator;
use crate::data::{DualChannelAudio, SingleChannelAudio};
use crate::error::{AudioError, Result};

/// Module identifier listed in the component registry
pub const MODULE: &str = module_path!();

/// Rule combining a left and right channel into one
///
/// Implementations must return exactly as many samples as each input
/// channel holds.
pub trait MergeStrategy: Send + Sync {
    fn merge(&self, left: ArrayView1<'_, f64>, right: ArrayView1<'_, f64>) -> Array1<f64>;

    /// Short label used in log events
    fn label(&self) -> &str {
        "custom"
    }
}

impl<F> MergeStrategy for F
where
    F: Fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> Array1<f64> + Send + Sync,
{
    fn merge(&self, left: ArrayView1<'_, f64>, right: ArrayView1<'_, f64>) -> Array1<f64> {
        self(left, right)
    }
}

/// Built-in merge rules
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeRule {
    /// Mean of both channels
    #[default]
    Average,
    /// Keep the left channel, drop the right
    Left,
    /// Keep the right channel, drop the left
    Right,
    /// `left * l + right * r`
    Weighted { left: f64, right: f64 },
}

impl MergeStrategy for MergeRule {
    fn merge(&self, left: ArrayView1<'_, f64>, right: ArrayView1<'_, f64>) -> Array1<f64> {
        match *self {
            MergeRule::Average => (&left + &right) * 0.5,
            MergeRule::Left => left.to_owned(),
            MergeRule::Right => right.to_owned(),
            MergeRule::Weighted {
                left: left_gain,
                right: right_gain,
            } => &left * left_gain + &right * right_gain,
        }
    }

    fn label(&self) -> &str {
        match self {
            MergeRule::Average => "average",
            MergeRule::Left => "left",
            MergeRule::Right => "right",
            MergeRule::Weighted { .. } => "weighted",
        }
    }
}

/// Folds stereo audio down to mono with a replaceable rule
///
/// Channels beyond the first two are ignored.
#[derive(Debug, Clone, Default)]
pub struct ChannelMerge<S = MergeRule> {
    strategy: S,
}

impl ChannelMerge<MergeRule> {
    /// Merge by averaging both channels
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: MergeStrategy> ChannelMerge<S> {
    /// Merge with a custom strategy
    pub fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Get the merge strategy
    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}

impl<S: MergeStrategy> Operator for ChannelMerge<S> {
    type Input = DualChannelAudio;
    type Output = SingleChannelAudio;

    const NAME: &'static str = "channel_merge";

    fn apply(&self, input: &DualChannelAudio) -> Result<SingleChannelAudio> {
        debug!(
            strategy = self.strategy.label(),
            samples = input.num_samples(),
            "channel merge"
        );
        let merged = self.strategy.merge(input.left()?, input.right()?);
        if merged.len() != input.num_samples() {
            return Err(AudioError::InvalidBuffer {
                reason: format!(
                    "merge strategy '{}' produced {} samples from {}",
                    self.strategy.label(),
                    merged.len(),
                    input.num_samples()
                ),
            });
        }
        Ok(SingleChannelAudio::from_array(merged))
    }
}

impl FromParams for ChannelMerge<MergeRule> {
    fn from_params(params: &Value) -> Result<Self> {
        let rule: MergeRule = optional_param(Self::NAME, params, "strategy")?.unwrap_or_default();
        Ok(Self::with_strategy(rule))
    }
}
