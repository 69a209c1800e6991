//! Single-channel to dual-channel expansion

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

/// Rule spreading a mono signal over a left and right channel
///
/// Both returned channels must hold exactly as many samples as the input.
pub trait ExpandStrategy: Send + Sync {
    fn expand(&self, mono: ArrayView1<'_, f64>) -> (Array1<f64>, Array1<f64>);

    /// Short label used in log events
    fn label(&self) -> &str {
        "custom"
    }
}

impl<F> ExpandStrategy for F
where
    F: Fn(ArrayView1<'_, f64>) -> (Array1<f64>, Array1<f64>) + Send + Sync,
{
    fn expand(&self, mono: ArrayView1<'_, f64>) -> (Array1<f64>, Array1<f64>) {
        self(mono)
    }
}

/// Built-in expansion rules
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpandRule {
    /// Same signal on both channels
    #[default]
    Duplicate,
    /// Signal on the left, silence on the right
    LeftOnly,
    /// Silence on the left, signal on the right
    RightOnly,
    /// Signal scaled independently per channel
    Gains { left: f64, right: f64 },
}

impl ExpandStrategy for ExpandRule {
    fn expand(&self, mono: ArrayView1<'_, f64>) -> (Array1<f64>, Array1<f64>) {
        match *self {
            ExpandRule::Duplicate => (mono.to_owned(), mono.to_owned()),
            ExpandRule::LeftOnly => (mono.to_owned(), Array1::zeros(mono.len())),
            ExpandRule::RightOnly => (Array1::zeros(mono.len()), mono.to_owned()),
            ExpandRule::Gains { left, right } => (&mono * left, &mono * right),
        }
    }

    fn label(&self) -> &str {
        match self {
            ExpandRule::Duplicate => "duplicate",
            ExpandRule::LeftOnly => "left_only",
            ExpandRule::RightOnly => "right_only",
            ExpandRule::Gains { .. } => "gains",
        }
    }
}

/// Spreads mono audio over two channels with a replaceable rule
#[derive(Debug, Clone, Default)]
pub struct ChannelExpand<S = ExpandRule> {
    strategy: S,
}

impl ChannelExpand<ExpandRule> {
    /// Expand by duplicating the signal into both channels
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ExpandStrategy> ChannelExpand<S> {
    /// Expand with a custom strategy
    pub fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Get the expansion strategy
    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}

impl<S: ExpandStrategy> Operator for ChannelExpand<S> {
    type Input = SingleChannelAudio;
    type Output = DualChannelAudio;

    const NAME: &'static str = "channel_expand";

    fn apply(&self, input: &SingleChannelAudio) -> Result<DualChannelAudio> {
        debug!(
            strategy = self.strategy.label(),
            samples = input.len(),
            "channel expand"
        );
        let (left, right) = self.strategy.expand(input.data().view());
        if left.len() != input.len() || right.len() != input.len() {
            return Err(AudioError::InvalidBuffer {
                reason: format!(
                    "expand strategy '{}' produced {}/{} samples from {}",
                    self.strategy.label(),
                    left.len(),
                    right.len(),
                    input.len()
                ),
            });
        }
        DualChannelAudio::from_channels(left.view(), right.view())
    }
}

impl FromParams for ChannelExpand<ExpandRule> {
    fn from_params(params: &Value) -> Result<Self> {
        let rule: ExpandRule =
            optional_param(Self::NAME, params, "strategy")?.unwrap_or_default();
        Ok(Self::with_strategy(rule))
    }
}
