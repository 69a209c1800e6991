//! Type-erased nodes built from configuration
//!
//! Hosts that wire operators together from configuration cannot name the
//! concrete operator types, so the registry hands out boxed [`Node`]s that
//! work on [`AudioPayload`]s.

use std::fmt;

use serde_json::Value;

use crate::contract::{Contract, Operator, Probe};
use crate::data::{AudioData, AudioPayload, Kind};
use crate::error::{AudioError, Result};

/// What a node hands back
#[derive(Debug, Clone, PartialEq)]
pub enum NodeOutput {
    /// A new container, from an operator
    Payload(AudioPayload),
    /// A summary value, from a probe
    Value(Value),
}

impl NodeOutput {
    /// The payload, if an operator produced one
    pub fn into_payload(self) -> Option<AudioPayload> {
        match self {
            NodeOutput::Payload(payload) => Some(payload),
            NodeOutput::Value(_) => None,
        }
    }

    /// The value, if a probe produced one
    pub fn into_value(self) -> Option<Value> {
        match self {
            NodeOutput::Value(value) => Some(value),
            NodeOutput::Payload(_) => None,
        }
    }
}

/// Execution interface of a configured operator or probe
pub trait Node: Send + Sync {
    /// Registered name
    fn name(&self) -> &str;

    fn contract(&self) -> Contract;

    /// Run on a payload
    ///
    /// # Errors
    /// Returns [`AudioError::KindMismatch`] if the payload is not of the
    /// kind the node accepts.
    fn process(&self, payload: &AudioPayload) -> Result<NodeOutput>;
}

impl fmt::Debug for dyn Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name())
            .field("contract", &self.contract())
            .finish()
    }
}

fn kind_mismatch(operator: &str, expected: Kind, actual: Kind) -> AudioError {
    AudioError::KindMismatch {
        operator: operator.to_string(),
        expected,
        actual,
    }
}

/// Adapts an [`Operator`] to the [`Node`] interface
#[derive(Debug, Clone)]
pub struct OperatorNode<O> {
    operator: O,
}

impl<O: Operator> OperatorNode<O> {
    /// Wrap an operator
    pub fn new(operator: O) -> Self {
        Self { operator }
    }

    /// Get the wrapped operator
    pub fn operator(&self) -> &O {
        &self.operator
    }
}

impl<O: Operator> Node for OperatorNode<O> {
    fn name(&self) -> &str {
        O::NAME
    }

    fn contract(&self) -> Contract {
        O::contract()
    }

    fn process(&self, payload: &AudioPayload) -> Result<NodeOutput> {
        let input = <O::Input as AudioData>::from_payload_ref(payload)
            .ok_or_else(|| kind_mismatch(O::NAME, O::input_kind(), payload.kind()))?;
        let output = self.operator.apply(input)?;
        Ok(NodeOutput::Payload(output.into_payload()))
    }
}

/// Adapts a [`Probe`] to the [`Node`] interface
#[derive(Debug, Clone)]
pub struct ProbeNode<P> {
    probe: P,
}

impl<P: Probe> ProbeNode<P> {
    /// Wrap a probe
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    /// Get the wrapped probe
    pub fn probe(&self) -> &P {
        &self.probe
    }
}

impl<P: Probe> Node for ProbeNode<P> {
    fn name(&self) -> &str {
        P::NAME
    }

    fn contract(&self) -> Contract {
        P::contract()
    }

    fn process(&self, payload: &AudioPayload) -> Result<NodeOutput> {
        let input = <P::Input as AudioData>::from_payload_ref(payload)
            .ok_or_else(|| kind_mismatch(P::NAME, P::input_kind(), payload.kind()))?;
        let value = serde_json::to_value(self.probe.apply(input))?;
        Ok(NodeOutput::Value(value))
    }
}
