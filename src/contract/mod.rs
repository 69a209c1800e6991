//! Operator and probe type contracts
//!
//! Every operator declares the kind of audio it accepts and the kind it
//! produces; every probe declares the kind it accepts. The kinds come from
//! associated container types, so they are available without an instance
//! and cannot disagree with what `apply` actually takes.

mod composition;

pub use composition::{check_composition, composed_contract, Stage};

use serde::{Deserialize, Serialize};

use crate::data::{AudioData, Kind};
use crate::error::Result;

/// Static (input, output) metadata of an operator or probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Contract {
    Operator { input: Kind, output: Kind },
    Probe { input: Kind },
}

impl Contract {
    /// Kind of payload accepted
    pub fn input_kind(&self) -> Kind {
        match *self {
            Contract::Operator { input, .. } => input,
            Contract::Probe { input } => input,
        }
    }

    /// Declared output kind; probes declare none
    pub fn output_kind(&self) -> Option<Kind> {
        match *self {
            Contract::Operator { output, .. } => Some(output),
            Contract::Probe { .. } => None,
        }
    }

    /// Kind of the payload after this stage in a chain
    ///
    /// A probe hands the payload on untouched, so its effective output is
    /// its input.
    pub fn passes_on(&self) -> Kind {
        self.output_kind().unwrap_or_else(|| self.input_kind())
    }

    /// Check if this is a probe contract
    pub fn is_probe(&self) -> bool {
        matches!(self, Contract::Probe { .. })
    }

    /// The logical shape of an operator contract
    pub fn shape(&self) -> Option<ContractShape> {
        match *self {
            Contract::Operator { input, output } => Some(ContractShape::of(input, output)),
            Contract::Probe { .. } => None,
        }
    }
}

/// The four logical operator shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractShape {
    SingleToSingle,
    DualToDual,
    /// Merge
    DualToSingle,
    /// Expand
    SingleToDual,
}

impl ContractShape {
    /// Shape of an (input, output) kind pair
    pub fn of(input: Kind, output: Kind) -> Self {
        match (input, output) {
            (Kind::SingleChannel, Kind::SingleChannel) => ContractShape::SingleToSingle,
            (Kind::DualChannel, Kind::DualChannel) => ContractShape::DualToDual,
            (Kind::DualChannel, Kind::SingleChannel) => ContractShape::DualToSingle,
            (Kind::SingleChannel, Kind::DualChannel) => ContractShape::SingleToDual,
        }
    }

    /// Whether the shape changes the channel arity
    pub fn changes_arity(self) -> bool {
        matches!(self, ContractShape::DualToSingle | ContractShape::SingleToDual)
    }
}

/// A pure transformation from one typed container to a new one
///
/// Parameters live on the operator value; `apply` never mutates its input
/// and always returns a freshly allocated container.
pub trait Operator: Send + Sync {
    type Input: AudioData;
    type Output: AudioData;

    /// Name the operator is registered under
    const NAME: &'static str;

    fn input_kind() -> Kind {
        <Self::Input as AudioData>::KIND
    }

    fn output_kind() -> Kind {
        <Self::Output as AudioData>::KIND
    }

    fn contract() -> Contract {
        Contract::Operator {
            input: Self::input_kind(),
            output: Self::output_kind(),
        }
    }

    fn shape() -> ContractShape {
        ContractShape::of(Self::input_kind(), Self::output_kind())
    }

    fn apply(&self, input: &Self::Input) -> Result<Self::Output>;
}

/// A pure read-only computation over a typed container
pub trait Probe: Send + Sync {
    type Input: AudioData;
    type Output: Serialize;

    /// Name the probe is registered under
    const NAME: &'static str;

    fn input_kind() -> Kind {
        <Self::Input as AudioData>::KIND
    }

    fn contract() -> Contract {
        Contract::Probe {
            input: Self::input_kind(),
        }
    }

    fn apply(&self, input: &Self::Input) -> Self::Output;
}
