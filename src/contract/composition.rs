//! Configuration-time composition checking
//!
//! A chain of stages is valid when the kind each stage hands on equals the
//! kind the next stage accepts. The check only reads static contracts, so it
//! runs before any operator is built or any sample exists.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Contract, Operator, Probe};
use crate::error::{AudioError, Result};

/// A named contract in a declared chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub contract: Contract,
}

impl Stage {
    /// Create a stage from a name and contract
    pub fn new(name: impl Into<String>, contract: Contract) -> Self {
        Self {
            name: name.into(),
            contract,
        }
    }

    /// Stage for an operator type, read from its static contract
    pub fn of_operator<O: Operator>() -> Self {
        Self::new(O::NAME, O::contract())
    }

    /// Stage for a probe type, read from its static contract
    pub fn of_probe<P: Probe>() -> Self {
        Self::new(P::NAME, P::contract())
    }
}

/// Verify every adjacent pair of stages agrees on the payload kind
///
/// # Errors
/// Returns [`AudioError::TypeMismatch`] for the first disagreeing pair. The
/// `stage` field is the index of the downstream stage.
pub fn check_composition(stages: &[Stage]) -> Result<()> {
    for (index, pair) in stages.windows(2).enumerate() {
        let (upstream, downstream) = (&pair[0], &pair[1]);
        let produced = upstream.contract.passes_on();
        let expected = downstream.contract.input_kind();
        if produced != expected {
            warn!(
                stage = index + 1,
                upstream = %upstream.name,
                downstream = %downstream.name,
                %produced,
                %expected,
                "incompatible stages"
            );
            return Err(AudioError::TypeMismatch {
                stage: index + 1,
                upstream: upstream.name.clone(),
                produced,
                downstream: downstream.name.clone(),
                expected,
            });
        }
    }
    Ok(())
}

/// End-to-end contract of a valid chain
///
/// `None` for an empty chain. A chain made only of probes is itself a probe.
pub fn composed_contract(stages: &[Stage]) -> Result<Option<Contract>> {
    check_composition(stages)?;
    let (first, last) = match (stages.first(), stages.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Ok(None),
    };
    let input = first.contract.input_kind();
    if stages.iter().all(|stage| stage.contract.is_probe()) {
        return Ok(Some(Contract::Probe { input }));
    }
    Ok(Some(Contract::Operator {
        input,
        output: last.contract.passes_on(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Kind;

    fn op(name: &str, input: Kind, output: Kind) -> Stage {
        Stage::new(name, Contract::Operator { input, output })
    }

    fn probe(name: &str, input: Kind) -> Stage {
        Stage::new(name, Contract::Probe { input })
    }

    #[test]
    fn test_empty_and_single_stage_chains_are_valid() {
        assert!(check_composition(&[]).is_ok());
        assert!(check_composition(&[op("a", Kind::DualChannel, Kind::SingleChannel)]).is_ok());
        assert_eq!(composed_contract(&[]).unwrap(), None);
    }

    #[test]
    fn test_dual_into_single_rejected() {
        let stages = [
            op("stereo", Kind::SingleChannel, Kind::DualChannel),
            op("mono", Kind::SingleChannel, Kind::SingleChannel),
        ];
        match check_composition(&stages).unwrap_err() {
            AudioError::TypeMismatch {
                stage,
                upstream,
                produced,
                downstream,
                expected,
            } => {
                assert_eq!(stage, 1);
                assert_eq!(upstream, "stereo");
                assert_eq!(produced, Kind::DualChannel);
                assert_eq!(downstream, "mono");
                assert_eq!(expected, Kind::SingleChannel);
            }
            other => panic!("expected type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_probe_passes_kind_through() {
        let stages = [
            op("expand", Kind::SingleChannel, Kind::DualChannel),
            probe("count", Kind::DualChannel),
            op("merge", Kind::DualChannel, Kind::SingleChannel),
        ];
        assert_eq!(
            composed_contract(&stages).unwrap(),
            Some(Contract::Operator {
                input: Kind::SingleChannel,
                output: Kind::SingleChannel,
            })
        );
    }

    #[test]
    fn test_probe_of_wrong_kind_rejected() {
        let stages = [
            op("expand", Kind::SingleChannel, Kind::DualChannel),
            probe("count", Kind::SingleChannel),
        ];
        assert!(matches!(
            check_composition(&stages),
            Err(AudioError::TypeMismatch { stage: 1, .. })
        ));
    }

    #[test]
    fn test_probe_only_chain() {
        let stages = [probe("a", Kind::SingleChannel), probe("b", Kind::SingleChannel)];
        assert_eq!(
            composed_contract(&stages).unwrap(),
            Some(Contract::Probe {
                input: Kind::SingleChannel
            })
        );
    }

    #[test]
    fn test_mismatch_reports_first_bad_pair() {
        let stages = [
            op("a", Kind::SingleChannel, Kind::SingleChannel),
            op("b", Kind::SingleChannel, Kind::SingleChannel),
            op("c", Kind::DualChannel, Kind::DualChannel),
            op("d", Kind::SingleChannel, Kind::SingleChannel),
        ];
        assert!(matches!(
            check_composition(&stages),
            Err(AudioError::TypeMismatch { stage: 2, .. })
        ));
    }
}
