//! Component registry
//!
//! Two things live here:
//! - [`REGISTERED_MODULES`], the ordered list of operator modules the audio
//!   specialization contributes, for hosts that track components by module
//! - [`OperatorRegistry`], a startup-time table from operator name to its
//!   static contract and a constructor taking configuration parameters

mod node;

pub use node::{Node, NodeOutput, OperatorNode, ProbeNode};

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::config::{FromParams, NodeConfig, PipelineConfig};
use crate::contract::{check_composition, Contract, ContractShape, Operator, Probe, Stage};
use crate::data::{DualChannelAudio, Kind, SingleChannelAudio};
use crate::error::{AudioError, Result};
use crate::probes::{self, ChannelSummary, PeakAmplitude, SampleCount};
use crate::processing::{
    expand, merge, multiply, ChannelExpand, ChannelMerge, DualChannelMultiply, ExpandRule,
    MergeRule, SingleChannelMultiply,
};

/// Operator modules contributed by the audio specialization, in load order
pub const REGISTERED_MODULES: &[&str] = &[
    multiply::MODULE,
    merge::MODULE,
    expand::MODULE,
    probes::MODULE,
];

/// The audio specialization as seen by a host loader
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioSpecialization;

impl AudioSpecialization {
    /// Name hosts load the specialization by
    pub const NAME: &'static str = "audio";

    /// Operator modules in load order
    pub fn modules(&self) -> &'static [&'static str] {
        REGISTERED_MODULES
    }

    /// Registry holding every operator and probe of the specialization
    pub fn registry(&self) -> OperatorRegistry {
        OperatorRegistry::with_defaults()
    }
}

/// Builds a boxed node from configuration parameters
pub type BuildFn = fn(&Value) -> Result<Box<dyn Node>>;

fn build_operator<O>(params: &Value) -> Result<Box<dyn Node>>
where
    O: Operator + FromParams + 'static,
{
    Ok(Box::new(OperatorNode::new(O::from_params(params)?)))
}

fn build_probe<P>(params: &Value) -> Result<Box<dyn Node>>
where
    P: Probe + FromParams + 'static,
{
    Ok(Box::new(ProbeNode::new(P::from_params(params)?)))
}

/// A registered operator or probe
#[derive(Clone, Copy)]
pub struct RegistryEntry {
    pub name: &'static str,
    /// Module the operator is defined in
    pub module: &'static str,
    pub contract: Contract,
    pub description: &'static str,
    build: BuildFn,
}

impl RegistryEntry {
    /// Entry for an operator type
    pub fn operator<O>(module: &'static str, description: &'static str) -> Self
    where
        O: Operator + FromParams + 'static,
    {
        Self {
            name: O::NAME,
            module,
            contract: O::contract(),
            description,
            build: build_operator::<O>,
        }
    }

    /// Entry for a probe type
    pub fn probe<P>(module: &'static str, description: &'static str) -> Self
    where
        P: Probe + FromParams + 'static,
    {
        Self {
            name: P::NAME,
            module,
            contract: P::contract(),
            description,
            build: build_probe::<P>,
        }
    }

    /// Construct a node from configuration parameters
    pub fn build(&self, params: &Value) -> Result<Box<dyn Node>> {
        (self.build)(params)
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("module", &self.module)
            .field("contract", &self.contract)
            .finish()
    }
}

/// Name to operator table
#[derive(Debug, Clone, Default)]
pub struct OperatorRegistry {
    entries: HashMap<&'static str, RegistryEntry>,
}

impl OperatorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create registry with every operator and probe of this crate
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(RegistryEntry::operator::<SingleChannelMultiply>(
            multiply::MODULE,
            "Multiply every mono sample by a factor",
        ));
        registry.register(RegistryEntry::operator::<DualChannelMultiply>(
            multiply::MODULE,
            "Multiply every stereo sample by a factor, channel by channel",
        ));
        registry.register(RegistryEntry::operator::<ChannelMerge<MergeRule>>(
            merge::MODULE,
            "Fold stereo down to mono",
        ));
        registry.register(RegistryEntry::operator::<ChannelExpand<ExpandRule>>(
            expand::MODULE,
            "Spread mono over two channels",
        ));
        registry.register(RegistryEntry::probe::<SampleCount<SingleChannelAudio>>(
            probes::MODULE,
            "Number of mono samples",
        ));
        registry.register(RegistryEntry::probe::<SampleCount<DualChannelAudio>>(
            probes::MODULE,
            "Number of stereo samples per channel",
        ));
        registry.register(RegistryEntry::probe::<PeakAmplitude>(
            probes::MODULE,
            "Largest absolute mono sample",
        ));
        registry.register(RegistryEntry::probe::<ChannelSummary>(
            probes::MODULE,
            "Peak and RMS per stereo channel",
        ));

        registry
    }

    /// Register an entry, replacing any entry of the same name
    pub fn register(&mut self, entry: RegistryEntry) -> Option<RegistryEntry> {
        debug!(name = entry.name, module = entry.module, "registering operator");
        self.entries.insert(entry.name, entry)
    }

    /// Get an entry by name
    pub fn get(&self, name: &str) -> Result<&RegistryEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| AudioError::UnknownOperator {
                name: name.to_string(),
            })
    }

    /// Check if a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Static contract of a registered operator, without building it
    pub fn contract_of(&self, name: &str) -> Result<Contract> {
        self.get(name).map(|entry| entry.contract)
    }

    /// Operators that turn `from` audio into `to` audio by changing its
    /// channel arity, sorted by name
    pub fn converters(&self, from: Kind, to: Kind) -> Vec<&'static str> {
        let wanted = Contract::Operator {
            input: from,
            output: to,
        };
        let mut names: Vec<_> = self
            .entries
            .values()
            .filter(|entry| entry.contract == wanted)
            .filter(|entry| entry.contract.shape().map_or(false, ContractShape::changes_arity))
            .map(|entry| entry.name)
            .collect();
        names.sort_unstable();
        names
    }

    /// Build a single node from its configuration
    pub fn build(&self, config: &NodeConfig) -> Result<Box<dyn Node>> {
        let entry = self.get(&config.operator)?;
        debug!(name = entry.name, "building node");
        entry.build(&config.parameters)
    }

    /// Named contracts of a declared pipeline
    pub fn stages(&self, pipeline: &PipelineConfig) -> Result<Vec<Stage>> {
        pipeline
            .nodes
            .iter()
            .map(|node| -> Result<Stage> {
                let entry = self.get(&node.operator)?;
                Ok(Stage::new(entry.name, entry.contract))
            })
            .collect()
    }

    /// Check a declared pipeline using static contracts only
    ///
    /// Nothing is built, so a mismatched pipeline fails here, before any
    /// data is processed.
    pub fn check_pipeline(&self, pipeline: &PipelineConfig) -> Result<Vec<Contract>> {
        let stages = self.stages(pipeline)?;
        if let Err(err) = check_composition(&stages) {
            if let AudioError::TypeMismatch {
                produced, expected, ..
            } = &err
            {
                debug!(
                    converters = ?self.converters(*produced, *expected),
                    "operators able to bridge the mismatch"
                );
            }
            return Err(err);
        }
        Ok(stages.into_iter().map(|stage| stage.contract).collect())
    }

    /// Check a declared pipeline, then build its nodes in order
    pub fn build_pipeline(&self, pipeline: &PipelineConfig) -> Result<Vec<Box<dyn Node>>> {
        self.check_pipeline(pipeline)?;
        pipeline.nodes.iter().map(|node| self.build(node)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_defaults() {
        let registry = OperatorRegistry::with_defaults();

        assert!(registry.contains("single_channel_multiply"));
        assert!(registry.contains("dual_channel_multiply"));
        assert!(registry.contains("channel_merge"));
        assert!(registry.contains("channel_expand"));
        assert!(registry.contains("single_channel_sample_count"));
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_registered_modules() {
        assert_eq!(
            REGISTERED_MODULES,
            &[
                "audiokind::processing::multiply",
                "audiokind::processing::merge",
                "audiokind::processing::expand",
                "audiokind::probes",
            ]
        );
        assert_eq!(AudioSpecialization.modules(), REGISTERED_MODULES);
    }

    #[test]
    fn test_every_entry_module_is_registered() {
        let registry = AudioSpecialization.registry();
        for name in registry.names() {
            let entry = registry.get(name).unwrap();
            assert!(
                REGISTERED_MODULES.contains(&entry.module),
                "{} lives in unlisted module {}",
                name,
                entry.module
            );
        }
    }

    #[test]
    fn test_get_unknown() {
        let registry = OperatorRegistry::with_defaults();
        assert!(matches!(
            registry.get("reverb"),
            Err(AudioError::UnknownOperator { .. })
        ));
    }

    #[test]
    fn test_contract_of() {
        let registry = OperatorRegistry::with_defaults();
        assert_eq!(
            registry.contract_of("channel_merge").unwrap(),
            Contract::Operator {
                input: Kind::DualChannel,
                output: Kind::SingleChannel,
            }
        );
        assert_eq!(
            registry.contract_of("channel_summary").unwrap(),
            Contract::Probe {
                input: Kind::DualChannel
            }
        );
    }

    #[test]
    fn test_converters() {
        let registry = OperatorRegistry::with_defaults();
        assert_eq!(
            registry.converters(Kind::DualChannel, Kind::SingleChannel),
            vec!["channel_merge"]
        );
        assert_eq!(
            registry.converters(Kind::SingleChannel, Kind::DualChannel),
            vec!["channel_expand"]
        );
        // Multiply keeps the arity, so it never bridges anything
        assert!(registry
            .converters(Kind::SingleChannel, Kind::SingleChannel)
            .is_empty());
        assert!(OperatorRegistry::new()
            .converters(Kind::DualChannel, Kind::SingleChannel)
            .is_empty());
    }

    #[test]
    fn test_build_node() {
        let registry = OperatorRegistry::with_defaults();
        let node = registry
            .build(&NodeConfig::new("dual_channel_multiply", json!({"factor": 0.5})))
            .unwrap();
        assert_eq!(node.name(), "dual_channel_multiply");
        assert_eq!(node.contract(), DualChannelMultiply::contract());
    }

    #[test]
    fn test_build_with_bad_parameters() {
        let registry = OperatorRegistry::with_defaults();
        let result = registry.build(&NodeConfig::named("single_channel_multiply"));
        assert!(matches!(
            result,
            Err(AudioError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = OperatorRegistry::new();
        assert!(registry.is_empty());
        let entry = RegistryEntry::probe::<PeakAmplitude>(probes::MODULE, "peak");
        assert!(registry.register(entry).is_none());
        assert!(registry.register(entry).is_some());
        assert_eq!(registry.names(), vec!["peak_amplitude"]);
    }
}
