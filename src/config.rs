//! Node and pipeline configuration
//!
//! Hosts describe operator chains as JSON:
//!
//! ```json
//! {"nodes": [
//!     {"operator": "single_channel_multiply", "parameters": {"factor": 2.0}},
//!     {"operator": "channel_expand", "parameters": {"strategy": "duplicate"}}
//! ]}
//! ```
//!
//! A bare array of nodes is accepted as well.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AudioError, Result};

/// One operator or probe in a declared chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Registered operator name
    pub operator: String,
    /// Operator parameters, an object
    #[serde(default = "empty_parameters")]
    pub parameters: Value,
}

fn empty_parameters() -> Value {
    Value::Object(Map::new())
}

impl NodeConfig {
    /// Create a node description with parameters
    pub fn new(operator: impl Into<String>, parameters: Value) -> Self {
        Self {
            operator: operator.into(),
            parameters,
        }
    }

    /// A node with no parameters
    pub fn named(operator: impl Into<String>) -> Self {
        Self::new(operator, empty_parameters())
    }
}

/// An ordered chain of node descriptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PipelineRepr")]
pub struct PipelineConfig {
    pub nodes: Vec<NodeConfig>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PipelineRepr {
    Wrapped { nodes: Vec<NodeConfig> },
    Bare(Vec<NodeConfig>),
}

impl From<PipelineRepr> for PipelineConfig {
    fn from(repr: PipelineRepr) -> Self {
        match repr {
            PipelineRepr::Wrapped { nodes } | PipelineRepr::Bare(nodes) => Self { nodes },
        }
    }
}

impl PipelineConfig {
    /// Create a pipeline from node descriptions
    pub fn new(nodes: Vec<NodeConfig>) -> Self {
        Self { nodes }
    }

    /// Parse a pipeline from JSON, wrapped or bare
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the pipeline declares no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Construction of an operator or probe from its configuration parameters
pub trait FromParams: Sized {
    fn from_params(params: &Value) -> Result<Self>;
}

/// Parameters as an object; `null` counts as no parameters
pub(crate) fn param_object<'a>(
    operator: &str,
    params: &'a Value,
) -> Result<Option<&'a Map<String, Value>>> {
    match params {
        Value::Null => Ok(None),
        Value::Object(object) => Ok(Some(object)),
        other => Err(AudioError::InvalidParameter {
            operator: operator.to_string(),
            param: "parameters".to_string(),
            reason: format!("expected an object, got {}", other),
        }),
    }
}

/// Look up an optional parameter and deserialize it
pub(crate) fn optional_param<T: DeserializeOwned>(
    operator: &str,
    params: &Value,
    name: &str,
) -> Result<Option<T>> {
    let object = match param_object(operator, params)? {
        Some(object) => object,
        None => return Ok(None),
    };
    match object.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| AudioError::InvalidParameter {
                operator: operator.to_string(),
                param: name.to_string(),
                reason: format!("{} (got {})", e, value),
            }),
    }
}

/// Look up a required parameter and deserialize it
pub(crate) fn required_param<T: DeserializeOwned>(
    operator: &str,
    params: &Value,
    name: &str,
) -> Result<T> {
    optional_param(operator, params, name)?.ok_or_else(|| AudioError::InvalidParameter {
        operator: operator.to_string(),
        param: name.to_string(),
        reason: "missing".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_wrapped_pipeline() {
        let config = PipelineConfig::from_json_str(
            r#"{"nodes": [
                {"operator": "single_channel_multiply", "parameters": {"factor": 2.0}},
                {"operator": "single_channel_sample_count"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            config.nodes,
            vec![
                NodeConfig::new("single_channel_multiply", json!({"factor": 2.0})),
                NodeConfig::named("single_channel_sample_count"),
            ]
        );
    }

    #[test]
    fn test_bare_pipeline() {
        let config =
            PipelineConfig::from_json_str(r#"[{"operator": "channel_merge"}]"#).unwrap();
        assert_eq!(config.len(), 1);
        assert_eq!(config.nodes[0].parameters, json!({}));
    }

    #[test]
    fn test_malformed_pipeline() {
        let err = PipelineConfig::from_json_str(r#"{"nodes": 3}"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_required_param() {
        let factor: f64 = required_param("op", &json!({"factor": -0.5}), "factor").unwrap();
        assert_eq!(factor, -0.5);

        let missing = required_param::<f64>("op", &json!({}), "factor").unwrap_err();
        assert!(matches!(missing, AudioError::InvalidParameter { ref param, .. } if param == "factor"));

        let wrong_type = required_param::<f64>("op", &json!({"factor": "loud"}), "factor");
        assert!(wrong_type.is_err());
    }

    #[test]
    fn test_parameters_must_be_object() {
        let err = optional_param::<f64>("op", &json!([1, 2]), "factor").unwrap_err();
        assert!(matches!(err, AudioError::InvalidParameter { ref param, .. } if param == "parameters"));
        assert_eq!(optional_param::<f64>("op", &Value::Null, "factor").unwrap(), None);
    }
}
