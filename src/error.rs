//! Error handling for audiokind
//!
//! Every failure is a construction-time or configuration-time failure and is
//! surfaced directly to the caller. Nothing here is retried.

use thiserror::Error;

use crate::data::Kind;

/// Result type alias for audiokind operations
pub type Result<T> = std::result::Result<T, AudioError>;

/// Main error type for audiokind operations
#[derive(Error, Debug)]
pub enum AudioError {
    // Shape Errors
    #[error("Shape error: {kind} audio requires a {expected}-dimensional buffer, got {actual} dimension(s) (shape {shape:?})")]
    Shape {
        kind: Kind,
        expected: usize,
        actual: usize,
        shape: Vec<usize>,
    },

    #[error("Shape error: cannot classify a {actual}-dimensional buffer (shape {shape:?}) as audio")]
    UnclassifiableShape { actual: usize, shape: Vec<usize> },

    #[error("Invalid buffer: {reason}")]
    InvalidBuffer { reason: String },

    #[error("Channel {channel} out of range: buffer has {channels} channel(s)")]
    ChannelOutOfRange { channel: usize, channels: usize },

    // Contract Errors
    #[error("Type mismatch at stage {stage}: '{upstream}' produces {produced} audio but '{downstream}' expects {expected} audio")]
    TypeMismatch {
        stage: usize,
        upstream: String,
        produced: Kind,
        downstream: String,
        expected: Kind,
    },

    #[error("'{operator}' accepts {expected} audio, got {actual} audio")]
    KindMismatch {
        operator: String,
        expected: Kind,
        actual: Kind,
    },

    // Configuration Errors
    #[error("Invalid parameter '{param}' for '{operator}': {reason}")]
    InvalidParameter {
        operator: String,
        param: String,
        reason: String,
    },

    #[error("Unknown operator: {name}")]
    UnknownOperator { name: String },

    // Source Errors
    #[error("Source '{source_name}' has no more data")]
    SourceExhausted { source_name: String },

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AudioError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            AudioError::Shape { .. } => "SHAPE_ERROR",
            AudioError::UnclassifiableShape { .. } => "SHAPE_ERROR",
            AudioError::InvalidBuffer { .. } => "SHAPE_ERROR",
            AudioError::ChannelOutOfRange { .. } => "CHANNEL_OUT_OF_RANGE",
            AudioError::TypeMismatch { .. } => "TYPE_MISMATCH",
            AudioError::KindMismatch { .. } => "KIND_MISMATCH",
            AudioError::InvalidParameter { .. } => "INVALID_PARAMETER",
            AudioError::UnknownOperator { .. } => "UNKNOWN_OPERATOR",
            AudioError::SourceExhausted { .. } => "SOURCE_EXHAUSTED",
            AudioError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether this error is raised while a pipeline is being declared,
    /// before any sample data exists
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            AudioError::TypeMismatch { .. }
                | AudioError::InvalidParameter { .. }
                | AudioError::UnknownOperator { .. }
                | AudioError::Serialization(_)
        )
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::Shape { kind: Kind::SingleChannel, .. } => {
                "Pass a one-dimensional buffer, or wrap it as dual-channel audio instead"
            }
            Self::Shape { kind: Kind::DualChannel, .. } => {
                "Pass a buffer shaped (samples, channels)"
            }
            Self::UnclassifiableShape { .. } => "Only 1-D and 2-D buffers are audio payloads",
            Self::InvalidBuffer { .. } => "Check the buffer length against its channel count",
            Self::ChannelOutOfRange { .. } => "Check the channel count of the buffer",
            Self::TypeMismatch { .. } => {
                "Insert a channel merge or expand between the two stages"
            }
            Self::KindMismatch { .. } => "Convert the payload to the kind the operator accepts",
            Self::InvalidParameter { .. } => "Check the operator parameters in the configuration",
            Self::UnknownOperator { .. } => "Use one of the names listed by the operator registry",
            Self::SourceExhausted { .. } => "Refill the source or stop pulling from it",
            _ => "Check the error details and try again",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AudioError::Shape {
            kind: Kind::SingleChannel,
            expected: 1,
            actual: 2,
            shape: vec![10, 2],
        };
        assert_eq!(err.error_code(), "SHAPE_ERROR");

        let err = AudioError::UnknownOperator {
            name: "reverb".to_string(),
        };
        assert_eq!(err.error_code(), "UNKNOWN_OPERATOR");
    }

    #[test]
    fn test_shape_message() {
        let err = AudioError::Shape {
            kind: Kind::DualChannel,
            expected: 2,
            actual: 1,
            shape: vec![8],
        };
        let msg = err.to_string();
        assert!(msg.contains("dual-channel"));
        assert!(msg.contains("[8]"));
    }

    #[test]
    fn test_configuration_errors() {
        let mismatch = AudioError::TypeMismatch {
            stage: 1,
            upstream: "a".to_string(),
            produced: Kind::DualChannel,
            downstream: "b".to_string(),
            expected: Kind::SingleChannel,
        };
        assert!(mismatch.is_configuration_error());
        assert!(!mismatch.recovery_hint().is_empty());

        let shape = AudioError::UnclassifiableShape {
            actual: 3,
            shape: vec![2, 2, 2],
        };
        assert!(!shape.is_configuration_error());
    }
}
