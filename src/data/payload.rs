//! The closed set of audio payload variants

use std::fmt::Debug;

use ndarray::ArrayD;

use super::dual::DualChannelAudio;
use super::kind::Kind;
use super::single::SingleChannelAudio;
use crate::error::{AudioError, Result};

/// Capability shared by the typed audio containers
///
/// The kind is an associated constant, so it can be read from the type
/// alone. That is what lets operators declare their contracts statically.
pub trait AudioData: Clone + Debug + PartialEq + Send + Sync + Sized + 'static {
    /// Arity tag of this container type
    const KIND: Kind;

    fn kind(&self) -> Kind {
        Self::KIND
    }

    /// Length of the buffer along its sample axis
    fn num_samples(&self) -> usize;

    /// Wrap this container in the matching payload variant
    fn into_payload(self) -> AudioPayload;

    /// Unwrap a payload of this kind, handing the payload back otherwise
    fn try_from_payload(payload: AudioPayload) -> std::result::Result<Self, AudioPayload>;

    /// Borrow a payload of this kind
    fn from_payload_ref(payload: &AudioPayload) -> Option<&Self>;
}

/// Either kind of audio container
#[derive(Debug, Clone, PartialEq)]
pub enum AudioPayload {
    SingleChannel(SingleChannelAudio),
    DualChannel(DualChannelAudio),
}

impl AudioPayload {
    /// Classify a raw buffer by its dimensionality
    ///
    /// # Errors
    /// Returns [`AudioError::UnclassifiableShape`] for buffers that are
    /// neither one- nor two-dimensional.
    pub fn from_array(buffer: ArrayD<f64>) -> Result<Self> {
        match Kind::from_ndim(buffer.ndim()) {
            Some(Kind::SingleChannel) => SingleChannelAudio::new(buffer).map(Self::SingleChannel),
            Some(Kind::DualChannel) => DualChannelAudio::new(buffer).map(Self::DualChannel),
            None => Err(AudioError::UnclassifiableShape {
                actual: buffer.ndim(),
                shape: buffer.shape().to_vec(),
            }),
        }
    }

    /// Kind of the wrapped container
    pub fn kind(&self) -> Kind {
        match self {
            Self::SingleChannel(_) => Kind::SingleChannel,
            Self::DualChannel(_) => Kind::DualChannel,
        }
    }

    /// Length of the buffer along its sample axis
    pub fn num_samples(&self) -> usize {
        match self {
            Self::SingleChannel(audio) => audio.num_samples(),
            Self::DualChannel(audio) => audio.num_samples(),
        }
    }

    /// Borrow as mono audio, if it is
    pub fn as_single(&self) -> Option<&SingleChannelAudio> {
        match self {
            Self::SingleChannel(audio) => Some(audio),
            Self::DualChannel(_) => None,
        }
    }

    /// Borrow as stereo audio, if it is
    pub fn as_dual(&self) -> Option<&DualChannelAudio> {
        match self {
            Self::DualChannel(audio) => Some(audio),
            Self::SingleChannel(_) => None,
        }
    }

    /// Release the underlying buffer
    pub fn into_dyn(self) -> ArrayD<f64> {
        match self {
            Self::SingleChannel(audio) => audio.into_dyn(),
            Self::DualChannel(audio) => audio.into_dyn(),
        }
    }
}

impl From<SingleChannelAudio> for AudioPayload {
    fn from(audio: SingleChannelAudio) -> Self {
        Self::SingleChannel(audio)
    }
}

impl From<DualChannelAudio> for AudioPayload {
    fn from(audio: DualChannelAudio) -> Self {
        Self::DualChannel(audio)
    }
}

pub(crate) fn shape_error(kind: Kind, shape: &[usize]) -> AudioError {
    AudioError::Shape {
        kind,
        expected: kind.ndim(),
        actual: shape.len(),
        shape: shape.to_vec(),
    }
}
