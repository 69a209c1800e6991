//! Channel-arity tags

use std::fmt;

use serde::{Deserialize, Serialize};

/// The arity tag of an audio container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Mono audio, a 1-D buffer
    SingleChannel,
    /// Stereo audio, a 2-D buffer shaped (samples, channels)
    DualChannel,
}

impl Kind {
    /// Buffer dimensionality required by containers of this kind
    pub fn ndim(self) -> usize {
        match self {
            Kind::SingleChannel => 1,
            Kind::DualChannel => 2,
        }
    }

    /// Nominal channel count
    pub fn channels(self) -> usize {
        match self {
            Kind::SingleChannel => 1,
            Kind::DualChannel => 2,
        }
    }

    /// Kind matching a buffer dimensionality, if any
    pub fn from_ndim(ndim: usize) -> Option<Self> {
        match ndim {
            1 => Some(Kind::SingleChannel),
            2 => Some(Kind::DualChannel),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::SingleChannel => f.write_str("single-channel"),
            Kind::DualChannel => f.write_str("dual-channel"),
        }
    }
}
