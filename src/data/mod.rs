//! Typed audio containers
//!
//! Containers wrap a sample buffer of fixed channel arity and validate it
//! once, at construction. They expose no in-place mutation.

mod dual;
mod kind;
mod payload;
mod single;

pub use dual::DualChannelAudio;
pub use kind::Kind;
pub use payload::{AudioData, AudioPayload};
pub use single::SingleChannelAudio;
