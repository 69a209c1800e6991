//! Sample operators
//!
//! Every operator here is pure: parameters are fixed when the operator is
//! built, and `apply` returns a freshly allocated container.

pub mod expand;
pub mod merge;
pub mod multiply;

pub use expand::{ChannelExpand, ExpandRule, ExpandStrategy};
pub use merge::{ChannelMerge, MergeRule, MergeStrategy};
pub use multiply::{DualChannelMultiply, SingleChannelMultiply};
