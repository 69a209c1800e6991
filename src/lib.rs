//! audiokind - Typed Audio Containers and Kind-Checked Operators
//!
//! audiokind is the typed-data layer a host pipeline engine builds on:
//! 1. Containers: mono and stereo sample buffers that validate their channel
//!    arity once, when built
//! 2. Contracts: every operator declares the kind it accepts and the kind it
//!    produces, so a chain can be checked before any data flows
//!
//! # Architecture
//!
//! - `data`: `SingleChannelAudio`, `DualChannelAudio` and the `AudioPayload` union
//! - `contract`: `Operator` / `Probe` traits and the composition checker
//! - `processing`: multiply, merge and expand operators
//! - `probes`: read-only inspections
//! - `io`: kind-typed sources and sinks
//! - `registry`: operator modules and the name to constructor table
//! - `config`: node and pipeline descriptions
//!
//! Scheduling, execution contexts and timing belong to the host engine.

pub mod config;
pub mod contract;
pub mod data;
pub mod error;
pub mod io;
pub mod probes;
pub mod processing;
pub mod registry;

// Re-export commonly used types
pub use contract::{check_composition, Contract, ContractShape, Operator, Probe, Stage};
pub use data::{AudioData, AudioPayload, DualChannelAudio, Kind, SingleChannelAudio};
pub use error::{AudioError, Result};
pub use registry::{AudioSpecialization, OperatorRegistry, REGISTERED_MODULES};
