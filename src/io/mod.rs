//! Payload sources and sinks
//!
//! Sources produce typed containers and sinks consume them. Each declares
//! the kind it deals in, the same way operators do, so a host can check
//! the ends of a chain as well as its middle. No file formats live here.

mod sine;

pub use sine::SineSource;

use std::collections::VecDeque;

use crate::data::{AudioData, Kind};
use crate::error::{AudioError, Result};

/// Produces typed audio containers
pub trait AudioSource {
    type Output: AudioData;

    fn output_kind() -> Kind
    where
        Self: Sized,
    {
        <Self::Output as AudioData>::KIND
    }

    /// Fetch the next container
    fn get_data(&mut self) -> Result<Self::Output>;
}

/// Consumes typed audio containers
pub trait AudioSink {
    type Input: AudioData;

    fn input_kind() -> Kind
    where
        Self: Sized,
    {
        <Self::Input as AudioData>::KIND
    }

    /// Hand a container to the sink
    fn send_data(&mut self, data: &Self::Input) -> Result<()>;
}

/// Source replaying prepared containers in order
#[derive(Debug, Clone)]
pub struct MemorySource<A> {
    name: String,
    queue: VecDeque<A>,
}

impl<A: AudioData> MemorySource<A> {
    /// Create a source replaying `items` in order
    pub fn new(name: impl Into<String>, items: impl IntoIterator<Item = A>) -> Self {
        Self {
            name: name.into(),
            queue: items.into_iter().collect(),
        }
    }

    /// Queue another container behind the existing ones
    pub fn push(&mut self, item: A) {
        self.queue.push_back(item);
    }

    /// Containers left to hand out
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl<A: AudioData> AudioSource for MemorySource<A> {
    type Output = A;

    fn get_data(&mut self) -> Result<A> {
        self.queue
            .pop_front()
            .ok_or_else(|| AudioError::SourceExhausted {
                source_name: self.name.clone(),
            })
    }
}

/// Sink keeping a copy of everything it receives
#[derive(Debug, Clone)]
pub struct MemorySink<A> {
    received: Vec<A>,
}

impl<A: AudioData> MemorySink<A> {
    /// Create an empty sink
    pub fn new() -> Self {
        Self {
            received: Vec::new(),
        }
    }

    /// Containers received so far, in order
    pub fn received(&self) -> &[A] {
        &self.received
    }

    /// Total samples received across all containers
    pub fn total_samples(&self) -> usize {
        self.received.iter().map(AudioData::num_samples).sum()
    }

    /// Number of containers received
    pub fn len(&self) -> usize {
        self.received.len()
    }

    /// Check if nothing has been received
    pub fn is_empty(&self) -> bool {
        self.received.is_empty()
    }

    /// Take ownership of everything received
    pub fn into_inner(self) -> Vec<A> {
        self.received
    }
}

impl<A: AudioData> Default for MemorySink<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AudioData> AudioSink for MemorySink<A> {
    type Input = A;

    fn send_data(&mut self, data: &A) -> Result<()> {
        self.received.push(data.clone());
        Ok(())
    }
}
