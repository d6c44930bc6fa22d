//! Event types and sinks for observing distribution calls.
//!
//! Strategies emit [`PlacementEvent`]s through an [`EventSink`] passed to
//! [`crate::strategy::PlacementStrategy::distribute_with_events`]. The plain
//! [`crate::strategy::PlacementStrategy::distribute`] uses the no-op `()` sink.
use glam::DVec2;

use crate::instance::PlacedInstance;

/// Why a candidate position was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// The pixel under the candidate is not opaque enough.
    Mask,
    /// The candidate is too close to an accepted instance or cluster center.
    Spacing,
}

/// Describes events emitted by distribution calls.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum PlacementEvent {
    /// Emitted before the first candidate is drawn.
    DistributionStarted {
        /// Strategy identifier.
        strategy: String,
        /// Content type being placed.
        type_id: String,
        /// Requested instance count.
        requested: usize,
        /// Candidate budget for the call.
        max_attempts: usize,
        /// Spacing enforced in meters.
        effective_spacing: f64,
    },

    /// Emitted when clustered placement accepts a cluster center.
    ClusterCenterAccepted {
        /// Index of the center in acceptance order.
        index: usize,
        /// Normalized center position.
        position: DVec2,
    },

    /// Emitted for every rejected candidate.
    CandidateRejected {
        /// Attempt number of the rejected candidate.
        attempt: usize,
        /// Normalized candidate position.
        position: DVec2,
        /// Which check failed.
        reason: RejectionReason,
    },

    /// Emitted when an instance is accepted.
    InstancePlaced {
        /// The accepted instance.
        instance: PlacedInstance,
    },

    /// Emitted when the call returns.
    DistributionFinished {
        /// Compact summary of the result.
        summary: DistributionSummary,
    },

    /// Non-fatal warning generated during placement.
    Warning {
        /// Context string (e.g. strategy and content type).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`PlacementEvent`] used for sink filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementEventKind {
    DistributionStarted,
    ClusterCenterAccepted,
    CandidateRejected,
    InstancePlaced,
    DistributionFinished,
    Warning,
}

impl PlacementEvent {
    pub fn kind(&self) -> PlacementEventKind {
        match self {
            PlacementEvent::DistributionStarted { .. } => PlacementEventKind::DistributionStarted,
            PlacementEvent::ClusterCenterAccepted { .. } => {
                PlacementEventKind::ClusterCenterAccepted
            }
            PlacementEvent::CandidateRejected { .. } => PlacementEventKind::CandidateRejected,
            PlacementEvent::InstancePlaced { .. } => PlacementEventKind::InstancePlaced,
            PlacementEvent::DistributionFinished { .. } => PlacementEventKind::DistributionFinished,
            PlacementEvent::Warning { .. } => PlacementEventKind::Warning,
        }
    }
}

/// Counts reported when a distribution call finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSummary {
    pub strategy: String,
    pub requested: usize,
    pub actual: usize,
    pub attempts: usize,
    pub estimated_capacity: usize,
    pub message: Option<String>,
}

/// A generic event sink that accepts [`PlacementEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: PlacementEvent);

    /// Whether events of `kind` should be built at all. Defaults to `true`.
    #[inline]
    fn wants(&self, _kind: PlacementEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = PlacementEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: PlacementEvent) {}

    #[inline]
    fn wants(&self, _kind: PlacementEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(PlacementEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(PlacementEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(PlacementEvent),
{
    #[inline]
    fn send(&mut self, event: PlacementEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally only some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<PlacementEvent>,
    only: Option<Vec<PlacementEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects only the listed kinds; strategies skip building the rest.
    pub fn only(kinds: impl IntoIterator<Item = PlacementEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<PlacementEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[PlacementEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: PlacementEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: PlacementEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    #[inline]
    fn wants(&self, kind: PlacementEventKind) -> bool {
        self.only.as_ref().is_none_or(|only| only.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: PlacementEvent) {
        if self.sinks.is_empty() {
            return;
        }
        let last_idx = self.sinks.len() - 1;
        for i in 0..last_idx {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last_idx].send(event);
    }

    fn wants(&self, kind: PlacementEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
