//! Structured reports returned across the engine boundary.
//!
//! The engine never renders anything. Every observable outcome -- a sensor
//! deployment, a counterattack, a progress query -- is returned as one of
//! these serializable values for the presentation host to display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{
    AttachmentStatus, CounterattackKind, MatchResult, Rank, SensorCategory, SessionState,
};

// ---------------------------------------------------------------------------
// AttachmentResult
// ---------------------------------------------------------------------------

/// Outcome of one sensor deployment against an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentResult {
    /// The category of the deployed sensor.
    pub category: SensorCategory,
    /// Tri-state match classification against the remaining weaknesses.
    /// `None` when no match was attempted (broken sensor, agent already
    /// exposed).
    pub match_outcome: Option<MatchResult>,
    /// Terminal status of the deployment.
    pub status: AttachmentStatus,
    /// Descriptive text produced by the sensor's special effect, if any
    /// (reveals, counterattack blocking, exhaustion warnings).
    pub special_effect: Option<String>,
}

impl AttachmentResult {
    /// Whether this deployment advanced match progress.
    pub const fn matched(&self) -> bool {
        matches!(self.match_outcome, Some(MatchResult::Match))
    }
}

// ---------------------------------------------------------------------------
// CounterattackEvent
// ---------------------------------------------------------------------------

/// What the counterattack phase of a turn did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterattackEvent {
    /// Which kind of counterattack resolved, if any.
    pub kind: CounterattackKind,
    /// Categories of the sensors removed, in removal order. Empty for
    /// blocked turns, non-firing turns, and attacks on an empty roster.
    pub removed: Vec<SensorCategory>,
    /// True when a scheduled counterattack was absorbed by a magnetic
    /// block. A blocked turn always has kind [`CounterattackKind::None`].
    pub blocked: bool,
}

impl CounterattackEvent {
    /// A quiet turn: nothing scheduled, nothing blocked.
    pub const fn quiet() -> Self {
        Self {
            kind: CounterattackKind::None,
            removed: Vec::new(),
            blocked: false,
        }
    }

    /// A scheduled counterattack absorbed by a magnetic block.
    pub const fn blocked() -> Self {
        Self {
            kind: CounterattackKind::None,
            removed: Vec::new(),
            blocked: true,
        }
    }

    /// Whether a counterattack actually fired this turn.
    pub const fn fired(&self) -> bool {
        !matches!(self.kind, CounterattackKind::None)
    }
}

// ---------------------------------------------------------------------------
// ProgressSnapshot
// ---------------------------------------------------------------------------

/// Current exposure progress for an agent.
///
/// `current` is recomputed from the attached-sensor roster on every query,
/// so it can decrease after a counterattack removes sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Number of attached sensors currently matching a weakness instance.
    pub current: usize,
    /// Matches required to expose the agent.
    pub required: usize,
}

impl ProgressSnapshot {
    /// Whether the progress has reached the exposure threshold.
    pub const fn complete(self) -> bool {
        self.current >= self.required
    }
}

// ---------------------------------------------------------------------------
// AgentSummary
// ---------------------------------------------------------------------------

/// Snapshot of an agent's externally visible state for status displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    /// The agent's rank.
    pub rank: Rank,
    /// The agent's affiliation label.
    pub affiliation: String,
    /// Whether the agent has been exposed.
    pub exposed: bool,
    /// Currently attached sensors, counted per category.
    pub attached: BTreeMap<SensorCategory, u32>,
}

// ---------------------------------------------------------------------------
// TurnReport
// ---------------------------------------------------------------------------

/// Everything that happened during one call to `take_turn`.
///
/// The counterattack phase resolves before the deployment, so `removed`
/// sensors in [`CounterattackEvent`] never include the sensor attached by
/// this turn's [`AttachmentResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// The 1-based turn number this report describes.
    pub turn: u64,
    /// What the counterattack phase did, before the deployment.
    pub counterattack: CounterattackEvent,
    /// Outcome of the sensor deployment.
    pub attachment: AttachmentResult,
    /// Progress after both phases.
    pub progress: ProgressSnapshot,
    /// Session state after the turn (`Won` once the agent is exposed).
    pub state: SessionState,
}
