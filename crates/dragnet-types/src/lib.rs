//! Shared type definitions for the Dragnet investigation engine.
//!
//! This crate defines the data model the rest of the workspace operates on:
//! typed identifiers, the closed sensor/rank enumerations, and the
//! serializable report structs returned across the engine boundary. It
//! contains no game logic -- that lives in `dragnet-agents` (matching,
//! scheduling) and `dragnet-core` (the session turn cycle).
//!
//! # Modules
//!
//! - [`enums`] -- `SensorCategory`, `Rank`, match/status/state enumerations
//! - [`ids`] -- Strongly-typed UUID wrappers ([`SessionId`], [`AgentId`])
//! - [`reports`] -- Boundary result structs ([`TurnReport`] and friends)

pub mod enums;
pub mod ids;
pub mod reports;

// Re-export the full data model at crate root for convenience.
pub use enums::{
    AttachmentStatus, CounterattackKind, MatchResult, Rank, SensorCategory, SessionState,
};
pub use ids::{AgentId, SessionId};
pub use reports::{
    AgentSummary, AttachmentResult, CounterattackEvent, ProgressSnapshot, TurnReport,
};
