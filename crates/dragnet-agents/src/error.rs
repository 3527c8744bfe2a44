//! Error types for the dragnet-agents crate.
//!
//! All operations that can fail return typed errors rather than panicking.
//! Recoverable deployment outcomes (broken sensor, agent already exposed)
//! are *not* errors -- they are statuses on `AttachmentResult`. Only
//! conditions that must stop construction or computation live here.

use dragnet_types::Rank;

/// Errors that can occur during agent operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A predefined weakness list does not match the rank's required count.
    ///
    /// Raised at agent construction, before any session state exists.
    #[error(
        "weakness count mismatch for {rank}: expected {expected} entries, got {actual}"
    )]
    WeaknessCountMismatch {
        /// The rank the agent was being built for.
        rank: Rank,
        /// The weakness count the rank requires.
        expected: usize,
        /// The length of the list that was supplied.
        actual: usize,
    },
}
