//! Error types for the dragnet-core crate.
//!
//! Session-level failures are rejections the presentation layer reports
//! and recovers from locally; none of them advance the turn counter or
//! mutate session state.

use dragnet_agents::AgentError;
use dragnet_types::SessionState;

/// Errors that can occur while driving an investigation session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A menu choice outside the valid sensor category range.
    ///
    /// Covers both stray input and the presentation layer's "no sensor
    /// selected" sentinel (choice 0).
    #[error("invalid sensor choice: {choice} (valid choices are 1-7)")]
    InvalidSensorChoice {
        /// The 1-based choice that was supplied.
        choice: u8,
    },

    /// A turn or quit was requested while the session was not in progress.
    #[error("session is not in progress (state: {state})")]
    NotInProgress {
        /// The state the session was actually in.
        state: SessionState,
    },

    /// The turn counter would overflow.
    #[error("turn counter overflow: cannot advance beyond u64::MAX")]
    TurnOverflow,

    /// An agent operation failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },
}
