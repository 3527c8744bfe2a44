//! Session lifecycle and turn orchestration for the Dragnet
//! investigation engine.
//!
//! This crate owns the turn cycle that drives an investigation:
//! counterattack resolution, sensor deployment, exposure evaluation, and
//! the surrounding session state machine. Consumers start an
//! [`InvestigationSession`], feed it sensor choices, and read back
//! [`TurnReport`]s describing what each turn did.
//!
//! # Modules
//!
//! - [`config`] -- Session configuration loaded from YAML ([`SessionConfig`])
//! - [`error`] -- Session-level error types ([`SessionError`])
//! - [`session`] -- The session state machine and turn cycle
//!   ([`InvestigationSession`])
//!
//! [`TurnReport`]: dragnet_types::TurnReport

pub mod config;
pub mod error;
pub mod session;

// Re-export primary types at crate root for convenience.
pub use config::{ConfigError, SessionConfig};
pub use error::SessionError;
pub use session::{CounterattackWarning, InvestigationSession, SessionStatus};
