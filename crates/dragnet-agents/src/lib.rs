//! Agent state, sensor mechanics, and counterattack policy for the
//! Dragnet investigation engine.
//!
//! This crate is the logic layer: everything that mutates agent and
//! sensor state without touching I/O. It sits between `dragnet-types`
//! (which defines the data model) and `dragnet-core` (which drives the
//! session turn cycle).
//!
//! # Modules
//!
//! - [`agent`] -- The investigation target: weaknesses, matching, exposure ([`Agent`])
//! - [`counterattack`] -- Turn-indexed scheduling and resolution
//! - [`deploy`] -- The uniform sensor deployment contract
//! - [`error`] -- Error types for agent operations ([`AgentError`])
//! - [`sensor`] -- Sensor usage/breakage/block state ([`Sensor`], [`SensorPool`])
//! - [`weakness`] -- Hidden weakness multiset generation

pub mod agent;
pub mod counterattack;
pub mod deploy;
pub mod error;
pub mod sensor;
pub mod weakness;

// Re-export primary types at crate root for convenience.
pub use agent::Agent;
pub use counterattack::{regular_scheduled, reset_scheduled, resolve, scheduled_kind};
pub use deploy::deploy;
pub use error::AgentError;
pub use sensor::{MAX_BLOCKS, MAX_USES, Sensor, SensorAvailability, SensorPool};
pub use weakness::{generate_balanced, generate_random};
