//! Path search, heuristics, and turn orchestration for the Cauldron
//! brewing agent.
//!
//! Each turn the [`Brewer`] receives a [`TurnSnapshot`] and returns a single
//! [`Decision`]. Between turns it keeps only read-only state: its
//! configuration and the order/tome compatibility table.
//!
//! # Modules
//!
//! - [`catalogue`] -- Static order shapes, tome deltas, and the
//!   [`CompatibilityTable`] derived from them.
//! - [`config`] -- YAML configuration with per-field defaults.
//! - [`error`] -- Error types ([`EngineError`]).
//! - [`heuristics`] -- Candidate filtering, order targeting, tome learning,
//!   and path selection.
//! - [`orchestrator`] -- The [`DecisionSource`] trait and the [`Brewer`].
//! - [`search`] -- Bounded depth-first [`PathSearch`].
//!
//! [`TurnSnapshot`]: cauldron_types::TurnSnapshot

pub mod catalogue;
pub mod config;
pub mod error;
pub mod heuristics;
pub mod orchestrator;
pub mod search;

pub use catalogue::CompatibilityTable;
pub use config::{ConfigError, EngineConfig, LearningConfig, SearchConfig};
pub use error::EngineError;
pub use orchestrator::{Brewer, Decision, DecisionReason, DecisionSource};
pub use search::{CandidatePath, PathSearch, SearchReport, StopReason};
