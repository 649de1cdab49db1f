//! Heuristic layer: scoring and filtering around the path search.
//!
//! # Modules
//!
//! - [`candidates`] -- Legal casts from an inventory
//! - [`learning`] -- Which tome spell, if any, to learn
//! - [`orders`] -- Which order to work toward
//! - [`paths`] -- Which accepted search path to follow

pub mod candidates;
pub mod learning;
pub mod orders;
pub mod paths;

pub use candidates::{CandidateCast, candidate_casts};
pub use learning::choose_tome_spell;
pub use orders::{fulfillable_order, lookahead_deficit, target_order};
pub use paths::select_best_path;
