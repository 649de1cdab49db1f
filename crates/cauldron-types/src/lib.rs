//! Shared type definitions for the Cauldron brewing agent.
//!
//! Everything here is plain data and pure arithmetic: no I/O, no search.
//! The engine crate builds its heuristics on these types and the runner
//! crate parses the turn input into them.
//!
//! # Modules
//!
//! - [`ingredients`] -- Four-tier ingredient vectors, weighted cost, fuzzy coverage
//! - [`ids`] -- Protocol identifier newtype
//! - [`spell`] -- Known spells and learnable tome spells
//! - [`order`] -- Brewable orders with validated requirements
//! - [`agent`] -- Per-agent inventory, rupees, and spell book
//! - [`snapshot`] -- The full per-turn view of both agents and the market
//! - [`action`] -- Emitted commands and input record kinds
//! - [`error`] -- Error types ([`IngredientError`])

pub mod action;
pub mod agent;
pub mod error;
pub mod ids;
pub mod ingredients;
pub mod order;
pub mod snapshot;
pub mod spell;

// Re-export all public types at crate root for convenience.
pub use action::{Action, RecordKind};
pub use agent::AgentState;
pub use error::IngredientError;
pub use ids::ActionId;
pub use ingredients::{INVENTORY_CAPACITY, Ingredients, TIER_ACTION_COST, TIER_COUNT};
pub use order::Order;
pub use snapshot::TurnSnapshot;
pub use spell::{Spell, TomeSpell};
