//! Error types for the engine crate.
//!
//! An empty search result or a heuristic finding nothing is not an error;
//! those are `Option`s. Errors here mean the engine was handed input it
//! cannot reason about.

use cauldron_types::IngredientError;

/// Errors that can occur while planning a turn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Ingredient arithmetic was asked to subtract a negative requirement.
    #[error(transparent)]
    Ingredient(#[from] IngredientError),

    /// The spell book is larger than the per-branch castability mask.
    #[error("too many known spells to search: {count} (max {max})")]
    TooManySpells {
        /// Number of spells handed to the search.
        count: usize,
        /// Largest spell book the search supports.
        max: usize,
    },
}
