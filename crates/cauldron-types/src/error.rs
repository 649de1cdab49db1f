//! Error types for the cauldron-types crate.
//!
//! Ingredient arithmetic is total except for subtracting a requirement, which
//! must be non-negative. Violating that is a logic error in the caller, but it
//! is still reported as a typed error instead of a panic.

/// Errors raised by ingredient arithmetic and entity construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngredientError {
    /// A vector used as a requirement had a negative component.
    #[error("requirement has negative quantity {quantity} at tier {tier}")]
    NegativeRequirement {
        /// The offending tier index.
        tier: usize,
        /// The negative quantity found there.
        quantity: i32,
    },
}
