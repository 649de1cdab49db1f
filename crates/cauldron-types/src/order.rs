//! Orders (potions) that can be brewed for rupees.

use serde::Serialize;

use crate::error::IngredientError;
use crate::ids::ActionId;
use crate::ingredients::Ingredients;

/// A brewable order: a non-negative requirement redeemable for `price`.
///
/// The requirement is validated on construction, so deficit queries against
/// an order cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Order {
    /// Protocol id used in the `BREW` command.
    pub id: ActionId,
    requirement: Ingredients,
    /// Rupees earned on brewing, urgency bonus included.
    pub price: i32,
    /// Urgency bonus already folded into `price`.
    pub urgency_bonus: i32,
    /// How many more times the urgency bonus can be earned.
    pub bonus_remaining: i32,
}

impl Order {
    /// Create an order.
    ///
    /// # Errors
    ///
    /// Returns [`IngredientError::NegativeRequirement`] if any tier of the
    /// requirement is negative.
    pub fn new(id: ActionId, requirement: Ingredients, price: i32) -> Result<Self, IngredientError> {
        // Reuse the subtract precondition check.
        Ingredients::ZERO.subtract(&requirement)?;
        Ok(Self {
            id,
            requirement,
            price,
            urgency_bonus: 0,
            bonus_remaining: 0,
        })
    }

    /// Attach urgency bonus information from the turn input.
    #[must_use]
    pub const fn with_urgency(mut self, urgency_bonus: i32, bonus_remaining: i32) -> Self {
        self.urgency_bonus = urgency_bonus;
        self.bonus_remaining = bonus_remaining;
        self
    }

    /// Ingredients that must be held to brew this order.
    pub const fn requirement(&self) -> &Ingredients {
        &self.requirement
    }

    /// True if `inventory` contains the whole requirement.
    pub fn is_fulfilled_by(&self, inventory: &Ingredients) -> bool {
        inventory.covers(&self.requirement, 1.0).unwrap_or(false)
    }

    /// Weighted cost of what `inventory` lacks for this order.
    pub fn deficit_cost(&self, inventory: &Ingredients) -> i32 {
        inventory.deficit_cost(&self.requirement).unwrap_or(i32::MAX)
    }
}
