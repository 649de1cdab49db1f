//! Spells the agent knows and tome spells it may learn.

use serde::{Deserialize, Serialize};

use crate::ids::ActionId;
use crate::ingredients::Ingredients;

// ---------------------------------------------------------------------------
// Spell
// ---------------------------------------------------------------------------

/// A known recipe: a delta applied to the inventory when cast.
///
/// `castable` goes false once the spell is cast and comes back after a rest.
/// The search engine never mutates a real `Spell`; it tracks castability per
/// explored branch instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    /// Protocol id of the spell.
    pub id: ActionId,
    /// Ingredients consumed (negative) and produced (positive) per cast.
    pub delta: Ingredients,
    /// Whether the spell can be cast right now without resting first.
    pub castable: bool,
    /// Whether the spell may be cast several times in a single action.
    pub repeatable: bool,
}

impl Spell {
    /// Create a spell.
    pub const fn new(id: ActionId, delta: Ingredients, castable: bool, repeatable: bool) -> Self {
        Self {
            id,
            delta,
            castable,
            repeatable,
        }
    }

    /// True if casting consumes nothing.
    pub fn is_free(&self) -> bool {
        self.delta.is_non_negative()
    }

    /// Inventory after casting `times` times in one action, if that is legal.
    ///
    /// Returns `None` when the inventory cannot pay for the consumed
    /// ingredients or the result would exceed the inventory capacity.
    /// Castability is not checked here.
    pub fn cast_result(&self, inventory: &Ingredients, times: i32) -> Option<Ingredients> {
        let after = inventory.add(&self.delta.scaled(times));
        (after.is_non_negative() && after.fits_capacity()).then_some(after)
    }
}

// ---------------------------------------------------------------------------
// TomeSpell
// ---------------------------------------------------------------------------

/// A spell on offer in the tome that may be learned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomeSpell {
    /// Protocol id used in the `LEARN` command.
    pub id: ActionId,
    /// Position in the tome. Learning costs this many tier-0 ingredients.
    pub tome_index: u32,
    /// Delta the spell applies once learned.
    pub delta: Ingredients,
    /// Tier-0 ingredients stacked on this spell, gained when learning it.
    pub tax_count: u32,
    /// Whether the learned spell is repeatable.
    pub repeatable: bool,
}

impl TomeSpell {
    /// True if the spell consumes nothing when cast.
    pub fn is_free(&self) -> bool {
        self.delta.is_non_negative()
    }

    /// True if `inventory` holds enough tier-0 ingredients to pay the tome index.
    pub fn is_affordable(&self, inventory: &Ingredients) -> bool {
        u32::try_from(inventory.quantity(0)).is_ok_and(|held| held >= self.tome_index)
    }
}
