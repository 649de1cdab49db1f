//! Fixed-size ingredient vectors.
//!
//! An [`Ingredients`] value holds one signed quantity per tier. The same type
//! represents an absolute inventory, a spell delta (negative = consumed,
//! positive = produced), an order requirement, or a deficit. Only inventories
//! carry the non-negative and capacity invariants; deltas and deficits may be
//! negative.
//!
//! All arithmetic saturates. Quantities in this game never leave the low
//! double digits, so saturation only guards against malformed input.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IngredientError;

/// Number of ingredient tiers.
pub const TIER_COUNT: usize = 4;

/// Maximum total number of ingredients an inventory may hold.
pub const INVENTORY_CAPACITY: i32 = 10;

/// Primitive actions needed to manufacture one unit of each tier from scratch.
///
/// This is the single scalar used by every ranking heuristic.
pub const TIER_ACTION_COST: [i32; TIER_COUNT] = [1, 4, 7, 10];

/// A vector of ingredient quantities, one per tier (tier 0 is the most basic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Ingredients([i32; TIER_COUNT]);

impl Ingredients {
    /// The empty vector.
    pub const ZERO: Self = Self([0; TIER_COUNT]);

    /// Build a vector from per-tier quantities.
    pub const fn new(tiers: [i32; TIER_COUNT]) -> Self {
        Self(tiers)
    }

    /// Quantity held at `tier`, or 0 for a tier outside the vector.
    pub fn quantity(&self, tier: usize) -> i32 {
        self.0.get(tier).copied().unwrap_or(0)
    }

    /// Keep only the tiers with a positive quantity.
    pub fn positive_part(&self) -> Self {
        Self(self.0.map(|q| q.max(0)))
    }

    /// Keep only the tiers with a negative quantity, as absolute values.
    ///
    /// The result is always non-negative, so it can be fed straight into
    /// [`weighted_cost`](Self::weighted_cost).
    pub fn negative_part(&self) -> Self {
        Self(self.0.map(|q| q.min(0).saturating_neg()))
    }

    /// Component-wise sum. Used to apply a spell delta to an inventory.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        self.zip_with(other, i32::saturating_add)
    }

    /// Component-wise difference against a requirement.
    ///
    /// # Errors
    ///
    /// Returns [`IngredientError::NegativeRequirement`] if `requirement` has
    /// any negative component. This subtracts what is needed, not an
    /// arbitrary delta.
    pub fn subtract(&self, requirement: &Self) -> Result<Self, IngredientError> {
        if let Some(tier) = requirement.0.iter().position(|&q| q < 0) {
            return Err(IngredientError::NegativeRequirement {
                tier,
                quantity: requirement.quantity(tier),
            });
        }
        Ok(self.zip_with(requirement, i32::saturating_sub))
    }

    /// Multiply every component by `times`.
    #[must_use]
    pub fn scaled(&self, times: i32) -> Self {
        Self(self.0.map(|q| q.saturating_mul(times)))
    }

    /// Sum over positive tiers of `quantity * TIER_ACTION_COST[tier]`.
    pub fn weighted_cost(&self) -> i32 {
        self.0
            .iter()
            .zip(TIER_ACTION_COST)
            .filter(|&(&q, _)| q > 0)
            .fold(0_i32, |acc, (&q, cost)| acc.saturating_add(q.saturating_mul(cost)))
    }

    /// What this inventory is missing to meet `requirement`, per tier.
    ///
    /// # Errors
    ///
    /// Propagates the [`subtract`](Self::subtract) precondition.
    pub fn shortfall(&self, requirement: &Self) -> Result<Self, IngredientError> {
        Ok(self.subtract(requirement)?.negative_part())
    }

    /// Weighted cost of the [`shortfall`](Self::shortfall) against `requirement`.
    ///
    /// # Errors
    ///
    /// Propagates the [`subtract`](Self::subtract) precondition.
    pub fn deficit_cost(&self, requirement: &Self) -> Result<i32, IngredientError> {
        Ok(self.shortfall(requirement)?.weighted_cost())
    }

    /// Fuzzy containment test.
    ///
    /// True iff the fraction of the requirement's weighted cost already held
    /// is at least `tolerance`. With `tolerance = 1.0` this is exact
    /// containment. An empty requirement is always covered.
    ///
    /// # Errors
    ///
    /// Propagates the [`subtract`](Self::subtract) precondition.
    pub fn covers(&self, requirement: &Self, tolerance: f64) -> Result<bool, IngredientError> {
        let missing = self.deficit_cost(requirement)?;
        let needed = requirement.positive_part().weighted_cost();
        if needed == 0 {
            return Ok(true);
        }
        let satisfied = 1.0 - f64::from(missing) / f64::from(needed);
        Ok(satisfied >= tolerance)
    }

    /// Sum of all positive components. Bounded by [`INVENTORY_CAPACITY`] for
    /// any legal inventory.
    pub fn total_positive_quantity(&self) -> i32 {
        self.0
            .iter()
            .filter(|&&q| q > 0)
            .fold(0_i32, |acc, &q| acc.saturating_add(q))
    }

    /// True if the vector is a legal inventory size.
    pub fn fits_capacity(&self) -> bool {
        self.total_positive_quantity() <= INVENTORY_CAPACITY
    }

    /// True if no component is negative.
    pub fn is_non_negative(&self) -> bool {
        self.0.iter().all(|&q| q >= 0)
    }

    fn zip_with(&self, other: &Self, op: impl Fn(i32, i32) -> i32) -> Self {
        let mut out = [0_i32; TIER_COUNT];
        for ((slot, a), b) in out.iter_mut().zip(self.0).zip(other.0) {
            *slot = op(a, b);
        }
        Self(out)
    }
}

impl From<[i32; TIER_COUNT]> for Ingredients {
    fn from(tiers: [i32; TIER_COUNT]) -> Self {
        Self(tiers)
    }
}

impl fmt::Display for Ingredients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "[{a}, {b}, {c}, {d}]")
    }
}
