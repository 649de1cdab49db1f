//! Candidate spell filtering.
//!
//! Shrinks the branching factor before any exploration: only casts the
//! inventory can pay for and that keep it within capacity are considered.
//! No look-ahead scoring happens here.

use cauldron_types::{INVENTORY_CAPACITY, Ingredients, Spell};

/// A cast that is legal from a given inventory (ignoring castability).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateCast<'a> {
    /// Position of the spell in the slice it came from.
    pub index: usize,
    /// The spell being cast.
    pub spell: &'a Spell,
    /// Repetitions in this single action.
    pub times: u32,
    /// Inventory after the cast.
    pub inventory: Ingredients,
}

/// Every affordable, capacity-safe cast from `inventory`.
///
/// Each spell yields a single-cast candidate. When `repeat` is set,
/// repeatable spells also yield one candidate per legal repetition count.
/// Output order follows `spells`, then ascending repetitions.
pub fn candidate_casts<'a>(
    inventory: &Ingredients,
    spells: &'a [Spell],
    repeat: bool,
) -> Vec<CandidateCast<'a>> {
    let mut casts = Vec::new();
    for (index, spell) in spells.iter().enumerate() {
        let limit = if repeat && spell.repeatable {
            INVENTORY_CAPACITY
        } else {
            1
        };
        for times in 1..=limit {
            // Affordability and capacity only get worse as repetitions grow.
            let Some(after) = spell.cast_result(inventory, times) else {
                break;
            };
            let Ok(times) = u32::try_from(times) else {
                break;
            };
            casts.push(CandidateCast {
                index,
                spell,
                times,
                inventory: after,
            });
        }
    }
    casts
}
