//! Per-agent state observed each turn.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::ActionId;
use crate::ingredients::Ingredients;
use crate::spell::Spell;

/// One agent's inventory, rupees, and spell book.
///
/// The spell book is keyed by id so lookups are stable and iteration order
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    /// Ingredients currently held.
    pub inventory: Ingredients,
    /// Rupees earned so far.
    pub rupees: i32,
    /// Known spells with their live castable flags.
    pub spells: BTreeMap<ActionId, Spell>,
}

impl AgentState {
    /// Create an agent with an empty spell book.
    pub const fn new(inventory: Ingredients, rupees: i32) -> Self {
        Self {
            inventory,
            rupees,
            spells: BTreeMap::new(),
        }
    }

    /// Add or replace a spell in the spell book.
    pub fn insert_spell(&mut self, spell: Spell) {
        self.spells.insert(spell.id, spell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spells_are_keyed_by_id() {
        let mut agent = AgentState::new(Ingredients::new([3, 0, 0, 0]), 0);
        agent.insert_spell(Spell::new(ActionId(79), Ingredients::new([0, 1, 0, 0]), false, false));
        agent.insert_spell(Spell::new(ActionId(78), Ingredients::new([2, 0, 0, 0]), true, false));
        agent.insert_spell(Spell::new(ActionId(78), Ingredients::new([2, 0, 0, 0]), false, false));

        assert_eq!(agent.spells.len(), 2);
        assert_eq!(agent.spells.get(&ActionId(78)).map(|s| s.castable), Some(false));
        assert_eq!(agent.spells.keys().copied().collect::<Vec<_>>(), vec![ActionId(78), ActionId(79)]);
    }
}
