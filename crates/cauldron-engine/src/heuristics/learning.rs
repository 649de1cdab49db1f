//! Tome learning.
//!
//! Decides whether this turn is spent learning a spell. Three tiers are
//! tried in order and the first hit wins:
//!
//! 1. a cheap tome spell that consumes nothing,
//! 2. a cheap tome spell with a known high-value delta,
//! 3. the cheapest tome spell whose delta the compatibility table lists for
//!    a pending order.
//!
//! Only affordable tome spells are ever considered.

use cauldron_types::{ActionId, TomeSpell, TurnSnapshot};

use crate::catalogue::{CompatibilityTable, is_high_value};
use crate::config::LearningConfig;

/// Pick a tome spell to learn this turn, if any.
pub fn choose_tome_spell(
    snapshot: &TurnSnapshot,
    table: &CompatibilityTable,
    config: &LearningConfig,
) -> Option<ActionId> {
    if !config.enabled || snapshot.me.spells.len() >= config.max_known_spells {
        return None;
    }
    let inventory = &snapshot.me.inventory;
    let affordable = move || {
        snapshot
            .tome
            .iter()
            .filter(move |spell| spell.is_affordable(inventory))
    };
    let cheap = |spell: &&TomeSpell| spell.tome_index <= config.max_tome_index;

    if let Some(spell) = cheapest(affordable().filter(cheap).filter(|spell| spell.is_free())) {
        return Some(spell.id);
    }

    let valuable = affordable()
        .filter(cheap)
        .filter(|spell| is_high_value(&spell.delta));
    if let Some(spell) = cheapest(valuable) {
        return Some(spell.id);
    }

    let wanted = affordable().filter(|spell| {
        snapshot
            .orders
            .iter()
            .any(|order| table.patterns_for(order.requirement()).contains(&spell.delta))
    });
    cheapest(wanted).map(|spell| spell.id)
}

/// Lowest tome index, first listed on ties.
fn cheapest<'a>(spells: impl Iterator<Item = &'a TomeSpell>) -> Option<&'a TomeSpell> {
    spells.min_by_key(|spell| spell.tome_index)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cauldron_types::{AgentState, Ingredients, Order, Spell};

    use super::*;

    fn tome(id: u32, tome_index: u32, delta: [i32; 4]) -> TomeSpell {
        TomeSpell {
            id: ActionId(id),
            tome_index,
            delta: Ingredients::new(delta),
            tax_count: 0,
            repeatable: false,
        }
    }

    fn snapshot(inventory: [i32; 4], tome: Vec<TomeSpell>, orders: Vec<Order>) -> TurnSnapshot {
        TurnSnapshot {
            me: AgentState::new(Ingredients::new(inventory), 0),
            opponent: AgentState::default(),
            orders,
            tome,
        }
    }

    fn table() -> CompatibilityTable {
        CompatibilityTable::from_catalogue(0.75)
    }

    #[test]
    fn free_cheap_spell_first() {
        let snap = snapshot(
            [3, 0, 0, 0],
            vec![tome(10, 0, [-3, 0, 0, 1]), tome(11, 1, [2, 1, 0, 0])],
            Vec::new(),
        );
        assert_eq!(
            choose_tome_spell(&snap, &table(), &LearningConfig::default()),
            Some(ActionId(11))
        );
    }

    #[test]
    fn high_value_when_nothing_free() {
        let snap = snapshot(
            [3, 0, 0, 0],
            vec![tome(20, 0, [3, -1, 0, 0]), tome(21, 1, [-3, 0, 0, 1])],
            Vec::new(),
        );
        assert_eq!(
            choose_tome_spell(&snap, &table(), &LearningConfig::default()),
            Some(ActionId(21))
        );
    }

    #[test]
    fn expensive_spells_skip_the_cheap_tiers() {
        // Free but at index 3: only the order tier could pick it.
        let snap = snapshot([5, 0, 0, 0], vec![tome(30, 3, [1, 1, 0, 0])], Vec::new());
        assert_eq!(choose_tome_spell(&snap, &table(), &LearningConfig::default()), None);
    }

    #[test]
    fn order_compatible_spell_is_learned() {
        let order = Order::new(ActionId(40), Ingredients::new([2, 2, 0, 0]), 10).unwrap();
        let snap = snapshot(
            [5, 0, 0, 0],
            vec![tome(31, 4, [3, -1, 0, 0]), tome(32, 3, [2, 3, -2, 0])],
            vec![order],
        );
        assert_eq!(
            choose_tome_spell(&snap, &table(), &LearningConfig::default()),
            Some(ActionId(32))
        );
    }

    #[test]
    fn unaffordable_spells_are_ignored() {
        let snap = snapshot([0, 4, 0, 0], vec![tome(50, 1, [2, 0, 0, 0])], Vec::new());
        assert_eq!(choose_tome_spell(&snap, &table(), &LearningConfig::default()), None);
    }

    #[test]
    fn disabled_learning_learns_nothing() {
        let snap = snapshot([3, 0, 0, 0], vec![tome(60, 0, [2, 0, 0, 0])], Vec::new());
        let config = LearningConfig {
            enabled: false,
            ..LearningConfig::default()
        };
        assert_eq!(choose_tome_spell(&snap, &table(), &config), None);
    }

    #[test]
    fn full_spell_book_learns_nothing() {
        let mut snap = snapshot([3, 0, 0, 0], vec![tome(70, 0, [2, 0, 0, 0])], Vec::new());
        snap.me
            .insert_spell(Spell::new(ActionId(78), Ingredients::new([2, 0, 0, 0]), true, false));
        let config = LearningConfig {
            max_known_spells: 1,
            ..LearningConfig::default()
        };
        assert_eq!(choose_tome_spell(&snap, &table(), &config), None);
    }
}
