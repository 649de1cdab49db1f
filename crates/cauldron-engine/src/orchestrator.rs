//! Turn orchestration: one action per snapshot.
//!
//! The [`Brewer`] runs a fixed sequence of checks and stops at the first one
//! that yields an action:
//!
//! 1. **Brew** a pending order the inventory already covers.
//! 2. **Learn** a tome spell, if the learning heuristic wants one.
//! 3. **Target** an order. With no orders at all, `WAIT`.
//! 4. **Brew** the target if it is already covered.
//! 5. **Search** toward the target and emit the best path's first action,
//!    or `REST` when no path was accepted.
//!
//! Only the first action of a plan is ever emitted. The next turn replans
//! from a fresh snapshot.

use cauldron_types::{Action, ActionId, Order, Spell, TurnSnapshot};
use tracing::{debug, info, warn};

use crate::catalogue::CompatibilityTable;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::heuristics::{choose_tome_spell, fulfillable_order, select_best_path, target_order};
use crate::search::PathSearch;

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Which step of the turn sequence produced the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// A pending order was brewable at the start of the turn.
    Brew,
    /// The learning heuristic picked a tome spell.
    Learn,
    /// The targeted order turned out to be covered already.
    TargetAlreadyCovered,
    /// First action of the best search path.
    PathStep,
    /// The search accepted no path; resting is the safe default.
    NoPathFallback,
    /// There were no orders to work toward.
    NoOrders,
}

impl DecisionReason {
    /// Label for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brew => "brew",
            Self::Learn => "learn",
            Self::TargetAlreadyCovered => "target_already_covered",
            Self::PathStep => "path_step",
            Self::NoPathFallback => "no_path_fallback",
            Self::NoOrders => "no_orders",
        }
    }
}

/// The action for one turn and how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// The command to emit.
    pub action: Action,
    /// The step that produced it.
    pub reason: DecisionReason,
    /// The order being worked toward, if one was chosen.
    pub target: Option<ActionId>,
}

impl Decision {
    const fn new(action: Action, reason: DecisionReason, target: Option<ActionId>) -> Self {
        Self {
            action,
            reason,
            target,
        }
    }
}

// ---------------------------------------------------------------------------
// DecisionSource
// ---------------------------------------------------------------------------

/// Anything that can turn a snapshot into an action.
///
/// The runner's turn loop is generic over this trait, so tests can drive it
/// with a scripted source instead of the real engine.
pub trait DecisionSource {
    /// Decide the action for this turn.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the snapshot violates an engine
    /// precondition (for example a spell book too large to search).
    fn decide(&mut self, snapshot: &TurnSnapshot) -> Result<Decision, EngineError>;
}

// ---------------------------------------------------------------------------
// Brewer
// ---------------------------------------------------------------------------

/// The engine's decision source.
///
/// Holds only read-only state: the configuration and the compatibility
/// table, built once here and reused every turn.
#[derive(Debug, Clone)]
pub struct Brewer {
    config: EngineConfig,
    table: CompatibilityTable,
    search: PathSearch,
}

impl Brewer {
    /// Build the engine, precomputing the compatibility table.
    pub fn new(config: EngineConfig) -> Self {
        let table = CompatibilityTable::from_catalogue(config.learning.order_coverage);
        let search = PathSearch::new(config.search.clone());
        info!(
            order_shapes = table.len(),
            compatible_pairs = table.pair_count(),
            max_depth = config.search.max_depth,
            max_results = config.search.max_results,
            "brewer ready"
        );
        Self {
            config,
            table,
            search,
        }
    }

    /// Search toward `order` and take the first step of the best path.
    fn search_step(
        &self,
        snapshot: &TurnSnapshot,
        spells: &[Spell],
        order: &Order,
    ) -> Result<Decision, EngineError> {
        let target = order.id;
        let report = self
            .search
            .run(&snapshot.me.inventory, order.requirement(), spells)?;
        let best = select_best_path(&report.paths, order.requirement())?;

        match best.and_then(|path| path.first_action().map(|action| (path, action))) {
            Some((path, action)) => {
                debug!(
                    target = %target,
                    path_len = path.len(),
                    end_inventory = %path.inventory,
                    candidates = report.paths.len(),
                    "following best path"
                );
                Ok(Decision::new(action, DecisionReason::PathStep, Some(target)))
            }
            None => {
                warn!(
                    target = %target,
                    expanded = report.expanded,
                    stop = report.stop.as_str(),
                    "no path accepted, resting"
                );
                Ok(Decision::new(Action::Rest, DecisionReason::NoPathFallback, Some(target)))
            }
        }
    }
}

impl DecisionSource for Brewer {
    fn decide(&mut self, snapshot: &TurnSnapshot) -> Result<Decision, EngineError> {
        let me = &snapshot.me;

        if let Some(order) = fulfillable_order(&me.inventory, &snapshot.orders) {
            return Ok(Decision::new(Action::Brew(order.id), DecisionReason::Brew, Some(order.id)));
        }

        if let Some(spell) = choose_tome_spell(snapshot, &self.table, &self.config.learning) {
            return Ok(Decision::new(Action::Learn(spell), DecisionReason::Learn, None));
        }

        let spells: Vec<Spell> = me.spells.values().copied().collect();
        let Some(order) = target_order(&me.inventory, &snapshot.orders, &spells) else {
            debug!("no pending orders, waiting");
            return Ok(Decision::new(Action::Wait, DecisionReason::NoOrders, None));
        };
        debug!(target = %order.id, price = order.price, requirement = %order.requirement(), "target chosen");

        if order.is_fulfilled_by(&me.inventory) {
            return Ok(Decision::new(
                Action::Brew(order.id),
                DecisionReason::TargetAlreadyCovered,
                Some(order.id),
            ));
        }

        self.search_step(snapshot, &spells, order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cauldron_types::{AgentState, Ingredients, TomeSpell};

    use super::*;
    use crate::config::SearchConfig;

    fn brewer() -> Brewer {
        Brewer::new(EngineConfig {
            search: SearchConfig {
                deadline_ms: 0,
                ..SearchConfig::default()
            },
            ..EngineConfig::default()
        })
    }

    fn snapshot(inventory: [i32; 4], spells: &[Spell], orders: &[Order]) -> TurnSnapshot {
        let mut me = AgentState::new(Ingredients::new(inventory), 0);
        for spell in spells {
            me.insert_spell(*spell);
        }
        TurnSnapshot {
            me,
            opponent: AgentState::default(),
            orders: orders.to_vec(),
            tome: Vec::new(),
        }
    }

    fn order(id: u32, requirement: [i32; 4], price: i32) -> Order {
        Order::new(ActionId(id), Ingredients::new(requirement), price).unwrap()
    }

    fn spell(id: u32, delta: [i32; 4], castable: bool) -> Spell {
        Spell::new(ActionId(id), Ingredients::new(delta), castable, false)
    }

    #[test]
    fn brewable_order_is_brewed() {
        let snap = snapshot([2, 2, 0, 0], &[], &[order(44, [2, 2, 0, 0], 8)]);
        let decision = brewer().decide(&snap).unwrap();
        assert_eq!(decision.action, Action::Brew(ActionId(44)));
        assert_eq!(decision.reason, DecisionReason::Brew);
    }

    #[test]
    fn learning_comes_before_search() {
        let mut snap = snapshot([1, 0, 0, 0], &[], &[order(50, [0, 0, 0, 2], 12)]);
        snap.tome.push(TomeSpell {
            id: ActionId(5),
            tome_index: 0,
            delta: Ingredients::new([2, 0, 0, 0]),
            tax_count: 0,
            repeatable: false,
        });
        let decision = brewer().decide(&snap).unwrap();
        assert_eq!(decision.action, Action::Learn(ActionId(5)));
        assert_eq!(decision.reason, DecisionReason::Learn);
    }

    #[test]
    fn single_cast_path_is_followed() {
        let snap = snapshot([0, 0, 0, 0], &[spell(78, [2, 0, 0, 0], true)], &[order(60, [2, 0, 0, 0], 5)]);
        let decision = brewer().decide(&snap).unwrap();
        assert_eq!(decision.action, Action::cast(ActionId(78)));
        assert_eq!(decision.reason, DecisionReason::PathStep);
        assert_eq!(decision.target, Some(ActionId(60)));
    }

    #[test]
    fn exhausted_spell_means_rest_first() {
        let snap = snapshot([0, 0, 0, 0], &[spell(78, [2, 0, 0, 0], false)], &[order(60, [2, 0, 0, 0], 5)]);
        let decision = brewer().decide(&snap).unwrap();
        assert_eq!(decision.action, Action::Rest);
        assert_eq!(decision.reason, DecisionReason::PathStep);
    }

    #[test]
    fn unreachable_target_falls_back_to_rest() {
        let snap = snapshot([0, 0, 0, 0], &[], &[order(61, [0, 0, 0, 3], 20)]);
        let decision = brewer().decide(&snap).unwrap();
        assert_eq!(decision.action, Action::Rest);
        assert_eq!(decision.reason, DecisionReason::NoPathFallback);
    }

    #[test]
    fn no_orders_means_wait() {
        let snap = snapshot([0, 0, 0, 0], &[spell(78, [2, 0, 0, 0], true)], &[]);
        let decision = brewer().decide(&snap).unwrap();
        assert_eq!(decision.action, Action::Wait);
        assert_eq!(decision.reason, DecisionReason::NoOrders);
    }

    #[test]
    fn table_is_built_once_at_construction() {
        let engine = brewer();
        assert_eq!(engine.table.len(), crate::catalogue::ORDER_SHAPES.len());
    }
}
