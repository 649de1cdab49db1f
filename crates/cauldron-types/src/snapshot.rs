//! The full observable state for one turn.

use serde::Serialize;

use crate::agent::AgentState;
use crate::order::Order;
use crate::spell::TomeSpell;

/// Everything the agent sees at the start of a turn.
///
/// Rebuilt from input every turn; nothing in it outlives the turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TurnSnapshot {
    /// Our own agent. The only one the search engine explores.
    pub me: AgentState,
    /// The opponent. Observed but never simulated.
    pub opponent: AgentState,
    /// Orders that can currently be brewed.
    pub orders: Vec<Order>,
    /// Tome spells currently on offer.
    pub tome: Vec<TomeSpell>,
}
