//! Bounded depth-first search for spell sequences.
//!
//! Given a starting inventory and a target, the search explores inventories
//! reachable by casting known spells, inserting a `REST` whenever a spell is
//! needed again before the branch has rested. It is a worklist DFS: an
//! explicit stack of frontier states, no recursion.
//!
//! A successor is accepted as a finished path when it covers the target
//! within the configured tolerance, or when it includes a rest (a stable
//! point worth replanning from). Everything else goes back on the stack.
//!
//! # Bounds
//!
//! The branching factor is the size of the spell book, so every guard below
//! is mandatory:
//!
//! - **Depth**: paths longer than `max_depth` actions are discarded.
//! - **Capacity**: successors above the inventory capacity are never built.
//! - **Results**: the search stops after `max_results` accepted paths.
//! - **Prefix**: a frontier branch whose first `prefix_window` actions equal
//!   those of an accepted path is dropped, so accepted paths diverge early.
//! - **Deadline**: an optional wall-clock budget ends the search early.
//!
//! # Branch isolation
//!
//! Castability is a bitmask copied by value into each frontier state, and
//! action lists are stored once in an arena of parent-linked nodes. Sibling
//! branches share prefixes without ever observing each other's mutations.

use std::time::Instant;

use cauldron_types::{Action, Ingredients, Spell};
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::EngineError;
use crate::heuristics::candidate_casts;

/// Largest spell book the per-branch castability mask can track.
pub const MAX_SEARCH_SPELLS: usize = 128;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// An accepted sequence of actions and the inventory it ends with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePath {
    /// Actions in execution order. Only `Cast` and `Rest` appear.
    pub actions: Vec<Action>,
    /// Inventory after the last action.
    pub inventory: Ingredients,
}

impl CandidatePath {
    /// The action to emit this turn.
    pub fn first_action(&self) -> Option<Action> {
        self.actions.first().copied()
    }

    /// Number of actions in the path.
    pub const fn len(&self) -> usize {
        self.actions.len()
    }

    /// True if the path has no actions.
    pub const fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The start already contained the target; nothing was explored.
    AlreadyCovered,
    /// Every branch was explored or pruned.
    Exhausted,
    /// The configured number of accepted paths was reached.
    ResultCap,
    /// The wall-clock budget ran out.
    Deadline,
}

impl StopReason {
    /// Label for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyCovered => "already_covered",
            Self::Exhausted => "exhausted",
            Self::ResultCap => "result_cap",
            Self::Deadline => "deadline",
        }
    }
}

/// Everything a search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// Accepted paths in the order they were found.
    pub paths: Vec<CandidatePath>,
    /// Number of frontier states popped and expanded.
    pub expanded: usize,
    /// Why the search ended.
    pub stop: StopReason,
}

// ---------------------------------------------------------------------------
// Branch state
// ---------------------------------------------------------------------------

/// Castability of each spell on one branch, one bit per spell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CastMask(u128);

impl CastMask {
    fn from_spells(spells: &[Spell]) -> Self {
        let bits = spells
            .iter()
            .enumerate()
            .filter(|(_, spell)| spell.castable)
            .fold(0, |bits, (index, _)| bits | bit(index));
        Self(bits)
    }

    fn all(count: usize) -> Self {
        Self((0..count).fold(0, |bits, index| bits | bit(index)))
    }

    fn is_castable(self, index: usize) -> bool {
        self.0 & bit(index) != 0
    }

    fn spent(self, index: usize) -> Self {
        Self(self.0 & !bit(index))
    }
}

fn bit(index: usize) -> u128 {
    u32::try_from(index)
        .ok()
        .and_then(|shift| 1_u128.checked_shl(shift))
        .unwrap_or(0)
}

/// One action, linked to the action before it on the same branch.
#[derive(Debug, Clone, Copy)]
struct Node {
    parent: Option<usize>,
    action: Action,
}

/// Append-only storage for every action created during one search.
#[derive(Debug, Default)]
struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    fn push(&mut self, parent: Option<usize>, action: Action) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node { parent, action });
        id
    }

    /// Actions from the root to `tip`, in execution order.
    fn actions(&self, tip: usize) -> Vec<Action> {
        let mut actions = Vec::new();
        let mut cursor = Some(tip);
        while let Some(id) = cursor {
            let Some(node) = self.nodes.get(id) else {
                break;
            };
            actions.push(node.action);
            cursor = node.parent;
        }
        actions.reverse();
        actions
    }
}

/// A state waiting on the stack.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    tip: Option<usize>,
    inventory: Ingredients,
    castable: CastMask,
    depth: usize,
}

// ---------------------------------------------------------------------------
// PathSearch
// ---------------------------------------------------------------------------

/// The path search engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSearch {
    config: SearchConfig,
}

impl PathSearch {
    /// Create a search engine with the given caps.
    pub const fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Search for paths from `start` to an inventory covering `target`.
    ///
    /// `spells` carry their live castable flags; they are read, never
    /// modified. Returns an empty report without exploring anything if
    /// `start` already contains `target`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TooManySpells`] if `spells` is larger than
    /// [`MAX_SEARCH_SPELLS`], or [`EngineError::Ingredient`] if `target`
    /// has a negative component.
    pub fn run(
        &self,
        start: &Ingredients,
        target: &Ingredients,
        spells: &[Spell],
    ) -> Result<SearchReport, EngineError> {
        if spells.len() > MAX_SEARCH_SPELLS {
            return Err(EngineError::TooManySpells {
                count: spells.len(),
                max: MAX_SEARCH_SPELLS,
            });
        }
        if start.covers(target, 1.0)? {
            return Ok(finish(Vec::new(), 0, StopReason::AlreadyCovered));
        }
        let deadline = self
            .config
            .deadline()
            .and_then(|budget| Instant::now().checked_add(budget));
        self.explore(start, target, spells, deadline)
    }

    /// The search loop proper. The root state is always expanded; the
    /// deadline is checked before every later pop.
    fn explore(
        &self,
        start: &Ingredients,
        target: &Ingredients,
        spells: &[Spell],
        deadline: Option<Instant>,
    ) -> Result<SearchReport, EngineError> {
        let rested = CastMask::all(spells.len());
        let mut arena = Arena::default();
        let mut accepted: Vec<CandidatePath> = Vec::new();
        let mut expanded: usize = 0;
        let mut stack = vec![Frontier {
            tip: None,
            inventory: *start,
            castable: CastMask::from_spells(spells),
            depth: 0,
        }];

        while let Some(state) = stack.pop() {
            if expanded > 0 && deadline.is_some_and(|limit| Instant::now() >= limit) {
                return Ok(finish(accepted, expanded, StopReason::Deadline));
            }
            expanded = expanded.saturating_add(1);

            for cast in candidate_casts(&state.inventory, spells, self.config.repeat_casts) {
                let needs_rest = !state.castable.is_castable(cast.index);
                let depth = state
                    .depth
                    .saturating_add(1)
                    .saturating_add(usize::from(needs_rest));
                if depth > self.config.max_depth {
                    continue;
                }

                let mut tip = state.tip;
                let mut castable = state.castable;
                if needs_rest {
                    tip = Some(arena.push(tip, Action::Rest));
                    castable = rested;
                }
                let tip = arena.push(
                    tip,
                    Action::Cast {
                        spell: cast.spell.id,
                        times: cast.times,
                    },
                );
                let castable = castable.spent(cast.index);

                if needs_rest || cast.inventory.covers(target, self.config.coverage_tolerance)? {
                    accepted.push(CandidatePath {
                        actions: arena.actions(tip),
                        inventory: cast.inventory,
                    });
                    if accepted.len() >= self.config.max_results {
                        return Ok(finish(accepted, expanded, StopReason::ResultCap));
                    }
                    continue;
                }

                // Nothing fits below the depth cap, so don't bother stacking it.
                if depth >= self.config.max_depth {
                    continue;
                }
                if self.repeats_accepted_prefix(&arena, tip, &accepted) {
                    continue;
                }
                stack.push(Frontier {
                    tip: Some(tip),
                    inventory: cast.inventory,
                    castable,
                    depth,
                });
            }
        }

        Ok(finish(accepted, expanded, StopReason::Exhausted))
    }

    /// True if the branch ending at `tip` starts with the same
    /// `prefix_window` actions as some accepted path.
    fn repeats_accepted_prefix(&self, arena: &Arena, tip: usize, accepted: &[CandidatePath]) -> bool {
        let window = self.config.prefix_window;
        if window == 0 || accepted.is_empty() {
            return false;
        }
        let actions = arena.actions(tip);
        let Some(prefix) = actions.get(..window) else {
            return false;
        };
        accepted
            .iter()
            .any(|path| path.actions.get(..window) == Some(prefix))
    }
}

fn finish(paths: Vec<CandidatePath>, expanded: usize, stop: StopReason) -> SearchReport {
    debug!(
        accepted = paths.len(),
        expanded,
        stop = stop.as_str(),
        "path search finished"
    );
    SearchReport {
        paths,
        expanded,
        stop,
    }
}
