//! Commands the agent can emit and the record kinds it reads.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::ActionId;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A single command emitted for the turn.
///
/// Search paths are sequences of `Cast` and `Rest`; the orchestrator may also
/// emit `Brew`, `Learn`, or `Wait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Brew the order with this id.
    Brew(ActionId),
    /// Cast a known spell `times` times in one action.
    Cast {
        /// The spell to cast.
        spell: ActionId,
        /// Repetitions; greater than 1 only for repeatable spells.
        times: u32,
    },
    /// Learn the tome spell with this id.
    Learn(ActionId),
    /// Restore castability of every known spell.
    Rest,
    /// Do nothing.
    Wait,
}

impl Action {
    /// A single cast of `spell`.
    pub const fn cast(spell: ActionId) -> Self {
        Self::Cast { spell, times: 1 }
    }

    /// The protocol keyword for this action.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Brew(_) => "BREW",
            Self::Cast { .. } => "CAST",
            Self::Learn(_) => "LEARN",
            Self::Rest => "REST",
            Self::Wait => "WAIT",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Brew(id) | Self::Learn(id) => write!(f, "{} {id}", self.keyword()),
            Self::Cast { spell, times: 0 | 1 } => write!(f, "CAST {spell}"),
            Self::Cast { spell, times } => write!(f, "CAST {spell} {times}"),
            Self::Rest | Self::Wait => f.write_str(self.keyword()),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

/// The type column of an action record in the turn input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// One of our own spells.
    Cast,
    /// One of the opponent's spells.
    OpponentCast,
    /// A tome spell available to learn.
    Learn,
    /// An order available to brew.
    Brew,
}

impl RecordKind {
    /// Parse the protocol token. Returns `None` for anything unrecognized.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "CAST" => Some(Self::Cast),
            "OPPONENT_CAST" => Some(Self::OpponentCast),
            "LEARN" => Some(Self::Learn),
            "BREW" => Some(Self::Brew),
            _ => None,
        }
    }

    /// The protocol token for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cast => "CAST",
            Self::OpponentCast => "OPPONENT_CAST",
            Self::Learn => "LEARN",
            Self::Brew => "BREW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_format_as_protocol_lines() {
        assert_eq!(Action::Brew(ActionId(44)).to_string(), "BREW 44");
        assert_eq!(Action::cast(ActionId(78)).to_string(), "CAST 78");
        assert_eq!(
            Action::Cast { spell: ActionId(80), times: 3 }.to_string(),
            "CAST 80 3"
        );
        assert_eq!(Action::Learn(ActionId(12)).to_string(), "LEARN 12");
        assert_eq!(Action::Rest.to_string(), "REST");
        assert_eq!(Action::Wait.to_string(), "WAIT");
    }

    #[test]
    fn record_kind_tokens() {
        for kind in [
            RecordKind::Cast,
            RecordKind::OpponentCast,
            RecordKind::Learn,
            RecordKind::Brew,
        ] {
            assert_eq!(RecordKind::from_token(kind.as_str()), Some(kind));
        }
        assert_eq!(RecordKind::from_token("brew"), None);
        assert_eq!(RecordKind::from_token("SELL"), None);
    }

    #[test]
    fn actions_serialize() {
        let json = serde_json::to_string(&Action::cast(ActionId(3)));
        assert!(json.is_ok_and(|j| j.contains("Cast")));
    }
}
