//! Identifier newtype for protocol entities.
//!
//! Spells, tome spells, and orders share one numeric id space in the turn
//! input. Wrapping it keeps ids from being mixed up with quantities.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a spell, tome spell, or order, as sent by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u32);

impl ActionId {
    /// Return the raw numeric id.
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ActionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
