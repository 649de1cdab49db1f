//! Flavor text appended after some commands.
//!
//! The game shows a trailing message next to the witch. It has no effect on
//! the command itself.

use cauldron_types::Action;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

const BREW_PHRASES: [&str; 5] = [
    "Bubble bubble",
    "Order up!",
    "Fresh from the cauldron",
    "One potion, extra sparkle",
    "Careful, it's hot",
];

const LEARN_PHRASES: [&str; 4] = [
    "Ooh, a new page",
    "Noted in the grimoire",
    "That one looks useful",
    "Studying...",
];

const REST_PHRASES: [&str; 4] = [
    "Catching my breath",
    "Recharging",
    "Five minutes, please",
    "Stirring slowly",
];

/// Picks a random phrase for the commands that get one.
#[derive(Debug, Clone)]
pub struct Flavor {
    rng: StdRng,
}

impl Flavor {
    /// Create a generator. A seed makes the sequence reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self { rng }
    }

    /// A phrase for `action`, or `None` for commands that stay bare.
    pub fn phrase(&mut self, action: Action) -> Option<&'static str> {
        let phrases: &[&'static str] = match action {
            Action::Brew(_) => &BREW_PHRASES,
            Action::Learn(_) => &LEARN_PHRASES,
            Action::Rest => &REST_PHRASES,
            Action::Cast { .. } | Action::Wait => return None,
        };
        phrases.choose(&mut self.rng).copied()
    }
}
