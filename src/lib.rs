pub mod action;
pub mod config;
pub mod error;
pub mod game;
pub mod report;
pub mod resolver;

pub use action::{Action, ActionKind, Challenge, CounterAction, CounterKind, Entry};
pub use config::GameConfig;
pub use error::CoupError;
pub use game::{Game, Player};
pub use report::{describe, CsvSink, Outcome, ReportSink, Step, TracingSink, Transcript};
pub use resolver::{Resolution, Resolver};

use serde::{Deserialize, Serialize};
use crate::Character::{Ambassador, Assassin, Captain, Contessa, Duke};

/// Seat of a player in [`Game::players`].
pub type PlayerIdx = usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Character {
    Duke,
    Assassin,
    Captain,
    Ambassador,
    Contessa,
}

pub static CHARACTER_VARIANTS: [Character; 5] = [
    Duke,
    Assassin,
    Captain,
    Ambassador,
    Contessa,
];

impl Character {
    /// The action this influence lets its holder declare truthfully.
    pub fn action(self) -> Option<ActionKind> {
        match self {
            Duke => Some(ActionKind::Tax),
            Assassin => Some(ActionKind::Assassinate),
            Captain => Some(ActionKind::Steal),
            Ambassador => Some(ActionKind::Exchange),
            Contessa => None,
        }
    }

    /// The block this influence lets its holder declare truthfully.
    pub fn counter(self) -> Option<CounterKind> {
        match self {
            Duke => Some(CounterKind::BlockForeignAid),
            Captain | Ambassador => Some(CounterKind::BlockSteal),
            Contessa => Some(CounterKind::BlockAssassination),
            Assassin => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::CHARACTER_VARIANTS;

    #[test]
    fn catalog_round_trips() {
        for character in CHARACTER_VARIANTS {
            if let Some(kind) = character.action() {
                assert_eq!(kind.claimed_character(), Some(character));
            }
            if let Some(counter) = character.counter() {
                assert!(counter.claimed_characters().contains(&character));
            }
        }
    }

    #[test]
    fn every_character_does_something() {
        for character in CHARACTER_VARIANTS {
            assert!(character.action().is_some() || character.counter().is_some(), "{:?}", character);
        }
    }
}
