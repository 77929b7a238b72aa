use thiserror::Error;

use crate::action::ActionKind;
use crate::PlayerIdx;

#[derive(Debug, Error)]
pub enum CoupError {
    /// A terminal resolve call, or a challenge/block looking for the entry it
    /// gates, found nothing on the chain. Effects applied before this point
    /// stay applied.
    #[error("pending chain is empty after {resolved} resolved step(s)")]
    EmptyChain { resolved: usize },

    #[error("no player at index {0}")]
    UnknownPlayer(PlayerIdx),

    #[error("player name {0:?} is already taken")]
    DuplicatePlayer(String),

    #[error("{kind:?} cannot be declared with target {target:?}")]
    TargetMismatch {
        kind: ActionKind,
        target: Option<PlayerIdx>,
    },

    #[error("deck has {available} card(s) but the deal needs {needed}")]
    DeckExhausted { needed: usize, available: usize },

    #[error("invalid game config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to write report row: {0}")]
    Csv(#[from] csv::Error),
}
