//! The pending chain.
//!
//! Declarations are pushed with [`Resolver::declare`] and nothing happens
//! until one of the terminal resolve calls. The terminal outcome applies to
//! the newest entry only. Every block or challenge then pops the entry it was
//! declared against and hands it the inverted outcome, so a challenge that
//! succeeds makes the disputed entry fail, and a failed block lets the action
//! beneath it through. The walk ends at the first plain action, which is
//! executed if it came out as a success.
//!
//! ```text
//! Steal(D -> T)          <- success   (inverted twice)
//! BlockSteal(T)          <- failure   (inverted once)
//! Challenge(D -> T)      <- success   (terminal outcome)
//! ```

use tracing::{debug, warn};
use crate::action::Entry;
use crate::report::{describe, Outcome, ReportSink, Transcript};
use crate::{CoupError, Game};

/// How a round ended: the action at the bottom of the chain and the outcome
/// it was resolved with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub base: Entry,
    pub outcome: Outcome,
    pub steps: usize,
}

pub struct Resolver<S: ReportSink = Transcript> {
    chain: Vec<Entry>,
    sink: S,
}

impl Default for Resolver<Transcript> {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver<Transcript> {
    pub fn new() -> Self {
        Self::with_sink(Transcript::new())
    }
}

impl<S: ReportSink> Resolver<S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            chain: Vec::with_capacity(4),
            sink,
        }
    }

    /// Pushes a declaration. Legality is the caller's business, a block or
    /// challenge with nothing beneath it only fails once it gets resolved.
    pub fn declare(&mut self, entry: impl Into<Entry>) {
        let entry = entry.into();
        debug!(depth = self.chain.len(), "declared {:?}", entry);
        self.chain.push(entry);
    }

    pub fn pending(&self) -> &[Entry] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn resolve_as_success(&mut self, game: &mut Game) -> Result<Resolution, CoupError> {
        self.resolve(game, Outcome::Success)
    }

    pub fn resolve_as_failure(&mut self, game: &mut Game) -> Result<Resolution, CoupError> {
        self.resolve(game, Outcome::Failure)
    }

    /// Resolves the newest entry with `outcome` and unwinds the chain beneath
    /// it. The chain is always empty afterwards, even on error; effects that
    /// were already applied are kept.
    pub fn resolve(&mut self, game: &mut Game, outcome: Outcome) -> Result<Resolution, CoupError> {
        let result = self.unwind(game, outcome);

        if let Err(err) = &result {
            warn!(error = %err, discarded = self.chain.len(), "round aborted");
            self.chain.clear();
        }

        result
    }

    fn unwind(&mut self, game: &mut Game, mut outcome: Outcome) -> Result<Resolution, CoupError> {
        let mut resolved = 0;
        let mut entry = self.chain.pop().ok_or(CoupError::EmptyChain { resolved })?;

        loop {
            debug!(?outcome, "resolving {:?}", entry);

            match entry {
                Entry::Action(action) => {
                    if outcome.is_success() && action.kind().capabilities().executable {
                        action.execute(game)?;
                    }
                    self.report(game, &entry, outcome, None)?;
                    resolved += 1;

                    if !self.chain.is_empty() {
                        warn!(discarded = self.chain.len(), "entries left beneath a resolved action");
                        self.chain.clear();
                    }

                    return Ok(Resolution {
                        base: entry,
                        outcome,
                        steps: resolved,
                    });
                }
                Entry::Challenge(challenge) => {
                    let disputed = self.chain.pop().ok_or(CoupError::EmptyChain { resolved })?;
                    let disputed_player_idx = disputed.dispatcher();

                    if challenge.target != disputed_player_idx {
                        warn!(
                            declared = challenge.target,
                            disputed = disputed_player_idx,
                            "challenge target is not the player who declared the disputed entry"
                        );
                    }

                    game.remove_influence(challenge.loser(disputed_player_idx, outcome))?;
                    self.report(game, &entry, outcome, Some(&disputed))?;

                    resolved += 1;
                    entry = disputed;
                    outcome = !outcome;
                }
                Entry::Counter(counter) => {
                    let countered = self.chain.pop().ok_or(CoupError::EmptyChain { resolved })?;

                    if let Entry::Action(action) = countered {
                        if !action.kind().is_countered_by(counter.kind) {
                            warn!(counter = ?counter.kind, action = ?action.kind(), "block does not match the blocked action");
                        }
                    }

                    self.report(game, &entry, outcome, Some(&countered))?;

                    resolved += 1;
                    entry = countered;
                    outcome = !outcome;
                }
            }
        }
    }

    fn report(&mut self, game: &Game, entry: &Entry, outcome: Outcome, gated: Option<&Entry>) -> Result<(), CoupError> {
        let step = describe(game, entry, outcome, gated)?;
        self.sink.record(step)
    }
}
