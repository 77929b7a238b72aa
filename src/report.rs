//! Narration of resolution steps.
//!
//! [`describe`] turns one resolved entry into a [`Step`] without touching any
//! state, and a [`ReportSink`] decides where steps go: kept in memory, emitted
//! as `tracing` events, or written out as CSV rows.

use std::fmt::{Display, Formatter};
use std::io::Write;
use std::ops::Not;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::action::{ActionKind, CounterKind, Entry};
use crate::{CoupError, Game};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl Not for Outcome {
    type Output = Outcome;

    fn not(self) -> Self::Output {
        match self {
            Outcome::Success => Outcome::Failure,
            Outcome::Failure => Outcome::Success,
        }
    }
}

impl From<bool> for Outcome {
    fn from(success: bool) -> Self {
        if success {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Declared {
    Action(ActionKind),
    Counter(CounterKind),
    Challenge,
}

impl Display for Declared {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Declared::Action(kind) => f.write_fmt(format_args!("{:?}", kind)),
            Declared::Counter(kind) => f.write_fmt(format_args!("{:?}", kind)),
            Declared::Challenge => f.write_str("Challenge"),
        }
    }
}

/// What happened when one entry of the chain was resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub dispatcher: String,
    pub declared: Declared,
    // for blocks and challenges this is whoever declared the gated entry
    pub target: Option<String>,
    pub outcome: Outcome,
    // who lost an influence to a challenge
    pub penalized: Option<String>,
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let dispatcher = &self.dispatcher;
        let target = self.target.as_deref().unwrap_or("?");

        match self.declared {
            Declared::Action(ActionKind::Income) => f.write_fmt(format_args!("{dispatcher} takes income"))?,
            Declared::Action(ActionKind::ForeignAid) => f.write_fmt(format_args!("{dispatcher} takes foreign aid"))?,
            Declared::Action(ActionKind::Tax) => f.write_fmt(format_args!("{dispatcher} collects tax"))?,
            Declared::Action(ActionKind::Exchange) => f.write_fmt(format_args!("{dispatcher} exchanges with the court"))?,
            Declared::Action(ActionKind::Coup) => f.write_fmt(format_args!("{dispatcher} coups {target}"))?,
            Declared::Action(ActionKind::Assassinate) => f.write_fmt(format_args!("{dispatcher} assassinates {target}"))?,
            Declared::Action(ActionKind::Steal) => f.write_fmt(format_args!("{dispatcher} steals from {target}"))?,
            Declared::Counter(kind) => f.write_fmt(format_args!("{dispatcher} blocks {target}'s {:?}", kind.blocks()))?,
            Declared::Challenge => f.write_fmt(format_args!("{dispatcher} challenges {target}"))?,
        }

        match self.outcome {
            Outcome::Success => f.write_str(": success")?,
            Outcome::Failure => f.write_str(": failure")?,
        }

        if let Some(penalized) = &self.penalized {
            f.write_fmt(format_args!(", {penalized} loses an influence"))?;
        }

        Ok(())
    }
}

/// Describes `entry` resolving with `outcome`. `gated` is the entry a block or
/// challenge was declared against. Pure: the same inputs always give the same
/// step.
pub fn describe(game: &Game, entry: &Entry, outcome: Outcome, gated: Option<&Entry>) -> Result<Step, CoupError> {
    let name = |player_idx| game.player(player_idx).map(|player| player.name().to_string());

    let (declared, target, penalized) = match entry {
        Entry::Action(action) => {
            (Declared::Action(action.kind()), action.target(), None)
        }
        Entry::Counter(counter) => {
            (Declared::Counter(counter.kind), gated.map(Entry::dispatcher), None)
        }
        Entry::Challenge(challenge) => {
            let disputed = gated.map_or(challenge.target, Entry::dispatcher);
            (Declared::Challenge, Some(disputed), Some(challenge.loser(disputed, outcome)))
        }
    };

    Ok(Step {
        dispatcher: name(entry.dispatcher())?,
        declared,
        target: target.map(name).transpose()?,
        outcome,
        penalized: penalized.map(name).transpose()?,
    })
}

pub trait ReportSink {
    fn record(&mut self, step: Step) -> Result<(), CoupError>;
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn record(&mut self, step: Step) -> Result<(), CoupError> {
        (**self).record(step)
    }
}

/// Keeps every step in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    steps: Vec<Step>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn lines(&self) -> Vec<String> {
        self.steps.iter().map(ToString::to_string).collect()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

impl ReportSink for Transcript {
    fn record(&mut self, step: Step) -> Result<(), CoupError> {
        self.steps.push(step);
        Ok(())
    }
}

/// Emits every step as an `info` event.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn record(&mut self, step: Step) -> Result<(), CoupError> {
        info!(
            dispatcher = %step.dispatcher,
            declared = %step.declared,
            target = ?step.target,
            outcome = ?step.outcome,
            penalized = ?step.penalized,
            "{}", step
        );
        Ok(())
    }
}

/// Writes one CSV row per step, with a header row up front.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Result<Self, CoupError> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(["dispatcher", "declared", "target", "outcome", "penalized"])?;
        Ok(Self { writer })
    }

    pub fn flush(&mut self) -> Result<(), CoupError> {
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }
}

impl<W: Write> ReportSink for CsvSink<W> {
    fn record(&mut self, step: Step) -> Result<(), CoupError> {
        let declared = step.declared.to_string();
        let outcome = match step.outcome {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        };

        self.writer.write_record([
            step.dispatcher.as_str(),
            declared.as_str(),
            step.target.as_deref().unwrap_or(""),
            outcome,
            step.penalized.as_deref().unwrap_or(""),
        ])?;

        Ok(())
    }
}
