use std::fmt::{Debug, Formatter};
use serde::{Deserialize, Serialize};
use crate::{Character, CoupError, Game, Outcome, PlayerIdx};
use crate::Character::{Ambassador, Assassin, Captain, Contessa, Duke};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Income,
    ForeignAid,
    Coup,
    Tax,
    Assassinate,
    Steal,
    Exchange,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterKind {
    BlockForeignAid,
    BlockAssassination,
    BlockSteal,
}

/// What a kind of action is able to do. These are flags on the kind rather
/// than separate types, so every declaration is matched exhaustively through
/// [`Entry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub executable: bool,
    pub targetable: bool,
    pub cost: u8,
    pub counters: &'static [CounterKind],
    pub challengeable: bool,
}

static INCOME: Capabilities = Capabilities {
    executable: true,
    targetable: false,
    cost: 0,
    counters: &[],
    challengeable: false,
};

static FOREIGN_AID: Capabilities = Capabilities {
    executable: true,
    targetable: false,
    cost: 0,
    counters: &[CounterKind::BlockForeignAid],
    challengeable: false,
};

static COUP: Capabilities = Capabilities {
    executable: true,
    targetable: true,
    cost: 7,
    counters: &[],
    challengeable: false,
};

static TAX: Capabilities = Capabilities {
    executable: true,
    targetable: false,
    cost: 0,
    counters: &[],
    challengeable: true,
};

static ASSASSINATE: Capabilities = Capabilities {
    executable: true,
    targetable: true,
    cost: 3,
    counters: &[CounterKind::BlockAssassination],
    challengeable: true,
};

static STEAL: Capabilities = Capabilities {
    executable: true,
    targetable: true,
    cost: 0,
    counters: &[CounterKind::BlockSteal],
    challengeable: true,
};

static EXCHANGE: Capabilities = Capabilities {
    executable: true,
    targetable: false,
    cost: 0,
    counters: &[],
    challengeable: true,
};

pub static ACTION_KINDS: [ActionKind; 7] = [
    ActionKind::Income,
    ActionKind::ForeignAid,
    ActionKind::Coup,
    ActionKind::Tax,
    ActionKind::Assassinate,
    ActionKind::Steal,
    ActionKind::Exchange,
];

impl ActionKind {
    pub fn capabilities(self) -> &'static Capabilities {
        match self {
            ActionKind::Income => &INCOME,
            ActionKind::ForeignAid => &FOREIGN_AID,
            ActionKind::Coup => &COUP,
            ActionKind::Tax => &TAX,
            ActionKind::Assassinate => &ASSASSINATE,
            ActionKind::Steal => &STEAL,
            ActionKind::Exchange => &EXCHANGE,
        }
    }

    pub fn is_targetable(self) -> bool {
        self.capabilities().targetable
    }

    pub fn is_counterable(self) -> bool {
        !self.capabilities().counters.is_empty()
    }

    pub fn is_challengeable(self) -> bool {
        self.capabilities().challengeable
    }

    pub fn cost(self) -> u8 {
        self.capabilities().cost
    }

    pub fn is_countered_by(self, counter: CounterKind) -> bool {
        self.capabilities().counters.contains(&counter)
    }

    /// The influence a player claims by declaring this action, if any.
    pub fn claimed_character(self) -> Option<Character> {
        match self {
            ActionKind::Tax => Some(Duke),
            ActionKind::Assassinate => Some(Assassin),
            ActionKind::Steal => Some(Captain),
            ActionKind::Exchange => Some(Ambassador),
            ActionKind::Income | ActionKind::ForeignAid | ActionKind::Coup => None,
        }
    }
}

impl CounterKind {
    pub fn blocks(self) -> ActionKind {
        match self {
            CounterKind::BlockForeignAid => ActionKind::ForeignAid,
            CounterKind::BlockAssassination => ActionKind::Assassinate,
            CounterKind::BlockSteal => ActionKind::Steal,
        }
    }

    pub fn claimed_characters(self) -> &'static [Character] {
        match self {
            CounterKind::BlockForeignAid => &[Duke],
            CounterKind::BlockAssassination => &[Contessa],
            CounterKind::BlockSteal => &[Captain, Ambassador],
        }
    }

    // foreign aid is blocked in the name of the duke but the block itself
    // can't be disputed
    pub fn is_challengeable(self) -> bool {
        match self {
            CounterKind::BlockForeignAid => false,
            CounterKind::BlockAssassination | CounterKind::BlockSteal => true,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    kind: ActionKind,
    dispatcher: PlayerIdx,
    target: Option<PlayerIdx>,
}

impl Action {
    pub fn new(kind: ActionKind, dispatcher: PlayerIdx, target: Option<PlayerIdx>) -> Result<Self, CoupError> {
        if kind.is_targetable() != target.is_some() {
            return Err(CoupError::TargetMismatch { kind, target });
        }

        Ok(Self { kind, dispatcher, target })
    }

    pub fn income(dispatcher: PlayerIdx) -> Self {
        Self { kind: ActionKind::Income, dispatcher, target: None }
    }

    pub fn foreign_aid(dispatcher: PlayerIdx) -> Self {
        Self { kind: ActionKind::ForeignAid, dispatcher, target: None }
    }

    pub fn coup(dispatcher: PlayerIdx, target: PlayerIdx) -> Self {
        Self { kind: ActionKind::Coup, dispatcher, target: Some(target) }
    }

    pub fn tax(dispatcher: PlayerIdx) -> Self {
        Self { kind: ActionKind::Tax, dispatcher, target: None }
    }

    pub fn assassinate(dispatcher: PlayerIdx, target: PlayerIdx) -> Self {
        Self { kind: ActionKind::Assassinate, dispatcher, target: Some(target) }
    }

    pub fn steal(dispatcher: PlayerIdx, target: PlayerIdx) -> Self {
        Self { kind: ActionKind::Steal, dispatcher, target: Some(target) }
    }

    pub fn exchange(dispatcher: PlayerIdx) -> Self {
        Self { kind: ActionKind::Exchange, dispatcher, target: None }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn dispatcher(&self) -> PlayerIdx {
        self.dispatcher
    }

    pub fn target(&self) -> Option<PlayerIdx> {
        self.target
    }

    fn required_target(&self) -> Result<PlayerIdx, CoupError> {
        self.target.ok_or(CoupError::TargetMismatch { kind: self.kind, target: None })
    }

    /// Applies the action's effect. Only called for an action that resolved
    /// as a success.
    pub fn execute(&self, game: &mut Game) -> Result<(), CoupError> {
        match self.kind {
            ActionKind::Income => {
                game.award_coins(self.dispatcher, 1)?;
            }
            ActionKind::ForeignAid => {
                game.award_coins(self.dispatcher, 2)?;
            }
            ActionKind::Tax => {
                game.award_coins(self.dispatcher, 3)?;
            }
            ActionKind::Coup | ActionKind::Assassinate => {
                let target_player_idx = self.required_target()?;
                game.pay_coins(self.dispatcher, self.kind.cost())?;
                game.remove_influence(target_player_idx)?;
            }
            ActionKind::Steal => {
                let target_player_idx = self.required_target()?;
                // both sides clamp on their own: the target against its balance,
                // the thief against the bank
                game.pay_coins(target_player_idx, 2)?;
                game.award_coins(self.dispatcher, 2)?;
            }
            ActionKind::Exchange => {
                game.exchange_influence(self.dispatcher)?;
            }
        }

        Ok(())
    }
}

/// A block declared against the counterable action beneath it. Whether the
/// dispatcher is allowed to block is left to the caller.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CounterAction {
    pub kind: CounterKind,
    pub dispatcher: PlayerIdx,
}

impl CounterAction {
    pub fn new(kind: CounterKind, dispatcher: PlayerIdx) -> Self {
        Self { kind, dispatcher }
    }
}

/// Disputes the entry directly beneath it. `target` is the player whose claim
/// is being disputed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Challenge {
    pub dispatcher: PlayerIdx,
    pub target: PlayerIdx,
}

impl Challenge {
    pub fn new(dispatcher: PlayerIdx, target: PlayerIdx) -> Self {
        Self { dispatcher, target }
    }

    /// A refuted claim costs the disputed player an influence, an upheld one
    /// costs the challenger.
    pub fn loser(&self, disputed: PlayerIdx, outcome: Outcome) -> PlayerIdx {
        match outcome {
            Outcome::Success => disputed,
            Outcome::Failure => self.dispatcher,
        }
    }
}

/// One declaration on the pending chain.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entry {
    Action(Action),
    Counter(CounterAction),
    Challenge(Challenge),
}

impl Entry {
    pub fn dispatcher(&self) -> PlayerIdx {
        match self {
            Entry::Action(action) => action.dispatcher,
            Entry::Counter(counter) => counter.dispatcher,
            Entry::Challenge(challenge) => challenge.dispatcher,
        }
    }

    pub fn target(&self) -> Option<PlayerIdx> {
        match self {
            Entry::Action(action) => action.target,
            Entry::Counter(_) => None,
            Entry::Challenge(challenge) => Some(challenge.target),
        }
    }

    pub fn is_challengeable(&self) -> bool {
        match self {
            Entry::Action(action) => action.kind.is_challengeable(),
            Entry::Counter(counter) => counter.kind.is_challengeable(),
            Entry::Challenge(_) => false,
        }
    }
}

impl From<Action> for Entry {
    fn from(action: Action) -> Self {
        Entry::Action(action)
    }
}

impl From<CounterAction> for Entry {
    fn from(counter: CounterAction) -> Self {
        Entry::Counter(counter)
    }
}

impl From<Challenge> for Entry {
    fn from(challenge: Challenge) -> Self {
        Entry::Challenge(challenge)
    }
}

impl Debug for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let player_idx = self.dispatcher;

        match (self.kind, self.target) {
            (ActionKind::Income, _) => {
                f.write_fmt(format_args!("Player {player_idx} takes Income"))
            }
            (ActionKind::ForeignAid, _) => {
                f.write_fmt(format_args!("Player {player_idx} gets foreign aid"))
            }
            (ActionKind::Tax, _) => {
                f.write_fmt(format_args!("Player {player_idx} gets Taxes"))
            }
            (ActionKind::Exchange, _) => {
                f.write_fmt(format_args!("Player {player_idx} exchanges influence"))
            }
            (ActionKind::Coup, Some(target_player_idx)) => {
                f.write_fmt(format_args!("Player {player_idx} coups {target_player_idx}"))
            }
            (ActionKind::Assassinate, Some(target_player_idx)) => {
                f.write_fmt(format_args!("Player {player_idx} assassinates {target_player_idx}"))
            }
            (ActionKind::Steal, Some(target_player_idx)) => {
                f.write_fmt(format_args!("Player {player_idx} steals from {target_player_idx}"))
            }
            (kind, None) => {
                f.write_fmt(format_args!("Player {player_idx} declares {:?} without a target", kind))
            }
        }
    }
}

impl Debug for CounterAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Player {} blocks {:?}", self.dispatcher, self.kind.blocks()))
    }
}

impl Debug for Challenge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Player {} challenges {}", self.dispatcher, self.target))
    }
}

impl Debug for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Entry::Action(action) => action.fmt(f),
            Entry::Counter(counter) => counter.fmt(f),
            Entry::Challenge(challenge) => challenge.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{Action, ActionKind, CounterAction, CounterKind, Entry, ACTION_KINDS};
    use crate::Character::{Ambassador, Captain, Contessa};
    use crate::{CoupError, Game, GameConfig};

    #[test]
    fn costs() {
        assert_eq!(ActionKind::Coup.cost(), 7);
        assert_eq!(ActionKind::Assassinate.cost(), 3);

        let free = ACTION_KINDS.iter()
            .filter(|kind| kind.cost() == 0)
            .count();
        assert_eq!(free, 5);
    }

    #[test]
    fn counters_line_up_with_blocks() {
        for kind in ACTION_KINDS {
            for &counter in kind.capabilities().counters {
                assert_eq!(counter.blocks(), kind);
            }
        }

        assert!(ActionKind::ForeignAid.is_countered_by(CounterKind::BlockForeignAid));
        assert!(!ActionKind::Tax.is_counterable());
        assert!(!ActionKind::Steal.is_countered_by(CounterKind::BlockAssassination));
    }

    #[test]
    fn claimed_characters() {
        assert_eq!(ActionKind::Income.claimed_character(), None);
        assert_eq!(ActionKind::Steal.claimed_character(), Some(Captain));
        assert_eq!(CounterKind::BlockSteal.claimed_characters(), &[Captain, Ambassador]);
        assert_eq!(CounterKind::BlockAssassination.claimed_characters(), &[Contessa]);

        assert!(!CounterKind::BlockForeignAid.is_challengeable());
        assert!(CounterKind::BlockSteal.is_challengeable());
        assert!(CounterKind::BlockAssassination.is_challengeable());
        assert!(!Entry::from(CounterAction::new(CounterKind::BlockForeignAid, 1)).is_challengeable());

        // a character action is challengeable exactly when it claims an influence
        for kind in ACTION_KINDS {
            assert_eq!(kind.is_challengeable(), kind.claimed_character().is_some());
        }
    }

    #[test]
    fn target_must_match_kind() {
        assert!(Action::new(ActionKind::Steal, 0, Some(1)).is_ok());
        assert!(Action::new(ActionKind::Tax, 0, None).is_ok());

        match Action::new(ActionKind::Coup, 0, None) {
            Err(CoupError::TargetMismatch { kind, target }) => {
                assert_eq!(kind, ActionKind::Coup);
                assert_eq!(target, None);
            }
            other => panic!("expected a target mismatch, got {:?}", other),
        }

        assert!(Action::new(ActionKind::Income, 0, Some(2)).is_err());
    }

    #[test]
    fn steal_from_a_poor_target_is_paid_by_the_bank() {
        let mut game = Game::new(["Elder", "Highlander"], &GameConfig::seeded(5)).unwrap();
        game.pay_coins(1, 1).unwrap();
        let bank = game.bank();

        Action::steal(0, 1).execute(&mut game).unwrap();

        // the target could only pay 1, the bank still hands over 2
        assert_eq!(game.player(0).unwrap().money(), 4);
        assert_eq!(game.player(1).unwrap().money(), 0);
        assert_eq!(game.bank(), bank - 1);
    }

    #[test]
    fn assassinate_pays_and_removes_influence() {
        let mut game = Game::new(["Elder", "Highlander"], &GameConfig::seeded(5)).unwrap();
        game.award_coins(0, 1).unwrap();

        Action::assassinate(0, 1).execute(&mut game).unwrap();

        assert_eq!(game.player(0).unwrap().money(), 0);
        assert_eq!(game.player(1).unwrap().influence(), 1);
    }

    #[test]
    fn entry_accessors() {
        let steal: Entry = Action::steal(0, 2).into();
        assert_eq!(steal.dispatcher(), 0);
        assert_eq!(steal.target(), Some(2));
        assert!(steal.is_challengeable());

        let income: Entry = Action::income(1).into();
        assert!(!income.is_challengeable());
        assert_eq!(format!("{:?}", income), "Player 1 takes Income");
    }
}
