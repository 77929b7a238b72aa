use std::fmt::{Debug, Formatter};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::{debug, info};
use crate::{Character, CoupError, GameConfig, PlayerIdx, CHARACTER_VARIANTS};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Player {
    name: String,
    money: u8,
    influence_cards: Vec<(Character, bool)>, // (character, revealed)
}

impl Player {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn money(&self) -> u8 {
        self.money
    }

    pub fn influence_cards(&self) -> &[(Character, bool)] {
        &self.influence_cards
    }

    /// Number of face down cards.
    pub fn influence(&self) -> usize {
        self.influence_cards.iter().filter(|card| !card.1).count()
    }

    pub fn is_dead(&self) -> bool {
        self.influence() == 0
    }
}

/// Coin and influence bookkeeping for one game. Players are never removed
/// from the roster; an eliminated player keeps their seat (and name) but is
/// skipped by every operation that targets active players.
#[derive(Clone)]
pub struct Game {
    bank: u8,
    deck: Vec<Character>,
    players: Vec<Player>,
    rng: Pcg64,
}

impl Debug for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("Bank ${} | Deck {}\n", self.bank, self.deck.len()).as_str())?;
        for (player_idx, player) in self.players.iter().enumerate() {
            f.write_str(format!("\tP {player_idx} {}: ${} | {:?}\n", player.name, player.money, player.influence_cards).as_str())?;
        }
        Ok(())
    }
}

impl Game {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>, config: &GameConfig) -> Result<Self, CoupError> {
        let mut rng = match config.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };

        let mut deck: Vec<Character> = CHARACTER_VARIANTS.iter()
            .flat_map(|&card| std::iter::repeat(card).take(config.copies_per_character as usize))
            .collect();
        deck.shuffle(&mut rng);

        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        for (idx, name) in names.iter().enumerate() {
            if names[..idx].contains(name) {
                return Err(CoupError::DuplicatePlayer(name.clone()));
            }
        }

        let needed = names.len() * config.starting_influence as usize;
        if needed > deck.len() {
            return Err(CoupError::DeckExhausted { needed, available: deck.len() });
        }

        let players = names.into_iter().map(|name| Player {
            name,
            money: 0,
            influence_cards: deck.drain(..config.starting_influence as usize)
                .map(|card| (card, false))
                .collect(),
        }).collect();

        let mut game = Self {
            bank: config.bank,
            deck,
            players,
            rng,
        };

        for player_idx in game.players_indexes() {
            game.award_coins(player_idx, config.starting_coins)?;
        }

        debug!(players = game.players.len(), bank = game.bank, "game created");

        Ok(game)
    }

    pub fn bank(&self) -> u8 {
        self.bank
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_indexes(&self) -> std::ops::Range<usize> {
        0..self.players.len()
    }

    pub fn player(&self, player_idx: PlayerIdx) -> Result<&Player, CoupError> {
        self.players.get(player_idx).ok_or(CoupError::UnknownPlayer(player_idx))
    }

    fn player_mut(&mut self, player_idx: PlayerIdx) -> Result<&mut Player, CoupError> {
        self.players.get_mut(player_idx).ok_or(CoupError::UnknownPlayer(player_idx))
    }

    pub fn player_by_name(&self, name: &str) -> Option<PlayerIdx> {
        self.players.iter().position(|player| player.name == name)
    }

    pub fn is_eliminated(&self, player_idx: PlayerIdx) -> Result<bool, CoupError> {
        Ok(self.player(player_idx)?.is_dead())
    }

    pub fn active_players(&self) -> impl Iterator<Item = PlayerIdx> + '_ {
        self.players_indexes().filter(|&player_idx| !self.players[player_idx].is_dead())
    }

    pub fn winner(&self) -> Option<PlayerIdx> {
        let mut active = self.active_players();
        match (active.next(), active.next()) {
            (Some(winner), None) => Some(winner),
            _ => None,
        }
    }

    /// Moves up to `amount` coins from the player into the bank, never more
    /// than the player holds. Returns the number of coins moved.
    pub fn pay_coins(&mut self, player_idx: PlayerIdx, amount: u8) -> Result<u8, CoupError> {
        let player = self.player_mut(player_idx)?;
        if player.is_dead() {
            debug!(player = %player.name, "eliminated player cannot pay");
            return Ok(0);
        }

        let coins = amount.min(player.money);
        player.money -= coins;
        self.bank = self.bank.saturating_add(coins);

        Ok(coins)
    }

    /// Moves up to `amount` coins from the bank to the player, never more
    /// than the bank holds. Returns the number of coins moved.
    pub fn award_coins(&mut self, player_idx: PlayerIdx, amount: u8) -> Result<u8, CoupError> {
        let available = self.bank;
        let player = self.player_mut(player_idx)?;
        if player.is_dead() {
            debug!(player = %player.name, "eliminated player cannot be awarded coins");
            return Ok(0);
        }

        let coins = amount.min(available);
        player.money = player.money.saturating_add(coins);
        self.bank -= coins;

        Ok(coins)
    }

    /// Reveals the player's first face down card. Returns true if that was
    /// their last influence.
    pub fn remove_influence(&mut self, player_idx: PlayerIdx) -> Result<bool, CoupError> {
        let player = self.player_mut(player_idx)?;

        // 'losing' an influence means your card is flipped up and revealed and doesn't count
        match player.influence_cards.iter().position(|card| !card.1) {
            None => {
                debug!(player = %player.name, "player is already out of the game");
                Ok(false)
            }
            Some(card_idx) => {
                player.influence_cards[card_idx].1 = true;
                info!(player = %player.name, character = ?player.influence_cards[card_idx].0, "lost an influence");

                let eliminated = player.is_dead();
                if eliminated {
                    info!(player = %player.name, "lost the game");
                }

                Ok(eliminated)
            }
        }
    }

    /// Swaps every face down card the player holds with a fresh draw from
    /// the shuffled deck.
    pub fn exchange_influence(&mut self, player_idx: PlayerIdx) -> Result<(), CoupError> {
        let face_down: Vec<usize> = self.player_active_influence_cards(player_idx)?.collect();

        for card_idx in face_down {
            self.replace_influence_card(player_idx, card_idx)?;
        }

        Ok(())
    }

    fn player_active_influence_cards(&self, player_idx: PlayerIdx) -> Result<impl Iterator<Item = usize> + '_, CoupError> {
        Ok(self.player(player_idx)?.influence_cards
            .iter()
            .enumerate()
            .filter_map(|(idx, card)| {
                if card.1 {
                    None
                } else {
                    Some(idx)
                }
            }))
    }

    fn replace_influence_card(&mut self, player_idx: PlayerIdx, card_idx: usize) -> Result<(), CoupError> {
        let player = self.players.get_mut(player_idx).ok_or(CoupError::UnknownPlayer(player_idx))?;
        let (character, _) = player.influence_cards[card_idx];

        self.deck.push(character);
        self.deck.shuffle(&mut self.rng);

        // the deck can't be empty, the returned card was just pushed
        let drawn = self.deck.remove(0);
        self.players[player_idx].influence_cards[card_idx] = (drawn, false);

        Ok(())
    }
}
