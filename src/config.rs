use serde::{Deserialize, Serialize};
use crate::CoupError;

/// Table setup for a single game. Missing fields fall back to the standard
/// rules: a 50 coin treasury, 2 coins and 2 influences per player, and three
/// copies of each character in the court deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub bank: u8,
    pub starting_coins: u8,
    pub starting_influence: u8,
    pub copies_per_character: u8,
    // fixed seed for the deck shuffle, None draws from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bank: 50,
            starting_coins: 2,
            starting_influence: 2,
            copies_per_character: 3,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, CoupError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::CoupError;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "bank": 12, "seed": 7 }"#).unwrap();
        assert_eq!(config.bank, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.starting_coins, 2);
        assert_eq!(config.copies_per_character, 3);
    }

    #[test]
    fn malformed_json() {
        match GameConfig::from_json("{ \"bank\": -1 }") {
            Err(CoupError::Config(_)) => {}
            other => panic!("expected a config error, got {:?}", other),
        }
    }
}
