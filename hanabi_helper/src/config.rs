use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Color, ColorSet};

/// Index of the player using the helper. Their own cards are the ones
/// hidden from them.
pub const PRIMARY_PLAYER: usize = 0;

/// Which colors take part in a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRule {
    /// Red, yellow, green, blue and white.
    #[default]
    Standard,
    /// The standard colors plus a sixth rainbow color.
    Rainbow,
}

impl ColorRule {
    pub fn colors(self) -> ColorSet {
        match self {
            ColorRule::Standard => ColorSet::all().remove(Color::Rainbow),
            ColorRule::Rainbow => ColorSet::all(),
        }
    }
}

impl FromStr for ColorRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(ColorRule::Standard),
            "rainbow" => Ok(ColorRule::Rainbow),
            _ => Err(ConfigError::UnknownColorRule(String::from(s))),
        }
    }
}

/// The settings chosen when starting a game.
///
/// Can only be constructed through [`GameConfig::new()`] or deserialization,
/// both of which validate the player count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    player_count: u8,
    color_rule: ColorRule,
}

#[derive(Deserialize)]
struct RawGameConfig {
    player_count: u8,
    #[serde(default)]
    color_rule: ColorRule,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        GameConfig::new(raw.player_count, raw.color_rule)
    }
}

impl GameConfig {
    pub fn new(player_count: u8, color_rule: ColorRule) -> Result<Self, ConfigError> {
        if !(2..=5).contains(&player_count) {
            return Err(ConfigError::InvalidPlayerCount(player_count));
        }
        Ok(Self {
            player_count,
            color_rule,
        })
    }

    pub fn player_count(&self) -> usize {
        self.player_count as usize
    }

    pub fn color_rule(&self) -> ColorRule {
        self.color_rule
    }

    pub fn colors(&self) -> ColorSet {
        self.color_rule.colors()
    }

    /// Five cards for two or three players, four cards otherwise.
    pub fn hand_size(&self) -> usize {
        match self.player_count {
            2 | 3 => 5,
            _ => 4,
        }
    }
}

/// The error type for invalid game settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPlayerCount(u8),
    UnknownColorRule(String),
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPlayerCount(n) => {
                write!(f, "A game needs between 2 and 5 players, got {}", n)
            }
            ConfigError::UnknownColorRule(s) => {
                write!(f, "Unknown color rule '{}', expected 'standard' or 'rainbow'", s)
            }
        }
    }
}
