use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player difficulty on a 1-5 scale. Out-of-range values are clamped, including when deserializing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct DifficultyLevel(u8);

impl DifficultyLevel {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(5);

    pub const fn new(level: u8) -> Self {
        if level < Self::MIN.0 {
            Self::MIN
        } else if level > Self::MAX.0 {
            Self::MAX
        } else {
            Self(level)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// One step harder, saturating at the maximum.
    pub const fn harder(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    /// One step easier, saturating at the minimum.
    pub const fn easier(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<u8> for DifficultyLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl From<DifficultyLevel> for u8 {
    fn from(level: DifficultyLevel) -> Self {
        level.0
    }
}

/// Everything needed to lay out a new board.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardConfig {
    pub tokens: Vec<Token>,
    /// How long a mismatched pair stays face up before it is turned back.
    pub flip_lock: Duration,
    /// Presentation-only flip animation speed.
    pub flip_speed_ms: u32,
}

impl BoardConfig {
    pub const FLIP_LOCK: Duration = Duration::from_millis(1000);

    pub fn pair_count(&self) -> PairCount {
        self.tokens.len().try_into().unwrap_or(PairCount::MAX)
    }

    pub fn card_count(&self) -> usize {
        self.tokens.len() * 2
    }
}

pub trait DifficultyPolicy {
    fn board_config(&self, profile: &PlayerProfile) -> BoardConfig;
}

/// Grows the token set with the player's difficulty level.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AdaptivePolicy;

impl AdaptivePolicy {
    pub const fn flip_speed_ms(level: DifficultyLevel) -> u32 {
        1000 - (level.get() as u32) * 100
    }
}

impl DifficultyPolicy for AdaptivePolicy {
    fn board_config(&self, profile: &PlayerProfile) -> BoardConfig {
        let level = profile.difficulty_level;
        let extra = usize::from(level.get() - 1).min(EXTRA_TOKENS.len());
        let tokens = BASE_TOKENS
            .iter()
            .chain(EXTRA_TOKENS[..extra].iter())
            .copied()
            .collect();
        BoardConfig {
            tokens,
            flip_lock: BoardConfig::FLIP_LOCK,
            flip_speed_ms: Self::flip_speed_ms(level),
        }
    }
}

/// Always plays the base token set, ignoring the profile.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StaticPolicy;

impl DifficultyPolicy for StaticPolicy {
    fn board_config(&self, _profile: &PlayerProfile) -> BoardConfig {
        BoardConfig {
            tokens: BASE_TOKENS.to_vec(),
            flip_lock: BoardConfig::FLIP_LOCK,
            flip_speed_ms: AdaptivePolicy::flip_speed_ms(DifficultyLevel::MIN),
        }
    }
}
