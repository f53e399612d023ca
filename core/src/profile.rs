use alloc::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// How many games were started in each part of the day.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOfDayCounts {
    pub morning: u32,
    pub afternoon: u32,
    pub evening: u32,
    pub night: u32,
}

impl TimeOfDayCounts {
    pub const fn count(&self, time_of_day: TimeOfDay) -> u32 {
        use TimeOfDay::*;
        match time_of_day {
            Morning => self.morning,
            Afternoon => self.afternoon,
            Evening => self.evening,
            Night => self.night,
        }
    }

    pub fn record(&mut self, time_of_day: TimeOfDay) {
        use TimeOfDay::*;
        let slot = match time_of_day {
            Morning => &mut self.morning,
            Afternoon => &mut self.afternoon,
            Evening => &mut self.evening,
            Night => &mut self.night,
        };
        *slot = slot.saturating_add(1);
    }

    /// Most played part of the day, earliest bucket wins ties. `None` before any game.
    pub fn favorite(&self) -> Option<TimeOfDay> {
        TimeOfDay::ALL
            .into_iter()
            .filter(|&time_of_day| self.count(time_of_day) > 0)
            .rev()
            .max_by_key(|&time_of_day| self.count(time_of_day))
    }
}

/// Aggregate statistics about the player across games.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerProfile {
    pub games_played: u32,
    pub average_moves: f64,
    /// Average game time in seconds.
    pub average_time: f64,
    pub win_streak: u32,
    pub last_play_time: Option<DateTime<Utc>>,
    pub engagement_score: f64,
    pub difficulty_level: DifficultyLevel,
    pub preferred_time_of_day: TimeOfDayCounts,
    pub preferred_tokens: BTreeMap<Token, u32>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            games_played: 0,
            average_moves: 0.0,
            average_time: 0.0,
            win_streak: 0,
            last_play_time: None,
            engagement_score: 0.0,
            difficulty_level: DifficultyLevel::MIN,
            preferred_time_of_day: TimeOfDayCounts::default(),
            preferred_tokens: BTreeMap::new(),
        }
    }
}

impl PlayerProfile {
    pub const STORAGE_KEY: &'static str = "memorito:profile";

    pub const MAX_ENGAGEMENT: f64 = 100.0;

    /// Clamps values a hand-edited or outdated record could have out of range.
    pub fn normalized(mut self) -> Self {
        self.average_moves = non_negative(self.average_moves);
        self.average_time = non_negative(self.average_time);
        self.engagement_score = clamp_engagement(self.engagement_score);
        self
    }

    pub fn record_time_of_day(&mut self, time_of_day: TimeOfDay) {
        self.preferred_time_of_day.record(time_of_day);
    }

    pub fn record_token(&mut self, token: Token) {
        let count = self.preferred_tokens.entry(token).or_default();
        *count = count.saturating_add(1);
    }

    pub fn token_count(&self, token: Token) -> u32 {
        self.preferred_tokens.get(&token).copied().unwrap_or(0)
    }

    /// Most flipped token, the first in token order wins ties.
    pub fn favorite_token(&self) -> Option<Token> {
        self.preferred_tokens
            .iter()
            .rev()
            .max_by_key(|&(_, &count)| count)
            .map(|(&token, _)| token)
    }

    pub fn reset_streak(&mut self) {
        if self.win_streak > 0 {
            log::debug!("win streak of {} reset", self.win_streak);
        }
        self.win_streak = 0;
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

pub(crate) fn clamp_engagement(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, PlayerProfile::MAX_ENGAGEMENT)
    }
}
