use alloc::format;
use alloc::string::String;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::clamp_engagement;
use crate::*;

/// Moves and time of a completed game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub moves: MoveCount,
    pub elapsed_secs: Seconds,
}

/// What the player is told after winning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WinReport {
    pub moves: MoveCount,
    pub elapsed_secs: Seconds,
    pub engagement_score: f64,
    pub reward_interval_hours: f64,
}

impl WinReport {
    pub const OUTSTANDING_SCORE: f64 = 80.0;

    pub fn is_outstanding(&self) -> bool {
        self.engagement_score >= Self::OUTSTANDING_SCORE
    }

    pub fn message(&self) -> String {
        let mut message = format!(
            "🎉 You win in {} moves and {}s!\n",
            self.moves, self.elapsed_secs
        );
        if self.is_outstanding() {
            message.push_str("🌟 Amazing performance!\n");
        }
        message.push_str(&format!(
            "Come back in {:.1} hours for a special reward!",
            self.reward_interval_hours
        ));
        message
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub profile: PlayerProfile,
    pub report: WinReport,
}

/// Folds a won game into the player's profile and works out the reward pacing.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EngagementEvaluator;

impl EngagementEvaluator {
    pub const TARGET_MOVES: f64 = 12.0;
    pub const MOVES_TOLERANCE: f64 = 2.0;
    pub const RETURN_BOOST: f64 = 20.0;
    pub const RETURN_AFTER_HOURS: f64 = 24.0;
    pub const MIN_REWARD_INTERVAL_HOURS: f64 = 2.0;
    pub const MAX_REWARD_INTERVAL_HOURS: f64 = 5.0;

    pub fn evaluate(
        &self,
        mut profile: PlayerProfile,
        result: GameResult,
        now: DateTime<Utc>,
    ) -> Evaluation {
        let GameResult {
            moves,
            elapsed_secs,
        } = result;

        profile.games_played = profile.games_played.saturating_add(1);
        profile.win_streak = profile.win_streak.saturating_add(1);

        let n = f64::from(profile.games_played);
        profile.average_moves = running_mean(profile.average_moves, f64::from(moves), n);
        profile.average_time = running_mean(profile.average_time, f64::from(elapsed_secs), n);

        profile.engagement_score = Self::engagement_score(moves, elapsed_secs, profile.win_streak);
        profile.difficulty_level =
            Self::adjust_difficulty(profile.difficulty_level, profile.average_moves);

        // must read last_play_time before it is overwritten below
        profile.engagement_score =
            Self::apply_return_boost(profile.engagement_score, profile.last_play_time, now);
        let reward_interval_hours = Self::reward_interval_hours(profile.engagement_score);
        profile.last_play_time = Some(now);

        log::info!(
            "game {} evaluated: score {:.1}, level {}, reward in {:.1}h",
            profile.games_played,
            profile.engagement_score,
            profile.difficulty_level.get(),
            reward_interval_hours
        );

        let report = WinReport {
            moves,
            elapsed_secs,
            engagement_score: profile.engagement_score,
            reward_interval_hours,
        };
        Evaluation { profile, report }
    }

    /// Combined speed, efficiency and streak score, capped per component and overall.
    pub fn engagement_score(moves: MoveCount, elapsed_secs: Seconds, win_streak: u32) -> f64 {
        let time_score = (f64::from(elapsed_secs) / 60.0 * 20.0).min(100.0);
        let moves_score = (f64::from(moves) / 20.0 * 20.0).min(100.0);
        let streak_bonus = (f64::from(win_streak) * 10.0).min(60.0);
        clamp_engagement(time_score + moves_score + streak_bonus)
    }

    /// Single-step move toward the target move count, bounded to the level range.
    pub fn adjust_difficulty(level: DifficultyLevel, average_moves: f64) -> DifficultyLevel {
        let diff = average_moves - Self::TARGET_MOVES;
        if diff < -Self::MOVES_TOLERANCE {
            level.harder()
        } else if diff > Self::MOVES_TOLERANCE {
            level.easier()
        } else {
            level
        }
    }

    /// Adds the one-time boost when the previous game was more than a day ago.
    pub fn apply_return_boost(
        score: f64,
        last_play_time: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> f64 {
        let Some(last_play_time) = last_play_time else {
            return score;
        };
        let hours_since = (now - last_play_time).num_milliseconds() as f64 / 3_600_000.0;
        if hours_since > Self::RETURN_AFTER_HOURS {
            log::debug!("returning after {:.1}h, boosting engagement", hours_since);
            clamp_engagement(score + Self::RETURN_BOOST)
        } else {
            score
        }
    }

    pub fn reward_interval_hours(score: f64) -> f64 {
        (Self::MAX_REWARD_INTERVAL_HOURS - score / 20.0).max(Self::MIN_REWARD_INTERVAL_HOURS)
    }
}

fn running_mean(mean: f64, value: f64, n: f64) -> f64 {
    (mean * (n - 1.0) + value) / n
}
