use alloc::format;
use alloc::string::String;
use core::time::Duration;
use chrono::{DateTime, Utc};

use crate::*;

/// Renders elapsed time the way the timer display shows it.
pub fn format_elapsed(secs: Seconds) -> String {
    format!("{}s", secs)
}

/// Owns everything one player session needs: the persisted profile, the difficulty policy and the running game.
#[derive(Debug)]
pub struct GameSession<S, P = AdaptivePolicy> {
    store: S,
    policy: P,
    evaluator: EngagementEvaluator,
    profile: PlayerProfile,
    config: BoardConfig,
    engine: MatchEngine,
    game: GameId,
}

impl<S: KeyValueStore, P: DifficultyPolicy> GameSession<S, P> {
    /// Delay between the winning flip and showing the win report.
    pub const WIN_REPORT_DELAY: Duration = Duration::from_millis(500);

    /// Loads the profile and deals the first game.
    pub fn new(store: S, policy: P, seed: u64, time_of_day: TimeOfDay) -> Result<Self> {
        let profile = load_profile(&store);
        let config = policy.board_config(&profile);
        let engine = MatchEngine::new(ShuffledBoardGenerator::new(seed).generate(&config)?);

        let mut session = Self {
            store,
            policy,
            evaluator: EngagementEvaluator,
            profile,
            config,
            engine,
            game: 0,
        };
        session.record_start(time_of_day);
        Ok(session)
    }

    /// Replaces the current game with a freshly dealt one. Abandoning a game in progress ends the win streak.
    pub fn new_game(&mut self, seed: u64, time_of_day: TimeOfDay) -> Result<()> {
        let config = self.policy.board_config(&self.profile);
        let board = ShuffledBoardGenerator::new(seed).generate(&config)?;

        if self.engine.is_in_progress() {
            log::debug!("abandoning game {} in progress", self.game);
            self.profile.reset_streak();
        }

        self.config = config;
        self.engine = MatchEngine::new(board);
        self.game = self.game.wrapping_add(1);
        self.record_start(time_of_day);
        Ok(())
    }

    fn record_start(&mut self, time_of_day: TimeOfDay) {
        log::info!(
            "game {} started: {} pairs at level {}",
            self.game,
            self.config.pair_count(),
            self.profile.difficulty_level.get()
        );
        self.profile.record_time_of_day(time_of_day);
        self.persist();
    }

    pub fn flip(
        &mut self,
        index: CardIndex,
        now: DateTime<Utc>,
        scheduler: &mut impl Scheduler,
    ) -> Result<FlipOutcome> {
        let outcome = self.engine.flip(index, now)?;
        if !outcome.has_update() {
            return Ok(outcome);
        }

        self.profile.record_token(self.engine.board()[index].token());

        match outcome {
            FlipOutcome::Mismatched { .. } => {
                scheduler.schedule(
                    self.config.flip_lock,
                    ScheduledTask::RevertMismatch { game: self.game },
                );
            }
            FlipOutcome::Won {
                moves,
                elapsed_secs,
            } => {
                let result = GameResult {
                    moves,
                    elapsed_secs,
                };
                let profile = core::mem::take(&mut self.profile);
                let Evaluation { profile, report } = self.evaluator.evaluate(profile, result, now);
                self.profile = profile;
                scheduler.schedule(
                    Self::WIN_REPORT_DELAY,
                    ScheduledTask::DeliverWinReport {
                        game: self.game,
                        report,
                    },
                );
            }
            FlipOutcome::NoChange | FlipOutcome::Selected | FlipOutcome::Matched => {}
        }

        self.persist();
        Ok(outcome)
    }

    /// Runs a task the scheduler handed back. Returns whether the board changed.
    pub fn run_task(&mut self, task: ScheduledTask, notifier: &mut impl Notifier) -> bool {
        match task {
            ScheduledTask::RevertMismatch { game } if game == self.game => {
                self.engine.resolve_mismatch()
            }
            ScheduledTask::RevertMismatch { game } => {
                log::debug!("dropping revert for replaced game {}", game);
                false
            }
            ScheduledTask::DeliverWinReport { game, report } => {
                log::debug!("delivering win report for game {}", game);
                notifier.notify_win(&report);
                false
            }
        }
    }

    fn persist(&mut self) {
        if let Err(err) = save_profile(&mut self.store, &self.profile) {
            log::error!("Could not save profile: {}", err);
        }
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn game_id(&self) -> GameId {
        self.game
    }

    pub fn phase(&self) -> EnginePhase {
        self.engine.phase()
    }

    pub fn move_count(&self) -> MoveCount {
        self.engine.move_count()
    }

    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> Seconds {
        self.engine.elapsed_secs(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn session() -> GameSession<MemoryStore> {
        GameSession::new(MemoryStore::new(), AdaptivePolicy, 42, TimeOfDay::Morning).unwrap()
    }

    /// Indices of both cards of every token, in board order of the first card.
    fn pairs(board: &Board) -> Vec<(CardIndex, CardIndex)> {
        let mut pairs = Vec::new();
        for (first, card) in board.iter() {
            if let Some((second, _)) = board
                .iter()
                .find(|&(other, other_card)| other > first && other_card.token() == card.token())
            {
                pairs.push((first, second));
            }
        }
        pairs
    }

    fn mismatched_pair(board: &Board) -> (CardIndex, CardIndex) {
        let first = board[0].token();
        let (second, _) = board
            .iter()
            .find(|(_, card)| card.token() != first)
            .unwrap();
        (0, second)
    }

    #[test]
    fn new_session_records_time_of_day_and_persists() {
        let session = session();

        assert_eq!(session.profile().preferred_time_of_day.morning, 1);
        assert_eq!(session.board().len(), 16);
        assert!(session.store().get(PlayerProfile::STORAGE_KEY).is_some());
    }

    #[test]
    fn mismatch_schedules_a_revert_after_the_lock() {
        let mut session = session();
        let mut scheduler = ManualScheduler::new();
        let (a, b) = mismatched_pair(session.board());

        session.flip(a, at(0), &mut scheduler).unwrap();
        session.flip(b, at(1), &mut scheduler).unwrap();

        assert!(scheduler.advance(Duration::from_millis(999)).is_empty());
        let tasks = scheduler.advance(Duration::from_millis(1));
        assert_eq!(tasks, alloc::vec![ScheduledTask::RevertMismatch { game: 0 }]);

        let mut reports = Vec::new();
        for task in tasks {
            assert!(session.run_task(task, &mut reports));
        }
        assert_eq!(session.phase(), EnginePhase::Idle);
        assert!(!session.board()[a].is_revealed());
        assert!(!session.board()[b].is_revealed());
    }

    #[test]
    fn accepted_flips_count_token_preferences() {
        let mut session = session();
        let mut scheduler = ManualScheduler::new();
        let token = session.board()[0].token();

        session.flip(0, at(0), &mut scheduler).unwrap();
        session.flip(0, at(0), &mut scheduler).unwrap();

        assert_eq!(session.profile().token_count(token), 1);
    }

    #[test]
    fn winning_delivers_report_once_and_updates_profile() {
        let mut session = session();
        let mut scheduler = ManualScheduler::new();
        let mut reports = Vec::new();

        for (a, b) in pairs(session.board()) {
            session.flip(a, at(0), &mut scheduler).unwrap();
            session.flip(b, at(20), &mut scheduler).unwrap();
        }

        assert_eq!(session.phase(), EnginePhase::Won);
        assert!(reports.is_empty());
        for task in scheduler.advance(GameSession::<MemoryStore>::WIN_REPORT_DELAY) {
            session.run_task(task, &mut reports);
        }
        assert!(scheduler.run_all().is_empty());

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].moves, 8);
        assert_eq!(reports[0].elapsed_secs, 20);
        assert_eq!(session.profile().games_played, 1);
        assert_eq!(session.profile().average_moves, 8.0);
        assert_eq!(session.profile().difficulty_level, DifficultyLevel::new(2));

        let stored = load_profile(session.store());
        assert_eq!(&stored, session.profile());
    }

    #[test]
    fn stale_revert_does_not_touch_the_next_game() {
        let mut session = session();
        let mut scheduler = ManualScheduler::new();
        let (a, b) = mismatched_pair(session.board());
        session.flip(a, at(0), &mut scheduler).unwrap();
        session.flip(b, at(1), &mut scheduler).unwrap();

        session.new_game(7, TimeOfDay::Night).unwrap();
        session.flip(0, at(2), &mut scheduler).unwrap();

        let mut reports = Vec::new();
        for task in scheduler.run_all() {
            assert!(!session.run_task(task, &mut reports));
        }
        assert_eq!(session.phase(), EnginePhase::OneSelected);
        assert!(session.board()[0].is_revealed());
    }

    #[test]
    fn abandoning_a_game_in_progress_resets_streak() {
        let store = MemoryStore::with_entry(PlayerProfile::STORAGE_KEY, r#"{"winStreak": 3}"#);
        let mut session =
            GameSession::new(store, StaticPolicy, 1, TimeOfDay::Afternoon).unwrap();
        let mut scheduler = ManualScheduler::new();

        session.new_game(2, TimeOfDay::Afternoon).unwrap();
        assert_eq!(session.profile().win_streak, 3);

        session.flip(0, at(0), &mut scheduler).unwrap();
        session.new_game(3, TimeOfDay::Afternoon).unwrap();

        assert_eq!(session.profile().win_streak, 0);
        assert_eq!(session.profile().preferred_time_of_day.afternoon, 3);
        assert_eq!(session.game_id(), 2);
    }

    #[test]
    fn board_size_follows_stored_difficulty() {
        let store = MemoryStore::with_entry(PlayerProfile::STORAGE_KEY, r#"{"difficultyLevel": 4}"#);
        let session = GameSession::new(store, AdaptivePolicy, 9, TimeOfDay::Evening).unwrap();

        assert_eq!(session.board().len(), 22);
        assert_eq!(session.engine().pair_count(), 11);
    }

    #[test]
    fn elapsed_time_formats_with_suffix() {
        assert_eq!(format_elapsed(0), "0s");
        assert_eq!(format_elapsed(73), "73s");
    }
}
