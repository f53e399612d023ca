use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// No unresolved card is face up.
    Idle,
    /// One card is face up waiting for its partner.
    OneSelected,
    /// A mismatched pair is face up and the board is locked until it is turned back.
    Resolving,
    Won,
}

impl EnginePhase {
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Resolving)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Per-game flip, match and win state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchEngine {
    board: Board,
    pair_count: PairCount,
    selected: Option<CardIndex>,
    pending_mismatch: Option<(CardIndex, CardIndex)>,
    move_count: MoveCount,
    matched_pairs: PairCount,
    timer: SessionTimer,
}

impl MatchEngine {
    pub fn new(board: Board) -> Self {
        let pair_count = board.pair_count();
        Self {
            board,
            pair_count,
            selected: None,
            pending_mismatch: None,
            move_count: 0,
            matched_pairs: 0,
            timer: SessionTimer::new(),
        }
    }

    pub fn phase(&self) -> EnginePhase {
        if self.matched_pairs == self.pair_count {
            EnginePhase::Won
        } else if self.pending_mismatch.is_some() {
            EnginePhase::Resolving
        } else if self.selected.is_some() {
            EnginePhase::OneSelected
        } else {
            EnginePhase::Idle
        }
    }

    pub fn is_locked(&self) -> bool {
        self.pending_mismatch.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.phase().is_finished()
    }

    /// Whether at least one card was flipped and the game is not won yet.
    pub fn is_in_progress(&self) -> bool {
        self.timer.is_started() && !self.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn card_at(&self, index: CardIndex) -> Option<&Card> {
        self.board.card(index)
    }

    pub fn selected(&self) -> Option<CardIndex> {
        self.selected
    }

    pub fn pending_mismatch(&self) -> Option<(CardIndex, CardIndex)> {
        self.pending_mismatch
    }

    pub fn move_count(&self) -> MoveCount {
        self.move_count
    }

    pub fn matched_pairs(&self) -> PairCount {
        self.matched_pairs
    }

    pub fn pair_count(&self) -> PairCount {
        self.pair_count
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> Seconds {
        self.timer.elapsed_secs(now)
    }

    pub fn can_flip(&self, index: CardIndex) -> bool {
        if self.is_locked() || self.is_finished() {
            return false;
        }
        self.board
            .card(index)
            .is_some_and(|card| !card.is_revealed())
    }

    /// Turns a card face up. Flips that are not allowed right now are ignored.
    pub fn flip(&mut self, index: CardIndex, now: DateTime<Utc>) -> Result<FlipOutcome> {
        let index = self.board.validate_index(index)?;

        if !self.can_flip(index) {
            log::trace!("ignoring flip at {} ({:?})", index, self.phase());
            return Ok(FlipOutcome::NoChange);
        }

        if self.move_count == 0 && self.matched_pairs == 0 && !self.timer.is_started() {
            self.timer.start(now);
        }

        self.board[index].set_face(CardFace::FaceUp);

        let Some(first) = self.selected else {
            log::trace!("selected {}", index);
            self.selected = Some(index);
            return Ok(FlipOutcome::Selected);
        };

        self.move_count += 1;

        if self.board[first].token() == self.board[index].token() {
            self.board[first].set_face(CardFace::Matched);
            self.board[index].set_face(CardFace::Matched);
            self.selected = None;
            self.matched_pairs += 1;
            log::debug!(
                "matched {} and {} ({}/{})",
                first,
                index,
                self.matched_pairs,
                self.pair_count
            );

            if self.matched_pairs == self.pair_count {
                debug_assert!(self.board.all_matched());
                self.timer.stop(now);
                let elapsed_secs = self.timer.elapsed_secs(now);
                log::info!("won in {} moves and {}s", self.move_count, elapsed_secs);
                Ok(FlipOutcome::Won {
                    moves: self.move_count,
                    elapsed_secs,
                })
            } else {
                Ok(FlipOutcome::Matched)
            }
        } else {
            log::debug!("mismatch between {} and {}, locking", first, index);
            self.pending_mismatch = Some((first, index));
            Ok(FlipOutcome::Mismatched {
                first,
                second: index,
            })
        }
    }

    /// Turns a mismatched pair back face down and unlocks the board. Only the first call after a mismatch has any
    /// effect.
    pub fn resolve_mismatch(&mut self) -> bool {
        let Some((first, second)) = self.pending_mismatch.take() else {
            return false;
        };
        self.board[first].set_face(CardFace::FaceDown);
        self.board[second].set_face(CardFace::FaceDown);
        self.selected = None;
        log::debug!("turned back {} and {}, unlocked", first, second);
        true
    }
}
