#![no_std]

extern crate alloc;

pub use board::*;
pub use card::*;
pub use difficulty::*;
pub use engagement::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use profile::*;
pub use schedule::*;
pub use session::*;
pub use store::*;
pub use timer::*;
pub use token::*;
pub use types::*;

mod board;
mod card;
mod difficulty;
mod engagement;
mod engine;
mod error;
mod generator;
mod profile;
mod schedule;
mod session;
mod store;
mod timer;
mod token;
mod types;

/// Outcome of flipping a card
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// The flip was not allowed and nothing changed.
    NoChange,
    /// First card of a pair turned up.
    Selected,
    /// Second card matched the first.
    Matched,
    /// Second card did not match, the board is locked until the pair is turned back.
    Mismatched { first: CardIndex, second: CardIndex },
    /// Last pair found.
    Won {
        moves: MoveCount,
        elapsed_secs: Seconds,
    },
}

impl FlipOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use FlipOutcome::*;
        match self {
            NoChange => false,
            Selected => true,
            Matched => true,
            Mismatched { .. } => true,
            Won { .. } => true,
        }
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won { .. })
    }
}
