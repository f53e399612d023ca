use serde::{Deserialize, Serialize};

use crate::Token;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    FaceDown,
    /// Revealed but not yet part of a found pair.
    FaceUp,
    Matched,
}

impl Default for CardFace {
    fn default() -> Self {
        Self::FaceDown
    }
}

/// Canonical card state stored by the match engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    token: Token,
    face: CardFace,
}

impl Card {
    pub const fn new(token: Token) -> Self {
        Self {
            token,
            face: CardFace::FaceDown,
        }
    }

    pub const fn token(&self) -> Token {
        self.token
    }

    pub const fn face(&self) -> CardFace {
        self.face
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.face, CardFace::FaceUp | CardFace::Matched)
    }

    pub const fn is_matched(&self) -> bool {
        matches!(self.face, CardFace::Matched)
    }

    pub(crate) fn set_face(&mut self, face: CardFace) {
        self.face = face;
    }
}
