use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use serde::{Deserialize, Serialize};

use crate::*;

/// Ordered cards of one game. Every token appears on exactly two cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Builds a board from the face of every card, in board order.
    pub fn from_tokens(tokens: &[Token]) -> Result<Self> {
        if tokens.is_empty() {
            return Err(GameError::EmptyBoard);
        }
        if tokens.len() > usize::from(CardIndex::MAX) + 1 {
            return Err(GameError::BoardTooLarge);
        }

        let mut counts: BTreeMap<Token, usize> = BTreeMap::new();
        for &token in tokens {
            *counts.entry(token).or_default() += 1;
        }
        if let Some((token, count)) = counts.iter().find(|&(_, &count)| count != 2) {
            log::error!("token {:?} appears {} times, expected 2", token, count);
            return Err(GameError::UnpairedToken);
        }

        Ok(Self {
            cards: tokens.iter().copied().map(Card::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> PairCount {
        (self.cards.len() / 2).try_into().unwrap_or(PairCount::MAX)
    }

    pub fn validate_index(&self, index: CardIndex) -> Result<CardIndex> {
        if usize::from(index) < self.cards.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidCardIndex)
        }
    }

    pub fn card(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(usize::from(index))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardIndex, &Card)> {
        // from_tokens caps the length, so every position fits a CardIndex
        (0..=CardIndex::MAX).zip(self.cards.iter())
    }

    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(Card::is_matched)
    }
}

impl Index<CardIndex> for Board {
    type Output = Card;

    fn index(&self, index: CardIndex) -> &Self::Output {
        &self.cards[usize::from(index)]
    }
}

impl IndexMut<CardIndex> for Board {
    fn index_mut(&mut self, index: CardIndex) -> &mut Self::Output {
        &mut self.cards[usize::from(index)]
    }
}
