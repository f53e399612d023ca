use alloc::vec::Vec;

use super::*;

/// Places both cards of every configured token and shuffles them with a seeded RNG, so a seed always reproduces
/// the same board.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffledBoardGenerator {
    seed: u64,
}

impl ShuffledBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for ShuffledBoardGenerator {
    fn generate(self, config: &BoardConfig) -> Result<Board> {
        use rand::prelude::*;

        let mut tokens: Vec<Token> = config
            .tokens
            .iter()
            .flat_map(|&token| [token, token])
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        tokens.shuffle(&mut rng);
        log::debug!(
            "generated board with {} pairs from seed {}",
            config.pair_count(),
            self.seed
        );

        Board::from_tokens(&tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BoardConfig {
        AdaptivePolicy.board_config(&PlayerProfile {
            difficulty_level: DifficultyLevel::new(3),
            ..Default::default()
        })
    }

    #[test]
    fn every_token_lands_on_exactly_two_cards() {
        let config = config();
        let board = ShuffledBoardGenerator::new(7).generate(&config).unwrap();

        assert_eq!(board.len(), config.card_count());
        for token in &config.tokens {
            let count = board
                .cards()
                .iter()
                .filter(|card| card.token() == *token)
                .count();
            assert_eq!(count, 2, "{:?}", token);
        }
    }

    #[test]
    fn same_seed_gives_same_board() {
        let config = config();

        let a = ShuffledBoardGenerator::new(1234).generate(&config).unwrap();
        let b = ShuffledBoardGenerator::new(1234).generate(&config).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_config_tokens_are_rejected() {
        let config = BoardConfig {
            tokens: alloc::vec![Token::Apple, Token::Apple],
            flip_lock: BoardConfig::FLIP_LOCK,
            flip_speed_ms: 900,
        };

        assert_eq!(
            ShuffledBoardGenerator::new(0).generate(&config),
            Err(GameError::UnpairedToken)
        );
    }
}
