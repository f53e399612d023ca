use std::hint::black_box;

use chrono::{DateTime, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use memorito_core::*;

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

fn full_game(level: u8, seed: u64) -> FlipOutcome {
    let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
    let config = AdaptivePolicy.board_config(&PlayerProfile {
        difficulty_level: DifficultyLevel::new(level),
        ..Default::default()
    });
    let board = ShuffledBoardGenerator::new(seed).generate(&config).unwrap();
    let order = pairs(&board);
    let mut engine = MatchEngine::new(board);

    let mut outcome = FlipOutcome::NoChange;
    for (a, b) in order {
        engine.flip(a, now).unwrap();
        outcome = engine.flip(b, now).unwrap();
    }
    outcome
}

fn bench_playthrough(c: &mut Criterion) {
    let mut group = c.benchmark_group("playthrough");
    for level in [1, 5] {
        group.bench_function(format!("level_{level}"), |b| {
            b.iter(|| full_game(black_box(level), black_box(0x5eed)))
        });
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
    let profile = PlayerProfile {
        games_played: 40,
        average_moves: 13.2,
        last_play_time: DateTime::from_timestamp(1_699_000_000, 0),
        ..Default::default()
    };
    let result = GameResult {
        moves: 11,
        elapsed_secs: 48,
    };

    c.bench_function("evaluate", |b| {
        b.iter(|| EngagementEvaluator.evaluate(black_box(profile.clone()), result, now))
    });
}

criterion_group!(benches, bench_playthrough, bench_evaluate);
criterion_main!(benches);
