use std::collections::{HashMap, hash_map::Entry};

use itertools::Itertools;
use log::info;
use pyraminx_core::{MacroMove, Move, PuzzleState, Token, expand};

fn random_token(rng: &mut fastrand::Rng) -> Token {
    if rng.bool() {
        Token::from(Move::ALL[rng.usize(..Move::ALL.len())])
    } else {
        Token::from(MacroMove::ALL[rng.usize(..MacroMove::ALL.len())])
    }
}

#[test_log::test]
fn test_reversed_inverse_sequence_restores_state() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..100 {
        let mut state = PuzzleState::solved();
        state.scramble(&mut rng, 20);
        let before = state.clone();

        let tokens = (0..rng.usize(1..30))
            .map(|_| random_token(&mut rng))
            .collect_vec();
        for &token in &tokens {
            state.apply_token(token);
        }
        for token in tokens.iter().rev() {
            state.apply_token(token.inverse());
        }
        assert_eq!(state, before);
    }
}

#[test_log::test]
fn test_expanded_sequence_matches_macros() {
    let mut rng = fastrand::Rng::with_seed(43);
    for _ in 0..100 {
        let tokens = (0..10).map(|_| random_token(&mut rng)).collect_vec();
        let written = tokens.iter().join(" ");
        let expanded = tokens
            .iter()
            .flat_map(|token| expand(&token.to_string()))
            .join(" ");

        let mut with_macros = PuzzleState::solved();
        with_macros.scramble(&mut rng, 10);
        let mut with_primitives = with_macros.clone();

        with_macros.apply_sequence(&written).unwrap();
        let applied = with_primitives.apply_sequence(&expanded).unwrap();
        assert!(applied.iter().all(|token| matches!(token, Token::Primitive(_))));
        assert_eq!(with_macros, with_primitives);
    }
}

#[test_log::test]
fn test_colour_counts_survive_long_scrambles() {
    let mut rng = fastrand::Rng::with_seed(44);
    let mut state = PuzzleState::solved();
    for _ in 0..50 {
        state.scramble(&mut rng, 40);
        assert_eq!(state.color_counts(), [9; 4]);
    }
    info!("Scrambled to\n{state}");
}

#[test_log::test]
fn test_scenario_and_undo() {
    for (sequence, undo) in [("r l' r' l", "l' r l r'"), ("R L' R' L", "L' R L R'")] {
        let mut state = PuzzleState::solved();
        state.apply_sequence(sequence).unwrap();
        state.apply_sequence(undo).unwrap();
        assert_eq!(state, PuzzleState::solved());
    }
}

#[test_log::test]
fn test_macro_group_depths() {
    let mut depths = HashMap::from([(PuzzleState::solved(), 0)]);
    let mut frontier = vec![PuzzleState::solved()];
    let mut depth = 0;
    while !frontier.is_empty() {
        depth += 1;
        let mut next = vec![];
        for state in &frontier {
            for macro_move in MacroMove::ALL {
                let mut turned = state.clone();
                turned.apply_token(Token::from(macro_move));
                if let Entry::Vacant(entry) = depths.entry(turned.clone()) {
                    entry.insert(depth);
                    next.push(turned);
                }
            }
        }
        frontier = next;
    }

    assert_eq!(depths.len(), 11520);
    assert_eq!(depths.values().max(), Some(&8));
    assert!(depths.keys().all(|state| state.small_corners_solved() == 4));

    let middles_solved = depths
        .iter()
        .filter(|(state, _)| state.middle_pieces_solved() == 3)
        .map(|(_, &depth)| depth)
        .collect_vec();
    assert_eq!(middles_solved.len(), 12);
    assert_eq!(middles_solved.iter().max(), Some(&6));
    info!("Macro group of {} states", depths.len());
}
