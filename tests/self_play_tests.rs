//! Full games between two searches, checked against an independent
//! five-in-a-row oracle.

use gomoku_mcts::board::bitboard::has_five;
use gomoku_mcts::{
    Agent, BoardState, GameResult, MctsSearch, Player, SearchAgent, SearchConfig, CELL_COUNT,
};

/// Result the final position must report, computed from the stones alone.
fn oracle(state: &BoardState) -> Option<GameResult> {
    let first = has_five(state.stones(Player::First));
    let second = has_five(state.stones(Player::Second));
    assert!(!(first && second), "both sides hold five");
    if first {
        Some(GameResult::Winner(Player::First))
    } else if second {
        Some(GameResult::Winner(Player::Second))
    } else if state.legal_moves().is_empty() {
        Some(GameResult::Draw)
    } else {
        None
    }
}

// =============================================================================
// Search vs Search
// =============================================================================

fn play_out(seed_first: u64, seed_second: u64, iterations: u32) -> (BoardState, u32) {
    let mut searches = [
        MctsSearch::from_start(SearchConfig::default().with_seed(seed_first)),
        MctsSearch::from_start(SearchConfig::default().with_seed(seed_second)),
    ];
    let mut state = BoardState::new();
    let mut plies = 0;

    while !state.is_terminal() {
        let mover = match state.current_player() {
            Player::First => 0,
            Player::Second => 1,
        };
        let mv = searches[mover].choose_move(iterations).unwrap();
        searches[1 - mover].advance(mv).unwrap();
        state.play(mv).unwrap();
        plies += 1;

        assert_eq!(*searches[0].root_state(), state);
        assert_eq!(*searches[1].root_state(), state);
        assert!(plies as usize <= CELL_COUNT);
    }
    (state, plies)
}

#[test]
fn test_self_play_terminates_with_correct_result() {
    let (state, plies) = play_out(1, 2, 50);

    assert!(state.is_terminal());
    assert_eq!(state.move_count(), plies);
    assert_eq!(state.result(), oracle(&state));
    assert!(state.result().is_some());
}

#[test]
fn test_self_play_first_move_is_centre() {
    let mut search = MctsSearch::from_start(SearchConfig::default().with_seed(9));
    assert_eq!(search.choose_move(50).unwrap(), gomoku_mcts::CENTRE);
}

#[test]
fn test_self_play_is_reproducible() {
    let (a, plies_a) = play_out(5, 6, 30);
    let (b, plies_b) = play_out(5, 6, 30);
    assert_eq!(a, b);
    assert_eq!(plies_a, plies_b);
}

#[test]
fn test_finished_game_refuses_search() {
    let (state, _) = play_out(3, 4, 20);
    let mut search = MctsSearch::new(state, SearchConfig::default());
    assert!(search.search(10).is_err());
}

// =============================================================================
// Agents
// =============================================================================

#[test]
fn test_agents_play_full_game() {
    let config = SearchConfig::default().with_iterations(40);
    let mut agents: Vec<Box<dyn Agent>> = vec![
        Box::new(SearchAgent::new(config.clone().with_seed(11))),
        Box::new(SearchAgent::new(config.with_seed(12))),
    ];
    let mut state = BoardState::new();

    while !state.is_terminal() {
        let mover = match state.current_player() {
            Player::First => 0,
            Player::Second => 1,
        };
        let mv = agents[mover].choose_move(&state).unwrap();
        state.play(mv).unwrap();
        for agent in agents.iter_mut() {
            agent.observe_move(mv).unwrap();
        }
    }

    assert_eq!(state.result(), oracle(&state));
    assert!(state.move_count() as usize <= CELL_COUNT);
}
