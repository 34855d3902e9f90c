//! Integration tests for the HEXPRIME engine
//!
//! Drives the public surface end to end: boards, sessions, the manager and
//! both automated strategies.

use hexprime_core::{
    AutomatedTurn, Board, Coord, Coordinator, Decision, Game, GameError, MatchConfig, PlayerId,
    SessionManager, Strategy, Token,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn match_of(size: usize, one: &str, two: &str) -> SessionManager {
    SessionManager::new(MatchConfig::new(size, one, two)).unwrap()
}

/// Play `cells` through the manager, alternating seats
fn place_all(manager: &mut SessionManager, cells: &[(i64, i64)]) {
    for &(x, y) in cells {
        manager.place_token(x, y).unwrap();
    }
}

/// Let two coordinators play one game to the end, checking the board
/// after every decision
fn self_play(size: usize, one: Strategy, two: Strategy) -> Game {
    let mut game = Game::new("Arena", PlayerId::One, size);
    let seats = [
        Coordinator::new(PlayerId::One, one),
        Coordinator::new(PlayerId::Two, two),
    ];

    for _ in 0..=size * size {
        if game.is_over() {
            break;
        }
        let coordinator = seats[game.current_player().index()];
        let before = game.board().tokens().to_vec();
        let decision = coordinator.decide(&mut game);
        assert_eq!(game.board().tokens(), &before[..], "decision modified the board");

        match decision {
            Decision::Place(at) => {
                game.place(at).unwrap();
            }
            Decision::Swap => {
                game.swap().unwrap();
            }
            Decision::Pass => panic!("{:?} passed with free cells left", coordinator.strategy()),
        }
    }
    game
}

// ============================================================================
// BOARD TESTS
// ============================================================================

#[test]
fn test_board_cell_count() {
    for size in [5, 7, 9, 13, 21] {
        let board = Board::new(size);
        assert_eq!(board.cells().count(), size * size);
        assert_eq!(board.empty_coords().len(), size * size);
    }
}

#[test]
fn test_adjacency_is_symmetric() {
    for size in [5, 9] {
        let board = Board::new(size);
        for at in board.coords() {
            for n in board.neighbors(at) {
                assert!(board.neighbors(n).any(|back| back == at), "{at} -> {n}");
            }
        }
    }
}

#[test]
fn test_render_is_idempotent() {
    let mut manager = match_of(5, "P1", "P2");
    place_all(&mut manager, &[(2, 2), (3, 1)]);
    let board = manager.active_game().board();
    assert_eq!(board.to_string(), board.to_string());
    assert_eq!(
        board.to_string(),
        ". . . . .\n . . . O .\n  . . X . .\n   . . . . .\n    . . . . ."
    );
}

// ============================================================================
// SESSION TESTS
// ============================================================================

#[test]
fn test_north_south_win_marks_column() {
    let mut manager = match_of(5, "P1", "P2");
    place_all(
        &mut manager,
        &[(0, 0), (2, 0), (0, 1), (2, 1), (0, 2), (2, 2), (0, 3), (2, 3)],
    );
    assert!(!manager.active_game().is_over());

    let outcome = manager.place_token(0, 4).unwrap();
    assert_eq!(outcome.winner.as_deref(), Some("P1"));

    let game = manager.active_game();
    assert_eq!(game.winner_token(), Some(Token::X));
    for y in 0..5 {
        assert_eq!(game.winning_board().token(Coord::new(0, y)), Token::Win);
    }
    assert_eq!(
        game.winning_board().to_string(),
        "* . O . .\n * . O . .\n  * . O . .\n   * . O . .\n    * . . . ."
    );
}

#[test]
fn test_swap_property() {
    let mut manager = match_of(7, "P1", "P2");
    manager.place_token(3, 2).unwrap();
    let game = manager.active_game();
    let tokens_before = [game.token_of(PlayerId::One), game.token_of(PlayerId::Two)];
    let turns_before = game.turn_count();

    manager.request_swap().unwrap();
    let game = manager.active_game();
    assert_eq!(game.moves().len(), 1);
    assert_eq!(game.turn_count(), turns_before + 1);
    assert_eq!(game.token_of(PlayerId::One), tokens_before[1]);
    assert_eq!(game.token_of(PlayerId::Two), tokens_before[0]);

    assert_eq!(manager.request_swap(), Err(GameError::SwapNotAllowed));
}

#[test]
fn test_history_most_recent_first() {
    let mut manager = match_of(5, "P1", "P2");
    place_all(&mut manager, &[(0, 0), (1, 0)]);

    let latest: Vec<String> = manager
        .query_history(None)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(latest, vec!["P2: 1 0"]);

    let both: Vec<String> = manager
        .query_history(Some(2))
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(both, vec!["P2: 1 0", "P1: 0 0"]);
}

#[test]
fn test_sessions_are_independent() {
    let mut manager = match_of(5, "P1", "P2");
    place_all(&mut manager, &[(0, 0), (1, 0), (2, 0)]);
    manager.start_new_session("Side").unwrap();
    place_all(&mut manager, &[(4, 4)]);

    assert_eq!(manager.active_game().moves().len(), 1);
    let prime = manager.session("Prime").unwrap();
    assert_eq!(prime.moves().len(), 3);
    assert!(prime.board().is_empty_at(Coord::new(4, 4)));

    manager.switch_session("Prime").unwrap();
    assert_eq!(manager.current_player().name(), "P2");
}

// ============================================================================
// AUTOMATED PLAYER TESTS
// ============================================================================

#[test]
fn test_path_directed_first_move() {
    let mut game = Game::new("Prime", PlayerId::One, 5);
    let hero = Coordinator::new(PlayerId::One, Strategy::PathDirected);
    assert_eq!(hero.decide(&mut game), Decision::Place(Coord::new(0, 0)));
    assert!(game.board().tokens().iter().all(|&t| t == Token::Empty));
}

#[test]
fn test_automated_reply_through_manager() {
    let mut manager = match_of(5, "P1", "HeroAI");
    manager.place_token(2, 2).unwrap();
    assert!(manager.is_automated_turn());

    match manager.play_automated_turn().unwrap() {
        AutomatedTurn::Placed(outcome) => {
            assert_eq!(outcome.player, "HeroAI");
            assert_eq!(outcome.at, Coord::new(0, 0));
        }
        other => panic!("unexpected turn {other:?}"),
    }
    assert!(!manager.is_automated_turn());
    assert_eq!(
        manager.play_automated_turn(),
        Err(GameError::NotAutomated("P1".to_string()))
    );
}

#[test]
fn test_automated_block() {
    let mut manager = match_of(5, "P1", "BogoAI");
    // odd opening, so no swap; BogoAI mirrors and P1 builds column 1
    manager.place_token(1, 0).unwrap();
    for y in 1..4 {
        manager.play_automated_turn().unwrap();
        manager.place_token(1, y).unwrap();
    }

    let before = manager.active_game().board().tokens().to_vec();
    assert_eq!(
        manager.request_automated_move().unwrap(),
        Decision::Place(Coord::new(0, 4))
    );
    assert_eq!(manager.active_game().board().tokens(), &before[..]);
}

#[test]
fn test_self_play_reaches_a_winner() {
    for (one, two) in [
        (Strategy::PathDirected, Strategy::GreedyScan),
        (Strategy::GreedyScan, Strategy::PathDirected),
        (Strategy::GreedyScan, Strategy::GreedyScan),
    ] {
        let game = self_play(7, one, two);
        assert!(game.is_over(), "{one:?} vs {two:?} never finished");
        assert!(game.winner().is_some());
    }
}
