use engine::{GameLogic, HeadlessRunner};

use twenty48::board::{Board, Direction, EMPTY};
use twenty48::playtest::Twenty48Logic;
use twenty48::state::{GameState, MoveOutcome};

fn state(rows: Vec<Vec<u64>>) -> GameState {
    GameState::new(Board::from_cells(rows, 1).expect("valid test grid"))
}

#[test]
fn changing_move_spawns_one_tile() {
    let mut game = state(vec![vec![2, 0, 0], vec![0, 0, 0], vec![0, 0, 0]]);

    let outcome = game.apply(Direction::Right);
    assert!(outcome.moved);
    assert!(!outcome.game_over);
    let (row, col) = outcome.spawned.expect("a tile spawns after a move");
    assert_eq!(game.board().cell(row, col), Some(2));
    assert_eq!(game.board().cell(0, 2), Some(2));
    assert_eq!(game.board().empty_cells().len(), 7);
    assert_eq!(game.moves(), 1);
}

#[test]
fn no_op_move_spawns_nothing() {
    let mut game = state(vec![vec![2, 0], vec![0, 0]]);
    let before = game.board().cells().to_vec();

    assert_eq!(game.apply(Direction::Left), MoveOutcome::default());
    assert_eq!(game.apply(Direction::Up), MoveOutcome::default());
    assert_eq!(game.board().cells(), before.as_slice());
    assert_eq!(game.moves(), 0);
}

#[test]
fn filling_the_last_cell_can_end_the_game() {
    // Sliding right leaves exactly one hole at (0, 0); the spawned 2 sits next to a 4 and an 8.
    let mut game = state(vec![vec![4, 0], vec![8, 16]]);

    let outcome = game.apply(Direction::Right);
    assert!(outcome.moved);
    assert_eq!(outcome.spawned, Some((0, 0)));
    assert!(outcome.game_over);
    assert!(game.is_game_over());
    assert_eq!(game.board().cells(), &[vec![2, 4], vec![8, 16]]);
}

#[test]
fn input_after_game_over_is_ignored() {
    let mut game = state(vec![vec![2, 4], vec![4, 2]]);
    assert!(game.is_game_over());

    for direction in Direction::ALL {
        assert_eq!(game.apply(direction), MoveOutcome::default());
    }
}

#[test]
fn score_accumulates_merged_values() {
    let mut game = state(vec![vec![2, 2, 4, 4], vec![0; 4], vec![0; 4], vec![0; 4]]);
    game.apply(Direction::Left);
    assert_eq!(game.score(), 12);
    assert_eq!(game.board().cells()[0][..2], [4, 8]);
}

#[test]
fn headless_runner_replays_seeded_sessions() {
    let logic = Twenty48Logic::new(4, 4, 2024).expect("positive dimensions");
    let inputs = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    let mut first = HeadlessRunner::new(logic.clone());
    first.run(inputs);
    let mut second = HeadlessRunner::new(logic);
    second.run(inputs);

    assert_eq!(first.history().len(), inputs.len() + 1);
    for (a, b) in first.history().iter().zip(second.history()) {
        assert_eq!(a.board().cells(), b.board().cells());
        assert_eq!(a.score(), b.score());
    }
}

#[test]
fn logic_step_leaves_the_previous_state_alone() {
    let logic = Twenty48Logic::new(3, 3, 8).expect("positive dimensions");
    let initial = logic.initial_state();
    let tiles = |s: &GameState| {
        s.board()
            .cells()
            .iter()
            .flatten()
            .filter(|&&v| v != EMPTY)
            .count()
    };
    assert_eq!(tiles(&initial), 1);

    let snapshot = initial.board().cells().to_vec();
    for direction in Direction::ALL {
        let _ = logic.step(&initial, direction);
    }
    assert_eq!(initial.board().cells(), snapshot.as_slice());
}

#[test]
fn logic_rejects_empty_boards() {
    assert!(Twenty48Logic::new(0, 4, 1).is_err());
}

#[test]
fn random_play_eventually_ends_on_a_small_board() {
    let mut game = GameState::new(Board::seeded(2, 2, 77).expect("positive dimensions"));
    let mut turns = 0;
    while !game.is_game_over() && turns < 10_000 {
        game.apply(Direction::ALL[turns % 4]);
        turns += 1;
    }
    assert!(game.is_game_over());
    assert!(game.board().is_terminal());
}
