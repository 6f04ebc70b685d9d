use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use twenty48::board::{
    Board, BoardError, Cell, Collect, Direction, EMPTY, HorizontalDir, MAX_TILE, SPAWN_VALUE,
    VerticalDir, slide_line,
};

fn board(rows: Vec<Vec<Cell>>) -> Board {
    Board::from_cells(rows, 7).expect("valid test grid")
}

fn random_line(rng: &mut StdRng, len: usize) -> Vec<Cell> {
    (0..len)
        .map(|_| match rng.gen_range(0..4) {
            0 => EMPTY,
            n => 1 << n,
        })
        .collect()
}

fn tiles(line: &[Cell]) -> usize {
    line.iter().filter(|&&v| v != EMPTY).count()
}

#[test]
fn new_board_starts_with_a_single_two() {
    let board = Board::seeded(4, 4, 11).expect("positive dimensions");
    assert_eq!(board.height(), 4);
    assert_eq!(board.width(), 4);
    assert_eq!(board.cells().len(), 4);
    assert!(board.cells().iter().all(|row| row.len() == 4));

    let placed: Vec<Cell> = board
        .cells()
        .iter()
        .flatten()
        .copied()
        .filter(|&v| v != EMPTY)
        .collect();
    assert_eq!(placed, vec![SPAWN_VALUE]);
    assert_eq!(board.score(), 0);
}

#[test]
fn zero_dimensions_are_rejected() {
    assert_eq!(
        Board::try_new(0, 3).unwrap_err(),
        BoardError::ZeroDimension {
            height: 0,
            width: 3
        }
    );
    assert!(Board::seeded(3, 0, 1).is_err());
}

#[test]
#[should_panic(expected = "board dimensions must be positive")]
fn new_panics_on_zero_dimension() {
    let _ = Board::new(0, 0);
}

#[test]
fn from_cells_validates_the_grid() {
    assert_eq!(Board::from_cells(vec![], 0).unwrap_err(), BoardError::EmptyGrid);
    assert_eq!(
        Board::from_cells(vec![vec![2, 0], vec![2]], 0).unwrap_err(),
        BoardError::RaggedRow {
            row: 1,
            expected: 2,
            found: 1
        }
    );
    assert_eq!(
        Board::from_cells(vec![vec![2, 3]], 0).unwrap_err(),
        BoardError::InvalidTile {
            row: 0,
            col: 1,
            value: 3
        }
    );
}

#[test]
fn horizontal_move_slides_every_row() {
    let mut b = board(vec![vec![0, 2, 0, 2], vec![2, 2, 2, 2], vec![2, 4, 2, 0]]);

    assert!(b.horizontal_move(HorizontalDir::Left));
    assert_eq!(
        b.cells(),
        &[vec![4, 0, 0, 0], vec![4, 4, 0, 0], vec![2, 4, 2, 0]]
    );
    assert_eq!(b.score(), 4 + 4 + 4);

    assert!(b.horizontal_move(HorizontalDir::Right));
    assert_eq!(
        b.cells(),
        &[vec![0, 0, 0, 4], vec![0, 0, 0, 8], vec![0, 2, 4, 2]]
    );
    assert_eq!(b.score(), 12 + 8);
}

#[test]
fn vertical_move_writes_columns_back() {
    let mut b = board(vec![vec![2, 0, 4], vec![2, 0, 0], vec![0, 8, 4]]);

    assert!(b.vertical_move(VerticalDir::Up));
    assert_eq!(b.cells(), &[vec![4, 8, 8], vec![0, 0, 0], vec![0, 0, 0]]);

    assert!(b.vertical_move(VerticalDir::Down));
    assert_eq!(b.cells(), &[vec![0, 0, 0], vec![0, 0, 0], vec![4, 8, 8]]);
    assert_eq!(b.score(), 4 + 8);
}

#[test]
fn apply_move_dispatches_on_axis() {
    let rows = vec![vec![2, 0], vec![0, 0]];

    let mut right = board(rows.clone());
    assert!(right.apply_move(Direction::Right));
    assert_eq!(right.cells(), &[vec![0, 2], vec![0, 0]]);

    let mut down = board(rows.clone());
    assert!(down.apply_move(Direction::Down));
    assert_eq!(down.cells(), &[vec![0, 0], vec![2, 0]]);

    let mut left = board(rows.clone());
    assert!(!left.apply_move(Direction::Left));
    let mut up = board(rows);
    assert!(!up.apply_move(Direction::Up));
}

#[test]
fn unchanged_moves_leave_the_grid_identical() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let rows = (0..4).map(|_| random_line(&mut rng, 4)).collect();
        let mut b = board(rows);
        for direction in Direction::ALL {
            let before = b.cells().to_vec();
            let score_before = b.score();
            if !b.apply_move(direction) {
                assert_eq!(b.cells(), before.as_slice());
                assert_eq!(b.score(), score_before);
            }
        }
    }
}

#[test]
fn slides_never_add_tiles_and_sum_grows_by_merges() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..500 {
        let len = rng.gen_range(1..7);
        let before = random_line(&mut rng, len);
        for toward in [Collect::Start, Collect::End] {
            let mut line = before.clone();
            let outcome = slide_line(&mut line, toward);

            assert_eq!(line.len(), before.len());
            assert!(tiles(&line) <= tiles(&before));
            // Every merge removes one tile and doubles another.
            let merges = tiles(&before) - tiles(&line);
            assert_eq!(merges == 0, outcome.merged == 0);
            assert_eq!(line.iter().sum::<Cell>(), before.iter().sum::<Cell>());
            assert!(line.iter().all(|&v| v == EMPTY || v.is_power_of_two()));
            if !outcome.changed {
                assert_eq!(line, before);
            }
        }
    }
}

#[test]
fn left_slide_mirrors_right_slide_on_reversed_lines() {
    // Strictly distinct tiles never merge, so no tie-break is involved.
    let lines: [Vec<Cell>; 4] = [
        vec![0, 2, 0, 4],
        vec![8, 0, 0, 2],
        vec![0, 0, 16, 0],
        vec![2, 4, 8, 16],
    ];
    for line in lines {
        let mut left = line.clone();
        let left_outcome = slide_line(&mut left, Collect::Start);
        left.reverse();

        let mut right: Vec<Cell> = line.iter().rev().copied().collect();
        let right_outcome = slide_line(&mut right, Collect::End);

        assert_eq!(left, right);
        assert_eq!(left_outcome, right_outcome);
    }
}

#[test]
fn random_tile_fills_exactly_one_empty_cell() {
    let mut b = board(vec![vec![2, 0, 4], vec![0, 8, 0], vec![16, 0, 32]]);
    let before = b.cells().to_vec();
    let empty_before = b.empty_cells();

    let (row, col) = b.add_random_tile().expect("board has room");
    assert!(empty_before.contains(&(row, col)));
    assert_eq!(b.cell(row, col), Some(SPAWN_VALUE));

    let changed: Vec<(usize, usize)> = (0..3)
        .flat_map(|r| (0..3).map(move |c| (r, c)))
        .filter(|&(r, c)| b.cells()[r][c] != before[r][c])
        .collect();
    assert_eq!(changed, vec![(row, col)]);
    assert_eq!(b.empty_cells().len(), empty_before.len() - 1);
}

#[test]
fn random_tile_on_full_board_is_a_no_op() {
    let mut b = board(vec![vec![2, 4], vec![8, 16]]);
    let before = b.cells().to_vec();
    assert_eq!(b.add_random_tile(), None);
    assert_eq!(b.cells(), before.as_slice());
}

#[test]
fn random_tiles_reach_every_empty_cell() {
    let mut seen = std::collections::HashSet::new();
    for seed in 0..200 {
        let mut b = Board::from_cells(vec![vec![0, 0], vec![0, 4]], seed).expect("valid grid");
        seen.insert(b.add_random_tile().expect("board has room"));
    }
    assert_eq!(seen.len(), 3);
    assert!(!seen.contains(&(1, 1)));
}

#[test]
fn seeded_boards_are_reproducible() {
    let a = Board::seeded(4, 4, 99).expect("positive dimensions");
    let b = Board::seeded(4, 4, 99).expect("positive dimensions");
    assert_eq!(a.cells(), b.cells());
}

#[test]
fn full_board_without_equal_neighbors_is_terminal() {
    let b = board(vec![vec![2, 4, 2], vec![4, 2, 4], vec![2, 4, 2]]);
    assert!(b.is_terminal());
    for direction in Direction::ALL {
        assert!(!b.clone().apply_move(direction));
    }
}

#[test]
fn any_empty_cell_prevents_terminal_state() {
    let b = board(vec![vec![2, 4, 2], vec![4, 0, 4], vec![2, 4, 2]]);
    assert!(!b.is_terminal());
    let corner = board(vec![vec![2, 4], vec![4, 0]]);
    assert!(!corner.is_terminal());
}

#[test]
fn equal_neighbors_prevent_terminal_state() {
    let horizontal = board(vec![vec![2, 4, 8], vec![16, 32, 32], vec![2, 4, 8]]);
    assert!(!horizontal.is_terminal());
    let vertical = board(vec![vec![2, 4, 8], vec![16, 32, 64], vec![2, 4, 64]]);
    assert!(!vertical.is_terminal());
    let single = board(vec![vec![2]]);
    assert!(single.is_terminal());
}

#[test]
fn inspection_helpers_report_the_grid() {
    let b = board(vec![vec![2, 0], vec![0, 64]]);
    assert_eq!(b.max_tile(), 64);
    assert_eq!(b.empty_cells(), vec![(0, 1), (1, 0)]);
    assert_eq!(b.cell(1, 1), Some(64));
    assert_eq!(b.cell(2, 0), None);
}

#[test]
fn tiles_above_the_cap_are_rejected() {
    assert!(Board::from_cells(vec![vec![MAX_TILE, 0]], 0).is_ok());
    assert_eq!(
        Board::from_cells(vec![vec![1 << 63, 1 << 63]], 0).unwrap_err(),
        BoardError::InvalidTile {
            row: 0,
            col: 0,
            value: 1 << 63
        }
    );
}

#[test]
fn capped_tiles_never_merge() {
    let mut b = board(vec![vec![MAX_TILE, MAX_TILE], vec![MAX_TILE, MAX_TILE]]);
    assert!(b.is_terminal());
    for direction in Direction::ALL {
        assert!(!b.apply_move(direction));
    }
    assert_eq!(b.cells(), &[vec![MAX_TILE; 2], vec![MAX_TILE; 2]]);
    assert_eq!(b.score(), 0);
}

#[test]
fn merging_up_to_the_cap_saturates_the_score() {
    let mut b = board(vec![vec![MAX_TILE / 2; 4]; 2]);
    assert!(b.horizontal_move(HorizontalDir::Left));
    assert_eq!(b.cells(), &[vec![MAX_TILE, MAX_TILE, 0, 0], vec![MAX_TILE, MAX_TILE, 0, 0]]);
    assert_eq!(b.score(), u64::MAX);

    let mut square = board(vec![vec![MAX_TILE / 2; 2]; 2]);
    assert!(square.vertical_move(VerticalDir::Up));
    assert_eq!(square.cells(), &[vec![MAX_TILE; 2], vec![0; 2]]);
    assert_eq!(square.score(), MAX_TILE * 2);
}
