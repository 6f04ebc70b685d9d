use engine::GameLogic;

use crate::board::{Board, BoardError, Direction};
use crate::state::GameState;

/// Headless rules for scripted sessions: a seeded board and one move per input.
#[derive(Debug, Clone)]
pub struct Twenty48Logic {
    rows: usize,
    cols: usize,
    seed: u64,
}

impl Twenty48Logic {
    pub fn new(rows: usize, cols: usize, seed: u64) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::ZeroDimension {
                height: rows,
                width: cols,
            });
        }
        Ok(Self { rows, cols, seed })
    }
}

impl GameLogic for Twenty48Logic {
    type State = GameState;
    type Input = Direction;

    fn initial_state(&self) -> Self::State {
        let board = match Board::seeded(self.rows, self.cols, self.seed) {
            Ok(board) => board,
            // Dimensions are validated in `new`.
            Err(err) => unreachable!("{err}"),
        };
        GameState::new(board)
    }

    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
        let mut next = state.clone();
        next.apply(input);
        next
    }
}
