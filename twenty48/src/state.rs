use log::{debug, info};

use crate::board::{Board, Direction};

/// What a single key press did to the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The board changed, so a tile was spawned.
    pub moved: bool,
    pub spawned: Option<(usize, usize)>,
    /// This move ended the game.
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    game_over: bool,
    moves: u32,
}

impl GameState {
    pub fn new(board: Board) -> Self {
        let game_over = board.is_terminal();
        Self {
            board,
            game_over,
            moves: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u64 {
        self.board.score()
    }

    /// Number of moves that changed the board.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Move, then spawn and check for the end of the game if anything changed.
    ///
    /// Input after game over is ignored.
    pub fn apply(&mut self, direction: Direction) -> MoveOutcome {
        if self.game_over {
            return MoveOutcome::default();
        }
        if !self.board.apply_move(direction) {
            debug!("{direction:?}: no change");
            return MoveOutcome::default();
        }

        let spawned = self.board.add_random_tile();
        self.moves += 1;
        debug!(
            "{direction:?}: move {} score {} spawn {spawned:?}",
            self.moves,
            self.board.score()
        );

        if self.board.is_terminal() {
            self.game_over = true;
            info!(
                "game over after {} moves, score {}, max tile {}",
                self.moves,
                self.board.score(),
                self.board.max_tile()
            );
        }

        MoveOutcome {
            moved: true,
            spawned,
            game_over: self.game_over,
        }
    }
}
