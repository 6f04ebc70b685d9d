//! The board engine: grid storage, directional slide-and-merge, random spawns and
//! terminal-state detection.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A cell value: `EMPTY` or a power of two.
pub type Cell = u64;

pub const EMPTY: Cell = 0;
pub const SPAWN_VALUE: Cell = 2;
/// Largest tile a board holds. Two of them never merge, since the sum would not fit in a `Cell`.
pub const MAX_TILE: Cell = 1 << 62;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimensions must be positive (got {height}x{width})")]
    ZeroDimension { height: usize, width: usize },
    #[error("board grid has no rows")]
    EmptyGrid,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("cell ({row}, {col}) holds {value}, which is neither empty nor a power of two up to 2^62")]
    InvalidTile { row: usize, col: usize, value: Cell },
}

/// Which set of lines a move slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Rows,
    Columns,
}

/// The end of a line tiles are collected toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collect {
    /// Toward index 0.
    Start,
    /// Toward the last index.
    End,
}

impl Collect {
    /// Index step of the move direction: `-1` toward the start, `+1` toward the end.
    pub fn step(self) -> isize {
        match self {
            Collect::Start => -1,
            Collect::End => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Rows,
            Direction::Up | Direction::Down => Axis::Columns,
        }
    }

    pub fn collect(self) -> Collect {
        match self {
            Direction::Up | Direction::Left => Collect::Start,
            Direction::Down | Direction::Right => Collect::End,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalDir {
    Left,
    Right,
}

impl HorizontalDir {
    pub fn collect(self) -> Collect {
        match self {
            HorizontalDir::Left => Collect::Start,
            HorizontalDir::Right => Collect::End,
        }
    }
}

impl From<HorizontalDir> for Direction {
    fn from(dir: HorizontalDir) -> Self {
        match dir {
            HorizontalDir::Left => Direction::Left,
            HorizontalDir::Right => Direction::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerticalDir {
    Up,
    Down,
}

impl VerticalDir {
    pub fn collect(self) -> Collect {
        match self {
            VerticalDir::Up => Collect::Start,
            VerticalDir::Down => Collect::End,
        }
    }
}

impl From<VerticalDir> for Direction {
    fn from(dir: VerticalDir) -> Self {
        match dir {
            VerticalDir::Up => Direction::Up,
            VerticalDir::Down => Direction::Down,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideOutcome {
    pub changed: bool,
    /// Sum of the tiles created by merges during this slide.
    pub merged: Cell,
}

/// Compacts and merges `line` toward the `toward` end, in place.
///
/// A write cursor sits on the slot being filled and a read cursor scans from one step inward
/// of it to the far end. A merged tile moves the write cursor on, so it cannot merge again in
/// the same slide: `[2, 2, 2, 2]` collects to `[4, 4, 0, 0]`.
pub fn slide_line(line: &mut [Cell], toward: Collect) -> SlideOutcome {
    let len = line.len();
    // Logical position `i` counts from the collecting end.
    let at = |i: usize| match toward {
        Collect::Start => i,
        Collect::End => len - 1 - i,
    };

    let mut outcome = SlideOutcome::default();
    let mut write = 0;
    let mut read = 1;
    while read < len {
        if write == read {
            read += 1;
            continue;
        }

        let (w, r) = (at(write), at(read));
        if line[r] == EMPTY {
            read += 1;
        } else if line[w] == EMPTY {
            line[w] = line[r];
            line[r] = EMPTY;
            read += 1;
            outcome.changed = true;
        } else {
            if can_merge(line[w], line[r]) {
                line[w] += line[r];
                line[r] = EMPTY;
                read += 1;
                outcome.changed = true;
                outcome.merged = outcome.merged.saturating_add(line[w]);
            }
            write += 1;
        }
    }
    outcome
}

fn can_merge(a: Cell, b: Cell) -> bool {
    a != EMPTY && a == b && a < MAX_TILE
}

fn is_valid_cell(value: Cell) -> bool {
    value == EMPTY || (value.is_power_of_two() && value <= MAX_TILE)
}

#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
    score: u64,
    rng: StdRng,
}

impl Board {
    /// Empty `height x width` board seeded from OS entropy, with one starting tile.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(height: usize, width: usize) -> Self {
        match Self::try_new(height, width) {
            Ok(board) => board,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(height: usize, width: usize) -> Result<Self, BoardError> {
        Self::with_rng(height, width, StdRng::from_entropy())
    }

    /// Like `try_new` but with a deterministic tile sequence.
    pub fn seeded(height: usize, width: usize, seed: u64) -> Result<Self, BoardError> {
        Self::with_rng(height, width, StdRng::seed_from_u64(seed))
    }

    fn with_rng(height: usize, width: usize, rng: StdRng) -> Result<Self, BoardError> {
        if height == 0 || width == 0 {
            return Err(BoardError::ZeroDimension { height, width });
        }
        let mut board = Self {
            width,
            height,
            cells: vec![vec![EMPTY; width]; height],
            score: 0,
            rng,
        };
        board.add_random_tile();
        Ok(board)
    }

    /// Board holding exactly `rows`, without a starting tile.
    pub fn from_cells(rows: Vec<Vec<Cell>>, seed: u64) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).ok_or(BoardError::EmptyGrid)?;
        if width == 0 {
            return Err(BoardError::ZeroDimension { height, width });
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            if let Some(col) = cells.iter().position(|&v| !is_valid_cell(v)) {
                return Err(BoardError::InvalidTile {
                    row,
                    col,
                    value: cells[col],
                });
            }
        }

        Ok(Self {
            width,
            height,
            cells: rows,
            score: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major grid, `height` rows of `width` cells.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Sum of every tile produced by a merge so far.
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn max_tile(&self) -> Cell {
        self.cells
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap_or(EMPTY)
    }

    /// Empty cells as `(row, col)`, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|&(_, &v)| v == EMPTY)
                    .map(move |(col, _)| (row, col))
            })
            .collect()
    }

    pub fn horizontal_move(&mut self, dir: HorizontalDir) -> bool {
        let toward = dir.collect();
        let mut changed = false;
        for row in &mut self.cells {
            let outcome = slide_line(row, toward);
            changed |= outcome.changed;
            self.score = self.score.saturating_add(outcome.merged);
        }
        changed
    }

    pub fn vertical_move(&mut self, dir: VerticalDir) -> bool {
        let toward = dir.collect();
        let mut changed = false;
        let mut column = vec![EMPTY; self.height];
        for col in 0..self.width {
            for (slot, row) in column.iter_mut().zip(&self.cells) {
                *slot = row[col];
            }
            let outcome = slide_line(&mut column, toward);
            for (row, &value) in self.cells.iter_mut().zip(&column) {
                row[col] = value;
            }
            changed |= outcome.changed;
            self.score = self.score.saturating_add(outcome.merged);
        }
        changed
    }

    /// Slides the whole board in `direction`; returns whether any cell changed.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.horizontal_move(HorizontalDir::Left),
            Direction::Right => self.horizontal_move(HorizontalDir::Right),
            Direction::Up => self.vertical_move(VerticalDir::Up),
            Direction::Down => self.vertical_move(VerticalDir::Down),
        }
    }

    /// Puts a `SPAWN_VALUE` tile on a uniformly chosen empty cell and returns its position.
    ///
    /// A full board is left untouched.
    pub fn add_random_tile(&mut self) -> Option<(usize, usize)> {
        let free = self.empty_cells();
        if free.is_empty() {
            return None;
        }
        let (row, col) = free[self.rng.gen_range(0..free.len())];
        self.cells[row][col] = SPAWN_VALUE;
        Some((row, col))
    }

    /// True when no empty cell exists and no two orthogonal neighbors can merge.
    pub fn is_terminal(&self) -> bool {
        for (y, row) in self.cells.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value == EMPTY {
                    return false;
                }
                // Right and down neighbors cover every adjacent pair once.
                if row.get(x + 1).is_some_and(|&right| can_merge(value, right)) {
                    return false;
                }
                if self
                    .cells
                    .get(y + 1)
                    .is_some_and(|below| can_merge(value, below[x]))
                {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(2 * self.width + 1);
        for row in &self.cells {
            writeln!(f, "{rule}")?;
            for value in row {
                write!(f, "|{value}")?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{rule}")
    }
}
