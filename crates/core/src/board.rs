//! Board module - the 4x4 tile grid
//!
//! Tiles are stored as ranks in a flat row-major array. Rank 0 is an empty cell,
//! ranks 1 and 2 are the two small tiles, rank 3 and above double in value per rank.
//! Coordinates: (x, y) where x ranges 0..3 (left to right), y ranges 0..3 (top to bottom).

use std::ops::{Add, Sub};

use crate::types::{GameInput, BOARD_EXTENT, BOARD_SIZE};

/// Tile rank; 0 means empty.
pub type Rank = u8;

/// Highest reachable rank. A tile of this rank wins the game.
pub const MAX_RANK: Rank = 27;

/// Face value of a tile rank: 1, 2, 3, 6, 12, ...
///
/// ```
/// use threes_core::board::tile_value;
///
/// assert_eq!(tile_value(0), 0);
/// assert_eq!(tile_value(2), 2);
/// assert_eq!(tile_value(3), 3);
/// assert_eq!(tile_value(5), 12);
/// assert_eq!(tile_value(27), 50_331_648);
/// ```
pub fn tile_value(rank: Rank) -> u32 {
    match rank {
        0..=3 => u32::from(rank),
        _ => 3u32 << (rank - 3).min(29),
    }
}

/// Board position. Signed so animations can start just outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

impl Pos {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Position for a flat board index.
    pub const fn from_index(index: usize) -> Self {
        Self {
            x: (index % BOARD_EXTENT) as i8,
            y: (index / BOARD_EXTENT) as i8,
        }
    }

    /// Flat index, or `None` when off the board.
    #[inline(always)]
    pub fn index(self) -> Option<usize> {
        let extent = BOARD_EXTENT as i8;
        if self.x < 0 || self.x >= extent || self.y < 0 || self.y >= extent {
            return None;
        }
        Some((self.y as usize) * BOARD_EXTENT + (self.x as usize))
    }

    /// One-step offset for a directional input; zero for anything else.
    pub fn step(input: GameInput) -> Self {
        match input {
            GameInput::Left => Self::new(-1, 0),
            GameInput::Right => Self::new(1, 0),
            GameInput::Up => Self::new(0, -1),
            GameInput::Down => Self::new(0, 1),
            _ => Self::new(0, 0),
        }
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, rhs: Pos) -> Pos {
        Pos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The game board - 4 columns x 4 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [Rank; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            tiles: [0; BOARD_SIZE],
        }
    }

    /// The fixed opening tiles every game starts from.
    pub fn seeded() -> Self {
        let mut board = Self::new();
        board.tiles[2] = 1;
        board.tiles[3] = 2;
        board.tiles[8] = 3;
        board
    }

    pub fn from_tiles(tiles: [Rank; BOARD_SIZE]) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Rank; BOARD_SIZE] {
        &self.tiles
    }

    /// Rank at `pos`; off-board positions read as empty.
    pub fn get(&self, pos: Pos) -> Rank {
        pos.index().map_or(0, |i| self.tiles[i])
    }

    /// Set rank at `pos`. Returns false if out of bounds.
    pub fn set(&mut self, pos: Pos, rank: Rank) -> bool {
        match pos.index() {
            Some(i) => {
                self.tiles[i] = rank;
                true
            }
            None => false,
        }
    }

    pub fn is_full(&self) -> bool {
        self.tiles.iter().all(|&t| t != 0)
    }

    pub fn highest(&self) -> Rank {
        self.tiles.iter().copied().max().unwrap_or(0)
    }

    pub fn empty_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == 0).count()
    }

    /// Rank produced by moving the tile at `from` one `step`, or 0 when it cannot move.
    ///
    /// - 1 onto 2 (or 2 onto 1) makes a 3
    /// - any tile onto an empty cell keeps its rank
    /// - equal tiles of rank 3 or more combine into the next rank
    pub fn move_result(&self, from: Pos, step: Pos) -> Rank {
        let to = from + step;
        if from.index().is_none() || to.index().is_none() {
            return 0;
        }
        let a = self.get(from);
        let b = self.get(to);
        match (a, b) {
            (1, 2) | (2, 1) => 3,
            (a, 0) if a != 0 => a,
            (a, b) if a >= 3 && a == b => a + 1,
            _ => 0,
        }
    }

    /// Whether any tile can move in `dir`.
    pub fn can_move(&self, dir: GameInput) -> bool {
        let step = Pos::step(dir);
        scan_order(dir)
            .into_iter()
            .any(|from| self.move_result(from, step) > 0)
    }
}

/// Tiles visited by a board move, nearest to the destination edge first.
///
/// Cells on the destination edge are skipped: they have nowhere to go.
pub fn scan_order(dir: GameInput) -> Vec<Pos> {
    let n = BOARD_EXTENT as i8;
    let mut order = Vec::with_capacity(BOARD_SIZE);
    match dir {
        GameInput::Left => {
            for x in 1..n {
                order.extend((0..n).map(|y| Pos::new(x, y)));
            }
        }
        GameInput::Right => {
            for x in (0..n - 1).rev() {
                order.extend((0..n).map(|y| Pos::new(x, y)));
            }
        }
        GameInput::Up => {
            for x in 0..n {
                order.extend((1..n).map(|y| Pos::new(x, y)));
            }
        }
        GameInput::Down => {
            for x in 0..n {
                order.extend((0..n - 1).rev().map(|y| Pos::new(x, y)));
            }
        }
        _ => {}
    }
    order
}
