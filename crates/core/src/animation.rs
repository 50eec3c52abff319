//! Slide animation state for one board move
//!
//! A move records every tile that slides plus the rank each destination cell ends up
//! with. The board itself is only updated once the animation completes.

use arrayvec::ArrayVec;

use crate::board::{Pos, Rank};
use crate::types::{BOARD_EXTENT, BOARD_SIZE};

/// Every tile on the board sliding plus one spawned tile per lane.
pub const MAX_MOVING: usize = BOARD_SIZE + BOARD_EXTENT;

/// Eased progress never passes this point so sliding tiles stop short of the target cell.
pub const MAX_EASED_ALPHA: f32 = 0.9;

/// One sliding tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileAnimation {
    pub from: Pos,
    pub to: Pos,
    pub rank: Rank,
}

impl TileAnimation {
    pub fn new(from: Pos, to: Pos, rank: Rank) -> Self {
        Self { from, to, rank }
    }
}

#[derive(Debug, Clone)]
pub struct BoardAnimation {
    /// Linear progress; the move completes once this exceeds 1.0.
    pub alpha: f32,
    result: [Rank; BOARD_SIZE],
    moving: ArrayVec<TileAnimation, MAX_MOVING>,
}

impl Default for BoardAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardAnimation {
    pub fn new() -> Self {
        Self {
            alpha: 0.0,
            result: [0; BOARD_SIZE],
            moving: ArrayVec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.alpha = 0.0;
        self.result = [0; BOARD_SIZE];
        self.moving.clear();
    }

    pub fn push(&mut self, anim: TileAnimation) {
        let pushed = self.moving.try_push(anim);
        debug_assert!(pushed.is_ok(), "more sliding tiles than board cells");
    }

    pub fn moving(&self) -> &[TileAnimation] {
        &self.moving
    }

    pub fn is_empty(&self) -> bool {
        self.moving.is_empty()
    }

    /// Rank the cell at `index` takes when the move completes; 0 leaves it unchanged.
    pub fn result(&self, index: usize) -> Rank {
        self.result.get(index).copied().unwrap_or(0)
    }

    pub fn results(&self) -> &[Rank; BOARD_SIZE] {
        &self.result
    }

    pub fn set_result(&mut self, pos: Pos, rank: Rank) {
        if let Some(i) = pos.index() {
            self.result[i] = rank;
        }
    }

    /// `alpha` clamped to `[0, MAX_EASED_ALPHA]` then eased.
    pub fn eased_alpha(&self) -> f32 {
        smootherstep(self.alpha.clamp(0.0, MAX_EASED_ALPHA))
    }
}

/// Ken Perlin's smootherstep on `[0, 1]`.
pub fn smootherstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Linear interpolation between two screen coordinates.
pub fn lerp(from: i32, to: i32, t: f32) -> i32 {
    from + ((to - from) as f32 * t) as i32
}
