//! Game state module - manages the complete game state
//!
//! Ties the board, the tile deck and the slide animation together and runs the
//! phase machine: `Active` accepts moves, `Animating` plays a slide, `GameOver`
//! and `GameWon` wait for space to restart.

use arrayvec::ArrayVec;

use crate::animation::{BoardAnimation, TileAnimation};
use crate::board::{scan_order, Board, Pos, Rank, MAX_RANK};
use crate::rng::{Pcg32, TileDeck};
use crate::types::{GameInput, BOARD_EXTENT};

/// Tiles placed on top of the fixed opening tiles.
const OPENING_RANDOM_TILES: usize = 9;

/// Rank at which bonus tiles may start appearing.
const BONUS_THRESHOLD: Rank = 7;

/// Percent chance of a bonus tile once unlocked.
const BONUS_CHANCE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Active,
    Animating,
    GameOver,
    GameWon,
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    anim: BoardAnimation,
    phase: Phase,
    next: Rank,
    quit: bool,
    deck: TileDeck,
    rng: Pcg32,
    anim_seconds: f32,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut rng = Pcg32::new(seed);
        let deck = TileDeck::new(&mut rng);
        let mut game = Self {
            board: Board::seeded(),
            anim: BoardAnimation::new(),
            phase: Phase::Active,
            next: 0,
            quit: false,
            deck,
            rng,
            anim_seconds: crate::types::Layout::default().anim_seconds,
        };
        game.reset();
        game
    }

    /// Start a fresh game, keeping the RNG stream.
    pub fn reset(&mut self) {
        self.deck.reset(&mut self.rng);
        self.board = Board::seeded();
        self.anim.reset();

        let extent = BOARD_EXTENT as u32;
        let mut placed = 0;
        while placed < OPENING_RANDOM_TILES {
            let pos = Pos::new(
                self.rng.next_range(extent) as i8,
                self.rng.next_range(extent) as i8,
            );
            if self.board.get(pos) == 0 {
                let rank = self.pick_random_value();
                self.board.set(pos, rank);
                placed += 1;
            }
        }

        self.next = self.pick_random_value();
        self.phase = Phase::Active;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board, for setting up specific positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn animation(&self) -> &BoardAnimation {
        &self.anim
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rank of the tile that enters on the next move.
    pub fn next(&self) -> Rank {
        self.next
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn anim_seconds(&self) -> f32 {
        self.anim_seconds
    }

    pub fn set_anim_seconds(&mut self, seconds: f32) {
        self.anim_seconds = seconds;
    }

    /// Advance the game by one frame. Returns true when anything visible changed.
    pub fn update(&mut self, input: GameInput, dt: f32) -> bool {
        let mut changed = false;
        match input {
            GameInput::Quit => self.quit = true,
            GameInput::Restart => {
                self.reset();
                changed = true;
            }
            _ => {}
        }

        match self.phase {
            Phase::Active => {
                if self.try_move_board(input) {
                    self.anim.alpha = 0.0;
                    self.phase = Phase::Animating;
                    changed = true;
                }
            }
            Phase::Animating => {
                self.anim.alpha += if self.anim_seconds > 0.0 {
                    dt / self.anim_seconds
                } else {
                    f32::INFINITY
                };
                if self.anim.alpha > 1.0 {
                    self.finish_move();
                }
                changed = true;
            }
            Phase::GameOver | Phase::GameWon => {
                if input == GameInput::Space {
                    self.reset();
                    changed = true;
                }
            }
        }
        changed
    }

    fn finish_move(&mut self) {
        let mut tiles = *self.board.tiles();
        for (i, tile) in tiles.iter_mut().enumerate() {
            let result = self.anim.result(i);
            if result != 0 {
                *tile = result;
            }
        }
        self.board = Board::from_tiles(tiles);
        self.anim.reset();

        self.phase = if self.is_game_over() {
            Phase::GameOver
        } else if self.is_game_won() {
            Phase::GameWon
        } else {
            Phase::Active
        };
    }

    fn try_move_tile(&mut self, from: Pos, step: Pos) -> bool {
        let result = self.board.move_result(from, step);
        if result == 0 {
            return false;
        }
        let to = from + step;
        self.anim
            .push(TileAnimation::new(from, to, self.board.get(from)));
        self.anim.set_result(to, result);
        self.board.set(from, 0);
        true
    }

    /// Slide every movable tile one cell in `dir` and spawn the next tile.
    ///
    /// Tiles leave their cell immediately, so a tile further from the edge can
    /// follow into it during the same move. Destination ranks are held in the
    /// animation until it completes.
    pub fn try_move_board(&mut self, dir: GameInput) -> bool {
        let step = Pos::step(dir);
        let mut any = false;
        for from in scan_order(dir) {
            any |= self.try_move_tile(from, step);
        }

        if any {
            let target = self.pick_random_target(dir);
            self.anim.set_result(target, self.next);
            self.anim
                .push(TileAnimation::new(target - step, target, self.next));
            self.next = self.pick_random_value();
        }
        any
    }

    /// Draw the next tile rank.
    ///
    /// Once the board holds a tile of rank 7 or more there is a small chance of a
    /// bonus tile between rank 4 and three ranks below the highest tile.
    pub fn pick_random_value(&mut self) -> Rank {
        let highest = self.board.highest();
        if highest >= BONUS_THRESHOLD && self.rng.next_range(100) < BONUS_CHANCE {
            let span = u32::from(highest - 6);
            return 4 + self.rng.next_range(span) as Rank;
        }
        self.deck.draw(&mut self.rng)
    }

    /// Cell where the spawned tile lands after a move in `dir`.
    ///
    /// It enters on the edge opposite the move, in a lane where at least one tile moved.
    pub fn pick_random_target(&mut self, dir: GameInput) -> Pos {
        let horizontal = matches!(dir, GameInput::Left | GameInput::Right);
        let mut lanes: ArrayVec<i8, BOARD_EXTENT> = ArrayVec::new();
        for anim in self.anim.moving() {
            let lane = if horizontal { anim.from.y } else { anim.from.x };
            if !lanes.contains(&lane) && !lanes.is_full() {
                lanes.push(lane);
            }
        }
        let lane = if lanes.is_empty() {
            0
        } else {
            lanes[self.rng.next_range(lanes.len() as u32) as usize]
        };

        let far = BOARD_EXTENT as i8 - 1;
        match dir {
            GameInput::Left => Pos::new(far, lane),
            GameInput::Right => Pos::new(0, lane),
            GameInput::Up => Pos::new(lane, far),
            GameInput::Down => Pos::new(lane, 0),
            _ => Pos::default(),
        }
    }

    /// Board is full and no direction can move.
    pub fn is_game_over(&self) -> bool {
        self.board.is_full()
            && !GameInput::DIRECTIONS
                .iter()
                .any(|&dir| self.board.can_move(dir))
    }

    pub fn is_game_won(&self) -> bool {
        self.board.tiles().iter().any(|&t| t == MAX_RANK)
    }

    pub fn is_move_possible(&self, dir: GameInput) -> bool {
        self.board.can_move(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BOARD_SIZE;

    fn locked_tiles() -> [Rank; BOARD_SIZE] {
        let mut tiles = [0; BOARD_SIZE];
        for (i, t) in tiles.iter_mut().enumerate() {
            let p = Pos::from_index(i);
            *t = if (p.x + p.y) % 2 == 0 { 3 } else { 4 };
        }
        tiles
    }

    #[test]
    fn test_new_game_has_twelve_tiles() {
        let game = GameState::new(12345);
        assert_eq!(game.board().empty_count(), BOARD_SIZE - 12);
        assert_eq!(game.phase(), Phase::Active);
        assert!((1..=3).contains(&game.next()));
        assert_eq!(game.board().tiles()[2], 1);
        assert_eq!(game.board().tiles()[3], 2);
        assert_eq!(game.board().tiles()[8], 3);
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = GameState::new(42);
        let b = GameState::new(42);
        assert_eq!(a.board(), b.board());
        assert_eq!(a.next(), b.next());
    }

    #[test]
    fn test_move_starts_animation() {
        let mut game = GameState::new(1);
        *game.board_mut() = Board::from_tiles([
            0, 0, 0, 0, //
            0, 3, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        assert!(game.update(GameInput::Left, 0.0));
        assert_eq!(game.phase(), Phase::Animating);
        // The moved tile and the spawned tile.
        assert_eq!(game.animation().moving().len(), 2);
        assert_eq!(game.animation().result(4), 3);
        // Spawned tile enters on the right edge, in row 1.
        let spawned = game.animation().moving()[1];
        assert_eq!(spawned.to, Pos::new(3, 1));
        assert_eq!(spawned.from, Pos::new(4, 1));
    }

    #[test]
    fn test_animation_completes_and_applies_result() {
        let mut game = GameState::new(1);
        *game.board_mut() = Board::from_tiles([
            0, 0, 0, 0, //
            2, 1, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let next = game.next();
        assert!(game.update(GameInput::Left, 0.0));
        assert!(game.update(GameInput::None, 0.1));
        assert_eq!(game.phase(), Phase::Animating);
        assert!(game.update(GameInput::None, 0.2));
        assert_eq!(game.phase(), Phase::Active);
        assert_eq!(game.board().tiles()[4], 3);
        assert_eq!(game.board().tiles()[5], 0);
        assert_eq!(game.board().tiles()[7], next);
    }

    #[test]
    fn test_blocked_move_does_nothing() {
        let mut game = GameState::new(1);
        *game.board_mut() = Board::from_tiles([
            3, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        assert!(!game.update(GameInput::Left, 0.0));
        assert_eq!(game.phase(), Phase::Active);
    }

    #[test]
    fn test_tiles_follow_into_vacated_cells() {
        let mut game = GameState::new(1);
        *game.board_mut() = Board::from_tiles([
            0, 3, 4, 5, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        assert!(game.try_move_board(GameInput::Left));
        assert_eq!(game.animation().result(0), 3);
        assert_eq!(game.animation().result(1), 4);
        assert_eq!(game.animation().result(2), 5);
    }

    #[test]
    fn test_game_over_on_locked_board() {
        let mut game = GameState::new(1);
        *game.board_mut() = Board::from_tiles(locked_tiles());
        assert!(game.is_game_over());
        assert!(!game.is_game_won());
    }

    #[test]
    fn test_game_won_on_max_rank() {
        let mut game = GameState::new(1);
        game.board_mut().set(Pos::new(0, 0), MAX_RANK);
        assert!(game.is_game_won());
    }

    #[test]
    fn test_space_restarts_after_game_over() {
        let mut game = GameState::new(1);
        *game.board_mut() = Board::from_tiles(locked_tiles());
        game.phase = Phase::GameOver;
        assert!(!game.update(GameInput::Left, 0.0));
        assert!(game.update(GameInput::Space, 0.0));
        assert_eq!(game.phase(), Phase::Active);
        assert_eq!(game.board().empty_count(), BOARD_SIZE - 12);
    }

    #[test]
    fn test_quit_and_restart_inputs() {
        let mut game = GameState::new(1);
        assert!(!game.update(GameInput::Quit, 0.0));
        assert!(game.should_quit());
        assert!(game.update(GameInput::Restart, 0.0));
        assert_eq!(game.phase(), Phase::Active);
    }

    #[test]
    fn test_zero_anim_seconds_finishes_immediately() {
        let mut game = GameState::new(1);
        game.set_anim_seconds(0.0);
        *game.board_mut() = Board::from_tiles([
            0, 3, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        game.update(GameInput::Left, 0.0);
        game.update(GameInput::None, 0.0);
        assert_eq!(game.phase(), Phase::Active);
        assert_eq!(game.board().tiles()[0], 3);
    }

    #[test]
    fn test_bonus_values_stay_in_range() {
        let mut game = GameState::new(9);
        game.board_mut().set(Pos::new(0, 0), 10);
        for _ in 0..2000 {
            let v = game.pick_random_value();
            assert!((1..=7).contains(&v), "unexpected rank {v}");
        }
    }
}
