//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the sliding-tile puzzle rules: board, tile generation, slide
//! animation state and the phase machine. It has no dependency on the terminal or
//! any I/O, so every rule is covered by plain unit tests.
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 board, tile ranks and per-tile move rules
//! - [`animation`]: sliding tiles and destination ranks for an in-flight move
//! - [`game_state`]: phases, board moves, tile spawning, game over / won detection
//! - [`rng`]: seeded PCG generator and the 12-card tile deck
//!
//! # Game Rules
//!
//! - **Sliding**: every tile that can moves exactly one cell per input
//! - **Merging**: 1 and 2 make 3; equal tiles of 3 or more merge into the next rank
//! - **Spawning**: after each move a new tile enters from the opposite edge
//! - **Deck**: small tiles come from a shuffled deck of four 1s, four 2s and four 3s
//! - **Bonus**: once a 48 is on the board, 1 in 20 spawns is a larger bonus tile
//!
//! # Example
//!
//! ```
//! use threes_core::{GameState, Phase};
//! use threes_types::GameInput;
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.phase(), Phase::Active);
//!
//! // Input and elapsed seconds are fed once per frame.
//! game.update(GameInput::Left, 0.016);
//! game.update(GameInput::None, 0.016);
//! assert!(!game.should_quit());
//! ```

pub mod animation;
pub mod board;
pub mod game_state;
pub mod rng;

pub use threes_types as types;

// Re-export commonly used types for convenience
pub use animation::{lerp, smootherstep, BoardAnimation, TileAnimation};
pub use board::{tile_value, Board, Pos, Rank, MAX_RANK};
pub use game_state::{GameState, Phase};
pub use rng::{Pcg32, TileDeck};
