//! Terminal "game renderer" module.
//!
//! An immediate-mode rendering layer for terminal games. Each frame the game
//! draws into a logical [`Canvas`]; the [`Backend`] compares it with what is
//! already on screen and only writes the cells that changed.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Hide the platform terminal protocol behind one [`Backend`] trait
//! - Run every backend headless, with [`ScriptedEvents`] and in-memory writers
//!
//! # Example
//!
//! ```
//! use threes_term::{PosixTerminalBackend, ScriptedEvents, Tui};
//! use threes_term::types::{Color, Palette};
//!
//! let backend = PosixTerminalBackend::with_io(Vec::new(), ScriptedEvents::new(20, 5));
//! let mut tui = Tui::new(backend);
//! tui.init(true)?;
//!
//! assert!(tui.begin_frame()?);
//! tui.canvas()
//!     .draw_text_with(Color::new(Palette::Yellow, Palette::Black), 1, 1, "hello");
//! let stats = tui.end_frame(0)?;
//! assert_eq!(stats.cells_written, 100);
//!
//! tui.shutdown()?;
//! # Ok::<(), threes_term::TuiError>(())
//! ```

pub mod backend;
pub mod buffer;
pub mod canvas;
pub mod config;
pub mod error;
pub mod game_view;
pub mod source;
pub mod timer;
pub mod tui;

pub use threes_core as core;
pub use threes_input as input;
pub use threes_types as types;

pub use backend::{open_backend, Backend, CellCache, NativeConsoleBackend, PosixTerminalBackend};
pub use buffer::{Buffer, Cell};
pub use canvas::{Canvas, ColorScope, TEXT_SCRATCH_CAPACITY};
pub use config::{BackendKind, EngineConfig};
pub use error::{Result, TuiError};
pub use game_view::BoardView;
pub use source::{CrosstermEvents, EventSource, ScriptedEvents};
pub use timer::FrameTimer;
pub use tui::{FrameStats, Tui};
