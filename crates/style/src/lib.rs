//! Style loading and hot reload for the board view.
//!
//! A style file is JSON with optional `layout` and `colors` sections; see
//! [`style`] for the format. [`StyleWatcher`] reports when the file changes so
//! the game can reload it between frames.

pub mod error;
pub mod paths;
pub mod style;
pub mod watcher;

pub use error::{Result, StyleError};
pub use style::{load_style, load_style_or_default, Style};
pub use watcher::StyleWatcher;
