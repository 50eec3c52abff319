//! Terminal Threes (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `terminal_threes::{core,input,style,term,types}` and adds
//! logging setup shared by the binaries.

pub mod logging;

pub use threes_core as core;
pub use threes_input as input;
pub use threes_style as style;
pub use threes_term as term;
pub use threes_types as types;
