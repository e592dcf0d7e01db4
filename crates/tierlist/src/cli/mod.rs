//! # CLI Behavior
//!
//! This is **one possible UI client** for tierlist, not the application itself.
//! It is the only place that knows about terminal I/O, exit codes and colors.
//!
//! - Running `tierlist` with no command shows the active board.
//! - Every mutating command persists immediately; the next invocation sees it.
//! - `share` prints a link; `load` accepts a full link or just `#s=...`.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch and per-command handlers
//! - `render`: board and message formatting
//! - `setup`: argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
