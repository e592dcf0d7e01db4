//! # Tierlist CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/tierlistapp/`: UI-agnostic library (catalog, store, drag engine, codec)
//! - `crates/tierlist/`: this CLI client
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/tierlist/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering with `colored` (render.rs)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/tierlistapp/src/api.rs)                  │
//! │  - Resolves ids/names, commits placements, persists         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A terminal has no pointer, so placement goes through `tierlist place`,
//! which uses the same board operations as a drag gesture.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
