//! # Reordering
//!
//! Turns pointer gestures into new tier placements.
//!
//! - [`board`]: explicit ordered list per container (tiers + bank)
//! - [`geometry`]: drop-position inference from rendered rectangles
//! - [`scroll`]: edge auto-scroll speed
//! - [`engine`]: the drag state machine tying them together
//!
//! Nothing here reads or writes the assignment store. A finished gesture
//! yields a whole [`crate::model::Assignment`] snapshot for the caller to
//! commit.

pub mod board;
pub mod engine;
pub mod geometry;
pub mod scroll;

pub use board::{Board, ContainerId};
pub use engine::{DragEngine, DragEvent, DragOptions, DragOutcome, Layout};
pub use geometry::{insertion_anchor, ItemRect, Point, Rect};
pub use scroll::{compute_scroll_delta, ScrollArea, ScrollParams, ScrollTarget};
