//! # Drag Engine
//!
//! One gesture at a time: `Idle -> Dragging -> (Dropped | Cancelled) -> Idle`.
//!
//! Starting a drag copies the board and takes the dragged id out of it; a
//! placeholder (container + index) marks where it would land. Moves over a
//! container re-run [`insertion_anchor`] against the rectangles reported by
//! the [`Layout`] and move the placeholder. With coalescing on, moves are
//! only recorded and applied on the next [`DragEvent::Frame`], so a burst of
//! pointer events costs one recomputation. A pending move is applied before
//! a drop.
//!
//! Ending the gesture puts the id at the placeholder and reads the tiers back
//! as a whole [`Assignment`]. The engine never touches the store: the caller
//! receives [`DragOutcome::Committed`] and validates it there.
//!
//! | Event                 | Idle    | Dragging                                    |
//! |-----------------------|---------|---------------------------------------------|
//! | `Start`               | start   | ignored                                     |
//! | `Move`                | ignored | record pointer, place (or queue) placeholder|
//! | `Frame`               | ignored | flush queued move, report auto-scroll       |
//! | `Drop { over: Some }` | ignored | commit at placeholder                       |
//! | `Drop { over: None }` | ignored | commit if placeholder moved, else cancel    |
//! | `Cancel`              | ignored | commit if placeholder moved, else cancel    |

use super::board::{Board, ContainerId};
use super::geometry::{insertion_anchor, ItemRect, Point};
use super::scroll::{compute_scroll_delta, ScrollArea, ScrollParams, ScrollTarget};
use crate::model::{Assignment, EntryId};
use tracing::debug;

/// Rendered positions, supplied by whatever draws the board.
pub trait Layout {
    /// Rectangles of the entries currently rendered in `container`.
    fn item_rects(&self, container: ContainerId) -> Vec<ItemRect>;

    /// Nearest scrollable area around `over`, or the viewport.
    fn scroll_area(&self, over: Option<ContainerId>) -> ScrollArea;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    Start { id: EntryId, pointer: Point },
    Move { over: Option<ContainerId>, pointer: Point },
    Frame,
    Drop { over: Option<ContainerId> },
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Not a valid input in the current state.
    Ignored,
    Started,
    /// Gesture state changed; nothing for the caller to do.
    Updated,
    Scroll { target: ScrollTarget, dy: i32 },
    /// The gesture ended with a new placement.
    Committed(Assignment),
    /// The gesture ended where it began.
    Unchanged,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOptions {
    pub coalesce: bool,
    pub scroll: ScrollParams,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            coalesce: true,
            scroll: ScrollParams::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    container: ContainerId,
    index: usize,
}

#[derive(Debug)]
struct Gesture {
    id: EntryId,
    original: Assignment,
    board: Board,
    placeholder: Slot,
    moved: bool,
    pointer: Point,
    over: Option<ContainerId>,
    pending: Option<ContainerId>,
    scroll: ScrollArea,
}

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(Box<Gesture>),
}

#[derive(Debug, Default)]
pub struct DragEngine {
    state: DragState,
    options: DragOptions,
}

impl DragEngine {
    pub fn new(options: DragOptions) -> Self {
        Self {
            state: DragState::Idle,
            options,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn dragged_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging(g) => Some(g.id.as_str()),
            DragState::Idle => None,
        }
    }

    /// Where the dragged id would land right now, as `(container, index)`
    /// in the board without the dragged id.
    pub fn placeholder(&self) -> Option<(ContainerId, usize)> {
        match &self.state {
            DragState::Dragging(g) => Some((g.placeholder.container, g.placeholder.index)),
            DragState::Idle => None,
        }
    }

    /// Feeds one event. `board` is only read on `Start`.
    pub fn handle<L: Layout>(
        &mut self,
        event: DragEvent,
        board: &Board,
        layout: &L,
    ) -> DragOutcome {
        match event {
            DragEvent::Start { id, pointer } => self.start(id, pointer, board, layout),
            DragEvent::Move { over, pointer } => self.on_move(over, pointer, layout),
            DragEvent::Frame => self.on_frame(layout),
            DragEvent::Drop { over } => self.on_drop(over, layout),
            DragEvent::Cancel => self.on_cancel(),
        }
    }

    fn start<L: Layout>(
        &mut self,
        id: EntryId,
        pointer: Point,
        board: &Board,
        layout: &L,
    ) -> DragOutcome {
        if self.is_dragging() {
            debug!(id = %id, "ignoring nested drag start");
            return DragOutcome::Ignored;
        }
        let mut working = board.clone();
        let Some((container, index)) = working.remove(&id) else {
            debug!(id = %id, "drag start on an id not on the board");
            return DragOutcome::Ignored;
        };
        debug!(id = %id, from = %container, "drag started");
        self.state = DragState::Dragging(Box::new(Gesture {
            id,
            original: board.to_assignment(),
            board: working,
            placeholder: Slot { container, index },
            moved: false,
            pointer,
            over: Some(container),
            pending: None,
            scroll: layout.scroll_area(Some(container)),
        }));
        DragOutcome::Started
    }

    fn on_move<L: Layout>(
        &mut self,
        over: Option<ContainerId>,
        pointer: Point,
        layout: &L,
    ) -> DragOutcome {
        let coalesce = self.options.coalesce;
        let DragState::Dragging(g) = &mut self.state else {
            return DragOutcome::Ignored;
        };
        g.pointer = pointer;
        if over != g.over {
            g.scroll = layout.scroll_area(over);
            g.over = over;
        }
        if let Some(container) = over {
            if coalesce {
                g.pending = Some(container);
            } else {
                g.place(container, layout);
            }
        }
        DragOutcome::Updated
    }

    fn on_frame<L: Layout>(&mut self, layout: &L) -> DragOutcome {
        let params = self.options.scroll;
        let DragState::Dragging(g) = &mut self.state else {
            return DragOutcome::Ignored;
        };
        g.flush(layout);
        match compute_scroll_delta(&g.scroll.rect, g.pointer, &params) {
            0 => DragOutcome::Updated,
            dy => DragOutcome::Scroll {
                target: g.scroll.target,
                dy,
            },
        }
    }

    fn on_drop<L: Layout>(&mut self, over: Option<ContainerId>, layout: &L) -> DragOutcome {
        let DragState::Dragging(mut g) = std::mem::take(&mut self.state) else {
            return DragOutcome::Ignored;
        };
        g.flush(layout);
        match over {
            Some(container) => {
                if g.placeholder.container != container {
                    g.place(container, layout);
                }
                g.commit()
            }
            None if g.moved => g.commit(),
            None => {
                debug!(id = %g.id, "drop outside any container");
                DragOutcome::Cancelled
            }
        }
    }

    fn on_cancel(&mut self) -> DragOutcome {
        let DragState::Dragging(g) = std::mem::take(&mut self.state) else {
            return DragOutcome::Ignored;
        };
        if g.moved {
            g.commit()
        } else {
            debug!(id = %g.id, "drag cancelled");
            DragOutcome::Cancelled
        }
    }

    /// Drops the active gesture without committing, even if it moved.
    ///
    /// Returns whether a gesture was active.
    pub fn abort(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(g) => {
                debug!(id = %g.id, "drag aborted");
                true
            }
            DragState::Idle => false,
        }
    }
}

impl Gesture {
    fn flush<L: Layout>(&mut self, layout: &L) {
        if let Some(container) = self.pending.take() {
            self.place(container, layout);
        }
    }

    fn place<L: Layout>(&mut self, container: ContainerId, layout: &L) {
        let rects = layout.item_rects(container);
        let index = insertion_anchor(&rects, &self.id, self.pointer)
            .and_then(|anchor| self.board.position_in(container, anchor))
            .unwrap_or_else(|| self.board.container(container).len());
        let slot = Slot { container, index };
        if slot != self.placeholder {
            self.placeholder = slot;
            self.moved = true;
        }
    }

    fn commit(mut self) -> DragOutcome {
        let Slot { container, index } = self.placeholder;
        self.board.insert_at(container, index, self.id.clone());
        let next = self.board.to_assignment();
        if next == self.original {
            debug!(id = %self.id, "drag ended without a placement change");
            DragOutcome::Unchanged
        } else {
            debug!(id = %self.id, to = %container, index, "drag committed");
            DragOutcome::Committed(next)
        }
    }
}
