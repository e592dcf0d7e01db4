//! Edge auto-scroll while dragging.
//!
//! Inside a band of `margin` units at the top or bottom edge of the scroll
//! area, the area scrolls by a speed that grows linearly from 0 at the band's
//! inner edge to `max_speed * accel` at the visible edge.

use super::board::ContainerId;
use super::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollParams {
    pub margin: f64,
    pub max_speed: f64,
    pub accel: f64,
}

impl Default for ScrollParams {
    fn default() -> Self {
        Self {
            margin: 128.0,
            max_speed: 8.0,
            accel: 1.0,
        }
    }
}

/// What scrolls: the whole viewport or a scrollable container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Viewport,
    Container(ContainerId),
}

/// The nearest scrollable ancestor of a drop target and its visible rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollArea {
    pub target: ScrollTarget,
    pub rect: Rect,
}

/// Vertical scroll for one frame; negative scrolls up, 0 means no scroll.
pub fn compute_scroll_delta(rect: &Rect, pointer: Point, params: &ScrollParams) -> i32 {
    if params.margin <= 0.0 {
        return 0;
    }
    let speed = params.max_speed * params.accel;
    let rel_y = pointer.y - rect.top;
    if rel_y < params.margin {
        let t = ((params.margin - rel_y) / params.margin).clamp(0.0, 1.0);
        -((t * speed).round() as i32)
    } else if rel_y > rect.height - params.margin {
        let t = ((rel_y - (rect.height - params.margin)) / params.margin).clamp(0.0, 1.0);
        (t * speed).round() as i32
    } else {
        0
    }
}
