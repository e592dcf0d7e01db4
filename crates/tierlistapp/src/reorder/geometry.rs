//! Drop-position inference.
//!
//! Given the rendered rectangles of a container's items and the pointer, pick
//! the item the dragged entry should be inserted *before*:
//!
//! - same row (`top <= y <= bottom`): only items whose horizontal midpoint is
//!   right of the pointer qualify, scored by distance to that midpoint
//! - entirely below the pointer: scored by `(top - y) * 1000 + |left - x|`,
//!   so the nearest row wins before the nearest column
//! - anything else (above, or same row to the left) is skipped
//!
//! The first candidate with the strictly lowest score wins. No candidate means
//! "append to the end of the container".

use crate::model::EntryId;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Where one rendered entry sits on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRect {
    pub id: EntryId,
    pub rect: Rect,
}

impl ItemRect {
    pub fn new(id: impl Into<EntryId>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

const ROW_WEIGHT: f64 = 1000.0;

fn score(rect: &Rect, pointer: Point) -> Option<f64> {
    let in_same_row = pointer.y >= rect.top && pointer.y <= rect.bottom();
    if in_same_row {
        if pointer.x < rect.center_x() {
            Some((rect.center_x() - pointer.x).abs())
        } else {
            None
        }
    } else if pointer.y < rect.top {
        Some((rect.top - pointer.y) * ROW_WEIGHT + (rect.left - pointer.x).abs())
    } else {
        None
    }
}

/// Returns the id to insert before, or `None` to append.
pub fn insertion_anchor<'a>(
    candidates: &'a [ItemRect],
    dragged: &str,
    pointer: Point,
) -> Option<&'a str> {
    let mut best: Option<(&'a str, f64)> = None;
    for item in candidates.iter().filter(|c| c.id != dragged) {
        let Some(s) = score(&item.rect, pointer) else {
            continue;
        };
        if best.map_or(true, |(_, b)| s < b) {
            best = Some((item.id.as_str(), s));
        }
    }
    best.map(|(id, _)| id)
}
