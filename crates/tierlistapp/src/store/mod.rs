//! # Assignment Store
//!
//! Holds the tier placement for both modes and guards its invariants:
//!
//! - an id appears in at most one tier of a mode
//! - after [`AssignmentStore::sanitize`], every placed id exists in that
//!   mode's catalog
//!
//! Every mutation is all-or-nothing. A candidate snapshot is validated first
//! and only then written, so a rejected call leaves the store exactly as it
//! was.
//!
//! Persistence lives next door: [`backend`] defines raw key/value I/O with
//! [`fs`] and [`memory`] implementations, and [`persisted`] maps the store
//! to and from its stored record. The store itself never touches storage.

use crate::error::{Result, TierError};
use crate::model::{Assignment, ByMode, CategoryMode, EntryId, Tier};
use std::collections::HashSet;

pub mod backend;
pub mod fs;
pub mod memory;
pub mod persisted;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentStore {
    by_mode: ByMode<Assignment>,
}

impl AssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(items: Assignment, powers: Assignment) -> Self {
        Self {
            by_mode: ByMode::new(items, powers),
        }
    }

    pub fn get(&self, mode: CategoryMode) -> &Assignment {
        self.by_mode.get(mode)
    }

    pub fn assignments(&self) -> &ByMode<Assignment> {
        &self.by_mode
    }

    /// Replaces one tier's sequence.
    ///
    /// Fails if the new sequence repeats an id or contains an id still placed
    /// in another tier of the same mode.
    pub fn replace(&mut self, mode: CategoryMode, tier: Tier, ids: Vec<EntryId>) -> Result<()> {
        let mut candidate = self.get(mode).clone();
        candidate.set_tier(tier, ids);
        if let Some(dup) = candidate.first_duplicate() {
            return Err(TierError::Validation(format!(
                "id '{}' would appear more than once in {} after replacing tier {}",
                dup, mode, tier
            )));
        }
        *self.by_mode.get_mut(mode) = candidate;
        Ok(())
    }

    /// Replaces a whole snapshot for `mode`, returning the tiers that changed.
    ///
    /// The snapshot is validated as a whole, so moving an id between two
    /// tiers is a single step.
    pub fn commit(&mut self, mode: CategoryMode, snapshot: Assignment) -> Result<Vec<Tier>> {
        if let Some(dup) = snapshot.first_duplicate() {
            return Err(TierError::Validation(format!(
                "id '{}' appears more than once in {} snapshot",
                dup, mode
            )));
        }
        let current = self.by_mode.get_mut(mode);
        let changed: Vec<Tier> = Tier::ALL
            .into_iter()
            .filter(|t| current.tier(*t) != snapshot.tier(*t))
            .collect();
        for tier in &changed {
            current.set_tier(*tier, snapshot.tier(*tier).to_vec());
        }
        Ok(changed)
    }

    /// Drops ids that are not in `catalog_ids`, and any repeat of an id
    /// already seen (first occurrence in S..D order wins).
    ///
    /// Returns the number of ids removed. Idempotent.
    pub fn sanitize(&mut self, mode: CategoryMode, catalog_ids: &HashSet<EntryId>) -> usize {
        let assignment = self.by_mode.get_mut(mode);
        let mut seen: HashSet<EntryId> = HashSet::new();
        let mut removed = 0;
        for tier in Tier::ALL {
            let before = assignment.tier(tier).len();
            let kept: Vec<EntryId> = assignment
                .tier(tier)
                .iter()
                .filter(|id| catalog_ids.contains(*id) && seen.insert((*id).clone()))
                .cloned()
                .collect();
            removed += before - kept.len();
            assignment.set_tier(tier, kept);
        }
        removed
    }

    pub fn reset(&mut self, mode: CategoryMode) {
        *self.by_mode.get_mut(mode) = Assignment::new();
    }
}
