//! Ordered sequences per container.
//!
//! The board is what the screen shows: one list per tier plus the bank. The
//! tiers mirror the assignment; the bank is the catalog order minus placed
//! ids, optionally narrowed by a visibility filter. Reordering edits these
//! lists directly by index, and [`Board::to_assignment`] reads the tiers
//! back into a whole snapshot.

use crate::catalog::CatalogIndex;
use crate::error::{Result, TierError};
use crate::model::{Assignment, CategoryMode, EntryId, Tier};
use std::fmt;
use std::str::FromStr;

/// A droppable list: the bank or one of the tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerId {
    Bank,
    Tier(Tier),
}

impl ContainerId {
    pub const ALL: [ContainerId; 6] = [
        ContainerId::Tier(Tier::S),
        ContainerId::Tier(Tier::A),
        ContainerId::Tier(Tier::B),
        ContainerId::Tier(Tier::C),
        ContainerId::Tier(Tier::D),
        ContainerId::Bank,
    ];
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerId::Bank => f.write_str("bank"),
            ContainerId::Tier(t) => write!(f, "{}", t),
        }
    }
}

impl FromStr for ContainerId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("bank") {
            return Ok(ContainerId::Bank);
        }
        s.parse::<Tier>()
            .map(ContainerId::Tier)
            .map_err(|_| format!("Invalid target: {} (expected S, A, B, C, D or bank)", s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    bank: Vec<EntryId>,
    tiers: [Vec<EntryId>; 5],
}

impl Board {
    pub fn new(assignment: &Assignment, bank: Vec<EntryId>) -> Self {
        let mut tiers: [Vec<EntryId>; 5] = Default::default();
        for (tier, ids) in assignment.iter() {
            tiers[tier.index()] = ids.to_vec();
        }
        Self { bank, tiers }
    }

    /// Builds the board for `mode`. Bank entries for which `visible` returns
    /// false are left out; tier entries are always kept.
    pub fn build<F>(
        catalog: &CatalogIndex,
        mode: CategoryMode,
        assignment: &Assignment,
        visible: F,
    ) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let bank = catalog
            .bank(mode, assignment)
            .into_iter()
            .filter(|id| visible(id))
            .cloned()
            .collect();
        Self::new(assignment, bank)
    }

    pub fn container(&self, container: ContainerId) -> &[EntryId] {
        match container {
            ContainerId::Bank => &self.bank,
            ContainerId::Tier(t) => &self.tiers[t.index()],
        }
    }

    fn container_mut(&mut self, container: ContainerId) -> &mut Vec<EntryId> {
        match container {
            ContainerId::Bank => &mut self.bank,
            ContainerId::Tier(t) => &mut self.tiers[t.index()],
        }
    }

    pub fn locate(&self, id: &str) -> Option<(ContainerId, usize)> {
        ContainerId::ALL.into_iter().find_map(|c| {
            self.container(c)
                .iter()
                .position(|x| x == id)
                .map(|index| (c, index))
        })
    }

    pub fn position_in(&self, container: ContainerId, id: &str) -> Option<usize> {
        self.container(container).iter().position(|x| x == id)
    }

    /// Takes `id` out of whichever container holds it.
    pub fn remove(&mut self, id: &str) -> Option<(ContainerId, usize)> {
        let (container, index) = self.locate(id)?;
        self.container_mut(container).remove(index);
        Some((container, index))
    }

    /// Inserts at `index`, clamped to the container's length.
    pub fn insert_at(&mut self, container: ContainerId, index: usize, id: EntryId) {
        let list = self.container_mut(container);
        let index = index.min(list.len());
        list.insert(index, id);
    }

    /// Inserts before `before`, or appends when `before` is `None` or not in
    /// the container.
    pub fn insert(&mut self, container: ContainerId, id: EntryId, before: Option<&str>) {
        let index = before
            .and_then(|b| self.position_in(container, b))
            .unwrap_or(usize::MAX);
        self.insert_at(container, index, id);
    }

    /// Moves `id` to `container`, before `before` if given. An id not on the
    /// board yet is simply inserted.
    pub fn move_to(
        &mut self,
        id: &str,
        container: ContainerId,
        before: Option<&str>,
    ) -> Result<()> {
        if before == Some(id) {
            return Err(TierError::Validation(format!(
                "cannot place '{}' before itself",
                id
            )));
        }
        self.remove(id);
        self.insert(container, id.to_string(), before);
        Ok(())
    }

    pub fn bank(&self) -> &[EntryId] {
        &self.bank
    }

    /// Reads the tier lists back as an assignment snapshot.
    pub fn to_assignment(&self) -> Assignment {
        Tier::ALL.into_iter().fold(Assignment::new(), |a, t| {
            a.with_tier(t, self.tiers[t.index()].iter().cloned())
        })
    }
}
