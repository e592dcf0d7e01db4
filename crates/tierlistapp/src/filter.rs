//! # Hero Filters
//!
//! Per-mode visibility switches: one per hero of the role map, plus one for
//! universal entries (no owning hero). Filters only decide what the board
//! shows. They never change which ids are placed in which tier.

use crate::catalog::RoleMap;
use crate::model::{ByMode, CatalogEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Aggregate state of all heroes of one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleState {
    None,
    Mixed,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroFilter {
    pub heroes: BTreeMap<String, bool>,
    pub universal: bool,
}

impl Default for HeroFilter {
    fn default() -> Self {
        Self {
            heroes: BTreeMap::new(),
            universal: true,
        }
    }
}

fn role_heroes<'a>(roles: &'a RoleMap, role: &str) -> impl Iterator<Item = &'a str> {
    roles
        .get(role)
        .into_iter()
        .flatten()
        .map(|h| h.trim())
}

impl HeroFilter {
    /// Every hero of `roles` enabled, universal entries enabled.
    pub fn all_enabled(roles: &RoleMap) -> Self {
        let heroes = roles
            .values()
            .flatten()
            .map(|h| (h.trim().to_string(), true))
            .collect();
        Self {
            heroes,
            universal: true,
        }
    }

    /// Restores a saved filter. Only heroes of `roles` are kept; anything
    /// missing or not a boolean falls back to enabled.
    pub fn from_value(roles: &RoleMap, saved: Option<&Value>) -> Self {
        let mut filter = Self::all_enabled(roles);
        let Some(saved) = saved else {
            return filter;
        };
        let saved_heroes = saved.get("heroes");
        for (hero, enabled) in filter.heroes.iter_mut() {
            if let Some(on) = saved_heroes.and_then(|h| h.get(hero)).and_then(Value::as_bool) {
                *enabled = on;
            }
        }
        if let Some(on) = saved.get("universal").and_then(Value::as_bool) {
            filter.universal = on;
        }
        filter
    }

    /// Heroes not known to the filter count as enabled.
    pub fn is_hero_enabled(&self, hero: Option<&str>) -> bool {
        match hero {
            None => self.universal,
            Some(name) => self.heroes.get(name.trim()).copied().unwrap_or(true),
        }
    }

    pub fn is_visible(&self, entry: &CatalogEntry) -> bool {
        self.is_hero_enabled(entry.owner())
    }

    pub fn set_hero(&mut self, hero: &str, on: bool) {
        self.heroes.insert(hero.trim().to_string(), on);
    }

    pub fn set_role(&mut self, roles: &RoleMap, role: &str, on: bool) {
        for hero in role_heroes(roles, role) {
            self.heroes.insert(hero.to_string(), on);
        }
    }

    pub fn set_all(&mut self, on: bool) {
        for enabled in self.heroes.values_mut() {
            *enabled = on;
        }
        self.universal = on;
    }

    pub fn role_state(&self, roles: &RoleMap, role: &str) -> RoleState {
        let (mut total, mut on) = (0usize, 0usize);
        for hero in role_heroes(roles, role) {
            total += 1;
            if self.is_hero_enabled(Some(hero)) {
                on += 1;
            }
        }
        match (total, on) {
            (0, _) | (_, 0) => RoleState::None,
            (t, o) if t == o => RoleState::All,
            _ => RoleState::Mixed,
        }
    }

    pub fn all_on(&self) -> bool {
        self.universal && self.heroes.values().all(|on| *on)
    }

    /// Back to every hero of `roles` enabled.
    pub fn reset(&mut self, roles: &RoleMap) {
        *self = Self::all_enabled(roles);
    }
}

pub type Filters = ByMode<HeroFilter>;

impl Filters {
    pub fn all_enabled(roles: &RoleMap) -> Self {
        ByMode::new(HeroFilter::all_enabled(roles), HeroFilter::all_enabled(roles))
    }
}
