//! # Catalog Index
//!
//! The catalog is immutable once loaded. This module turns the raw entry lists
//! into one deterministic total order per mode. That order drives the bank
//! (unplaced entries) and is the reference every other component relies on.
//!
//! ## Items ordering
//!
//! Keys, compared in turn until one differs:
//!
//! 1. Universal entries (no owning hero) before hero entries
//! 2. Owning hero's role: Tank, Damage, Support, then anything else
//! 3. Owning hero name
//! 4. Category: Weapon, Ability, Survival, Gadget, then anything else
//! 5. Rarity: Common, Rare, Epic, then anything else
//! 6. Cost, ascending
//! 7. Entry name
//!
//! ## Powers ordering
//!
//! 1. Owning hero's role (same ranking as items)
//! 2. Owning hero name
//! 3. Ability rank: position of the entry's ability in the hero's declared
//!    ability list (case-insensitive). An empty ability ranks first (-1),
//!    an unknown one ranks after the list. The configured "ultimate-less"
//!    hero is the exception: its entries with an empty or unknown ability
//!    rank last.
//! 4. Entry name
//!
//! Sorting is stable, so entries equal on every key keep their input order.

use crate::error::{Result, TierError};
use crate::model::{Assignment, ByMode, CatalogEntry, CategoryMode, EntryId};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Role name → hero names.
pub type RoleMap = BTreeMap<String, Vec<String>>;

/// Hero name → declared ability names, in display order.
pub type AbilityMap = BTreeMap<String, Vec<String>>;

pub const DEFAULT_ULTIMATE_LESS_HERO: &str = "Pharah";

/// Fixed rank tables. Matching is case-insensitive; unknown values rank 99.
pub mod rank {
    pub const UNKNOWN: u32 = 99;

    pub fn role(role: &str) -> u32 {
        match role.trim().to_lowercase().as_str() {
            "tank" => 0,
            "damage" => 1,
            "support" => 2,
            _ => UNKNOWN,
        }
    }

    pub fn category(category: &str) -> u32 {
        match category.trim().to_lowercase().as_str() {
            "weapon" => 0,
            "ability" => 1,
            "survival" => 2,
            "gadget" => 3,
            _ => UNKNOWN,
        }
    }

    pub fn rarity(rarity: &str) -> u32 {
        match rarity.trim().to_lowercase().as_str() {
            "common" => 0,
            "rare" => 1,
            "epic" => 2,
            _ => UNKNOWN,
        }
    }
}

/// Raw catalog as delivered by the ingestion step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSource {
    #[serde(default)]
    pub items: Vec<CatalogEntry>,
    #[serde(default)]
    pub powers: Vec<CatalogEntry>,
    #[serde(default)]
    pub roles: RoleMap,
    #[serde(default)]
    pub abilities: AbilityMap,
}

impl CatalogSource {
    pub fn from_json(text: &str) -> Result<Self> {
        let source: CatalogSource = serde_json::from_str(text)?;
        Ok(source)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TierError::NotFound(format!(
                "catalog file {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path).map_err(TierError::Io)?;
        Self::from_json(&content)
    }

    pub fn entries(&self, mode: CategoryMode) -> &[CatalogEntry] {
        match mode {
            CategoryMode::Items => &self.items,
            CategoryMode::Powers => &self.powers,
        }
    }
}

/// Knobs for the powers ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingRules {
    /// Hero whose empty or unknown ability ranks after everything else.
    pub ultimate_less_hero: Option<String>,
}

impl Default for OrderingRules {
    fn default() -> Self {
        Self {
            ultimate_less_hero: Some(DEFAULT_ULTIMATE_LESS_HERO.to_string()),
        }
    }
}

impl OrderingRules {
    fn is_ultimate_less(&self, hero: &str) -> bool {
        self.ultimate_less_hero.as_deref().map(str::trim) == Some(hero)
    }
}

/// Hero → role lookup.
///
/// Roles are visited in name order; a hero listed under several roles keeps
/// the last one.
#[derive(Debug, Clone, Default)]
pub struct HeroRoles {
    by_hero: HashMap<String, String>,
}

impl HeroRoles {
    pub fn new(roles: &RoleMap) -> Self {
        let mut by_hero = HashMap::new();
        for (role, heroes) in roles {
            for hero in heroes {
                by_hero.insert(hero.trim().to_string(), role.clone());
            }
        }
        Self { by_hero }
    }

    pub fn role_of(&self, hero: &str) -> Option<&str> {
        self.by_hero.get(hero.trim()).map(String::as_str)
    }

    fn role_rank(&self, hero: Option<&str>) -> u32 {
        hero.and_then(|h| self.role_of(h))
            .map(rank::role)
            .unwrap_or(rank::UNKNOWN)
    }
}

fn hero_name(entry: &CatalogEntry) -> &str {
    entry.owner().unwrap_or("")
}

fn compare_items(a: &CatalogEntry, b: &CatalogEntry, roles: &HeroRoles) -> Ordering {
    let (a_owner, b_owner) = (a.owner(), b.owner());

    // universal entries first
    a_owner
        .is_some()
        .cmp(&b_owner.is_some())
        .then_with(|| roles.role_rank(a_owner).cmp(&roles.role_rank(b_owner)))
        .then_with(|| hero_name(a).cmp(hero_name(b)))
        .then_with(|| rank::category(&a.category).cmp(&rank::category(&b.category)))
        .then_with(|| rank::rarity(&a.rarity).cmp(&rank::rarity(&b.rarity)))
        .then_with(|| a.cost.total_cmp(&b.cost))
        .then_with(|| a.name.cmp(&b.name))
}

/// Orders item entries and returns their ids.
pub fn sort_items(entries: &[CatalogEntry], roles: &RoleMap) -> Vec<EntryId> {
    let lookup = HeroRoles::new(roles);
    let mut sorted: Vec<&CatalogEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| compare_items(a, b, &lookup));
    sorted.into_iter().map(|e| e.id.clone()).collect()
}

/// Rank of an entry's ability within its hero's declared ability list.
pub fn ability_rank(
    hero: &str,
    ability: &str,
    abilities: &AbilityMap,
    rules: &OrderingRules,
) -> i64 {
    let hero = hero.trim();
    let ability = ability.trim();
    let special = rules.is_ultimate_less(hero);

    if ability.is_empty() {
        return if special { i64::MAX } else { -1 };
    }

    let declared = abilities.get(hero).map(Vec::as_slice).unwrap_or(&[]);
    let wanted = ability.to_lowercase();
    match declared.iter().position(|a| a.trim().to_lowercase() == wanted) {
        Some(idx) => idx as i64,
        None if special => i64::MAX,
        None => declared.len() as i64 + 1,
    }
}

/// Orders power entries and returns their ids.
pub fn sort_powers(
    entries: &[CatalogEntry],
    roles: &RoleMap,
    abilities: &AbilityMap,
    rules: &OrderingRules,
) -> Vec<EntryId> {
    let lookup = HeroRoles::new(roles);
    let mut keyed: Vec<(u32, &str, i64, &CatalogEntry)> = entries
        .iter()
        .map(|e| {
            let hero = hero_name(e);
            (
                lookup.role_rank(e.owner()),
                hero,
                ability_rank(hero, &e.ability, abilities, rules),
                e,
            )
        })
        .collect();

    keyed.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.cmp(b.1))
            .then_with(|| a.2.cmp(&b.2))
            .then_with(|| a.3.name.cmp(&b.3.name))
    });
    keyed.into_iter().map(|(_, _, _, e)| e.id.clone()).collect()
}

fn normalize_entries(entries: Vec<CatalogEntry>, mode: CategoryMode) -> Vec<CatalogEntry> {
    entries
        .into_iter()
        .filter_map(|mut e| {
            e.id = e.id.trim().to_string();
            e.name = e.name.trim().to_string();
            if e.id.is_empty() || e.name.is_empty() {
                debug!(mode = %mode, id = %e.id, "skipping catalog entry without id or name");
                return None;
            }
            e.hero = e.owner().map(str::to_string);
            e.category = e.category.trim().to_string();
            e.rarity = e.rarity.trim().to_string();
            e.ability = e.ability.trim().to_string();
            Some(e)
        })
        .collect()
}

fn normalize_abilities(abilities: AbilityMap) -> AbilityMap {
    abilities
        .into_iter()
        .map(|(hero, list)| {
            let list = list
                .into_iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect();
            (hero.trim().to_string(), list)
        })
        .collect()
}

/// Immutable, ordered view of the catalog for both modes.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    by_id: HashMap<EntryId, CatalogEntry>,
    members: ByMode<HashSet<EntryId>>,
    ordered: ByMode<Vec<EntryId>>,
    roles: RoleMap,
}

impl CatalogIndex {
    pub fn build(source: CatalogSource, rules: &OrderingRules) -> Self {
        let items = normalize_entries(source.items, CategoryMode::Items);
        let powers = normalize_entries(source.powers, CategoryMode::Powers);
        let abilities = normalize_abilities(source.abilities);

        let ordered = ByMode::new(
            sort_items(&items, &source.roles),
            sort_powers(&powers, &source.roles, &abilities, rules),
        );
        let members = ByMode::new(
            items.iter().map(|e| e.id.clone()).collect(),
            powers.iter().map(|e| e.id.clone()).collect(),
        );
        debug!(
            items = items.len(),
            powers = powers.len(),
            "catalog index built"
        );

        let by_id = items
            .into_iter()
            .chain(powers)
            .map(|e| (e.id.clone(), e))
            .collect();

        Self {
            by_id,
            members,
            ordered,
            roles: source.roles,
        }
    }

    pub fn ordered_ids(&self, mode: CategoryMode) -> &[EntryId] {
        self.ordered.get(mode)
    }

    pub fn ids(&self, mode: CategoryMode) -> &HashSet<EntryId> {
        self.members.get(mode)
    }

    pub fn contains(&self, mode: CategoryMode, id: &str) -> bool {
        self.members.get(mode).contains(id)
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(id)
    }

    pub fn roles(&self) -> &RoleMap {
        &self.roles
    }

    /// Catalog-ordered ids of `mode` that are not placed in any tier.
    pub fn bank<'a>(&'a self, mode: CategoryMode, assignment: &Assignment) -> Vec<&'a EntryId> {
        let placed = assignment.placed_ids();
        self.ordered_ids(mode)
            .iter()
            .filter(|id| !placed.contains(id.as_str()))
            .collect()
    }

    /// Finds an entry of `mode` by exact id, then by case-insensitive name.
    pub fn resolve(&self, mode: CategoryMode, key: &str) -> Option<&CatalogEntry> {
        let key = key.trim();
        if self.contains(mode, key) {
            return self.get(key);
        }
        let wanted = key.to_lowercase();
        self.ordered_ids(mode)
            .iter()
            .filter_map(|id| self.get(id))
            .find(|e| e.name.to_lowercase() == wanted)
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// A small catalog with two heroes per role and a handful of entries.
    pub fn sample_source() -> CatalogSource {
        let mut roles = RoleMap::new();
        roles.insert("Tank".into(), vec!["Reinhardt".into(), "D.Va".into()]);
        roles.insert("Damage".into(), vec!["Pharah".into(), "Cassidy".into()]);
        roles.insert("Support".into(), vec!["Mercy".into(), "Ana".into()]);

        let mut abilities = AbilityMap::new();
        abilities.insert(
            "Mercy".into(),
            vec!["Guardian Angel".into(), "Resurrect".into()],
        );
        abilities.insert("Pharah".into(), vec!["Jump Jet".into(), "Concussive Blast".into()]);

        CatalogSource {
            items: vec![
                CatalogEntry::new("i-shield", "Shield Battery")
                    .with_hero("Reinhardt")
                    .with_category("Survival")
                    .with_rarity("Rare")
                    .with_cost(4000.0),
                CatalogEntry::new("i-ammo", "Compensator")
                    .with_category("Weapon")
                    .with_rarity("Common")
                    .with_cost(1000.0),
                CatalogEntry::new("i-wings", "Wingman")
                    .with_hero("Mercy")
                    .with_category("Ability")
                    .with_rarity("Epic")
                    .with_cost(9500.0),
                CatalogEntry::new("i-boots", "Runner's Boots")
                    .with_category("Survival")
                    .with_rarity("Common")
                    .with_cost(1000.0),
                CatalogEntry::new("i-scope", "Long Scope")
                    .with_hero("Cassidy")
                    .with_category("Weapon")
                    .with_rarity("Rare")
                    .with_cost(3750.0),
            ],
            powers: vec![
                CatalogEntry::new("p-res", "Second Chance")
                    .with_hero("Mercy")
                    .with_ability("Resurrect"),
                CatalogEntry::new("p-ga", "Flash Heal")
                    .with_hero("Mercy")
                    .with_ability("guardian angel"),
                CatalogEntry::new("p-rocket", "Rocket Rain").with_hero("Pharah"),
                CatalogEntry::new("p-jet", "Higher Ground")
                    .with_hero("Pharah")
                    .with_ability("Jump Jet"),
                CatalogEntry::new("p-charge", "Earthshatter Rush").with_hero("Reinhardt"),
            ],
            roles,
            abilities,
        }
    }

    pub fn sample_index() -> CatalogIndex {
        CatalogIndex::build(sample_source(), &OrderingRules::default())
    }
}
