use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Opaque, stable catalog identifier.
pub type EntryId = String;

/// Which of the two parallel catalogs (and assignments) is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryMode {
    #[default]
    Items,
    Powers,
}

impl CategoryMode {
    pub const ALL: [CategoryMode; 2] = [CategoryMode::Items, CategoryMode::Powers];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryMode::Items => "items",
            CategoryMode::Powers => "powers",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryMode::Items => "Items",
            CategoryMode::Powers => "Powers",
        }
    }
}

impl fmt::Display for CategoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "items" | "item" | "i" => Ok(CategoryMode::Items),
            "powers" | "power" | "p" => Ok(CategoryMode::Powers),
            _ => Err(format!("Invalid mode: {} (expected items or powers)", s)),
        }
    }
}

/// Ranking bucket. Declaration order is display order (S first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
}

impl Tier {
    pub const ALL: [Tier; 5] = [Tier::S, Tier::A, Tier::B, Tier::C, Tier::D];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "S" => Ok(Tier::S),
            "A" => Ok(Tier::A),
            "B" => Ok(Tier::B),
            "C" => Ok(Tier::C),
            "D" => Ok(Tier::D),
            _ => Err(format!("Invalid tier: {} (expected S, A, B, C or D)", s)),
        }
    }
}

/// One catalog item or power. Never mutated after ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: EntryId,
    pub name: String,
    #[serde(default)]
    pub hero: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub cost: f64,
    /// Name of the hero ability this entry modifies (powers only).
    #[serde(default)]
    pub ability: String,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hero: None,
            category: String::new(),
            rarity: String::new(),
            cost: 0.0,
            ability: String::new(),
        }
    }

    pub fn with_hero(mut self, hero: impl Into<String>) -> Self {
        self.hero = Some(hero.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = ability.into();
        self
    }

    /// Owning hero name, or `None` for universal entries.
    pub fn owner(&self) -> Option<&str> {
        self.hero
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// A value kept separately for each [`CategoryMode`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByMode<T> {
    pub items: T,
    pub powers: T,
}

impl<T> ByMode<T> {
    pub fn new(items: T, powers: T) -> Self {
        Self { items, powers }
    }

    pub fn get(&self, mode: CategoryMode) -> &T {
        match mode {
            CategoryMode::Items => &self.items,
            CategoryMode::Powers => &self.powers,
        }
    }

    pub fn get_mut(&mut self, mode: CategoryMode) -> &mut T {
        match mode {
            CategoryMode::Items => &mut self.items,
            CategoryMode::Powers => &mut self.powers,
        }
    }
}

/// Tier placement for one mode. Order inside a tier is meaningful.
///
/// Invariant (enforced by the store, not by this type): an id appears in at
/// most one tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    tiers: [Vec<EntryId>; 5],
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tier(&self, tier: Tier) -> &[EntryId] {
        &self.tiers[tier.index()]
    }

    pub fn set_tier(&mut self, tier: Tier, ids: Vec<EntryId>) {
        self.tiers[tier.index()] = ids;
    }

    pub fn with_tier<I, S>(mut self, tier: Tier, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EntryId>,
    {
        self.tiers[tier.index()] = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[EntryId])> {
        Tier::ALL.into_iter().map(move |t| (t, self.tier(t)))
    }

    pub fn tier_of(&self, id: &str) -> Option<Tier> {
        self.iter()
            .find(|(_, ids)| ids.iter().any(|x| x == id))
            .map(|(t, _)| t)
    }

    pub fn placed_ids(&self) -> HashSet<&str> {
        self.tiers.iter().flatten().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.iter().all(Vec::is_empty)
    }

    /// Returns the first id found in more than one position, if any.
    pub fn first_duplicate(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.tiers
            .iter()
            .flatten()
            .find(|id| !seen.insert(id.as_str()))
            .map(String::as_str)
    }

    /// Builds an assignment from loosely-shaped external JSON.
    ///
    /// Anything that is not an object yields an empty assignment; a tier whose
    /// value is not an array is treated as empty, and non-string elements of
    /// an array are dropped. Unknown keys are ignored.
    pub fn from_value(value: &Value) -> Self {
        let mut out = Self::new();
        let Some(obj) = value.as_object() else {
            return out;
        };
        for tier in Tier::ALL {
            let ids = match obj.get(tier.as_str()) {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
                _ => Vec::new(),
            };
            out.set_tier(tier, ids);
        }
        out
    }

    /// Serializes only non-empty tiers, in S..D order.
    pub fn pruned(&self) -> PrunedTiers<'_> {
        PrunedTiers(self)
    }
}

impl Serialize for Assignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Tier::ALL.len()))?;
        for (tier, ids) in self.iter() {
            map.serialize_entry(tier.as_str(), ids)?;
        }
        map.end()
    }
}

pub struct PrunedTiers<'a>(&'a Assignment);

impl Serialize for PrunedTiers<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let non_empty: Vec<_> = self.0.iter().filter(|(_, ids)| !ids.is_empty()).collect();
        let mut map = serializer.serialize_map(Some(non_empty.len()))?;
        for (tier, ids) in non_empty {
            map.serialize_entry(tier.as_str(), ids)?;
        }
        map.end()
    }
}
