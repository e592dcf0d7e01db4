//! Stored records for assignments and filters.
//!
//! Assignments are kept under [`STATE_KEY`] as
//!
//! ```text
//! { "mode": "items", "stateByMode": { "items": {S,A,B,C,D}, "powers": {...} }, "savedAt": "..." }
//! ```
//!
//! and filters under [`FILTER_KEY`]. Loading never fails: absent or corrupt
//! records fall back to empty state and the problem is logged.

use super::backend::StateBackend;
use super::AssignmentStore;
use crate::catalog::RoleMap;
use crate::error::{Result, TierError};
use crate::filter::{Filters, HeroFilter};
use crate::model::{Assignment, ByMode, CategoryMode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub const STATE_KEY: &str = "tierlist_state_v1";
pub const FILTER_KEY: &str = "hero_filter_v1";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    pub mode: CategoryMode,
    pub store: AssignmentStore,
    pub saved_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct StateRecord<'a> {
    mode: CategoryMode,
    #[serde(rename = "stateByMode")]
    state_by_mode: ModeRecord<&'a Assignment>,
    #[serde(rename = "savedAt")]
    saved_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct ModeRecord<T> {
    items: T,
    powers: T,
}

#[derive(Serialize)]
struct FilterRecord<'a> {
    heroes: &'a BTreeMap<String, bool>,
    universal: bool,
}

impl<'a> From<&'a HeroFilter> for FilterRecord<'a> {
    fn from(filter: &'a HeroFilter) -> Self {
        Self {
            heroes: &filter.heroes,
            universal: filter.universal,
        }
    }
}

/// Parses a stored assignment record, coercing tier shapes.
///
/// Fails only when the text is not JSON or not a JSON object.
pub fn parse_state(text: &str) -> Result<PersistedState> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| TierError::Decode(e.to_string()))?;
    if !value.is_object() {
        return Err(TierError::Decode("state record is not an object".to_string()));
    }

    let mode = value
        .get("mode")
        .and_then(Value::as_str)
        .and_then(|m| m.parse().ok())
        .unwrap_or_default();
    let states = value.get("stateByMode");
    let assignment = |mode: CategoryMode| {
        states
            .and_then(|s| s.get(mode.as_str()))
            .map(Assignment::from_value)
            .unwrap_or_default()
    };
    let saved_at = value
        .get("savedAt")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<DateTime<Utc>>().ok());

    Ok(PersistedState {
        mode,
        store: AssignmentStore::from_parts(
            assignment(CategoryMode::Items),
            assignment(CategoryMode::Powers),
        ),
        saved_at,
    })
}

pub fn serialize_state(mode: CategoryMode, store: &AssignmentStore) -> Result<String> {
    let record = StateRecord {
        mode,
        state_by_mode: ModeRecord {
            items: store.get(CategoryMode::Items),
            powers: store.get(CategoryMode::Powers),
        },
        saved_at: Utc::now(),
    };
    Ok(serde_json::to_string(&record)?)
}

/// Loads the stored assignment record, falling back to empty state.
pub fn load_state<B: StateBackend>(backend: &B) -> PersistedState {
    let text = match backend.load(STATE_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!("no persisted state, starting empty");
            return PersistedState::default();
        }
        Err(e) => {
            warn!(error = %e, "failed to read persisted state");
            return PersistedState::default();
        }
    };
    match parse_state(&text) {
        Ok(state) => state,
        Err(e) => {
            warn!(error = %e, "ignoring corrupt persisted state");
            PersistedState::default()
        }
    }
}

pub fn save_state<B: StateBackend>(
    backend: &B,
    mode: CategoryMode,
    store: &AssignmentStore,
) -> Result<()> {
    let text = serialize_state(mode, store)?;
    backend.save(STATE_KEY, &text)
}

/// Loads filters for both modes; heroes come from `roles`, saved switches
/// are applied on top.
pub fn load_filters<B: StateBackend>(backend: &B, roles: &RoleMap) -> Filters {
    let saved: Option<Value> = match backend.load(FILTER_KEY) {
        Ok(Some(text)) => match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "ignoring corrupt filter state");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "failed to read filter state");
            None
        }
    };
    let bucket = |mode: CategoryMode| {
        HeroFilter::from_value(roles, saved.as_ref().and_then(|v| v.get(mode.as_str())))
    };
    ByMode::new(bucket(CategoryMode::Items), bucket(CategoryMode::Powers))
}

pub fn save_filters<B: StateBackend>(backend: &B, filters: &Filters) -> Result<()> {
    let text = serde_json::to_string(&ModeRecord {
        items: FilterRecord::from(&filters.items),
        powers: FilterRecord::from(&filters.powers),
    })?;
    backend.save(FILTER_KEY, &text)
}
