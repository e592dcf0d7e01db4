//! Explicit per-session context: the active mode and both modes' filters.
//!
//! Every operation that depends on "what is currently shown" takes a
//! [`Session`] instead of reading shared state.

use crate::catalog::CatalogIndex;
use crate::filter::{Filters, HeroFilter};
use crate::model::CategoryMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub mode: CategoryMode,
    pub filters: Filters,
}

impl Session {
    pub fn new(mode: CategoryMode, filters: Filters) -> Self {
        Self { mode, filters }
    }

    pub fn filter(&self) -> &HeroFilter {
        self.filters.get(self.mode)
    }

    pub fn filter_mut(&mut self) -> &mut HeroFilter {
        self.filters.get_mut(self.mode)
    }

    /// Visibility of a catalog id under the active mode's filter.
    ///
    /// Ids unknown to the catalog are never visible.
    pub fn is_visible(&self, catalog: &CatalogIndex, id: &str) -> bool {
        catalog
            .get(id)
            .map(|entry| self.filter().is_visible(entry))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_index;

    #[test]
    fn test_visibility_uses_active_mode_filter() {
        let catalog = sample_index();
        let mut session = Session::new(CategoryMode::Items, Filters::all_enabled(catalog.roles()));
        assert!(session.is_visible(&catalog, "i-wings"));

        session.filters.powers.set_hero("Mercy", false);
        assert!(session.is_visible(&catalog, "i-wings"));

        session.filter_mut().set_hero("Mercy", false);
        assert!(!session.is_visible(&catalog, "i-wings"));
        assert!(!session.is_visible(&catalog, "no-such-id"));
    }
}
