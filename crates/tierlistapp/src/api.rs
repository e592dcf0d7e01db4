//! # API Facade
//!
//! The single entry point for tier list operations, whatever the UI.
//!
//! `TierlistApi<B: StateBackend, C: Compressor>` owns everything a session
//! needs: the catalog index, the assignment store, the [`Session`] (active
//! mode and filters), the drag engine and the share codec.
//!
//! - Production: `TierlistApi<FsBackend, GzipCompressor>`
//! - Testing: `TierlistApi<MemBackend, _>`
//!
//! ## Persistence
//!
//! Every committed change (placement, drag, mode switch, reset, import) is
//! written through the backend right away. Writes are best effort: a failure
//! is logged with `warn!` and the in-memory state stays as it is.
//!
//! ## What the API Does NOT Do
//!
//! - No stdout/stderr, no formatting: methods return data
//! - No rendering: drags take rectangles from a [`Layout`] supplied by the caller

use crate::catalog::CatalogIndex;
use crate::codec::{extract_token, share_url, Codec, Compressor};
use crate::error::{Result, TierError};
use crate::filter::{HeroFilter, RoleState};
use crate::model::{Assignment, CategoryMode, EntryId, Tier};
use crate::reorder::{
    Board, ContainerId, DragEngine, DragEvent, DragOptions, DragOutcome, Layout,
};
use crate::session::Session;
use crate::share::{make_link, ShareLink, Shortener};
use crate::store::backend::StateBackend;
use crate::store::persisted::{load_filters, load_state, save_filters, save_state};
use crate::store::AssignmentStore;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ApiOptions {
    pub share_base_url: String,
    pub drag: DragOptions,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            share_base_url: crate::config::DEFAULT_SHARE_BASE_URL.to_string(),
            drag: DragOptions::default(),
        }
    }
}

pub struct TierlistApi<B: StateBackend, C: Compressor> {
    catalog: CatalogIndex,
    store: AssignmentStore,
    session: Session,
    engine: DragEngine,
    /// Mode the active gesture started in.
    drag_mode: Option<CategoryMode>,
    codec: Codec<C>,
    backend: B,
    share_base_url: String,
}

impl<B: StateBackend, C: Compressor> TierlistApi<B, C> {
    /// Restores persisted state and filters, then drops anything the catalog
    /// no longer has.
    pub fn open(catalog: CatalogIndex, backend: B, compressor: C, options: ApiOptions) -> Self {
        let persisted = load_state(&backend);
        let filters = load_filters(&backend, catalog.roles());
        let mut api = Self {
            store: persisted.store,
            session: Session::new(persisted.mode, filters),
            engine: DragEngine::new(options.drag),
            drag_mode: None,
            codec: Codec::new(compressor),
            share_base_url: options.share_base_url,
            catalog,
            backend,
        };
        let removed = api.sanitize_all();
        if removed > 0 {
            info!(removed, "dropped placements unknown to the catalog");
        }
        api
    }

    fn sanitize_all(&mut self) -> usize {
        CategoryMode::ALL
            .into_iter()
            .map(|mode| self.store.sanitize(mode, self.catalog.ids(mode)))
            .sum()
    }

    fn persist_state(&self) {
        if let Err(e) = save_state(&self.backend, self.session.mode, &self.store) {
            warn!(error = %e, "failed to persist tier state");
        }
    }

    fn persist_filters(&self) {
        if let Err(e) = save_filters(&self.backend, &self.session.filters) {
            warn!(error = %e, "failed to persist filters");
        }
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn mode(&self) -> CategoryMode {
        self.session.mode
    }

    /// Returns whether the mode changed. The other mode is left untouched.
    pub fn switch_mode(&mut self, mode: CategoryMode) -> bool {
        if self.session.mode == mode {
            return false;
        }
        self.abort_drag();
        self.session.mode = mode;
        self.persist_state();
        true
    }

    /// Active mode's assignment.
    pub fn assignment(&self) -> &Assignment {
        self.store.get(self.session.mode)
    }

    pub fn assignment_for(&self, mode: CategoryMode) -> &Assignment {
        self.store.get(mode)
    }

    pub fn store(&self) -> &AssignmentStore {
        &self.store
    }

    /// What the active mode shows: tiers in full, bank narrowed by filters.
    pub fn board(&self) -> Board {
        self.board_for(self.session.mode)
    }

    /// Board of any mode, under that mode's own filter.
    pub fn board_for(&self, mode: CategoryMode) -> Board {
        let filter = self.session.filters.get(mode);
        Board::build(&self.catalog, mode, self.store.get(mode), |id| {
            self.catalog.get(id).is_some_and(|e| filter.is_visible(e))
        })
    }

    /// Visible unplaced ids in catalog order.
    pub fn bank(&self) -> Vec<&EntryId> {
        self.catalog
            .bank(self.session.mode, self.assignment())
            .into_iter()
            .filter(|id| self.is_visible(id))
            .collect()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.session.is_visible(&self.catalog, id)
    }

    fn resolve(&self, key: &str) -> Result<EntryId> {
        self.catalog
            .resolve(self.session.mode, key)
            .map(|e| e.id.clone())
            .ok_or_else(|| {
                TierError::NotFound(format!("'{}' in {} catalog", key, self.session.mode))
            })
    }

    fn commit(&mut self, snapshot: Assignment) -> Result<Vec<Tier>> {
        self.commit_to(self.session.mode, snapshot)
    }

    fn commit_to(&mut self, mode: CategoryMode, snapshot: Assignment) -> Result<Vec<Tier>> {
        let changed = self.store.commit(mode, snapshot)?;
        if changed.is_empty() {
            debug!("placement unchanged, nothing to persist");
        } else {
            self.persist_state();
        }
        Ok(changed)
    }

    /// Moves an entry (by id or name) into `target`, before `before` when
    /// given, else at the end. Returns the tiers that changed.
    pub fn place(
        &mut self,
        key: &str,
        target: ContainerId,
        before: Option<&str>,
    ) -> Result<Vec<Tier>> {
        let id = self.resolve(key)?;
        let anchor = before.map(|b| self.resolve(b)).transpose()?;

        let mut board =
            Board::build(&self.catalog, self.session.mode, self.assignment(), |_| true);
        if let Some(anchor) = &anchor {
            if board.position_in(target, anchor).is_none() {
                return Err(TierError::Validation(format!(
                    "'{}' is not in {}",
                    anchor, target
                )));
            }
        }
        board.move_to(&id, target, anchor.as_deref())?;
        self.commit(board.to_assignment())
    }

    /// Feeds one pointer event to the drag engine; a finished gesture with a
    /// new placement is committed to the mode it started in, and persisted.
    pub fn handle_drag<L: Layout>(
        &mut self,
        event: DragEvent,
        layout: &L,
    ) -> Result<DragOutcome> {
        let board = match event {
            DragEvent::Start { .. } => self.board(),
            _ => Board::default(),
        };
        let outcome = self.engine.handle(event, &board, layout);
        if outcome == DragOutcome::Started {
            self.drag_mode = Some(self.session.mode);
        }
        let mode = self.drag_mode.unwrap_or(self.session.mode);
        if !self.engine.is_dragging() {
            self.drag_mode = None;
        }
        if let DragOutcome::Committed(snapshot) = &outcome {
            self.commit_to(mode, snapshot.clone())?;
        }
        Ok(outcome)
    }

    pub fn is_dragging(&self) -> bool {
        self.engine.is_dragging()
    }

    /// Ends the active gesture, if any, without placing anything.
    fn abort_drag(&mut self) {
        if self.engine.abort() {
            debug!(mode = ?self.drag_mode, "drag aborted by a state change");
        }
        self.drag_mode = None;
    }

    /// Clears the active mode's tiers and re-enables all of its filters.
    pub fn reset(&mut self) {
        self.abort_drag();
        self.store.reset(self.session.mode);
        let roles = self.catalog.roles();
        self.session.filters.get_mut(self.session.mode).reset(roles);
        self.persist_state();
        self.persist_filters();
    }

    pub fn share_token(&self) -> Result<String> {
        self.codec.encode(&self.store, self.session.mode)
    }

    pub fn share_url(&self) -> Result<String> {
        Ok(share_url(&self.share_base_url, &self.share_token()?))
    }

    pub fn share_link(&self, shortener: Option<&dyn Shortener>) -> Result<ShareLink> {
        Ok(make_link(&self.share_url()?, shortener))
    }

    /// Replaces both modes and the active mode with a decoded token.
    ///
    /// On a decode failure nothing changes.
    pub fn import_share(&mut self, token: &str) -> Result<()> {
        let decoded = self.codec.decode(token).inspect_err(|e| {
            warn!(error = %e, "ignoring undecodable share token");
        })?;
        self.abort_drag();
        self.store = decoded.store;
        self.session.mode = decoded.mode;
        let removed = self.sanitize_all();
        debug!(removed, mode = %decoded.mode, "imported shared state");
        self.persist_state();
        Ok(())
    }

    /// Imports the share token found in a URL or fragment.
    ///
    /// Returns `Ok(false)` when there is no token.
    pub fn load_fragment(&mut self, url: &str) -> Result<bool> {
        match extract_token(url) {
            Some(token) => self.import_share(token).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn filter(&self) -> &HeroFilter {
        self.session.filter()
    }

    fn hero_name(&self, hero: &str) -> Result<String> {
        let hero = hero.trim();
        self.session
            .filter()
            .heroes
            .keys()
            .find(|h| h.eq_ignore_ascii_case(hero))
            .cloned()
            .ok_or_else(|| TierError::NotFound(format!("hero '{}'", hero)))
    }

    fn role_name(&self, role: &str) -> Result<String> {
        let role = role.trim();
        self.catalog
            .roles()
            .keys()
            .find(|r| r.eq_ignore_ascii_case(role))
            .cloned()
            .ok_or_else(|| TierError::NotFound(format!("role '{}'", role)))
    }

    pub fn set_hero_filter(&mut self, hero: &str, on: bool) -> Result<()> {
        let hero = self.hero_name(hero)?;
        self.session.filter_mut().set_hero(&hero, on);
        self.persist_filters();
        Ok(())
    }

    pub fn set_role_filter(&mut self, role: &str, on: bool) -> Result<()> {
        let role = self.role_name(role)?;
        let roles = self.catalog.roles();
        self.session
            .filters
            .get_mut(self.session.mode)
            .set_role(roles, &role, on);
        self.persist_filters();
        Ok(())
    }

    pub fn set_all_filters(&mut self, on: bool) {
        self.session.filter_mut().set_all(on);
        self.persist_filters();
    }

    pub fn set_universal_filter(&mut self, on: bool) {
        self.session.filter_mut().universal = on;
        self.persist_filters();
    }

    pub fn role_state(&self, role: &str) -> Result<RoleState> {
        let role = self.role_name(role)?;
        Ok(self.session.filter().role_state(self.catalog.roles(), &role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_index;
    use crate::catalog::{CatalogSource, OrderingRules};
    use crate::codec::{GzipCompressor, NoopCompressor};
    use crate::model::CatalogEntry;
    use crate::reorder::{ItemRect, Point, Rect, ScrollArea, ScrollTarget};
    use crate::store::memory::MemBackend;
    use crate::store::persisted::{FILTER_KEY, STATE_KEY};

    fn api() -> TierlistApi<MemBackend, GzipCompressor> {
        TierlistApi::open(
            sample_index(),
            MemBackend::new(),
            GzipCompressor,
            ApiOptions::default(),
        )
    }

    fn e_catalog(ids: &[&str]) -> CatalogIndex {
        let source = CatalogSource {
            items: ids.iter().map(|id| CatalogEntry::new(*id, *id)).collect(),
            ..Default::default()
        };
        CatalogIndex::build(source, &OrderingRules::default())
    }

    #[test]
    fn test_place_before_and_share_round_trip() {
        let mut api = TierlistApi::open(
            e_catalog(&["E1", "E2"]),
            MemBackend::new(),
            GzipCompressor,
            ApiOptions::default(),
        );
        api.place("E1", ContainerId::Tier(Tier::S), None).unwrap();
        api.place("E2", ContainerId::Tier(Tier::S), Some("E1")).unwrap();
        assert_eq!(api.assignment().tier(Tier::S), ["E2", "E1"]);

        let token = api.share_token().unwrap();
        let mut other = TierlistApi::open(
            e_catalog(&["E1"]),
            MemBackend::new(),
            GzipCompressor,
            ApiOptions::default(),
        );
        other.import_share(&token).unwrap();
        assert_eq!(other.assignment().tier(Tier::S), ["E1"]);
    }

    #[test]
    fn test_place_persists_and_reopen_restores() {
        let mut api = api();
        api.place("i-wings", ContainerId::Tier(Tier::A), None).unwrap();
        let saved = api.backend().load(STATE_KEY).unwrap().unwrap();
        assert!(saved.contains("i-wings"));

        let backend = MemBackend::new();
        backend.seed(STATE_KEY, &saved);
        let reopened =
            TierlistApi::open(sample_index(), backend, GzipCompressor, ApiOptions::default());
        assert_eq!(reopened.assignment().tier(Tier::A), ["i-wings"]);
    }

    #[test]
    fn test_place_by_name_and_unknown_entry() {
        let mut api = api();
        api.place("long scope", ContainerId::Tier(Tier::B), None).unwrap();
        assert_eq!(api.assignment().tier(Tier::B), ["i-scope"]);

        let err = api.place("nope", ContainerId::Tier(Tier::B), None).unwrap_err();
        assert!(matches!(err, TierError::NotFound(_)));
        let err = api
            .place("i-ammo", ContainerId::Tier(Tier::B), Some("i-wings"))
            .unwrap_err();
        assert!(matches!(err, TierError::Validation(_)));
    }

    #[test]
    fn test_place_back_into_bank() {
        let mut api = api();
        api.place("i-ammo", ContainerId::Tier(Tier::C), None).unwrap();
        let changed = api.place("i-ammo", ContainerId::Bank, None).unwrap();
        assert_eq!(changed, vec![Tier::C]);
        assert!(api.assignment().is_empty());
        assert_eq!(api.bank().len(), 5);
    }

    #[test]
    fn test_switch_mode_preserves_other_mode() {
        let mut api = api();
        api.place("i-ammo", ContainerId::Tier(Tier::S), None).unwrap();
        let items = api.assignment().clone();

        assert!(api.switch_mode(CategoryMode::Powers));
        assert!(!api.switch_mode(CategoryMode::Powers));
        api.place("p-jet", ContainerId::Tier(Tier::D), None).unwrap();
        assert_eq!(api.assignment_for(CategoryMode::Items), &items);

        api.switch_mode(CategoryMode::Items);
        assert_eq!(api.assignment(), &items);
        assert_eq!(api.assignment_for(CategoryMode::Powers).tier(Tier::D), ["p-jet"]);
    }

    #[test]
    fn test_corrupt_import_leaves_state_untouched() {
        let mut api = api();
        api.place("i-ammo", ContainerId::Tier(Tier::S), None).unwrap();
        let token = api.share_token().unwrap();
        let before = api.store().clone();

        let err = api.import_share(&token[..token.len() - 6]).unwrap_err();
        assert!(matches!(err, TierError::Decode(_)));
        assert_eq!(api.store(), &before);
        assert_eq!(api.mode(), CategoryMode::Items);

        let url = format!("https://x.test/#s={}", "AAAA");
        assert!(api.load_fragment(&url).is_err());
        assert_eq!(api.store(), &before);
        assert!(!api.load_fragment("https://x.test/#other=1").unwrap());
    }

    #[test]
    fn test_load_fragment_overrides_local_state_and_persists() {
        let mut source = api();
        source.switch_mode(CategoryMode::Powers);
        source.place("p-res", ContainerId::Tier(Tier::S), None).unwrap();
        let url = source.share_url().unwrap();
        assert!(url.starts_with("https://tierlist.local/#s="));

        let mut target = api();
        target.place("i-ammo", ContainerId::Tier(Tier::D), None).unwrap();
        assert!(target.load_fragment(&url).unwrap());
        assert_eq!(target.mode(), CategoryMode::Powers);
        assert_eq!(target.assignment().tier(Tier::S), ["p-res"]);
        assert!(target.assignment_for(CategoryMode::Items).is_empty());

        let saved = target.backend().load(STATE_KEY).unwrap().unwrap();
        assert!(saved.contains("p-res"));
        assert!(!saved.contains("i-ammo"));
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut api = api();
        api.backend().set_simulate_write_error(true);
        api.place("i-boots", ContainerId::Tier(Tier::S), None).unwrap();
        assert_eq!(api.assignment().tier(Tier::S), ["i-boots"]);
        assert!(api.backend().load(STATE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_filters_hide_bank_but_not_tiers() {
        let mut api = api();
        api.place("i-wings", ContainerId::Tier(Tier::S), None).unwrap();
        api.set_hero_filter("mercy", false).unwrap();
        api.set_role_filter("damage", false).unwrap();
        api.set_universal_filter(false);

        assert!(!api.is_visible("i-wings"));
        assert_eq!(api.assignment().tier(Tier::S), ["i-wings"]);
        assert_eq!(api.board().container(ContainerId::Tier(Tier::S)), ["i-wings"]);
        assert_eq!(api.bank(), vec!["i-shield"]);
        assert_eq!(api.role_state("Damage").unwrap(), RoleState::None);
        assert!(api.backend().load(FILTER_KEY).unwrap().is_some());

        assert!(matches!(
            api.set_hero_filter("Nobody", true),
            Err(TierError::NotFound(_))
        ));
    }

    #[test]
    fn test_reset_clears_mode_and_its_filters() {
        let mut api = api();
        api.place("i-ammo", ContainerId::Tier(Tier::S), None).unwrap();
        api.set_all_filters(false);
        api.switch_mode(CategoryMode::Powers);
        api.place("p-ga", ContainerId::Tier(Tier::A), None).unwrap();
        api.set_all_filters(false);
        api.switch_mode(CategoryMode::Items);

        api.reset();
        assert!(api.assignment().is_empty());
        assert!(api.filter().all_on());
        assert_eq!(api.assignment_for(CategoryMode::Powers).tier(Tier::A), ["p-ga"]);
        assert!(!api.session().filters.powers.all_on());
    }

    #[test]
    fn test_open_sanitizes_unknown_ids() {
        let backend = MemBackend::new();
        backend.seed(
            STATE_KEY,
            r#"{"mode":"items","stateByMode":{"items":{"S":["ghost","i-ammo"]},"powers":{}}}"#,
        );
        let api = TierlistApi::open(sample_index(), backend, NoopCompressor, ApiOptions::default());
        assert_eq!(api.assignment().tier(Tier::S), ["i-ammo"]);
    }

    /// Renders each container as a single row of 60x40 cards, 100 apart.
    struct RowLayout(Board);

    impl Layout for RowLayout {
        fn item_rects(&self, container: ContainerId) -> Vec<ItemRect> {
            let top = match container {
                ContainerId::Tier(t) => t.index() as f64 * 100.0,
                ContainerId::Bank => 500.0,
            };
            self.0
                .container(container)
                .iter()
                .enumerate()
                .map(|(i, id)| {
                    ItemRect::new(id.clone(), Rect::new(i as f64 * 100.0, top, 60.0, 40.0))
                })
                .collect()
        }

        fn scroll_area(&self, _over: Option<ContainerId>) -> ScrollArea {
            ScrollArea {
                target: ScrollTarget::Viewport,
                rect: Rect::new(0.0, 0.0, 1000.0, 2000.0),
            }
        }
    }

    #[test]
    fn test_drag_gesture_commits_through_store() {
        let mut api = api();
        api.place("i-ammo", ContainerId::Tier(Tier::S), None).unwrap();
        let layout = RowLayout(api.board());

        let start = DragEvent::Start {
            id: "i-scope".into(),
            pointer: Point::new(300.0, 520.0),
        };
        assert_eq!(api.handle_drag(start, &layout).unwrap(), DragOutcome::Started);
        assert!(api.is_dragging());

        let over_s = DragEvent::Move {
            over: Some(ContainerId::Tier(Tier::S)),
            pointer: Point::new(10.0, 20.0),
        };
        api.handle_drag(over_s, &layout).unwrap();
        api.handle_drag(DragEvent::Frame, &layout).unwrap();
        let outcome = api
            .handle_drag(
                DragEvent::Drop {
                    over: Some(ContainerId::Tier(Tier::S)),
                },
                &layout,
            )
            .unwrap();

        assert!(matches!(outcome, DragOutcome::Committed(_)));
        assert_eq!(api.assignment().tier(Tier::S), ["i-scope", "i-ammo"]);
        assert!(!api.is_dragging());
    }

    #[test]
    fn test_cancelled_drag_changes_nothing() {
        let mut api = api();
        let layout = RowLayout(api.board());
        let before = api.store().clone();

        api.handle_drag(
            DragEvent::Start {
                id: "i-ammo".into(),
                pointer: Point::default(),
            },
            &layout,
        )
        .unwrap();
        let outcome = api.handle_drag(DragEvent::Cancel, &layout).unwrap();
        assert_eq!(outcome, DragOutcome::Cancelled);
        assert_eq!(api.store(), &before);
        assert!(api.backend().load(STATE_KEY).unwrap().is_none());
    }

    /// Starts dragging `id` and hovers it over tier S until a frame applies it.
    fn hover_over_s(
        api: &mut TierlistApi<MemBackend, GzipCompressor>,
        layout: &RowLayout,
        id: &str,
    ) {
        let start = DragEvent::Start {
            id: id.into(),
            pointer: Point::new(0.0, 520.0),
        };
        assert_eq!(api.handle_drag(start, layout).unwrap(), DragOutcome::Started);
        let over_s = DragEvent::Move {
            over: Some(ContainerId::Tier(Tier::S)),
            pointer: Point::new(10.0, 20.0),
        };
        api.handle_drag(over_s, layout).unwrap();
        api.handle_drag(DragEvent::Frame, layout).unwrap();
        assert!(api.is_dragging());
    }

    fn drop_on_s(
        api: &mut TierlistApi<MemBackend, GzipCompressor>,
        layout: &RowLayout,
    ) -> DragOutcome {
        let drop = DragEvent::Drop {
            over: Some(ContainerId::Tier(Tier::S)),
        };
        api.handle_drag(drop, layout).unwrap()
    }

    #[test]
    fn test_switch_mode_mid_drag_leaves_both_modes_alone() {
        let mut api = api();
        api.switch_mode(CategoryMode::Powers);
        api.place("p-res", ContainerId::Tier(Tier::A), None).unwrap();
        api.switch_mode(CategoryMode::Items);
        let layout = RowLayout(api.board());
        let before = api.store().clone();

        hover_over_s(&mut api, &layout, "i-ammo");
        api.switch_mode(CategoryMode::Powers);
        assert!(!api.is_dragging());

        assert_eq!(drop_on_s(&mut api, &layout), DragOutcome::Ignored);
        assert_eq!(api.store(), &before);
        assert_eq!(api.assignment().tier(Tier::A), ["p-res"]);
        assert!(api.assignment().tier(Tier::S).is_empty());
    }

    #[test]
    fn test_reset_mid_drag_is_not_undone_by_the_drop() {
        let mut api = api();
        api.place("i-boots", ContainerId::Tier(Tier::B), None).unwrap();
        let layout = RowLayout(api.board());

        hover_over_s(&mut api, &layout, "i-ammo");
        api.reset();
        assert!(!api.is_dragging());

        assert_eq!(drop_on_s(&mut api, &layout), DragOutcome::Ignored);
        assert!(api.assignment().is_empty());
    }

    #[test]
    fn test_import_mid_drag_keeps_imported_state() {
        let mut source = api();
        source.place("i-wings", ContainerId::Tier(Tier::C), None).unwrap();
        let token = source.share_token().unwrap();

        let mut api = api();
        let layout = RowLayout(api.board());
        hover_over_s(&mut api, &layout, "i-ammo");
        api.import_share(&token).unwrap();
        assert!(!api.is_dragging());

        assert_eq!(drop_on_s(&mut api, &layout), DragOutcome::Ignored);
        assert_eq!(api.store(), source.store());
    }

    #[test]
    fn test_failed_import_keeps_the_gesture() {
        let mut api = api();
        let layout = RowLayout(api.board());
        hover_over_s(&mut api, &layout, "i-ammo");

        assert!(api.import_share("!!!").is_err());
        assert!(api.is_dragging());
        assert!(matches!(drop_on_s(&mut api, &layout), DragOutcome::Committed(_)));
        assert_eq!(api.assignment().tier(Tier::S), ["i-ammo"]);
    }
}
