//! The directory session: one user's view of the catalog.
//!
//! Owns the catalog, the filter criteria, the location and selection cells,
//! and the map engine. Every mutating call re-ranks the catalog, repairs the
//! selection and synchronizes the map.

use std::time::Instant;

use asistencia_core::{
    rank_providers, AnnotatedProvider, Catalog, Coordinate, Facets, FilterCriteria, LocationState,
    ManualOverridePolicy, ProviderId, SearchScope, SelectionError, SelectionState,
};

use crate::engine::{EngineConfig, MapSyncEngine};
use crate::error::MapError;
use crate::surface::{Intent, RenderSurface, SurfaceEvent};

pub struct DirectorySession<S: RenderSurface> {
    catalog: Catalog,
    scope: SearchScope,
    criteria: FilterCriteria,
    location: LocationState,
    selection: SelectionState,
    visible: Vec<AnnotatedProvider>,
    panel_open: bool,
    engine: MapSyncEngine<S>,
}

impl<S: RenderSurface> DirectorySession<S> {
    #[must_use]
    pub fn new(
        catalog: Catalog,
        policy: ManualOverridePolicy,
        scope: SearchScope,
        engine: EngineConfig,
    ) -> Self {
        let mut session = Self {
            catalog,
            scope,
            criteria: FilterCriteria::default(),
            location: LocationState::new(policy),
            selection: SelectionState::default(),
            visible: Vec::new(),
            panel_open: true,
            engine: MapSyncEngine::new(engine),
        };
        session.refresh();
        session
    }

    /// Hands the render surface to the map engine.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::AlreadyAttached`] if a surface is already attached.
    pub fn attach_surface(&mut self, surface: S) -> Result<(), MapError> {
        self.engine.attach(surface)
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn location(&self) -> &LocationState {
        &self.location
    }

    #[must_use]
    pub fn selection(&self) -> Option<&ProviderId> {
        self.selection.id()
    }

    /// The ranked list as last rendered.
    #[must_use]
    pub fn visible(&self) -> &[AnnotatedProvider] {
        &self.visible
    }

    #[must_use]
    pub fn facets(&self) -> Facets {
        Facets::from_catalog(self.catalog.providers())
    }

    #[must_use]
    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    #[must_use]
    pub fn engine(&self) -> &MapSyncEngine<S> {
        &self.engine
    }

    /// Swaps in a freshly loaded catalog.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        tracing::info!(source = %catalog.source(), count = catalog.len(), "catalog replaced");
        self.catalog = catalog;
        self.refresh();
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.update_criteria(|c| c.search_text = text.to_string());
    }

    pub fn set_category(&mut self, category: &str) {
        self.update_criteria(|c| c.category = category.to_string());
    }

    pub fn set_province(&mut self, province: &str) {
        self.update_criteria(|c| c.province = province.to_string());
    }

    pub fn set_city(&mut self, city: &str) {
        self.update_criteria(|c| c.city = city.to_string());
    }

    /// Clears every filter and the selection.
    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        self.selection.reset();
        self.refresh();
    }

    fn update_criteria(&mut self, edit: impl FnOnce(&mut FilterCriteria)) {
        let before = self.criteria.clone();
        edit(&mut self.criteria);
        if self.criteria != before {
            self.refresh();
        }
    }

    pub fn apply_default_location(&mut self, at: Coordinate) {
        if self.location.apply_default(at) {
            self.refresh();
        }
    }

    pub fn apply_geolocation(&mut self, at: Coordinate) {
        if self.location.apply_geolocation(at) {
            self.refresh();
        } else {
            tracing::debug!(%at, source = %self.location.source(), "device fix ignored");
        }
    }

    pub fn set_manual_location(&mut self, at: Coordinate) {
        if self.location.set_manual(at) {
            self.refresh();
        }
    }

    /// Highlights a provider from the current list.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NotVisible`] when `id` is not in the current
    /// list; nothing changes in that case.
    pub fn select(&mut self, id: &ProviderId) -> Result<(), SelectionError> {
        self.selection.select(id, &self.visible)?;
        self.sync_map();
        Ok(())
    }

    pub fn reset_selection(&mut self) {
        if self.selection.id().is_some() {
            self.selection.reset();
            self.sync_map();
        }
    }

    /// Routes raw map input back into the session. Returns the intent that
    /// was applied, if any.
    ///
    /// # Errors
    ///
    /// Propagates [`SelectionError`] if a clicked marker no longer has a
    /// provider in the list.
    pub fn handle_event(&mut self, event: SurfaceEvent) -> Result<Option<Intent>, SelectionError> {
        let Some(intent) = self.engine.handle_event(event) else {
            return Ok(None);
        };
        match &intent {
            Intent::SelectProvider(id) => self.select(id)?,
            Intent::SetManualLocation(at) => self.set_manual_location(*at),
        }
        Ok(Some(intent))
    }

    /// Opens or closes the side panel. The map geometry is refreshed once the
    /// layout settles; drive that with [`DirectorySession::tick`].
    pub fn toggle_panel(&mut self, now: Instant) -> bool {
        self.panel_open = !self.panel_open;
        self.engine.on_layout_changed(now);
        self.panel_open
    }

    /// Runs time-driven map work. Returns `true` if anything ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.engine.tick(now)
    }

    /// Shuts the map down. The session keeps working without it.
    pub fn teardown(&mut self) {
        self.engine.teardown();
    }

    fn refresh(&mut self) {
        self.visible = rank_providers(
            self.catalog.providers(),
            self.location.current(),
            &self.criteria,
            self.scope,
        );
        if self.selection.retain_visible(&self.visible) {
            tracing::debug!("selected provider left the list, selection cleared");
        }
        self.sync_map();
    }

    fn sync_map(&mut self) {
        self.engine.synchronize(
            &self.visible,
            self.location.current(),
            self.selection.id(),
        );
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
