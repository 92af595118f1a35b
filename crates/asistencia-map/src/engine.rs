//! Marker and camera reconciliation.

use std::time::{Duration, Instant};

use asistencia_core::{AnnotatedProvider, Coordinate, ProviderId};

use crate::error::MapError;
use crate::registry::MarkerRegistry;
use crate::style::{popup_text, MarkerStyle};
use crate::surface::{CircleMarker, Intent, RenderSurface, SurfaceEvent};

/// Camera and timing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Camera position set when a surface is attached.
    pub initial_center: Coordinate,
    pub initial_zoom: u8,
    /// Zoom used when flying to the selected provider.
    pub focus_zoom: u8,
    pub fly_duration: Duration,
    /// How long the layout must stay unchanged before geometry is refreshed.
    pub settle_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_center: Coordinate::ecuador_centroid(),
            initial_zoom: 7,
            focus_zoom: 15,
            fly_duration: Duration::from_millis(1500),
            settle_delay: Duration::from_millis(300),
        }
    }
}

/// Everything one synchronization pass needs.
#[derive(Debug, Clone)]
struct Snapshot {
    providers: Vec<AnnotatedProvider>,
    location: Option<Coordinate>,
    selection: Option<ProviderId>,
}

/// Owns a render surface and keeps its markers equal to the latest
/// provider list.
///
/// Before a surface is attached, [`MapSyncEngine::synchronize`] only keeps
/// the latest snapshot; it is drawn as soon as [`MapSyncEngine::attach`]
/// succeeds.
pub struct MapSyncEngine<S: RenderSurface> {
    config: EngineConfig,
    surface: Option<S>,
    registry: MarkerRegistry,
    pending: Option<Snapshot>,
    refresh_due: Option<Instant>,
}

impl<S: RenderSurface> MapSyncEngine<S> {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            surface: None,
            registry: MarkerRegistry::default(),
            pending: None,
            refresh_due: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Takes ownership of `surface`, positions the camera and draws the
    /// pending snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::AlreadyAttached`] when a surface is already
    /// attached. The offered surface is destroyed before returning.
    pub fn attach(&mut self, mut surface: S) -> Result<(), MapError> {
        if self.surface.is_some() {
            tracing::warn!("render surface already attached, releasing duplicate");
            surface.destroy();
            return Err(MapError::AlreadyAttached);
        }

        surface.set_view(self.config.initial_center, self.config.initial_zoom);
        self.surface = Some(surface);
        tracing::debug!(pending = self.pending.is_some(), "render surface attached");

        if let Some(snapshot) = self.pending.take() {
            self.render(&snapshot.providers, snapshot.location, snapshot.selection.as_ref());
        }
        Ok(())
    }

    /// Reconciles the surface with `providers`, the user location and the
    /// selection.
    ///
    /// Without a surface the inputs are stored, replacing any earlier
    /// unrendered request.
    pub fn synchronize(
        &mut self,
        providers: &[AnnotatedProvider],
        location: Option<Coordinate>,
        selection: Option<&ProviderId>,
    ) {
        if self.surface.is_none() {
            self.pending = Some(Snapshot {
                providers: providers.to_vec(),
                location,
                selection: selection.cloned(),
            });
            return;
        }
        self.render(providers, location, selection);
    }

    fn render(
        &mut self,
        providers: &[AnnotatedProvider],
        location: Option<Coordinate>,
        selection: Option<&ProviderId>,
    ) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        for handle in self.registry.drain_providers() {
            surface.remove_marker(handle);
        }

        let mut focus = None;
        for provider in providers {
            let selected = selection == Some(provider.id());
            if selected {
                focus = Some(provider.provider.location);
            }
            let handle = surface.add_marker(&CircleMarker {
                position: provider.provider.location,
                style: MarkerStyle::provider(selected),
            });
            surface.bind_popup(handle, &popup_text(provider));
            self.registry.insert(provider.id().clone(), handle);
        }

        if let Some(old) = self.registry.replace_user(None) {
            surface.remove_marker(old);
        }
        if let Some(at) = location {
            let handle = surface.add_marker(&CircleMarker {
                position: at,
                style: MarkerStyle::user(),
            });
            self.registry.replace_user(Some(handle));
        }

        if let Some(target) = focus {
            surface.fly_to(target, self.config.focus_zoom, self.config.fly_duration);
        }

        tracing::debug!(
            markers = self.registry.len(),
            user_marker = location.is_some(),
            focused = focus.is_some(),
            "map synchronized"
        );
    }

    /// Translates raw surface input into a directory intent.
    ///
    /// Clicks on the user marker or on markers no longer tracked yield `None`.
    #[must_use]
    pub fn handle_event(&self, event: SurfaceEvent) -> Option<Intent> {
        match event {
            SurfaceEvent::MarkerClicked(handle) => self
                .registry
                .provider_for(handle)
                .cloned()
                .map(Intent::SelectProvider),
            SurfaceEvent::BackgroundClicked(at) => Some(Intent::SetManualLocation(at)),
        }
    }

    /// Schedules a geometry refresh once the layout has been stable for the
    /// settle delay. A later change restarts the delay.
    pub fn on_layout_changed(&mut self, now: Instant) {
        if self.surface.is_none() {
            return;
        }
        self.refresh_due = Some(now + self.config.settle_delay);
    }

    /// Runs a due geometry refresh. Returns `true` if one ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        match (self.refresh_due, self.surface.as_mut()) {
            (Some(due), Some(surface)) if now >= due => {
                surface.invalidate_size();
                self.refresh_due = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn refresh_pending(&self) -> bool {
        self.refresh_due.is_some()
    }

    /// Ids of the provider markers currently on the surface, in render order.
    #[must_use]
    pub fn live_provider_ids(&self) -> Vec<ProviderId> {
        self.registry.provider_ids().cloned().collect()
    }

    #[must_use]
    pub fn has_user_marker(&self) -> bool {
        self.registry.user().is_some()
    }

    /// Removes every marker and releases the surface. Safe to call twice.
    pub fn teardown(&mut self) {
        self.pending = None;
        self.refresh_due = None;
        let Some(mut surface) = self.surface.take() else {
            return;
        };
        for handle in self.registry.drain_providers() {
            surface.remove_marker(handle);
        }
        if let Some(user) = self.registry.replace_user(None) {
            surface.remove_marker(user);
        }
        surface.destroy();
        tracing::debug!("render surface torn down");
    }
}

impl<S: RenderSurface> Drop for MapSyncEngine<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
