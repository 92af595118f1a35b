//! The seam between the engine and whatever draws the map.

use std::time::Duration;

use asistencia_core::{Coordinate, ProviderId};

use crate::style::MarkerStyle;

/// Opaque marker handle minted by a [`RenderSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A circle marker to place on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMarker {
    pub position: Coordinate,
    pub style: MarkerStyle,
}

/// Something that can draw markers and move a camera.
///
/// Implementations never call back into the engine. User input is fed to
/// [`crate::MapSyncEngine::handle_event`] as [`SurfaceEvent`]s instead.
pub trait RenderSurface {
    /// Positions the camera without animation.
    fn set_view(&mut self, center: Coordinate, zoom: u8);

    fn add_marker(&mut self, marker: &CircleMarker) -> MarkerHandle;

    fn remove_marker(&mut self, handle: MarkerHandle);

    fn bind_popup(&mut self, handle: MarkerHandle, text: &str);

    /// Animates the camera to `target`.
    fn fly_to(&mut self, target: Coordinate, zoom: u8, duration: Duration);

    /// Recomputes geometry after the surrounding layout changed.
    fn invalidate_size(&mut self);

    /// Releases the surface. No other method is called afterwards.
    fn destroy(&mut self);
}

/// Raw user input on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    MarkerClicked(MarkerHandle),
    BackgroundClicked(Coordinate),
}

/// What a [`SurfaceEvent`] asks the directory to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SelectProvider(ProviderId),
    SetManualLocation(Coordinate),
}
