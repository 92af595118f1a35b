//! A surface that draws nothing and records every call.
//!
//! Used by the `explore` command and by tests to observe what the engine
//! does to a real map.

use std::collections::BTreeMap;
use std::time::Duration;

use asistencia_core::Coordinate;

use crate::surface::{CircleMarker, MarkerHandle, RenderSurface};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    SetView {
        center: Coordinate,
        zoom: u8,
    },
    AddMarker {
        handle: MarkerHandle,
        marker: CircleMarker,
    },
    RemoveMarker(MarkerHandle),
    BindPopup {
        handle: MarkerHandle,
        text: String,
    },
    FlyTo {
        target: Coordinate,
        zoom: u8,
        duration: Duration,
    },
    InvalidateSize,
    Destroy,
}

#[derive(Debug, Clone)]
struct LiveMarker {
    marker: CircleMarker,
    popup: Option<String>,
}

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next_handle: u64,
    live: BTreeMap<MarkerHandle, LiveMarker>,
    ops: Vec<SurfaceOp>,
    destroyed: bool,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received so far, oldest first.
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Returns and forgets the recorded calls.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn marker(&self, handle: MarkerHandle) -> Option<&CircleMarker> {
        self.live.get(&handle).map(|m| &m.marker)
    }

    #[must_use]
    pub fn popup(&self, handle: MarkerHandle) -> Option<&str> {
        self.live.get(&handle).and_then(|m| m.popup.as_deref())
    }

    /// Handles of live markers placed exactly at `position`.
    #[must_use]
    pub fn markers_at(&self, position: Coordinate) -> Vec<MarkerHandle> {
        self.live
            .iter()
            .filter(|(_, m)| m.marker.position == position)
            .map(|(h, _)| *h)
            .collect()
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl RenderSurface for HeadlessSurface {
    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        tracing::debug!(%center, zoom, "set view");
        self.ops.push(SurfaceOp::SetView { center, zoom });
    }

    fn add_marker(&mut self, marker: &CircleMarker) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle::new(self.next_handle);
        self.live.insert(
            handle,
            LiveMarker {
                marker: marker.clone(),
                popup: None,
            },
        );
        self.ops.push(SurfaceOp::AddMarker {
            handle,
            marker: marker.clone(),
        });
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        if self.live.remove(&handle).is_none() {
            tracing::warn!(handle = handle.raw(), "removing unknown marker");
        }
        self.ops.push(SurfaceOp::RemoveMarker(handle));
    }

    fn bind_popup(&mut self, handle: MarkerHandle, text: &str) {
        if let Some(live) = self.live.get_mut(&handle) {
            live.popup = Some(text.to_string());
        }
        self.ops.push(SurfaceOp::BindPopup {
            handle,
            text: text.to_string(),
        });
    }

    fn fly_to(&mut self, target: Coordinate, zoom: u8, duration: Duration) {
        tracing::debug!(%target, zoom, duration_ms = duration.as_millis(), "fly to");
        self.ops.push(SurfaceOp::FlyTo {
            target,
            zoom,
            duration,
        });
    }

    fn invalidate_size(&mut self) {
        tracing::debug!("invalidate size");
        self.ops.push(SurfaceOp::InvalidateSize);
    }

    fn destroy(&mut self) {
        tracing::debug!(live = self.live.len(), "surface destroyed");
        self.live.clear();
        self.destroyed = true;
        self.ops.push(SurfaceOp::Destroy);
    }
}
