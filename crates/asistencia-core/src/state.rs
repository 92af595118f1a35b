//! Location and selection state cells.
//!
//! The two cells are independent; the directory session combines them.

use thiserror::Error;

use crate::geo::Coordinate;
use crate::provider::{AnnotatedProvider, ProviderId};

/// Where the active user position came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Unset,
    /// Fixed fallback used when no device fix is available.
    Default,
    Geolocation,
    /// Chosen directly by the user on the map.
    Manual,
}

impl std::fmt::Display for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationSource::Unset => write!(f, "unset"),
            LocationSource::Default => write!(f, "default"),
            LocationSource::Geolocation => write!(f, "geolocation"),
            LocationSource::Manual => write!(f, "manual"),
        }
    }
}

/// Whether a device fix may replace a manual position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManualOverridePolicy {
    /// A manual position holds for the rest of the session.
    #[default]
    Sticky,
    /// The next device fix replaces a manual position.
    ReArm,
}

impl std::str::FromStr for ManualOverridePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sticky" => Ok(ManualOverridePolicy::Sticky),
            "rearm" => Ok(ManualOverridePolicy::ReArm),
            other => Err(format!("expected 'sticky' or 'rearm', got '{other}'")),
        }
    }
}

/// The active user position and its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationState {
    current: Option<Coordinate>,
    source: LocationSource,
    policy: ManualOverridePolicy,
}

impl LocationState {
    #[must_use]
    pub fn new(policy: ManualOverridePolicy) -> Self {
        Self {
            current: None,
            source: LocationSource::Unset,
            policy,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<Coordinate> {
        self.current
    }

    #[must_use]
    pub fn source(&self) -> LocationSource {
        self.source
    }

    #[must_use]
    pub fn policy(&self) -> ManualOverridePolicy {
        self.policy
    }

    /// Seeds the fallback position. Only applies while nothing else is known.
    ///
    /// Returns `true` when the state changed.
    pub fn apply_default(&mut self, at: Coordinate) -> bool {
        if self.source != LocationSource::Unset {
            return false;
        }
        self.set(at, LocationSource::Default)
    }

    /// Applies a device fix.
    ///
    /// A fix replaces an unset, default or earlier device position. It
    /// replaces a manual position only under [`ManualOverridePolicy::ReArm`].
    /// Returns `true` when the state changed.
    pub fn apply_geolocation(&mut self, at: Coordinate) -> bool {
        if self.source == LocationSource::Manual && self.policy == ManualOverridePolicy::Sticky {
            return false;
        }
        self.set(at, LocationSource::Geolocation)
    }

    /// Applies a position chosen by the user. Always wins.
    ///
    /// Returns `true` when the state changed.
    pub fn set_manual(&mut self, at: Coordinate) -> bool {
        self.set(at, LocationSource::Manual)
    }

    fn set(&mut self, at: Coordinate, source: LocationSource) -> bool {
        let changed = self.current != Some(at) || self.source != source;
        self.current = Some(at);
        self.source = source;
        changed
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("provider {0} is not in the current result list")]
    NotVisible(ProviderId),
}

/// The highlighted provider, if any.
///
/// Always refers to an id present in the last rendered list, or is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    id: Option<ProviderId>,
}

impl SelectionState {
    #[must_use]
    pub fn id(&self) -> Option<&ProviderId> {
        self.id.as_ref()
    }

    #[must_use]
    pub fn is_selected(&self, id: &ProviderId) -> bool {
        self.id.as_ref() == Some(id)
    }

    /// Selects `id` if it is part of `visible`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NotVisible`] and leaves the state unchanged
    /// when `id` is not in `visible`.
    pub fn select(
        &mut self,
        id: &ProviderId,
        visible: &[AnnotatedProvider],
    ) -> Result<(), SelectionError> {
        if !visible.iter().any(|p| p.id() == id) {
            return Err(SelectionError::NotVisible(id.clone()));
        }
        self.id = Some(id.clone());
        Ok(())
    }

    pub fn reset(&mut self) {
        self.id = None;
    }

    /// Clears the selection if its provider dropped out of `visible`.
    ///
    /// Returns `true` when the selection was cleared.
    pub fn retain_visible(&mut self, visible: &[AnnotatedProvider]) -> bool {
        match &self.id {
            Some(id) if !visible.iter().any(|p| p.id() == id) => {
                self.id = None;
                true
            }
            _ => false,
        }
    }
}
