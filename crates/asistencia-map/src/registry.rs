//! Which marker on the surface belongs to which provider.

use std::collections::HashMap;

use asistencia_core::ProviderId;

use crate::surface::MarkerHandle;

#[derive(Debug, Default)]
pub(crate) struct MarkerRegistry {
    /// Provider markers in render order.
    providers: Vec<(ProviderId, MarkerHandle)>,
    by_handle: HashMap<MarkerHandle, ProviderId>,
    user: Option<MarkerHandle>,
}

impl MarkerRegistry {
    pub(crate) fn insert(&mut self, id: ProviderId, handle: MarkerHandle) {
        self.by_handle.insert(handle, id.clone());
        self.providers.push((id, handle));
    }

    /// Forgets every provider marker and returns their handles for removal.
    pub(crate) fn drain_providers(&mut self) -> Vec<MarkerHandle> {
        self.by_handle.clear();
        self.providers.drain(..).map(|(_, h)| h).collect()
    }

    pub(crate) fn provider_for(&self, handle: MarkerHandle) -> Option<&ProviderId> {
        self.by_handle.get(&handle)
    }

    pub(crate) fn provider_ids(&self) -> impl Iterator<Item = &ProviderId> {
        self.providers.iter().map(|(id, _)| id)
    }

    pub(crate) fn len(&self) -> usize {
        self.providers.len()
    }

    pub(crate) fn replace_user(&mut self, handle: Option<MarkerHandle>) -> Option<MarkerHandle> {
        std::mem::replace(&mut self.user, handle)
    }

    pub(crate) fn user(&self) -> Option<MarkerHandle> {
        self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_lookup_follows_inserts_and_drain() {
        let mut registry = MarkerRegistry::default();
        registry.insert(ProviderId::from("a"), MarkerHandle::new(1));
        registry.insert(ProviderId::from("b"), MarkerHandle::new(2));

        assert_eq!(
            registry.provider_for(MarkerHandle::new(2)),
            Some(&ProviderId::from("b"))
        );
        let drained = registry.drain_providers();
        assert_eq!(drained, vec![MarkerHandle::new(1), MarkerHandle::new(2)]);
        assert_eq!(registry.len(), 0);
        assert!(registry.provider_for(MarkerHandle::new(1)).is_none());
    }

    #[test]
    fn user_marker_is_single_instance() {
        let mut registry = MarkerRegistry::default();
        assert_eq!(registry.replace_user(Some(MarkerHandle::new(7))), None);
        assert_eq!(
            registry.replace_user(Some(MarkerHandle::new(8))),
            Some(MarkerHandle::new(7))
        );
        assert_eq!(registry.user(), Some(MarkerHandle::new(8)));
    }
}
