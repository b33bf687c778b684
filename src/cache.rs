use alloc::{
    collections::BTreeMap,
    sync::{Arc, Weak},
};
use core::any::Any;

use crate::any::ServiceKey;

/// Memoizes factory-built instances without keeping them alive.
///
/// Entries are weak handles: once every strong holder outside the cache is
/// gone, the entry is dead and the next lookup is a normal miss that the
/// caller answers by rebuilding.
#[derive(Default)]
pub(crate) struct LazyCache {
    map: BTreeMap<ServiceKey, Weak<dyn Any + Send + Sync>>,
}

impl LazyCache {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self { map: BTreeMap::new() }
    }

    /// Returns the live instance for `key`, if any.
    ///
    /// A reclaimed instance and an absent entry are the same outcome.
    #[must_use]
    pub(crate) fn get<T: Send + Sync + 'static>(&self, key: &ServiceKey) -> Option<Arc<T>> {
        self.map.get(key)?.upgrade()?.downcast().ok()
    }

    pub(crate) fn insert<T: Send + Sync + 'static>(&mut self, key: ServiceKey, value: &Arc<T>) {
        let value: Arc<dyn Any + Send + Sync> = value.clone();
        self.map.insert(key, Arc::downgrade(&value));
    }

    /// Drops entries whose instance has been reclaimed.
    pub(crate) fn purge(&mut self) {
        self.map.retain(|_, handle| handle.strong_count() > 0);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}
