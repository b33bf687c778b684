use alloc::{collections::BTreeMap, sync::Arc};
use core::any::Any;

use crate::{
    any::ServiceKey,
    dependency_resolver::DependencyResolver,
    errors::{InstantiateErrorKind, ResolveErrorKind},
    instantiator::{boxed_instantiator_factory, BoxedCloneInstantiator, Instantiator},
};

/// What a [`ServiceKey`] is bound to: a pre-built value held for the whole
/// registry lifetime, or a deferred constructor.
#[derive(Clone)]
pub(crate) enum Registration {
    Instance(Arc<dyn Any + Send + Sync>),
    Factory(BoxedCloneInstantiator<ResolveErrorKind, InstantiateErrorKind>),
}

/// Mapping from [`ServiceKey`] to [`Registration`].
///
/// Registrations are permanent: there is no way to remove or replace one, and
/// binding a key twice panics. Registration is a startup concern, a double
/// binding is a configuration bug that must surface immediately.
#[derive(Default, Clone)]
pub struct Registry {
    registrations: BTreeMap<ServiceKey, Registration>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registrations: BTreeMap::new(),
        }
    }

    /// Binds a pre-built value to its type.
    ///
    /// The value is returned as-is on every resolution, no factory is ever
    /// involved.
    ///
    /// # Panics
    /// Panics if the type is already registered.
    #[inline]
    #[must_use]
    pub fn instance<T: Send + Sync + 'static>(self, value: T) -> Self {
        self.instance_arc(Arc::new(value))
    }

    /// Same as [`Self::instance`] for a value that is already shared.
    ///
    /// # Panics
    /// Panics if the type is already registered.
    #[inline]
    #[must_use]
    pub fn instance_arc<T: Send + Sync + 'static>(mut self, value: Arc<T>) -> Self {
        self.add_registration(ServiceKey::of::<T>(), Registration::Instance(value));
        self
    }

    /// Binds a deferred constructor for its `Provides` type.
    ///
    /// The factory runs on first resolution; the result is memoized under weak
    /// retention, so it is rebuilt once every strong holder is gone.
    ///
    /// # Panics
    /// Panics if the type is already registered.
    #[inline]
    #[must_use]
    pub fn provide<Inst, Deps>(mut self, instantiator: Inst) -> Self
    where
        Inst: Instantiator<Deps, Error = InstantiateErrorKind> + Send + Sync,
        Deps: DependencyResolver<Error = ResolveErrorKind>,
    {
        self.add_registration(
            ServiceKey::of::<Inst::Provides>(),
            Registration::Factory(boxed_instantiator_factory(instantiator)),
        );
        self
    }

    pub(crate) fn add_registration(&mut self, key: ServiceKey, registration: Registration) {
        let previous = self.registrations.insert(key, registration);
        assert!(previous.is_none(), "`{}` is already registered", key.name);
    }

    /// Pure read; absence is a normal outcome.
    #[must_use]
    pub(crate) fn lookup(&self, key: &ServiceKey) -> Option<Registration> {
        self.registrations.get(key).cloned()
    }

    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, key: &ServiceKey) -> bool {
        self.registrations.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{Registration, Registry};
    use crate::{any::ServiceKey, errors::InstantiateErrorKind};

    struct Session;
    struct Network;

    #[test]
    fn test_lookup_absent() {
        let registry = Registry::new().instance(Session);

        assert!(registry.lookup(&ServiceKey::of::<Network>()).is_none());
        assert!(!registry.contains(&ServiceKey::of::<Network>()));
    }

    #[test]
    fn test_lookup_present() {
        let registry = Registry::new()
            .instance(Session)
            .provide(|| Ok::<_, InstantiateErrorKind>(Network));

        assert!(matches!(
            registry.lookup(&ServiceKey::of::<Session>()),
            Some(Registration::Instance(_))
        ));
        assert!(matches!(
            registry.lookup(&ServiceKey::of::<Network>()),
            Some(Registration::Factory(_))
        ));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_double_instance() {
        let _ = Registry::new().instance(Session).instance(Session);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_double_factory() {
        let _ = Registry::new()
            .provide(|| Ok::<_, InstantiateErrorKind>(Session))
            .provide(|| Ok::<_, InstantiateErrorKind>(Session));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_instance_then_factory() {
        let _ = Registry::new()
            .instance(Session)
            .provide(|| Ok::<_, InstantiateErrorKind>(Session));
    }
}
