use alloc::sync::Arc;

use crate::{any::ServiceKey, dependency_resolver::DependencyResolver, Container, ResolveErrorKind};

/// Resolves a shared `Dep` from the container, type inferred from the binding.
///
/// Useful in factory argument position: `|Inject(net): Inject<Network>| ...`.
pub struct Inject<Dep>(pub Arc<Dep>);

impl<Dep: Send + Sync + 'static> DependencyResolver for Inject<Dep> {
    type Error = ResolveErrorKind;

    fn resolve(container: &Container) -> Result<Self, Self::Error> {
        container.get().map(Self)
    }

    fn service_key() -> ServiceKey {
        ServiceKey::of::<Dep>()
    }
}
