use alloc::{boxed::Box, sync::Arc};
use core::any::type_name;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info_span};

use crate::{
    any::ServiceKey,
    cache::LazyCache,
    dependency_resolver::DependencyResolver,
    errors::{InstantiateErrorKind, InstantiatorErrorKind, ResolveErrorKind},
    instantiator::{boxed_instantiator_factory, Instantiator},
    registry::{Registration, Registry},
    service::Service as _,
};

/// Type-keyed service locator.
///
/// Reads resolve instances: a registered instance is returned as-is, a
/// registered factory is run lazily and its result memoized under weak
/// retention. Writes delegate to the [`Registry`] and are a startup-phase
/// concern.
///
/// Cloning is cheap and every clone points at the same registry and cache.
#[derive(Clone, Default)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

#[derive(Default)]
struct ContainerInner {
    registry: RwLock<Registry>,
    cache: Mutex<LazyCache>,
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                registry: RwLock::new(registry),
                cache: Mutex::new(LazyCache::new()),
            }),
        }
    }

    /// Binds a pre-built value to its type.
    ///
    /// # Panics
    /// Panics if the type is already registered.
    pub fn register_instance<T: Send + Sync + 'static>(&self, value: T) {
        self.register_instance_arc(Arc::new(value));
    }

    /// Same as [`Self::register_instance`] for a value that is already shared.
    ///
    /// # Panics
    /// Panics if the type is already registered.
    pub fn register_instance_arc<T: Send + Sync + 'static>(&self, value: Arc<T>) {
        self.inner
            .registry
            .write()
            .add_registration(ServiceKey::of::<T>(), Registration::Instance(value));
    }

    /// Binds a deferred constructor for its `Provides` type.
    ///
    /// Factory arguments are resolved from this container before the body
    /// runs, so a factory can depend on other registered types (or take the
    /// [`Container`] itself). The dependency graph must be acyclic; a cycle
    /// recurses until the stack runs out and is a configuration error.
    ///
    /// # Panics
    /// Panics if the type is already registered.
    pub fn register_factory<Inst, Deps>(&self, instantiator: Inst)
    where
        Inst: Instantiator<Deps, Error = InstantiateErrorKind> + Send + Sync,
        Deps: DependencyResolver<Error = ResolveErrorKind>,
    {
        self.inner.registry.write().add_registration(
            ServiceKey::of::<Inst::Provides>(),
            Registration::Factory(boxed_instantiator_factory(instantiator)),
        );
    }

    #[inline]
    #[must_use]
    pub fn contains<Dep: 'static>(&self) -> bool {
        self.inner.registry.read().contains(&ServiceKey::of::<Dep>())
    }

    /// Resolves a dependency.
    ///
    /// A registered instance is returned directly, identity preserved. A
    /// registered factory is run on the first resolution and whenever the
    /// previous result has been reclaimed; while some caller still holds the
    /// result, resolutions return the same instance without running the
    /// factory.
    ///
    /// An unregistered type is a normal absent outcome, not a panic; layer
    /// [`Self::get_or_panic`] on top where missing registration is fatal.
    ///
    /// No lock is held while a factory runs, so factories can resolve their
    /// own dependencies through the same container. The cost is a benign
    /// race: two threads resolving an uncached type at once may each run the
    /// factory and obtain distinct instances.
    #[allow(clippy::missing_errors_doc)]
    pub fn get<Dep: Send + Sync + 'static>(&self) -> Result<Arc<Dep>, ResolveErrorKind> {
        let span = info_span!("get", dependency = type_name::<Dep>());
        let _guard = span.enter();

        let key = ServiceKey::of::<Dep>();

        let Some(registration) = self.inner.registry.read().lookup(&key) else {
            let err = ResolveErrorKind::NotRegistered;
            error!("{}", err);
            return Err(err);
        };

        let instantiator = match registration {
            Registration::Instance(instance) => {
                return match instance.downcast::<Dep>() {
                    Ok(instance) => {
                        debug!("Registered instance");
                        Ok(instance)
                    }
                    Err(incorrect_type) => {
                        let err = ResolveErrorKind::IncorrectType {
                            expected: key,
                            actual: (*incorrect_type).type_id(),
                        };
                        error!("{}", err);
                        Err(err)
                    }
                }
            }
            Registration::Factory(instantiator) => instantiator,
        };

        if let Some(dependency) = self.inner.cache.lock().get::<Dep>(&key) {
            debug!("Found in cache");
            return Ok(dependency);
        }
        debug!("Not found in cache");

        match instantiator.clone().call(self.clone()) {
            Ok(dependency) => match dependency.downcast::<Dep>() {
                Ok(dependency) => {
                    let dependency = Arc::new(*dependency);
                    self.inner.cache.lock().insert(key, &dependency);
                    debug!("Cached under weak retention");
                    Ok(dependency)
                }
                Err(incorrect_type) => {
                    let err = ResolveErrorKind::IncorrectType {
                        expected: key,
                        actual: (*incorrect_type).type_id(),
                    };
                    error!("{}", err);
                    Err(err)
                }
            },
            Err(InstantiatorErrorKind::Deps(err)) => {
                error!("{}", err);
                Err(ResolveErrorKind::Instantiator(InstantiatorErrorKind::Deps(Box::new(err))))
            }
            Err(InstantiatorErrorKind::Factory(err)) => {
                error!("{}", err);
                Err(ResolveErrorKind::Instantiator(InstantiatorErrorKind::Factory(err)))
            }
        }
    }

    /// Resolves a dependency, treating absence as a startup configuration bug.
    ///
    /// # Panics
    /// Panics if resolution fails.
    #[must_use]
    pub fn get_or_panic<Dep: Send + Sync + 'static>(&self) -> Arc<Dep> {
        match self.get() {
            Ok(dependency) => dependency,
            Err(err) => panic!("failed to resolve `{}`: {err}", type_name::<Dep>()),
        }
    }

    /// Sweeps cache entries whose instance has been reclaimed.
    ///
    /// Purely housekeeping, resolution behaves the same with or without it.
    pub fn purge(&self) {
        self.inner.cache.lock().purge();
    }
}
