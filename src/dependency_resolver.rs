use core::convert::Infallible;

use crate::{any::ServiceKey, errors::ResolveErrorKind, Container};

/// Read contract for pulling a value out of a [`Container`].
///
/// The requested type is inferred from the binding position, which makes this
/// the ergonomic counterpart of [`Container::get`]; both derive the same
/// [`ServiceKey`], so they are interchangeable for the same capability.
pub trait DependencyResolver: Sized {
    type Error: Into<ResolveErrorKind>;

    fn resolve(container: &Container) -> Result<Self, Self::Error>;

    #[inline]
    #[must_use]
    fn service_key() -> ServiceKey
    where
        Self: 'static,
    {
        ServiceKey::of::<Self>()
    }
}

/// A factory can take the container itself to resolve dynamically.
impl DependencyResolver for Container {
    type Error = Infallible;

    #[inline]
    fn resolve(container: &Container) -> Result<Self, Self::Error> {
        Ok(container.clone())
    }
}

macro_rules! impl_dependency_resolver {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case, unused_mut)]
        impl<$($ty,)*> DependencyResolver for ($($ty,)*)
        where
            $( $ty: DependencyResolver, )*
        {
            type Error = ResolveErrorKind;

            #[inline]
            #[allow(unused_variables)]
            fn resolve(container: &Container) -> Result<Self, Self::Error> {
                Ok(($($ty::resolve(container).map_err(Into::into)?,)*))
            }
        }
    };
}

all_the_tuples!(impl_dependency_resolver);

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::format;
    use core::sync::atomic::{AtomicU8, Ordering};
    use tracing::debug;
    use tracing_test::traced_test;

    use super::DependencyResolver;
    use crate::{errors::InstantiateErrorKind, inject::Inject, Container, Registry};

    struct Session;

    #[derive(Clone)]
    struct Config;

    #[test]
    #[allow(dead_code)]
    fn test_resolver_impls() {
        fn resolver<T: DependencyResolver>() {}
        fn resolver_with_dep<Dep: Send + Sync + 'static>() {
            resolver::<Inject<Dep>>();
            resolver::<(Inject<Dep>, Inject<Dep>)>();
            resolver::<crate::Container>();
        }
    }

    #[test]
    #[traced_test]
    fn test_inferred_resolve_memoizes() {
        let session_factory_call_count = Arc::new(AtomicU8::new(0));

        let container = Container::new(
            Registry::new()
                .provide({
                    let session_factory_call_count = session_factory_call_count.clone();
                    move || {
                        session_factory_call_count.fetch_add(1, Ordering::SeqCst);

                        debug!("Session factory called");
                        Ok::<_, InstantiateErrorKind>(Session)
                    }
                })
                .instance(Config),
        );

        let session_1 = Inject::<Session>::resolve(&container).unwrap();
        let session_2 = Inject::<Session>::resolve(&container).unwrap();
        let _config = Inject::<Config>::resolve(&container).unwrap();

        assert!(Arc::ptr_eq(&session_1.0, &session_2.0));
        assert_eq!(session_factory_call_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    #[traced_test]
    fn test_tuple_resolve() {
        let container = Container::new(
            Registry::new()
                .provide(|| Ok::<_, InstantiateErrorKind>(Session))
                .instance(Config),
        );

        let (Inject(session), Inject(config)) = <(Inject<Session>, Inject<Config>)>::resolve(&container).unwrap();
        let _: Arc<Session> = session;
        let _: Arc<Config> = config;
    }
}
