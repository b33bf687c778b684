use alloc::{boxed::Box, format, sync::Arc};
use core::any::type_name;
use parking_lot::Mutex;
use tracing::debug;

use crate::{global::global, Container};

type FailureHandler = Box<dyn Fn(&str) + Send + Sync>;

/// Owner-scoped deferred injection.
///
/// Resolves its value from a [`Container`] on first read and keeps it (a
/// strong reference, unlike the container's own weak cache) for the owner's
/// lifetime; later reads serve the cached value without contacting the
/// resolver again. A failed resolution is reported once through the failure
/// handler, after which the cell stays failed and reads return `None`.
///
/// Construct it explicitly in the owner's initializer. For tests, the
/// [`Self::resolved`] constructor starts the cell pre-resolved with a caller
/// supplied value and no container, so fakes can be injected without touching
/// any registry.
pub struct Injected<Dep> {
    state: Mutex<State<Dep>>,
    container: Option<Container>,
    failure_handler: FailureHandler,
}

enum State<Dep> {
    Unresolved,
    Resolved(Arc<Dep>),
    Failed,
}

impl<Dep: Send + Sync + 'static> Injected<Dep> {
    /// Cell bound to `container`, with resolution failure treated as a
    /// programming error (the failure handler panics).
    #[inline]
    #[must_use]
    pub fn new(container: Container) -> Self {
        Self::with_failure_handler(container, |message| panic!("{message}"))
    }

    /// Cell bound to the process-wide container.
    ///
    /// Prefer [`Self::new`] with an explicitly passed container; this exists
    /// for call sites that cannot take one yet.
    ///
    /// # Panics
    /// Panics if the process-wide container is not initialized.
    #[inline]
    #[must_use]
    pub fn from_global() -> Self {
        Self::new(global().clone())
    }

    /// Cell bound to `container` with a caller-supplied failure handler.
    ///
    /// The handler receives a diagnostic message instead of aborting, which
    /// keeps failure paths testable.
    #[must_use]
    pub fn with_failure_handler(container: Container, failure_handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            state: Mutex::new(State::Unresolved),
            container: Some(container),
            failure_handler: Box::new(failure_handler),
        }
    }

    /// Cell that starts resolved with `value` and never contacts a resolver.
    #[inline]
    #[must_use]
    pub fn resolved(value: Dep) -> Self {
        Self::resolved_arc(Arc::new(value))
    }

    /// Same as [`Self::resolved`] for a value that is already shared.
    #[must_use]
    pub fn resolved_arc(value: Arc<Dep>) -> Self {
        Self {
            state: Mutex::new(State::Resolved(value)),
            container: None,
            failure_handler: Box::new(|_| {}),
        }
    }

    /// Reads the value, resolving it on the first call.
    ///
    /// Returns `None` only when resolution has failed; the failure handler is
    /// invoked exactly once, on the transition into the failed state.
    #[must_use]
    pub fn get(&self) -> Option<Arc<Dep>> {
        let mut state = self.state.lock();
        match &*state {
            State::Resolved(value) => Some(value.clone()),
            State::Failed => None,
            State::Unresolved => {
                let Some(container) = &self.container else {
                    *state = State::Failed;
                    drop(state);
                    (self.failure_handler)(&format!("No container attached for `{}`", type_name::<Dep>()));
                    return None;
                };

                match container.get::<Dep>() {
                    Ok(value) => {
                        debug!(dependency = type_name::<Dep>(), "Injected value resolved");
                        *state = State::Resolved(value.clone());
                        Some(value)
                    }
                    Err(err) => {
                        *state = State::Failed;
                        drop(state);
                        (self.failure_handler)(&format!("Could not resolve `{}`: {err}", type_name::<Dep>()));
                        None
                    }
                }
            }
        }
    }
}
