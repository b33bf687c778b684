use once_cell::sync::OnceCell;

use crate::Container;

static GLOBAL: OnceCell<Container> = OnceCell::new();

/// Installs the process-wide container.
///
/// Call exactly once at startup, after registering everything the process
/// needs. Prefer passing a [`Container`] explicitly through constructors;
/// the global exists for call sites that cannot take one yet.
///
/// # Panics
/// Panics on a second call; repeated initialization is the same class of
/// startup bug as a duplicate registration.
pub fn init_global(container: Container) {
    assert!(
        GLOBAL.set(container).is_ok(),
        "the process-wide container is already initialized"
    );
}

/// The process-wide container.
///
/// # Panics
/// Panics if [`init_global`] has not run yet.
#[must_use]
pub fn global() -> &'static Container {
    GLOBAL
        .get()
        .expect("the process-wide container is not initialized, call `init_global` at startup")
}

/// Non-panicking variant of [`global`].
#[must_use]
pub fn try_global() -> Option<&'static Container> {
    GLOBAL.get()
}
