use core::{
    any::{type_name, TypeId},
    cmp::Ordering,
};

/// Identity of a registered capability.
///
/// Two keys derived from the same type are always equal; keys derived from
/// distinct types never collide. Equality and ordering use [`TypeId`] only,
/// the name is carried for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct ServiceKey {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ServiceKey {}

impl PartialOrd for ServiceKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ServiceKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl ServiceKey {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// Type name without its module path.
    #[inline]
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit_once("::").map_or(self.name, |(_, name)| name)
    }
}
