use alloc::boxed::Box;
use core::{any::TypeId, convert::Infallible};

use crate::any::ServiceKey;

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Nothing registered for the requested type")]
    NotRegistered,
    #[error("Registered value has incorrect type. Expected: {} ({:?}), actual: {:?}", expected.name, expected.id, actual)]
    IncorrectType { expected: ServiceKey, actual: TypeId },
    #[error(transparent)]
    Instantiator(InstantiatorErrorKind<Box<ResolveErrorKind>, InstantiateErrorKind>),
}

impl From<Infallible> for ResolveErrorKind {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}

#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum InstantiatorErrorKind<DepsErr, FactoryErr> {
    #[error(transparent)]
    Deps(DepsErr),
    #[error(transparent)]
    Factory(FactoryErr),
}
