use std::sync::Arc;

use crate::{
    errors::{InjectError, RequireError},
    initiator::DiHandle,
    resolver::Resolver,
    types::{DependencyInfo, Injectable, Token},
};

impl<T: Injectable> Resolver for Arc<T> {
    async fn resolve(handle: &mut DiHandle) -> Result<Self, InjectError> {
        handle.require(Token::<T>::of()).await
    }

    fn dependency_info() -> DependencyInfo {
        DependencyInfo::required(Token::<T>::of().key())
    }
}

impl<Resolvable: Resolver> Resolver for Option<Resolvable> {
    async fn resolve(handle: &mut DiHandle) -> Result<Self, InjectError>
    where
        Self: Sized,
    {
        match Resolvable::resolve(handle).await {
            Ok(resolved) => Ok(Some(resolved)),
            Err(e) => match e {
                // If the required provider is disabled, or not registered Option does not fail
                InjectError::RequireError(RequireError::Disabled(_))
                | InjectError::RequireError(RequireError::Missing(_)) => Ok(None),
                _ => Err(e),
            },
        }
    }

    fn dependency_info() -> DependencyInfo {
        let original = Resolvable::dependency_info();
        DependencyInfo {
            optional: true,
            ..original
        }
    }
}
