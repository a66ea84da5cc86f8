use std::sync::Arc;

use futures_channel::{mpsc, oneshot};
use thiserror::Error;

use crate::{
    dependency_graph::DependencyGraphErrors,
    types::{DynError, Key},
};

#[derive(Error, Debug)]
pub enum InjectError {
    /// Could not require the type
    #[error(transparent)]
    RequireError(#[from] RequireError),
    /// Injection Handle channel was closed
    #[error("Handle was closed, did you try using it after Initialization?")]
    HandleClosed,
    /// Generic error during Injection
    #[error("Error during injection: {0}")]
    Other(DynError),
}
impl From<mpsc::SendError> for InjectError {
    fn from(_: mpsc::SendError) -> Self {
        Self::HandleClosed
    }
}
impl From<oneshot::Canceled> for InjectError {
    fn from(_: oneshot::Canceled) -> Self {
        Self::HandleClosed
    }
}

/// Errors when trying to require a certain provider
#[derive(thiserror::Error, Debug, Clone)]
pub enum RequireError {
    /// The required provider is not known
    #[error("The required provider '{0}' is not known.")]
    Missing(Key),
    /// The required provider is disabled
    #[error("The required provider '{0}' is disabled.")]
    Disabled(Key),
    /// Di container failed to initiate
    #[error(transparent)]
    InitError(#[from] InitError),

    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
}

/// Errors while Initiating providers
#[derive(thiserror::Error, Debug, Clone)]
pub enum InitError {
    /// There are issues with the dependency graph
    #[error(transparent)]
    DependencyGraphError(#[from] DependencyGraphErrors),

    /// A Factory failed to build
    #[error("Factory for '{product}' failed: {error}")]
    FactoryFailed { product: Key, error: Arc<DynError> },
    /// Initiation timed out
    #[error("Initiation timed out")]
    Timeout,
}
impl InitError {
    /// The error a failed factory returned, unchanged
    pub fn factory_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            InitError::FactoryFailed { error, .. } => Some(&***error),
            _ => None,
        }
    }
}
