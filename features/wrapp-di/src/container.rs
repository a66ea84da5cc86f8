use std::{any::type_name, collections::HashMap, fmt::Debug, sync::Arc};

use crate::{
    dependency_graph::DependencyGraph,
    errors::RequireError,
    types::{Injectable, Instance, Key, Token},
};

/// Container holding all initiated instances
#[derive(Clone)]
pub struct DiContainer(pub Arc<DiContainerInner>);
pub struct DiContainerInner {
    /// None = provider is known but disabled
    instances: HashMap<Key, Option<Instance>>,
    exports: HashMap<String, Vec<Key>>,
    graph: DependencyGraph,
}
impl Debug for DiContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (key, instance) in &self.0.instances {
            let val = if instance.is_some() {
                "enabled"
            } else {
                "disabled"
            };
            map.entry(&key.to_string(), &val);
        }
        map.finish()
    }
}

impl DiContainer {
    pub(crate) fn new(
        instances: HashMap<Key, Option<Instance>>,
        exports: HashMap<String, Vec<Key>>,
        graph: DependencyGraph,
    ) -> Self {
        Self(Arc::new(DiContainerInner {
            instances,
            exports,
            graph,
        }))
    }

    /// Attempts to get the provider registered under `token`
    pub fn require<T: Injectable>(&self, token: Token<T>) -> Result<Arc<T>, RequireError> {
        let key = token.key();
        match self.0.instances.get(&key) {
            Some(Some(instance)) => {
                instance
                    .downcast()
                    .map_err(|actual_type| RequireError::DowncastFailed {
                        required_type: type_name::<T>(),
                        actual_type,
                    })
            }
            Some(None) => Err(RequireError::Disabled(key)),
            None => Err(RequireError::Missing(key)),
        }
    }

    /// Attempts to get the provider registered under the type itself
    pub fn require_type<T: Injectable>(&self) -> Result<Arc<T>, RequireError> {
        self.require(Token::<T>::of())
    }

    /// Keys exported by the module registered under `module`
    pub fn exports(&self, module: &str) -> Option<&[Key]> {
        self.0.exports.get(module).map(Vec::as_slice)
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.0.graph
    }
}
