use std::{collections::HashSet, time::Duration};

use crate::{
    container::DiContainer,
    errors::InitError,
    factories::{DynFactory, InstanceFactory},
    initiator::DiInitiator,
    module::{Binding, ModuleDefinition},
    types::{Injectable, Instance, Key, Token},
};

/// Exports of a registered module
pub(crate) struct ModuleExports {
    pub name: String,
    pub exports: Vec<Key>,
    /// Everything the module or its imports provide
    pub provided: HashSet<Key>,
}

/// Collects all providers of the application
///
/// Nothing is constructed until [DiBuilder::build], which first validates the
/// whole dependency graph and only then starts the factories.
pub struct DiBuilder {
    /// Registered factories which can provide instances
    pub(crate) registered_factories: Vec<Box<dyn DynFactory>>,
    /// Registered already created instances
    pub(crate) registered_instances: Vec<Instance>,
    /// Exports of all registered modules
    pub(crate) registered_modules: Vec<ModuleExports>,
}
impl Default for DiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DiBuilder {
    pub fn new() -> Self {
        DiBuilder {
            registered_factories: Vec::new(),
            registered_instances: Vec::new(),
            registered_modules: Vec::new(),
        }
    }
}
impl DiBuilder {
    /// Registers a value under its own type
    pub fn add_instance<T: Injectable>(self, instance: T) -> Self {
        self.add_value(Token::of(), instance)
    }

    /// Registers a value under the given token
    pub fn add_value<T: Injectable>(self, token: Token<T>, value: T) -> Self {
        self.add_binding(Binding::value(token, value))
    }

    pub fn add_factory<Factory: InstanceFactory + 'static>(self, factory: Factory) -> Self {
        self.add_binding(Binding::factory(factory))
    }

    pub fn add_binding(mut self, binding: Binding) -> Self {
        match binding {
            Binding::Value(instance) => self.registered_instances.push(instance),
            Binding::Factory(factory) => self.registered_factories.push(factory),
        }
        self
    }

    /// Registers a module, its imports and all of its providers
    pub fn add_module(mut self, module: ModuleDefinition) -> Self {
        let provided = module.provided_keys().into_iter().collect();
        let ModuleDefinition {
            name,
            imports,
            providers,
            exports,
        } = module;

        tracing::debug!(
            "Registering module '{name}' with {} providers and {} imports",
            providers.len(),
            imports.len()
        );

        for import in imports {
            self = self.add_module(import);
        }
        for binding in providers {
            self = self.add_binding(binding);
        }
        self.registered_modules.push(ModuleExports {
            name,
            exports,
            provided,
        });
        self
    }

    pub async fn build(self) -> Result<DiContainer, InitError> {
        DiInitiator::new().initiate(self, None).await
    }

    pub async fn build_timeout(self, timeout: Duration) -> Result<DiContainer, InitError> {
        DiInitiator::new().initiate(self, Some(timeout)).await
    }
}
