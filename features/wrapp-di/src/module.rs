use crate::{
    factories::{DynFactory, InstanceFactory},
    types::{Injectable, Instance, Key, Token},
};

/// A single provider registration, either a ready value or a factory
pub enum Binding {
    Value(Instance),
    Factory(Box<dyn DynFactory>),
}
impl Binding {
    /// Binds an already existing value to `token`
    pub fn value<T: Injectable>(token: Token<T>, value: T) -> Self {
        Binding::Value(Instance::new(token.key(), value))
    }

    pub fn factory<Factory: InstanceFactory + 'static>(factory: Factory) -> Self {
        Binding::Factory(Box::new(factory))
    }

    pub fn key(&self) -> Key {
        match self {
            Binding::Value(instance) => instance.key,
            Binding::Factory(factory) => factory.supplies(),
        }
    }
}
impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Value(instance) => f.debug_tuple("Value").field(&instance.key).finish(),
            Binding::Factory(factory) => {
                f.debug_tuple("Factory").field(&factory.supplies()).finish()
            }
        }
    }
}

/// A set of providers handed to the container as one unit
///
/// Exports name the providers the module makes available to its consumers;
/// every export must be provided by the module itself or one of its imports.
#[derive(Debug, Default)]
pub struct ModuleDefinition {
    pub name: String,
    pub imports: Vec<ModuleDefinition>,
    pub providers: Vec<Binding>,
    pub exports: Vec<Key>,
}
impl ModuleDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        ModuleDefinition {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn import(mut self, module: ModuleDefinition) -> Self {
        self.imports.push(module);
        self
    }

    pub fn provide(mut self, binding: Binding) -> Self {
        self.providers.push(binding);
        self
    }

    pub fn export<T: ?Sized + 'static>(mut self, token: Token<T>) -> Self {
        self.exports.push(token.key());
        self
    }

    /// Number of providers bound to `key` in this module (imports excluded)
    pub fn count_of(&self, key: Key) -> usize {
        self.providers
            .iter()
            .filter(|binding| binding.key() == key)
            .count()
    }

    pub fn provides(&self, key: Key) -> bool {
        self.count_of(key) > 0
    }

    /// Keys provided by this module and, recursively, its imports
    pub fn provided_keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self.providers.iter().map(Binding::key).collect();
        for import in &self.imports {
            keys.extend(import.provided_keys());
        }
        keys
    }
}
