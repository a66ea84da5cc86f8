use std::{
    any::{Any, TypeId},
    fmt::Debug,
    marker::PhantomData,
    sync::Arc,
};

/// All errors must be Send + Sync
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// We assume that we are using a multithreaded async runtime
/// So anything injectable needs to be Send + Sync + 'static
pub trait Injectable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Injectable for T {}

/// Instance of a Provider
#[derive(Clone)]
pub struct Instance {
    pub key: Key,
    pub instance: Arc<dyn Any + Send + Sync + 'static>,
}

impl Instance {
    pub(crate) fn new<ExistingInstance: Injectable>(key: Key, instance: ExistingInstance) -> Self {
        Instance {
            key,
            instance: Arc::new(instance),
        }
    }

    pub fn downcast<T: Injectable>(&self) -> Result<Arc<T>, &'static str> {
        match Arc::downcast::<T>(self.instance.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(self.key.type_info.type_name),
        }
    }
}

/// Information about a Factory dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyInfo {
    /// The required Key
    pub key: Key,
    /// If it is optional or required
    pub optional: bool,
}
impl DependencyInfo {
    pub fn required(key: Key) -> Self {
        DependencyInfo {
            key,
            optional: false,
        }
    }
}

/// Type Name and Type Id
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeInfo {
    pub type_name: &'static str,
    pub type_id: TypeId,
}
impl std::fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
impl TypeInfo {
    pub fn of<T: 'static + ?Sized>() -> TypeInfo {
        TypeInfo {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }
}

/// Identity of a provider inside the container.
///
/// A provider is identified by the name of its token *and* the type it provides,
/// so two tokens with the same name but different types never collide.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Key {
    pub name: &'static str,
    pub type_info: TypeInfo,
}
impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name == self.type_info.type_name {
            f.write_str(self.name)
        } else {
            write!(f, "{} ({})", self.name, self.type_info.type_name)
        }
    }
}

/// Typed token under which a provider of `T` is registered and resolved
///
/// ```ignore
/// pub const DATABASE_URL: Token<String> = Token::new("DATABASE_URL");
/// ```
pub struct Token<T: ?Sized> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}
impl<T: ?Sized> Clone for Token<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: ?Sized> Copy for Token<T> {}
impl<T: ?Sized> Debug for Token<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Token").field(&self.name).finish()
    }
}

impl<T: ?Sized> Token<T> {
    pub const fn new(name: &'static str) -> Self {
        Token {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
impl<T: ?Sized + 'static> Token<T> {
    /// Token keyed by the type itself
    pub fn of() -> Self {
        Token::new(std::any::type_name::<T>())
    }

    pub fn key(&self) -> Key {
        Key {
            name: self.name,
            type_info: TypeInfo::of::<T>(),
        }
    }
}
