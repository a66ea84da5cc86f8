use std::{convert::Infallible, future::Future, marker::PhantomData, sync::Arc};

use crate::{
    errors::InjectError,
    initiator::DiHandle,
    types::{DependencyInfo, DynError, Injectable, Instance, Key, Token},
};

/// A Factory providing instances of a given type
pub trait InstanceFactory: Send + Sync {
    type Provides: Injectable;

    /// Returns the key the factory's product is registered under
    fn supplies(&self) -> Key {
        Token::<Self::Provides>::of().key()
    }

    /// Returns a list of dependencies the factory requires to supply it's type
    fn get_dependencies(&self) -> Vec<DependencyInfo>;

    /// Constructs a new instance of the factory's provided type
    ///
    /// Returns the constructed instance, or an error if either Dependencies are not satisfied or the Instantiation failed
    fn construct(
        &mut self,
        di: DiHandle,
    ) -> impl Future<Output = Result<Self::Provides, impl Into<DynError>>> + Send + '_;

    /// Returns a boolean indicating whether the factory is enabled or not
    fn is_enabled(
        &mut self,
        di: DiHandle,
    ) -> impl Future<Output = Result<bool, impl Into<DynError>>> + Send + '_ {
        let _ = di;
        async { Ok::<_, Infallible>(true) }
    }
}

/// Wrapper Trait for factories, providing instances of Any
pub trait DynFactory: Send {
    fn supplies(&self) -> Key;

    /// Returns a list of dependencies for the factory
    fn dependencies(&self) -> Vec<DependencyInfo>;

    /// Constructs a new instance of the factory's provided type, fulfilling all its dependencies
    fn construct(
        &mut self,
        di: DiHandle,
    ) -> Box<dyn Future<Output = Result<Instance, DynError>> + Send + '_>;

    /// Returns a boolean indicating whether the factory is enabled or not
    fn is_enabled(
        &mut self,
        di: DiHandle,
    ) -> Box<dyn Future<Output = Result<bool, DynError>> + Send + '_>;
}
// Impl DynFactory for any InstanceFactory
impl<T: Injectable, SpecificFactory: InstanceFactory<Provides = T>> DynFactory for SpecificFactory {
    fn supplies(&self) -> Key {
        InstanceFactory::supplies(self)
    }

    fn dependencies(&self) -> Vec<DependencyInfo> {
        self.get_dependencies()
    }

    fn construct(
        &mut self,
        di: DiHandle,
    ) -> Box<dyn Future<Output = Result<Instance, DynError>> + Send + '_> {
        let key = InstanceFactory::supplies(self);
        let construction_fut = async move {
            // Forward the call to the specific implementation
            InstanceFactory::construct(self, di)
                .await
                .map(|product| Instance::new(key, product))
                .map_err(|e| e.into())
        };

        Box::new(construction_fut)
    }

    fn is_enabled(
        &mut self,
        di: DiHandle,
    ) -> Box<dyn Future<Output = Result<bool, DynError>> + Send + '_> {
        let future = async {
            // Forward the call to the specific implementation
            InstanceFactory::is_enabled(self, di)
                .await
                .map_err(|e| e.into())
        };

        Box::new(future)
    }
}

/// A declared list of dependencies, resolved before a [FactoryProvider] runs
///
/// Implemented for a single [Token], an optional token, `()` and tuples of up to six.
pub trait Inject: Send + Sync + 'static {
    type Resolved: Send;

    fn dependencies(&self) -> Vec<DependencyInfo>;

    fn resolve(
        &self,
        di: &mut DiHandle,
    ) -> impl Future<Output = Result<Self::Resolved, InjectError>> + Send;
}

impl Inject for () {
    type Resolved = ();

    fn dependencies(&self) -> Vec<DependencyInfo> {
        Vec::new()
    }

    async fn resolve(&self, _di: &mut DiHandle) -> Result<Self::Resolved, InjectError> {
        Ok(())
    }
}

impl<T: Injectable> Inject for Token<T> {
    type Resolved = Arc<T>;

    fn dependencies(&self) -> Vec<DependencyInfo> {
        vec![DependencyInfo::required(self.key())]
    }

    fn resolve(
        &self,
        di: &mut DiHandle,
    ) -> impl Future<Output = Result<Self::Resolved, InjectError>> + Send {
        di.require(*self)
    }
}

impl<T: Injectable> Inject for Option<Token<T>> {
    type Resolved = Option<Arc<T>>;

    fn dependencies(&self) -> Vec<DependencyInfo> {
        self.iter()
            .map(|token| DependencyInfo {
                optional: true,
                ..DependencyInfo::required(token.key())
            })
            .collect()
    }

    async fn resolve(&self, di: &mut DiHandle) -> Result<Self::Resolved, InjectError> {
        let Some(token) = self else {
            return Ok(None);
        };
        di.require_optional(*token).await
    }
}

macro_rules! impl_inject_tuple {
    ($($dep:ident $value:ident),+) => {
        impl<$($dep: Inject),+> Inject for ($($dep,)+) {
            type Resolved = ($($dep::Resolved,)+);

            fn dependencies(&self) -> Vec<DependencyInfo> {
                let ($($value,)+) = self;
                let mut dependencies = Vec::new();
                $(dependencies.extend($value.dependencies());)+
                dependencies
            }

            async fn resolve(&self, di: &mut DiHandle) -> Result<Self::Resolved, InjectError> {
                let ($($value,)+) = self;
                Ok(($($value.resolve(di).await?,)+))
            }
        }
    };
}
impl_inject_tuple!(A a);
impl_inject_tuple!(A a, B b);
impl_inject_tuple!(A a, B b, C c);
impl_inject_tuple!(A a, B b, C c, D d);
impl_inject_tuple!(A a, B b, C c, D d, E e);
impl_inject_tuple!(A a, B b, C c, D d, E e, F f);

/// Factory built from a function and its declared dependencies
///
/// The dependencies are resolved from the container and handed to `factory`,
/// whose result is registered under `token`.
pub struct FactoryProvider<T, Deps, Factory> {
    token: Token<T>,
    dependencies: Deps,
    factory: Factory,
}
impl<T, Deps, Factory> FactoryProvider<T, Deps, Factory> {
    pub fn new(token: Token<T>, dependencies: Deps, factory: Factory) -> Self {
        FactoryProvider {
            token,
            dependencies,
            factory,
        }
    }
}
impl<T, Deps, Factory, Fut, E> InstanceFactory for FactoryProvider<T, Deps, Factory>
where
    T: Injectable,
    Deps: Inject,
    Factory: FnMut(Deps::Resolved) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send,
    E: Into<DynError>,
{
    type Provides = T;

    fn supplies(&self) -> Key {
        self.token.key()
    }

    fn get_dependencies(&self) -> Vec<DependencyInfo> {
        self.dependencies.dependencies()
    }

    fn construct(
        &mut self,
        mut di: DiHandle,
    ) -> impl Future<Output = Result<Self::Provides, impl Into<DynError>>> + Send + '_ {
        async move {
            let resolved = self.dependencies.resolve(&mut di).await?;
            let product = (self.factory)(resolved)
                .await
                .map_err(Into::<DynError>::into)?;
            Ok::<_, DynError>(product)
        }
    }
}

/// A type the container constructs itself, injecting its dependencies
pub trait Construct: Injectable + Sized {
    fn dependencies() -> Vec<DependencyInfo>;

    fn construct(di: DiHandle) -> impl Future<Output = Result<Self, DynError>> + Send;
}

/// Factory for a [Construct] type
pub struct Class<C> {
    token: Token<C>,
    _marker: PhantomData<fn() -> C>,
}
impl<C: Construct> Class<C> {
    /// Registers the class under its own type
    pub fn new() -> Self {
        Self::at(Token::of())
    }

    /// Registers the class under a named token
    pub fn at(token: Token<C>) -> Self {
        Class {
            token,
            _marker: PhantomData,
        }
    }
}
impl<C: Construct> Default for Class<C> {
    fn default() -> Self {
        Self::new()
    }
}
impl<C: Construct> InstanceFactory for Class<C> {
    type Provides = C;

    fn supplies(&self) -> Key {
        self.token.key()
    }

    fn get_dependencies(&self) -> Vec<DependencyInfo> {
        C::dependencies()
    }

    fn construct(
        &mut self,
        di: DiHandle,
    ) -> impl Future<Output = Result<Self::Provides, impl Into<DynError>>> + Send + '_ {
        C::construct(di)
    }
}
