use std::{future::Future, sync::Arc};

use wrapp_di::{
    types::{DependencyInfo, DynError, Key, Token},
    Binding, Class, Construct, FactoryProvider, Inject, ModuleDefinition,
};

use crate::{
    errors::AdminModuleError,
    module::ADMIN_OPTIONS,
    options::{AdminOptions, AdminOptionsFactory},
};

/// How the [AdminOptions] of a registration are obtained
#[derive(Debug)]
pub enum AdminStrategy {
    /// Options known at registration time
    Static(AdminOptions),
    /// Options produced by a function from resolved dependencies
    Factory(OptionsFactory),
    /// Options produced by an [AdminOptionsFactory] already registered in the container
    Existing(ExistingOptions),
    /// Options produced by an [AdminOptionsFactory] the registration constructs itself
    Class(ClassOptions),
}

/// Options binding backed by a function and its dependencies
#[derive(Debug)]
pub struct OptionsFactory {
    pub(crate) dependencies: Vec<DependencyInfo>,
    pub(crate) options: Binding,
}

/// Options binding reading from a provider registered elsewhere
#[derive(Debug)]
pub struct ExistingOptions {
    pub(crate) provider: Key,
    pub(crate) options: Binding,
}

/// Options binding reading from a provider the registration brings along
#[derive(Debug)]
pub struct ClassOptions {
    pub(crate) class: Binding,
    pub(crate) options: Binding,
}

/// Options binding which asks the provider under `provider` for the options, once
fn create_with<F: AdminOptionsFactory>(provider: Token<F>) -> Binding {
    Binding::factory(FactoryProvider::new(
        ADMIN_OPTIONS,
        provider,
        |factory: Arc<F>| async move {
            factory
                .create_admin_options()
                .await
                .map_err(AdminModuleError::Resolution)
        },
    ))
}

impl OptionsFactory {
    /// Options produced by `factory`, called with the values resolved for `dependencies`
    ///
    /// ```ignore
    /// const PROJECT: Token<String> = Token::new("PROJECT");
    ///
    /// OptionsFactory::new(PROJECT, |project: Arc<String>| async move {
    ///     Ok::<_, Infallible>(AdminOptions::new(load_account(&project)))
    /// });
    /// ```
    pub fn new<Deps, F, Fut, E>(dependencies: Deps, mut factory: F) -> Self
    where
        Deps: Inject,
        F: FnMut(Deps::Resolved) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<AdminOptions, E>> + Send + 'static,
        E: Into<DynError> + Send + 'static,
    {
        let declared = dependencies.dependencies();
        let options = Binding::factory(FactoryProvider::new(
            ADMIN_OPTIONS,
            dependencies,
            move |resolved: Deps::Resolved| {
                let produced = factory(resolved);
                async move {
                    produced
                        .await
                        .map_err(|e| AdminModuleError::Resolution(e.into()))
                }
            },
        ));

        OptionsFactory {
            dependencies: declared,
            options,
        }
    }

    pub fn dependencies(&self) -> &[DependencyInfo] {
        &self.dependencies
    }
}

impl ExistingOptions {
    pub fn new<F: AdminOptionsFactory>(provider: Token<F>) -> Self {
        ExistingOptions {
            provider: provider.key(),
            options: create_with(provider),
        }
    }

    /// Key of the provider the options are read from
    pub fn provider(&self) -> Key {
        self.provider
    }
}

impl ClassOptions {
    /// `C` is constructed by the container as part of the registration
    pub fn new<C: AdminOptionsFactory + Construct>() -> Self {
        ClassOptions {
            class: Binding::factory(Class::<C>::new()),
            options: create_with(Token::<C>::of()),
        }
    }

    pub fn class(&self) -> Key {
        self.class.key()
    }
}

impl AdminStrategy {
    pub fn factory<Deps, F, Fut, E>(dependencies: Deps, factory: F) -> Self
    where
        Deps: Inject,
        F: FnMut(Deps::Resolved) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<AdminOptions, E>> + Send + 'static,
        E: Into<DynError> + Send + 'static,
    {
        AdminStrategy::Factory(OptionsFactory::new(dependencies, factory))
    }

    pub fn existing<F: AdminOptionsFactory>(provider: Token<F>) -> Self {
        AdminStrategy::Existing(ExistingOptions::new(provider))
    }

    pub fn class<C: AdminOptionsFactory + Construct>() -> Self {
        AdminStrategy::Class(ClassOptions::new::<C>())
    }

    /// Name of the field selecting this strategy in [AsyncAdminOptions]
    pub fn name(&self) -> &'static str {
        match self {
            AdminStrategy::Static(_) => "static",
            AdminStrategy::Factory(_) => "use_factory",
            AdminStrategy::Existing(_) => "use_existing",
            AdminStrategy::Class(_) => "use_class",
        }
    }
}

/// Field based registration request
///
/// Exactly one of `use_factory`, `use_existing` or `use_class` must be set, which is
/// checked when it is turned into an [AsyncRegistration].
#[derive(Debug, Default)]
pub struct AsyncAdminOptions {
    /// Modules whose providers the options strategy may depend on
    pub imports: Vec<ModuleDefinition>,
    pub use_factory: Option<OptionsFactory>,
    pub use_existing: Option<ExistingOptions>,
    pub use_class: Option<ClassOptions>,
    /// Additional providers registered alongside the module's own
    pub extra_providers: Vec<Binding>,
}
impl AsyncAdminOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn import(mut self, module: ModuleDefinition) -> Self {
        self.imports.push(module);
        self
    }

    pub fn use_factory<Deps, F, Fut, E>(mut self, dependencies: Deps, factory: F) -> Self
    where
        Deps: Inject,
        F: FnMut(Deps::Resolved) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<AdminOptions, E>> + Send + 'static,
        E: Into<DynError> + Send + 'static,
    {
        self.use_factory = Some(OptionsFactory::new(dependencies, factory));
        self
    }

    pub fn use_existing<F: AdminOptionsFactory>(mut self, provider: Token<F>) -> Self {
        self.use_existing = Some(ExistingOptions::new(provider));
        self
    }

    pub fn use_class<C: AdminOptionsFactory + Construct>(mut self) -> Self {
        self.use_class = Some(ClassOptions::new::<C>());
        self
    }

    pub fn provide(mut self, binding: Binding) -> Self {
        self.extra_providers.push(binding);
        self
    }
}

const STRATEGY_FIELDS: &str = "use_factory, use_existing or use_class";

/// A validated [AsyncAdminOptions] request
#[derive(Debug)]
pub struct AsyncRegistration {
    pub strategy: AdminStrategy,
    pub imports: Vec<ModuleDefinition>,
    pub extra_providers: Vec<Binding>,
}

impl TryFrom<AsyncAdminOptions> for AsyncRegistration {
    type Error = AdminModuleError;

    fn try_from(request: AsyncAdminOptions) -> Result<Self, Self::Error> {
        let AsyncAdminOptions {
            imports,
            use_factory,
            use_existing,
            use_class,
            extra_providers,
        } = request;

        let mut candidates = [
            use_factory.map(AdminStrategy::Factory),
            use_existing.map(AdminStrategy::Existing),
            use_class.map(AdminStrategy::Class),
        ]
        .into_iter()
        .flatten();

        let strategy = match (candidates.next(), candidates.next()) {
            (Some(strategy), None) => strategy,
            (None, _) => {
                return Err(AdminModuleError::Configuration(format!(
                    "One of {STRATEGY_FIELDS} must be provided in AsyncAdminOptions"
                )))
            }
            (Some(first), Some(second)) => {
                let (first, second) = (first.name(), second.name());
                return Err(AdminModuleError::Configuration(format!(
                    "Only one of {STRATEGY_FIELDS} may be provided in AsyncAdminOptions, \
                     got {first} and {second}"
                )))
            }
        };

        Ok(AsyncRegistration {
            strategy,
            imports,
            extra_providers,
        })
    }
}
