use std::{convert::Infallible, fmt::Display, sync::Arc};

use uuid::Uuid;
use wrapp_di::{
    types::{Injectable, Token},
    Binding, FactoryProvider, ModuleDefinition,
};

use crate::{
    app::{AppRegistry, FirebaseApp},
    client::ClientFactory,
    errors::AdminModuleError,
    options::AdminOptions,
    resolver::{OptionsResolution, OptionsResolver},
    sdk::AdminSdk,
    services::{AdminService, AuthService, DatabaseService, FirestoreService, MessagingService},
    strategy::{AdminStrategy, AsyncAdminOptions, AsyncRegistration},
};

/// The resolved options of a registration
pub const ADMIN_OPTIONS: Token<AdminOptions> = Token::new("FIREBASE_ADMIN_OPTIONS");
/// The app initialized for a registration
pub const ADMIN_APP: Token<FirebaseApp> = Token::new("FIREBASE_ADMIN_APP");
/// Random id of a registration
pub const ADMIN_MODULE_ID: Token<RegistrationId> = Token::new("FIREBASE_ADMIN_MODULE_ID");

pub const MODULE_NAME: &str = "FirebaseAdminModule";

/// Identifies a single registration, generated once and never changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(Uuid);
impl RegistrationId {
    fn generate() -> Self {
        RegistrationId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}
impl Display for RegistrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Builds the [ModuleDefinition] providing a Firebase app and its services
///
/// Every call to [AdminModule::register], [AdminModule::register_async] or
/// [AdminModule::build] is an independent registration with its own id and app.
/// A registration is meant for its own container, registering the same module twice
/// in one container is rejected as a duplicate provider.
///
/// ```ignore
/// let firebase = AdminModule::new(sdk).register_async(
///     AsyncAdminOptions::new()
///         .import(config_module)
///         .use_factory(Token::<ConfigProvider>::of(), |configs: Arc<ConfigProvider>| async move {
///             Ok::<_, DynError>(configs.require_config::<AdminSettings>()?.into_options()?)
///         }),
/// )?;
///
/// let container = DiBuilder::new().add_module(firebase).build().await?;
/// let auth = container.require_type::<AuthService>()?;
/// ```
#[derive(Debug, Clone)]
pub struct AdminModule {
    client: ClientFactory,
}

impl AdminModule {
    /// Apps are registered in the process wide [AppRegistry]
    pub fn new(sdk: impl AdminSdk) -> Self {
        Self::with_registry(Arc::new(sdk), AppRegistry::global())
    }

    pub fn with_registry(sdk: Arc<dyn AdminSdk>, registry: Arc<AppRegistry>) -> Self {
        AdminModule {
            client: ClientFactory::new(sdk, registry),
        }
    }

    pub fn registry(&self) -> &Arc<AppRegistry> {
        self.client.registry()
    }

    /// Registers static options, the app is initialized right away
    pub fn register(&self, options: AdminOptions) -> Result<ModuleDefinition, AdminModuleError> {
        self.build(AdminStrategy::Static(options))
    }

    /// Registers options which are produced while the container is built
    ///
    /// Fails with [AdminModuleError::Configuration] if the request does not name exactly
    /// one strategy, in that case nothing is initialized.
    pub fn register_async(
        &self,
        options: AsyncAdminOptions,
    ) -> Result<ModuleDefinition, AdminModuleError> {
        let AsyncRegistration {
            strategy,
            imports,
            extra_providers,
        } = AsyncRegistration::try_from(options)?;

        let mut module = self.build(strategy)?;
        module.imports.extend(imports);
        module.providers.extend(extra_providers);
        Ok(module)
    }

    /// Assembles the providers and exports of one registration
    pub fn build(&self, strategy: AdminStrategy) -> Result<ModuleDefinition, AdminModuleError> {
        let id = RegistrationId::generate();
        tracing::debug!("Building {MODULE_NAME} {id} with {} options", strategy.name());

        let module =
            ModuleDefinition::new(MODULE_NAME).provide(Binding::value(ADMIN_MODULE_ID, id));

        let module = match OptionsResolver::resolve(strategy) {
            OptionsResolution::Ready(options) => {
                let app = self.client.initialize(&options, &id.to_string())?;
                module
                    .provide(Binding::value(ADMIN_OPTIONS, options))
                    .provide(Binding::value(ADMIN_APP, app))
            }
            OptionsResolution::Deferred { options, providers } => {
                let client = self.client.clone();
                let default_name = id.to_string();
                let app = FactoryProvider::new(
                    ADMIN_APP,
                    ADMIN_OPTIONS,
                    move |options: Arc<AdminOptions>| {
                        let app = client.initialize(&options, &default_name);
                        async move { app }
                    },
                );

                providers
                    .into_iter()
                    .fold(module, ModuleDefinition::provide)
                    .provide(options)
                    .provide(Binding::factory(app))
            }
        };

        let registry = self.registry().clone();
        Ok(module
            .provide(service(move |app| {
                AdminService::new(app.clone(), registry.clone())
            }))
            .provide(service(AuthService::new))
            .provide(service(DatabaseService::new))
            .provide(service(FirestoreService::new))
            .provide(service(MessagingService::new))
            .export(ADMIN_OPTIONS)
            .export(ADMIN_APP)
            .export(Token::<AdminService>::of())
            .export(Token::<AuthService>::of())
            .export(Token::<DatabaseService>::of())
            .export(Token::<FirestoreService>::of())
            .export(Token::<MessagingService>::of()))
    }
}

/// Service provider depending only on the app
fn service<S, F>(make: F) -> Binding
where
    S: Injectable,
    F: Fn(&FirebaseApp) -> S + Send + Sync + 'static,
{
    Binding::factory(FactoryProvider::new(
        Token::<S>::of(),
        ADMIN_APP,
        move |app: Arc<FirebaseApp>| {
            let service = make(&app);
            async move { Ok::<_, Infallible>(service) }
        },
    ))
}
