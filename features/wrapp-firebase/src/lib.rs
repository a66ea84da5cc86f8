//! Firebase Admin registration for the wrapp DI container.
//!
//! [AdminModule] turns a way of obtaining [AdminOptions] into a
//! [ModuleDefinition](wrapp_di::ModuleDefinition) providing three tokens and the
//! services built on top of them:
//! - [ADMIN_OPTIONS]: the resolved options
//! - [ADMIN_APP]: the [FirebaseApp] initialized from them, exactly once per registration
//! - [ADMIN_MODULE_ID]: a random id of the registration
//!
//! The options are either known up front ([AdminModule::register]) or produced while the
//! container is built ([AdminModule::register_async]) by a factory, by an
//! [AdminOptionsFactory] already in the container, or by one the registration constructs.
//! The app is only initialized once the options are resolved.
//!
//! ```ignore
//! let firebase = AdminModule::new(sdk).register(AdminOptions::new(ServiceAccount::new(
//!     "demo",
//!     "admin@demo.iam.gserviceaccount.com",
//!     private_key,
//! )))?;
//!
//! let container = DiBuilder::new().add_module(firebase).build().await?;
//! let database = container.require_type::<DatabaseService>()?;
//! ```
//!
//! The SDK itself is reached through the traits in [sdk].

pub mod app;
pub mod client;
pub mod credential;
pub mod errors;
pub mod module;
pub mod options;
pub mod resolver;
pub mod sdk;
pub mod services;
pub mod settings;
pub mod strategy;

pub use app::{AppRegistry, FirebaseApp};
pub use credential::{Credential, CredentialError};
pub use errors::{AdminModuleError, ServiceError};
pub use module::{AdminModule, RegistrationId, ADMIN_APP, ADMIN_MODULE_ID, ADMIN_OPTIONS};
pub use options::{AdminOptions, AdminOptionsFactory, HttpAgent, ServiceAccount};
pub use services::{AdminService, AuthService, DatabaseService, FirestoreService, MessagingService};
pub use settings::{AdminSettings, SettingsOptionsFactory};
pub use strategy::{AdminStrategy, AsyncAdminOptions};
