//! Services handed out by the module, each built from the registration's [FirebaseApp]
//! and forwarding to the matching SDK client.
//!
//! [FirebaseApp]: crate::app::FirebaseApp

mod admin;
mod auth;
mod database;
mod firestore;
mod messaging;

pub use admin::AdminService;
pub use auth::AuthService;
pub use database::DatabaseService;
pub use firestore::FirestoreService;
pub use messaging::MessagingService;
