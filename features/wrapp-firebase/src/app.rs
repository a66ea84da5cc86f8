use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard, OnceLock, Weak},
};

use crate::sdk::{
    AppOptions, DocumentStore, KeyValueStore, PushMessaging, SdkApp, SdkError, UserManagement,
};

/// Handle to an initialized Firebase app
///
/// Cheap to clone, all clones refer to the same app.
#[derive(Clone)]
pub struct FirebaseApp(Arc<FirebaseAppInner>);
struct FirebaseAppInner {
    name: String,
    options: AppOptions,
    handle: Arc<dyn SdkApp>,
    registry: Weak<AppRegistry>,
}

impl Debug for FirebaseApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseApp")
            .field("name", &self.0.name)
            .field("options", &self.0.options)
            .finish_non_exhaustive()
    }
}
impl PartialEq for FirebaseApp {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl FirebaseApp {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The options the SDK initialized this app with
    pub fn options(&self) -> &AppOptions {
        &self.0.options
    }

    pub fn sdk_app(&self) -> &Arc<dyn SdkApp> {
        &self.0.handle
    }

    pub fn auth(&self) -> Arc<dyn UserManagement> {
        self.0.handle.auth()
    }

    pub fn database(&self) -> Arc<dyn KeyValueStore> {
        self.0.handle.database()
    }

    pub fn firestore(&self) -> Arc<dyn DocumentStore> {
        self.0.handle.firestore()
    }

    pub fn messaging(&self) -> Arc<dyn PushMessaging> {
        self.0.handle.messaging()
    }

    /// Deletes the app and removes it from its registry
    pub async fn delete(&self) -> Result<(), SdkError> {
        if let Some(registry) = self.0.registry.upgrade() {
            registry.remove(&self.0.name);
        }
        tracing::debug!("Deleting Firebase app '{}'", self.0.name);
        self.0.handle.delete().await
    }
}

/// Registry of all live apps, keyed by name
///
/// Apps are only added through [AppRegistry::register], which rejects a name that is
/// already taken. The registry does not keep apps alive: once the last handle to an
/// app is dropped, for example with a container whose bootstrap failed, its name is
/// free again. Nothing is ever reused implicitly.
#[derive(Default)]
pub struct AppRegistry {
    apps: Mutex<Apps>,
}

#[derive(Default)]
struct Apps {
    live: BTreeMap<String, Weak<FirebaseAppInner>>,
    /// Names whose app is still being initialized
    pending: BTreeSet<String>,
}
impl Apps {
    fn is_taken(&self, name: &str) -> bool {
        self.pending.contains(name)
            || self
                .live
                .get(name)
                .is_some_and(|app| app.strong_count() > 0)
    }
}

impl Debug for AppRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let apps = self.lock();
        f.debug_set()
            .entries(apps.live.keys().chain(apps.pending.iter()))
            .finish()
    }
}

static GLOBAL_REGISTRY: OnceLock<Arc<AppRegistry>> = OnceLock::new();

impl AppRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(AppRegistry::default())
    }

    /// The process wide registry, created on first use
    pub fn global() -> Arc<Self> {
        GLOBAL_REGISTRY.get_or_init(AppRegistry::new).clone()
    }

    fn lock(&self) -> MutexGuard<'_, Apps> {
        // A panic while holding the lock cannot leave the map half updated
        self.apps.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Initializes an app through `initialize` and registers it under `name`
    ///
    /// The name is reserved before `initialize` runs, so two registrations can never
    /// end up with the same name. The lock is not held while initializing, `initialize`
    /// may use the registry itself.
    pub fn register(
        self: &Arc<Self>,
        name: &str,
        options: AppOptions,
        initialize: impl FnOnce(&str, &AppOptions) -> Result<Arc<dyn SdkApp>, SdkError>,
    ) -> Result<FirebaseApp, SdkError> {
        let reservation = self.reserve(name)?;

        let handle = initialize(name, &options)?;
        let app = FirebaseApp(Arc::new(FirebaseAppInner {
            name: name.to_string(),
            options,
            handle,
            registry: Arc::downgrade(self),
        }));
        reservation.complete(&app);

        Ok(app)
    }

    fn reserve<'a>(&'a self, name: &str) -> Result<Reservation<'a>, SdkError> {
        let mut apps = self.lock();
        if apps.is_taken(name) {
            return Err(SdkError::DuplicateApp(name.to_string()));
        }
        apps.pending.insert(name.to_string());
        Ok(Reservation {
            registry: self,
            name: name.to_string(),
        })
    }

    pub fn get_app(&self, name: &str) -> Result<FirebaseApp, SdkError> {
        self.lock()
            .live
            .get(name)
            .and_then(Weak::upgrade)
            .map(FirebaseApp)
            .ok_or_else(|| SdkError::NoApp(name.to_string()))
    }

    /// All live apps, ordered by name
    pub fn get_apps(&self) -> Vec<FirebaseApp> {
        self.lock()
            .live
            .values()
            .filter_map(Weak::upgrade)
            .map(FirebaseApp)
            .collect()
    }

    pub async fn delete_app(&self, name: &str) -> Result<(), SdkError> {
        let app = self.get_app(name)?;
        app.delete().await
    }

    /// Deletes every registered app
    ///
    /// Attempts all deletions and returns the first error, if any.
    pub async fn clear(&self) -> Result<(), SdkError> {
        let apps = std::mem::take(&mut self.lock().live);
        let mut result = Ok(());
        for (name, app) in apps {
            let Some(app) = app.upgrade() else {
                continue;
            };
            tracing::debug!("Deleting Firebase app '{name}'");
            if let Err(e) = app.handle.delete().await {
                tracing::warn!("Failed to delete Firebase app '{name}': {e}");
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    fn remove(&self, name: &str) {
        self.lock().live.remove(name);
    }
}

/// Name reserved for an app under construction, released again unless completed
struct Reservation<'a> {
    registry: &'a AppRegistry,
    name: String,
}
impl Reservation<'_> {
    fn complete(self, app: &FirebaseApp) {
        self.registry
            .lock()
            .live
            .insert(self.name.clone(), Arc::downgrade(&app.0));
    }
}
impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        self.registry.lock().pending.remove(&self.name);
    }
}

impl Drop for FirebaseAppInner {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut apps = registry.lock();
        // The name may already belong to a newer app
        let this: *const FirebaseAppInner = self;
        if apps
            .live
            .get(&self.name)
            .is_some_and(|app| std::ptr::eq(app.as_ptr(), this))
        {
            tracing::debug!("Firebase app '{}' dropped, releasing its name", self.name);
            apps.live.remove(&self.name);
        }
    }
}
