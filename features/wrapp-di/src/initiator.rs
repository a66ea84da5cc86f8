use std::{
    any::type_name,
    collections::{HashMap, HashSet},
    sync::Arc,
    thread::{self, sleep},
    time::Duration,
};

use futures::{stream::FuturesUnordered, SinkExt, StreamExt};
use futures_channel::{mpsc, oneshot};

use crate::{
    builder::DiBuilder,
    container::DiContainer,
    dependency_graph::DependencyGraph,
    errors::{InitError, InjectError, RequireError},
    resolver::Resolver,
    types::{DynError, Injectable, Instance, Key, Token},
};

/// Initiates the DiContainer
pub(crate) struct DiInitiator {
    request_rx: mpsc::Receiver<DiRequest>,
    request_tx: mpsc::Sender<DiRequest>,

    all_registered_keys: HashSet<Key>,

    /// Waiters for instance results
    instance_waiters: HashMap<Key, Vec<DiResponseSender<Instance>>>,

    /// All produced instances - None = provider is known but disabled
    instances: HashMap<Key, Option<Instance>>,
}
impl DiInitiator {
    pub(crate) fn new() -> DiInitiator {
        let (injection_request_sender, injection_request_receiver) = mpsc::channel(10);
        DiInitiator {
            request_rx: injection_request_receiver,
            request_tx: injection_request_sender,
            all_registered_keys: HashSet::new(),
            instances: HashMap::new(),
            instance_waiters: HashMap::new(),
        }
    }

    pub async fn initiate(
        mut self,
        mut blueprint: DiBuilder,
        timeout: Option<Duration>,
    ) -> Result<DiContainer, InitError> {
        // If we have a timeout - spawn a thread to signal once it's done
        let (timeout_tx, timeout_rx) = oneshot::channel::<()>();
        let _timeout_guard = match timeout {
            Some(timeout) => {
                // We don't join the thread - it will just die after the timeout
                thread::spawn(move || {
                    sleep(timeout);
                    let _ = timeout_tx.send(());
                });
                None
            }
            None => Some(timeout_tx),
        };

        // Build and check Graph - nothing is constructed if it is invalid
        let graph = DependencyGraph::new(&blueprint)?;
        graph.check()?;

        let mut exports: HashMap<String, Vec<Key>> = HashMap::new();
        for module in std::mem::take(&mut blueprint.registered_modules) {
            exports.entry(module.name).or_default().extend(module.exports);
        }

        // Start initiating all Instances
        if let Err(e) = self.try_initiate(blueprint, timeout_rx).await {
            // On fail - inform all waiters
            let msg = Err(e.clone().into());
            for (_, waiters) in self.instance_waiters {
                for waiter in waiters.into_iter() {
                    let _ = waiter.send(msg.clone());
                }
            }

            return Err(e);
        }

        tracing::debug!(
            "Dependency injection completed with {} providers",
            self.instances.len()
        );

        Ok(DiContainer::new(self.instances, exports, graph))
    }

    /// Starts all registered factories and waits for them to complete
    async fn try_initiate(
        &mut self,
        blueprint: DiBuilder,
        mut timeout: oneshot::Receiver<()>,
    ) -> Result<(), InitError> {
        let DiBuilder {
            registered_factories,
            registered_instances,
            ..
        } = blueprint;

        tracing::debug!(
            "Initializing application with {} factories and {} instances",
            registered_factories.len(),
            registered_instances.len()
        );

        // Add all pre build instances to the results
        for instance in registered_instances.into_iter() {
            self.all_registered_keys.insert(instance.key);
            self.instances.insert(instance.key, Some(instance));
        }

        // ###############################################
        // Begin instantiation of all factories
        let mut factory_futures = FuturesUnordered::new();
        for mut factory in registered_factories {
            self.all_registered_keys.insert(factory.supplies());
            let handle = self.get_handle();

            // Returns error if DI failed
            // Returns None if dependency is disabled
            let factory_future = async move {
                let supplies = factory.supplies();
                let result = async {
                    // Check if the factory is enabled
                    match Box::into_pin(factory.is_enabled(handle.clone())).await? {
                        true => {
                            tracing::debug!("Factory for {supplies} is enabled")
                        }
                        false => {
                            tracing::debug!("Factory for {supplies} is disabled");
                            return Ok(None);
                        }
                    }

                    // Construct factory
                    let instance = Box::into_pin(factory.construct(handle.clone())).await?;

                    tracing::debug!("Constructed instance of {}", instance.key);
                    Ok::<_, DynError>(Some(instance))
                }
                .await;

                (supplies, result)
            };

            factory_futures.push(factory_future);
        }

        // Start handling injection requests and wait for all factories to finish
        let factory_count = factory_futures.len();

        loop {
            let factories_left = factory_futures.len();
            tracing::debug!(
                "Waiting for factories to finish [{} of {factory_count} complete]",
                factory_count - factories_left
            );

            futures::select! {
                request = self.request_rx.select_next_some() => {
                    self.handle_injection_request(request);
                }
                result = factory_futures.next() => {
                    if self.handle_factory_result(result)? {
                        break;
                    }
                }
                _ = timeout => {
                    return Err(InitError::Timeout)
                }
            }
        }

        Ok(())
    }

    /// Handle the result of a factory future
    ///
    /// Returns true if complete
    fn handle_factory_result(
        &mut self,
        result: Option<(Key, Result<Option<Instance>, DynError>)>,
    ) -> Result<bool, InitError> {
        let (key, result) = match result {
            Some(result) => result,
            None => {
                // If no more tasks are left, exit the loop
                // all injection requests must now also be handled as nothing is left to be build
                debug_assert!(
                    self.instance_waiters.is_empty(),
                    "Not all waiters were satisfied"
                );
                return Ok(true);
            }
        };

        match result {
            Ok(instance) => {
                handle_created_instance(self, key, instance);
            }
            Err(err) => {
                tracing::debug!("Factory for {key} failed: {err}");
                // If one factory fails - abort DI
                return Err(InitError::FactoryFailed {
                    product: key,
                    error: Arc::new(err),
                });
            }
        };

        return Ok(false);

        fn handle_created_instance(this: &mut DiInitiator, key: Key, instance: Option<Instance>) {
            // Add instance to results
            this.instances.insert(key, instance.clone());

            let message = match instance {
                Some(instance) => Ok(instance),
                None => Err(RequireError::Disabled(key)),
            };

            // Inform all waiters with a result
            for waiter in this
                .instance_waiters
                .remove(&key)
                .into_iter()
                .flat_map(Vec::into_iter)
            {
                let _ = waiter.send(message.clone());
            }
        }
    }

    /// Get a handle to the DiInitiator
    ///
    /// The handle is only valid before and during Initiation.
    pub fn get_handle(&self) -> DiHandle {
        DiHandle {
            request_sender: self.request_tx.clone(),
        }
    }
}
// Injection Request handlers
impl DiInitiator {
    fn handle_injection_request(&mut self, request: DiRequest) {
        match request {
            DiRequest::Require {
                key,
                response_channel,
            } => {
                self.handle_instance_require(key, response_channel);
            }
        }
    }

    fn handle_instance_require(&mut self, key: Key, response_channel: DiResponseSender<Instance>) {
        // Check if the key is registered
        if !self.all_registered_keys.contains(&key) {
            tracing::error!("Tried to require an unregistered provider: {key}");
            let _ = response_channel.send(Err(RequireError::Missing(key)));
            return;
        }

        // Check if we already have a result
        if let Some(result) = self.instances.get(&key) {
            let _ = match result {
                Some(instance) => response_channel.send(Ok(instance.clone())),
                None => response_channel.send(Err(RequireError::Disabled(key))),
            };
            return;
        }

        // Otherwise add the request to the waiters list
        self.instance_waiters
            .entry(key)
            .or_default()
            .push(response_channel);
    }
}

/// DI Handle for resolving dependencies and getting instances from the registry.
/// The DI Handle is only valid during instantiation of the Application.
/// Afterwards the DI Container can be used directly for dependency injection.
#[derive(Clone)]
pub struct DiHandle {
    pub request_sender: mpsc::Sender<DiRequest>,
}
impl DiHandle {
    pub async fn resolve<T: Resolver>(&mut self) -> Result<T, InjectError> {
        T::resolve(self).await
    }

    /// Waits until the provider registered under `token` has been constructed
    pub async fn require<T: Injectable>(&mut self, token: Token<T>) -> Result<Arc<T>, InjectError> {
        let (tx, rx) = oneshot::channel();
        self.request_sender
            .send(DiRequest::Require {
                key: token.key(),
                response_channel: tx,
            })
            .await?;

        let resolved = rx.await??;
        let downcasted = resolved
            .downcast::<T>()
            .map_err(|actual_type| RequireError::DowncastFailed {
                required_type: type_name::<T>(),
                actual_type,
            })?;

        Ok(downcasted)
    }

    /// Like [DiHandle::require], but a missing or disabled provider resolves to `None`
    pub async fn require_optional<T: Injectable>(
        &mut self,
        token: Token<T>,
    ) -> Result<Option<Arc<T>>, InjectError> {
        match self.require(token).await {
            Ok(resolved) => Ok(Some(resolved)),
            Err(InjectError::RequireError(
                RequireError::Disabled(_) | RequireError::Missing(_),
            )) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

pub type DiResponseSender<For> = oneshot::Sender<Result<For, RequireError>>;

/// Requests between [DiHandle] and [DiInitiator]
pub enum DiRequest {
    /// Requires the instance registered under a key
    Require {
        key: Key,
        response_channel: DiResponseSender<Instance>,
    },
}
