//! Asynchronous, token keyed dependency injection.
//!
//! The DI consists of three parts:
//! 1. The [DiBuilder] where one registers all values, factories and modules
//! 2. The initiator, which validates the [DependencyGraph] and then runs every factory
//!    concurrently on the current task, handing out instances as they become ready
//! 3. The finished [DiContainer], from which instances are required by [Token]
//!
//! ```ignore
//! const GREETING: Token<String> = Token::new("GREETING");
//! const LENGTH: Token<usize> = Token::new("LENGTH");
//!
//! let container = DiBuilder::new()
//!     .add_value(GREETING, "hello".to_string())
//!     .add_factory(FactoryProvider::new(LENGTH, GREETING, |greeting: Arc<String>| async move {
//!         Ok::<_, Infallible>(greeting.len())
//!     }))
//!     .build()
//!     .await?;
//!
//! assert_eq!(*container.require(LENGTH)?, 5);
//! ```

pub mod builder;
pub mod container;
pub mod dependency_graph;
pub mod errors;
pub mod factories;
pub mod initiator;
pub mod module;
pub mod resolver;
pub mod types;

pub use builder::DiBuilder;
pub use container::DiContainer;
pub use dependency_graph::{DependencyGraph, DependencyGraphError, DependencyGraphErrors};
pub use errors::{InitError, InjectError, RequireError};
pub use factories::{Class, Construct, DynFactory, FactoryProvider, Inject, InstanceFactory};
pub use initiator::DiHandle;
pub use module::{Binding, ModuleDefinition};
pub use resolver::Resolver;
pub use types::{DependencyInfo, DynError, Injectable, Instance, Key, Token, TypeInfo};
