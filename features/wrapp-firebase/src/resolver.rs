use wrapp_di::Binding;

use crate::{options::AdminOptions, strategy::AdminStrategy};

/// Result of resolving a strategy
#[derive(Debug)]
pub enum OptionsResolution {
    /// The options are known now
    Ready(AdminOptions),
    /// The options are produced by the container while it is built
    Deferred {
        /// Binding providing the options
        options: Binding,
        /// Providers the options binding depends on which the registration brings along
        providers: Vec<Binding>,
    },
}

/// Produces the options of a registration from its strategy
pub struct OptionsResolver;

impl OptionsResolver {
    /// Static options are returned unchanged, every other strategy becomes a binding
    /// the container resolves: its dependencies first, then the options themselves.
    pub fn resolve(strategy: AdminStrategy) -> OptionsResolution {
        match strategy {
            AdminStrategy::Static(options) => OptionsResolution::Ready(options),
            AdminStrategy::Factory(factory) => OptionsResolution::Deferred {
                options: factory.options,
                providers: Vec::new(),
            },
            AdminStrategy::Existing(existing) => OptionsResolution::Deferred {
                options: existing.options,
                providers: Vec::new(),
            },
            AdminStrategy::Class(class) => OptionsResolution::Deferred {
                options: class.options,
                providers: vec![class.class],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{module::ADMIN_OPTIONS, options::ServiceAccount};

    #[test]
    fn static_options_pass_through_unchanged() {
        let options = AdminOptions::new(ServiceAccount::new("p", "e", "k"))
            .database_url("https://p.firebaseio.com");

        match OptionsResolver::resolve(AdminStrategy::Static(options.clone())) {
            OptionsResolution::Ready(resolved) => assert_eq!(resolved, options),
            other => panic!("expected ready options, got {other:?}"),
        }
    }

    #[test]
    fn factory_options_are_deferred() {
        let strategy = AdminStrategy::factory((), |()| async {
            Ok::<_, std::convert::Infallible>(AdminOptions::default())
        });

        match OptionsResolver::resolve(strategy) {
            OptionsResolution::Deferred { options, providers } => {
                assert_eq!(options.key(), ADMIN_OPTIONS.key());
                assert!(providers.is_empty());
            }
            other => panic!("expected deferred options, got {other:?}"),
        }
    }
}
