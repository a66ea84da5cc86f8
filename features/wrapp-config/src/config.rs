use std::{ops::Deref, sync::Arc};

use wrapp_di::{
    errors::InjectError,
    initiator::DiHandle,
    resolver::Resolver,
    types::{DependencyInfo, Token},
};

use crate::provider::ConfigProvider;

/// A wrapper type to allow for config injections
///
/// Resolves the [ConfigProvider] registered in the container and takes `T` out of it.
///
/// # Example
/// ```ignore
/// async fn construct(mut di: DiHandle) -> Result<Self, DynError> {
///     let http = di.resolve::<Config<HttpConfig>>().await?;
///     Ok(Server { port: http.port })
/// }
/// ```
pub struct Config<T> {
    inner: Arc<T>,
}
impl<T> Deref for Config<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl<T> Config<T> {
    pub fn inner(&self) -> Arc<T> {
        self.inner.clone()
    }

    pub fn into_inner(self) -> Arc<T> {
        self.inner
    }
}

impl<T: Send + Sync + 'static> Resolver for Config<T> {
    async fn resolve(handle: &mut DiHandle) -> Result<Self, InjectError>
    where
        Self: Sized,
    {
        let config_provider = handle.resolve::<Arc<ConfigProvider>>().await?;

        let config: Arc<T> = config_provider
            .require_config()
            .map_err(|e| InjectError::Other(Box::new(e)))?;

        Ok(Config { inner: config })
    }

    /// Configs are read from the [ConfigProvider], which is the actual dependency
    fn dependency_info() -> DependencyInfo {
        DependencyInfo::required(Token::<ConfigProvider>::of().key())
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use futures::executor::block_on;
    use wrapp_di::{DiBuilder, FactoryProvider};

    use super::*;

    struct Port(u16);

    #[test]
    fn configs_resolve_through_the_registered_provider() {
        const URL: Token<String> = Token::new("URL");

        let mut provider = ConfigProvider::new();
        provider.add_config(Port(8080)).unwrap();

        let container = block_on(
            DiBuilder::new()
                .add_instance(provider)
                .add_factory(FactoryProvider::new(
                    URL,
                    Token::<ConfigProvider>::of(),
                    |provider: Arc<ConfigProvider>| async move {
                        let port = provider.require_config::<Port>()?;
                        Ok::<_, crate::errors::ConfigError>(format!("http://localhost:{}", port.0))
                    },
                ))
                .build(),
        )
        .unwrap();

        assert_eq!(*container.require(URL).unwrap(), "http://localhost:8080");
    }
}
