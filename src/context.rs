//! Service context holding the active registry.

use crate::error::Result;
use crate::registry::Registry;
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

type Provider = Box<dyn Fn() -> Registry>;

/// Owns the active [`Registry`] and the provider that builds it.
///
/// The registry is created lazily from the provider on first use. Tests can
/// swap the provider with [`set_provider`](Self::set_provider), which throws
/// away the current registry together with every cached singleton.
///
/// # Example
///
/// ```
/// use hostmgr::{HostsDataService, HostsFile, ServiceContext};
/// use std::rc::Rc;
///
/// let ctx = ServiceContext::new();
/// ctx.register::<dyn HostsDataService>(|| Rc::new(HostsFile::with_path("/tmp/hosts")))
///     .unwrap();
///
/// let hosts = ctx.resolve::<dyn HostsDataService>().unwrap();
/// assert_eq!(hosts.hosts_path(), std::path::Path::new("/tmp/hosts"));
/// ```
pub struct ServiceContext {
    provider: Provider,
    registry: OnceCell<Registry>,
}

impl ServiceContext {
    /// Creates a context whose provider builds an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_provider(Registry::new)
    }

    /// Creates a context backed by a custom registry provider.
    #[must_use]
    pub fn with_provider(provider: impl Fn() -> Registry + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            registry: OnceCell::new(),
        }
    }

    /// Replaces the provider and discards the current registry.
    ///
    /// Intended for test setup; normal runtime code never calls this.
    pub fn set_provider(&mut self, provider: impl Fn() -> Registry + 'static) {
        self.provider = Box::new(provider);
        self.registry = OnceCell::new();
        tracing::debug!("Replaced registry provider");
    }

    /// Returns the active registry, building it on first access.
    pub fn registry(&self) -> &Registry {
        self.registry.get_or_init(|| (self.provider)())
    }

    /// See [`Registry::register`].
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::DuplicateCapability`](crate::HostsError::DuplicateCapability)
    /// if `C` is already bound.
    pub fn register<C>(&self, factory: impl FnOnce() -> Rc<C> + 'static) -> Result<()>
    where
        C: ?Sized + 'static,
    {
        self.registry().register::<C>(factory)
    }

    /// See [`Registry::register_with`].
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::DuplicateCapability`](crate::HostsError::DuplicateCapability)
    /// if `C` is already bound.
    pub fn register_with<C, T>(
        &self,
        factory: impl FnOnce() -> T + 'static,
        initializer: impl FnOnce(T) -> Rc<C> + 'static,
    ) -> Result<()>
    where
        C: ?Sized + 'static,
        T: 'static,
    {
        self.registry().register_with::<C, T>(factory, initializer)
    }

    /// See [`Registry::resolve`].
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::CapabilityNotFound`](crate::HostsError::CapabilityNotFound)
    /// if nothing is bound to `C`.
    pub fn resolve<C>(&self) -> Result<Rc<C>>
    where
        C: ?Sized + 'static,
    {
        self.registry().resolve::<C>()
    }

    #[must_use]
    pub fn is_registered<C>(&self) -> bool
    where
        C: ?Sized + 'static,
    {
        self.registry().is_registered::<C>()
    }
}

impl Default for ServiceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("registry", &self.registry.get())
            .finish_non_exhaustive()
    }
}
