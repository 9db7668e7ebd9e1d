//! Service configuration and default bindings.

use crate::context::ServiceContext;
use crate::error::Result;
use crate::hosts_file::{HostsDataService, HostsFile};
use crate::log::{DEFAULT_LOG_SOURCE, LogService, TracingLog};
use std::path::PathBuf;
use std::rc::Rc;

/// Settings applied to the default services by [`register_defaults`].
///
/// # Example
///
/// ```
/// use hostmgr::ServiceConfig;
///
/// let config = ServiceConfig::new()
///     .with_hosts_path("/tmp/hosts")
///     .with_log_source("hostmgr-test");
///
/// assert_eq!(config.hosts_path.as_deref(), Some(std::path::Path::new("/tmp/hosts")));
/// assert_eq!(config.log_source, "hostmgr-test");
/// ```
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Hosts file override. `None` targets the platform hosts file.
    pub hosts_path: Option<PathBuf>,

    /// `source` field attached to log events.
    pub log_source: String,
}

impl ServiceConfig {
    /// Creates a config with the platform hosts file and the default log source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hosts_path: None,
            log_source: DEFAULT_LOG_SOURCE.to_string(),
        }
    }

    /// Overrides the hosts file location.
    #[must_use]
    pub fn with_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.hosts_path = Some(path.into());
        self
    }

    /// Overrides the log source.
    #[must_use]
    pub fn with_log_source(mut self, source: impl Into<String>) -> Self {
        self.log_source = source.into();
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Binds the production services into `ctx`.
///
/// `dyn HostsDataService` resolves to a [`HostsFile`] and `dyn LogService`
/// to a [`TracingLog`], both configured from `config` by their registry
/// initializers. Capabilities that are already bound are left alone, so
/// tests can pre-register mocks and calling this twice is harmless.
///
/// # Errors
///
/// Returns [`HostsError::DuplicateCapability`](crate::HostsError::DuplicateCapability)
/// only if a binding appears between the check and the registration.
pub fn register_defaults(ctx: &ServiceContext, config: &ServiceConfig) -> Result<()> {
    if !ctx.is_registered::<dyn HostsDataService>() {
        let path = config.hosts_path.clone();
        ctx.register_with::<dyn HostsDataService, _>(HostsFile::new, move |mut hosts| {
            if let Some(path) = path {
                hosts.set_path(path);
            }
            Rc::new(hosts)
        })?;
    }

    if !ctx.is_registered::<dyn LogService>() {
        let source = config.log_source.clone();
        ctx.register_with::<dyn LogService, _>(TracingLog::new, move |log| {
            Rc::new(log.with_source(source))
        })?;
    }

    Ok(())
}
