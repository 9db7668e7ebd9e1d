//! # hostmgr
//!
//! Read, edit and atomically rewrite the system hosts file.
//!
//! The crate has two halves:
//!
//! - a **record engine** ([`HostsFile`]) that parses the hosts file
//!   tolerantly, one line at a time, and rewrites it through a temporary
//!   file that is renamed over the original;
//! - a **capability registry** ([`Registry`], [`ServiceContext`]) that binds
//!   abstract services such as `dyn HostsDataService` and `dyn LogService`
//!   to lazily constructed singletons.
//!
//! The [`commands`] module combines both into add / get / remove / set
//! operations with case-insensitive duplicate checks.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use hostmgr::{HostsDataService, LogService, ServiceConfig, ServiceContext};
//! use hostmgr::commands::add_host;
//!
//! let ctx = ServiceContext::new();
//! hostmgr::register_defaults(&ctx, &ServiceConfig::new())?;
//!
//! let hosts = ctx.resolve::<dyn HostsDataService>()?;
//! let log = ctx.resolve::<dyn LogService>()?;
//!
//! // Requires root for /etc/hosts.
//! add_host(hosts.as_ref(), log.as_ref(), "myapp.local", "127.0.0.1")?;
//! ```
//!
//! ## File format
//!
//! Any line with at least two whitespace-separated tokens that does not
//! start with `#` is an entry: the first token is the address, the second
//! the hostname, and the rest is ignored. Blank lines, comments and
//! malformed lines are skipped without error. Rewritten files carry a
//! descriptive header, a `# MODIFIED BY HOST MANAGER: <time>` line and one
//! aligned `<address><TAB><hostname>` line per entry.
//!
//! ## Concurrency
//!
//! There is no locking. The rename protects against torn writes, not
//! against lost updates from concurrent writers (last writer wins).
//!
//! ## Permissions
//!
//! Writing the system hosts file requires root (or an administrator on
//! Windows). The caller is responsible for privilege elevation.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod hosts_file;
pub mod line;
pub mod log;
pub mod registry;
pub mod util;

pub use config::{ServiceConfig, register_defaults};
pub use context::ServiceContext;
pub use entry::{AddressFamily, HostEntry};
pub use error::{ErrorKind, HostsError, Result};
pub use hosts_file::{Entries, HostsDataService, HostsFile, StagedWrite, default_hosts_path};
pub use log::{LogService, NullLog, TracingLog};
pub use registry::Registry;
