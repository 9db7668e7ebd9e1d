//! Error types.

use thiserror::Error;

/// Result alias for hosts file and registry operations.
pub type Result<T> = std::result::Result<T, HostsError>;

/// Coarse classification of a [`HostsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A capability or host record was not found.
    NotFound,
    /// A capability or host record already exists.
    Duplicate,
    /// Caller-supplied input was rejected before reaching the file.
    MalformedInput,
    /// The underlying filesystem operation failed.
    Io,
}

/// Errors returned by hosts file and registry operations.
#[derive(Debug, Error)]
pub enum HostsError {
    /// Filesystem I/O failed (typically `PermissionDenied` on the system hosts file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Nothing is bound for the requested capability.
    #[error("no service registered for capability: {capability}")]
    CapabilityNotFound {
        /// Type name of the capability.
        capability: &'static str,
    },

    /// The capability was resolved again while its own factory was running.
    #[error("capability resolved during its own construction: {capability}")]
    CapabilityCycle {
        /// Type name of the capability.
        capability: &'static str,
    },

    /// The capability is already bound.
    #[error("capability already registered: {capability}")]
    DuplicateCapability {
        /// Type name of the capability.
        capability: &'static str,
    },

    /// An entry with this hostname already exists.
    #[error("host already exists in hosts file: {hostname}")]
    DuplicateHost {
        /// The conflicting hostname.
        hostname: String,
    },

    /// No entry with this hostname exists.
    #[error("host not found in hosts file: {hostname}")]
    MissingHost {
        /// The requested hostname.
        hostname: String,
    },

    /// Invalid entry values.
    #[error("invalid entry: {0}")]
    InvalidEntry(String),
}

impl HostsError {
    /// Returns the taxonomy bucket this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::CapabilityNotFound { .. }
            | Self::CapabilityCycle { .. }
            | Self::MissingHost { .. } => ErrorKind::NotFound,
            Self::DuplicateCapability { .. } | Self::DuplicateHost { .. } => ErrorKind::Duplicate,
            Self::InvalidEntry(_) => ErrorKind::MalformedInput,
        }
    }

    /// Returns `true` for missing capabilities and missing hosts.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Returns `true` for duplicate capabilities and duplicate hosts.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.kind() == ErrorKind::Duplicate
    }

    /// Returns `true` if the underlying I/O error is `PermissionDenied`.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied)
    }
}
