//! Hosts file entry model.

use crate::error::{HostsError, Result};
use crate::util::compare_hostnames;
use std::cmp::Ordering;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Address family inferred from an entry's address text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// Dotted-quad IPv4 literal.
    Ipv4,
    /// IPv6 literal.
    Ipv6,
    /// Anything that parses as neither.
    Unknown,
}

impl AddressFamily {
    /// Classifies `address` by attempting a strict IPv4 parse, then IPv6.
    ///
    /// ```
    /// use hostmgr::AddressFamily;
    ///
    /// assert_eq!(AddressFamily::of("10.0.1.2"), AddressFamily::Ipv4);
    /// assert_eq!(AddressFamily::of("::1"), AddressFamily::Ipv6);
    /// assert_eq!(AddressFamily::of("notanip"), AddressFamily::Unknown);
    /// ```
    #[must_use]
    pub fn of(address: &str) -> Self {
        if address.parse::<Ipv4Addr>().is_ok() {
            Self::Ipv4
        } else if address.parse::<Ipv6Addr>().is_ok() {
            Self::Ipv6
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ipv4 => "IPv4",
            Self::Ipv6 => "IPv6",
            Self::Unknown => "unknown",
        })
    }
}

/// One hostname-to-address mapping from the hosts file.
///
/// Entries are immutable snapshots. Hostnames compare case-insensitively;
/// addresses are kept exactly as written and compare ordinally.
///
/// # Example
///
/// ```
/// use hostmgr::{AddressFamily, HostEntry};
///
/// let entry = HostEntry::new("myapp.local", "127.0.0.1").unwrap();
///
/// assert_eq!(entry.hostname(), "myapp.local");
/// assert_eq!(entry.address_family(), AddressFamily::Ipv4);
/// assert_eq!(entry, HostEntry::new("MyApp.Local", "127.0.0.1").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct HostEntry {
    hostname: String,
    address: String,
    family: AddressFamily,
}

impl HostEntry {
    /// Creates a validated entry from caller input.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::InvalidEntry`] if either field is empty, contains
    /// whitespace, or starts with `#`. An address starting with `#` would be
    /// read back as a comment line.
    pub fn new(hostname: impl Into<String>, address: impl Into<String>) -> Result<Self> {
        let hostname = hostname.into();
        let address = address.into();
        validate_field("hostname", &hostname)?;
        validate_field("address", &address)?;
        Ok(Self::from_parts(hostname, address))
    }

    /// Builds an entry from tokens already split by the line parser.
    pub(crate) fn from_parts(hostname: String, address: String) -> Self {
        let family = AddressFamily::of(&address);
        Self {
            hostname,
            address,
            family,
        }
    }

    /// Returns a copy of this entry pointing at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::InvalidEntry`] if `address` is empty, contains
    /// whitespace, or starts with `#`.
    pub fn with_address(&self, address: impl Into<String>) -> Result<Self> {
        Self::new(self.hostname.clone(), address)
    }

    /// Hostname as written.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Address text as written; never normalized.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub const fn address_family(&self) -> AddressFamily {
        self.family
    }

    /// Formats the entry as a hosts file line, padding the address to
    /// `column_width` characters.
    #[must_use]
    pub fn to_line(&self, column_width: usize) -> String {
        format!("{:<column_width$}\t{}", self.address, self.hostname)
    }
}

fn validate_field(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(HostsError::InvalidEntry(format!("{name} must not be empty")));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(HostsError::InvalidEntry(format!(
            "{name} must not contain whitespace: {value:?}"
        )));
    }
    if value.starts_with('#') {
        return Err(HostsError::InvalidEntry(format!(
            "{name} must not start with '#': {value}"
        )));
    }
    Ok(())
}

impl fmt::Display for HostEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.hostname, self.address)
    }
}

impl PartialEq for HostEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HostEntry {}

impl PartialOrd for HostEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HostEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_hostnames(&self.hostname, &other.hostname)
            .then_with(|| self.address.cmp(&other.address))
    }
}
