//! Host-level operations built on the data and logging capabilities.
//!
//! The record engine itself accepts duplicate hostnames. Uniqueness is
//! enforced here: each command reads the current entries, checks them
//! case-insensitively, and writes the whole new set back.

use crate::entry::HostEntry;
use crate::error::{HostsError, Result};
use crate::hosts_file::HostsDataService;
use crate::log::LogService;
use crate::util::hostnames_equal;

/// Returns all entries, or only those whose hostname matches one of `names`.
///
/// # Errors
///
/// Returns [`HostsError::Io`] if the hosts file cannot be read.
pub fn get_hosts(service: &dyn HostsDataService, names: &[String]) -> Result<Vec<HostEntry>> {
    let entries = service.get_entries()?;
    if names.is_empty() {
        return Ok(entries);
    }
    Ok(entries
        .into_iter()
        .filter(|e| names.iter().any(|n| hostnames_equal(e.hostname(), n)))
        .collect())
}

/// Appends a new mapping.
///
/// # Errors
///
/// Returns [`HostsError::InvalidEntry`] for malformed input,
/// [`HostsError::DuplicateHost`] if the hostname already exists, or
/// [`HostsError::Io`] if the file cannot be read or written.
pub fn add_host(
    service: &dyn HostsDataService,
    log: &dyn LogService,
    hostname: &str,
    address: &str,
) -> Result<HostEntry> {
    let entry = validated(log, HostEntry::new(hostname, address))?;

    let mut entries = service.get_entries()?;
    if entries.iter().any(|e| hostnames_equal(e.hostname(), hostname)) {
        return Err(HostsError::DuplicateHost {
            hostname: hostname.to_string(),
        });
    }

    entries.push(entry.clone());
    service.write_entries(&entries)?;

    log.write_log(&format!("Added host to hosts file: {entry}"));
    Ok(entry)
}

/// Removes every entry for `hostname` and returns the removed entries.
///
/// # Errors
///
/// Returns [`HostsError::MissingHost`] if no entry matches, or
/// [`HostsError::Io`] if the file cannot be read or written.
pub fn remove_host(
    service: &dyn HostsDataService,
    log: &dyn LogService,
    hostname: &str,
) -> Result<Vec<HostEntry>> {
    let (removed, kept): (Vec<_>, Vec<_>) = service
        .get_entries()?
        .into_iter()
        .partition(|e| hostnames_equal(e.hostname(), hostname));

    if removed.is_empty() {
        return Err(HostsError::MissingHost {
            hostname: hostname.to_string(),
        });
    }

    service.write_entries(&kept)?;

    for entry in &removed {
        log.write_log(&format!("Removed hosts file entry: {entry}"));
    }
    Ok(removed)
}

/// Points every entry for `hostname` at `address`, keeping file order.
///
/// Returns the updated entries.
///
/// # Errors
///
/// Returns [`HostsError::InvalidEntry`] for a malformed address,
/// [`HostsError::MissingHost`] if no entry matches, or [`HostsError::Io`]
/// if the file cannot be read or written.
pub fn set_host_address(
    service: &dyn HostsDataService,
    log: &dyn LogService,
    hostname: &str,
    address: &str,
) -> Result<Vec<HostEntry>> {
    validated(log, HostEntry::new(hostname, address))?;

    let mut changes = Vec::new();
    let mut entries = service.get_entries()?;
    for entry in &mut entries {
        if hostnames_equal(entry.hostname(), hostname) {
            let updated = entry.with_address(address)?;
            changes.push((std::mem::replace(entry, updated.clone()), updated));
        }
    }

    if changes.is_empty() {
        return Err(HostsError::MissingHost {
            hostname: hostname.to_string(),
        });
    }

    service.write_entries(&entries)?;

    Ok(changes
        .into_iter()
        .map(|(old, new)| {
            log.write_log(&format!("Updated hosts file entry: {old} to {new}"));
            new
        })
        .collect())
}

fn validated(log: &dyn LogService, entry: Result<HostEntry>) -> Result<HostEntry> {
    entry.inspect_err(|e| log.write_validation_error(&e.to_string()))
}
