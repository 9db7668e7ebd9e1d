//! File-backed hosts file access.
//!
//! Reads stream the file line by line through [`parse_line`], yielding only
//! valid entries. Writes render the complete file into a temporary file
//! next to the destination and rename it over the original, so readers
//! never observe a half-written hosts file.

use crate::entry::HostEntry;
use crate::error::{HostsError, Result};
use crate::line::{CONTROL_MARKER, ParsedLine, parse_line};
use std::fs::File;
use std::io::{BufRead, BufReader, Write as _};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Extra spaces added after the widest address when aligning columns.
const ADDRESS_PADDING: usize = 5;

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Descriptive header written at the top of every rewritten file.
const HEADER: &[&str] = &[
    "# Static table of host names and their IP addresses.",
    "#",
    "# Each mapping is kept on an individual line. The IP address is placed",
    "# in the first column followed by the corresponding host name. The IP",
    "# address and the host name are separated by at least one space or tab.",
    "#",
    "# Comments (such as these) may be inserted on individual lines or after",
    "# the host name, introduced by a '#' symbol.",
    "#",
    "# For example:",
    "#",
    "#      102.54.94.97     rhino.acme.com          # source server",
    "#       38.25.63.10     x.acme.com              # x client host",
    "#",
    "# Entries below are maintained by hostmgr. Manual edits are read back,",
    "# but comments and alignment are not preserved on the next rewrite.",
];

/// Data service over a hosts file.
///
/// This is the capability resolved from the [`Registry`](crate::Registry);
/// [`HostsFile`] is the production implementation.
pub trait HostsDataService {
    /// File this service reads and writes.
    fn hosts_path(&self) -> &Path;

    /// Returns every valid entry in file order.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`] if the file cannot be opened or read.
    fn get_entries(&self) -> Result<Vec<HostEntry>>;

    /// Replaces the file content with `entries`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`] if the file cannot be written. The
    /// previous content is left untouched on failure.
    fn write_entries(&self, entries: &[HostEntry]) -> Result<()>;
}

/// Platform hosts file location.
#[must_use]
pub fn default_hosts_path() -> PathBuf {
    if cfg!(windows) {
        let root = std::env::var_os("SystemRoot").unwrap_or_else(|| r"C:\Windows".into());
        PathBuf::from(root).join(r"System32\drivers\etc\hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

/// Reads and atomically rewrites a hosts file.
///
/// # Example
///
/// ```rust,no_run
/// use hostmgr::{HostEntry, HostsFile};
///
/// let hosts = HostsFile::with_path("/tmp/hosts");
/// let mut entries: Vec<HostEntry> = hosts.entries()?.collect::<Result<_, _>>()?;
/// entries.push(HostEntry::new("myapp.local", "127.0.0.1")?);
/// hosts.write(&entries)?;
/// # Ok::<(), hostmgr::HostsError>(())
/// ```
///
/// # Permissions
///
/// The system hosts file is usually only writable by root or an
/// administrator. The caller must handle elevation.
#[derive(Debug, Clone)]
pub struct HostsFile {
    path: PathBuf,
}

impl HostsFile {
    /// Targets the platform hosts file (see [`default_hosts_path`]).
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: default_hosts_path(),
        }
    }

    /// Targets a custom file (useful for testing).
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Points this instance at another file.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the file and returns a lazy iterator over its valid entries.
    ///
    /// The file handle lives inside the iterator and is closed when the
    /// iterator is dropped, whether or not it was exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`] if the file does not exist or cannot be opened.
    pub fn entries(&self) -> Result<Entries> {
        Ok(Entries {
            lines: ParsedLines::open(&self.path)?,
        })
    }

    /// Returns the stamp of the first disclaimer line, if the file was
    /// written by this crate.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`] if the file cannot be opened or read.
    pub fn modified_stamp(&self) -> Result<Option<String>> {
        for line in ParsedLines::open(&self.path)? {
            if let ParsedLine::Control(stamp) = line? {
                return Ok(Some(stamp));
            }
        }
        Ok(None)
    }

    /// Returns `true` if the file exists and carries the disclaimer line.
    #[must_use]
    pub fn is_managed(&self) -> bool {
        self.modified_stamp().is_ok_and(|stamp| stamp.is_some())
    }

    /// Renders `entries` into a temporary file beside the destination.
    ///
    /// Nothing happens to the destination until [`StagedWrite::commit`] is
    /// called. Dropping the returned value discards the temporary file.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`] if the destination directory is not
    /// writable or the temporary file cannot be written.
    pub fn stage(&self, entries: &[HostEntry]) -> Result<StagedWrite> {
        let target = resolve_target(&self.path);
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(render(entries, &timestamp()).as_bytes())?;
        temp.as_file().sync_all()?;
        copy_permissions(&target, temp.path());

        tracing::debug!(
            target_path = %target.display(),
            temp_path = %temp.path().display(),
            entries = entries.len(),
            "Staged hosts file rewrite"
        );
        Ok(StagedWrite {
            temp,
            target,
            entries: entries.len(),
        })
    }

    /// Replaces the file content with `entries`.
    ///
    /// The new content is fully written to a temporary file and then
    /// renamed over the destination. On any failure the destination keeps
    /// its previous content. Entries are written in the given order; no
    /// uniqueness is enforced.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`] if staging or the final rename fails.
    pub fn write(&self, entries: &[HostEntry]) -> Result<()> {
        self.stage(entries)?.commit()
    }
}

impl Default for HostsFile {
    fn default() -> Self {
        Self::new()
    }
}

impl HostsDataService for HostsFile {
    fn hosts_path(&self) -> &Path {
        &self.path
    }

    fn get_entries(&self) -> Result<Vec<HostEntry>> {
        self.entries()?.collect()
    }

    fn write_entries(&self, entries: &[HostEntry]) -> Result<()> {
        self.write(entries)
    }
}

/// A fully written temporary file waiting to replace the hosts file.
#[derive(Debug)]
pub struct StagedWrite {
    temp: NamedTempFile,
    target: PathBuf,
    entries: usize,
}

impl StagedWrite {
    /// Path of the temporary file holding the new content.
    #[must_use]
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Atomically renames the temporary file over the destination.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`] if the rename fails; the temporary file
    /// is removed and the destination is unchanged.
    pub fn commit(self) -> Result<()> {
        let Self {
            temp,
            target,
            entries,
        } = self;
        temp.persist(&target).map_err(|e| HostsError::Io(e.error))?;

        tracing::info!(
            path = %target.display(),
            entries = entries,
            "Rewrote hosts file"
        );
        Ok(())
    }
}

/// Lazy iterator over the valid entries of a hosts file.
///
/// Blank, comment, control and malformed lines are skipped. Read errors
/// are yielded once, after which iteration ends.
#[derive(Debug)]
pub struct Entries {
    lines: ParsedLines,
}

impl Iterator for Entries {
    type Item = Result<HostEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(line) = self.lines.next() {
            match line {
                Ok(ParsedLine::Host(entry)) => return Some(Ok(entry)),
                Ok(ParsedLine::Unknown) => tracing::debug!(
                    line = self.lines.line_no,
                    "Skipping unparseable hosts file line"
                ),
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

#[derive(Debug)]
struct ParsedLines {
    reader: BufReader<File>,
    buf: Vec<u8>,
    line_no: usize,
    done: bool,
}

impl ParsedLines {
    fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            reader: BufReader::new(File::open(path)?),
            buf: Vec::new(),
            line_no: 0,
            done: false,
        })
    }
}

impl Iterator for ParsedLines {
    type Item = Result<ParsedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                self.line_no += 1;
                let text = String::from_utf8_lossy(&self.buf);
                Some(Ok(parse_line(text.trim_end_matches(['\r', '\n']))))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

/// Renders the complete file text.
///
/// ```text
/// <header>
///
/// # MODIFIED BY HOST MANAGER: 2024-05-01 12:00:00
///
/// 127.0.0.1     	myapp.local
/// ::1           	myapp.local
///
/// ```
#[must_use]
pub fn render(entries: &[HostEntry], stamp: &str) -> String {
    let width = entries
        .iter()
        .map(|e| e.address().chars().count())
        .max()
        .map_or(0, |w| w + ADDRESS_PADDING);

    let mut out = String::new();
    for line in HEADER {
        out.push_str(line);
        out.push_str(LINE_ENDING);
    }
    out.push_str(LINE_ENDING);

    out.push_str(CONTROL_MARKER);
    out.push(' ');
    out.push_str(stamp);
    out.push_str(LINE_ENDING);
    out.push_str(LINE_ENDING);

    for entry in entries {
        out.push_str(&entry.to_line(width));
        out.push_str(LINE_ENDING);
    }
    out.push_str(LINE_ENDING);
    out
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Follows a symlinked hosts file so the rename replaces the real file.
fn resolve_target(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Carries the destination's mode over to the temporary file, which is
/// created owner-only.
fn copy_permissions(target: &Path, temp: &Path) {
    let Ok(meta) = std::fs::metadata(target) else {
        return;
    };
    if let Err(e) = std::fs::set_permissions(temp, meta.permissions()) {
        tracing::warn!(
            path = %target.display(),
            error = %e,
            "Failed to copy hosts file permissions to temporary file"
        );
    }
}
