//! Line classification for the hosts file format.
//!
//! Parsing is tolerant: a line that is not an entry is classified and
//! dropped, never reported as an error. Hand edits, foreign comments and
//! garbage lines therefore never abort a read.

use crate::entry::HostEntry;

/// Marker that opens the disclaimer line written on every rewrite.
pub const CONTROL_MARKER: &str = "# MODIFIED BY HOST MANAGER:";

/// Classification of one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Empty or whitespace only.
    Blank,
    /// Starts (after optional whitespace) with one or more `#`.
    Comment,
    /// Disclaimer line written by this crate; carries the stamp text.
    Control(String),
    /// Not blank, not a comment, and fewer than two tokens.
    Unknown,
    /// A valid `<address> <hostname> [ignored...]` line.
    Host(HostEntry),
}

impl ParsedLine {
    /// Consumes the classification, returning the entry for host lines.
    #[must_use]
    pub fn into_entry(self) -> Option<HostEntry> {
        match self {
            Self::Host(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Classifies a single line (without its terminator).
///
/// Tokens are split on runs of spaces and tabs only, so IPv6 literals keep
/// their colons. Token 0 is the address, token 1 the hostname, and anything
/// after that (such as a trailing `# comment`) is ignored.
///
/// ```
/// use hostmgr::line::{parse_line, ParsedLine};
///
/// assert_eq!(parse_line("   # note"), ParsedLine::Comment);
/// assert_eq!(parse_line("localhost"), ParsedLine::Unknown);
///
/// let entry = parse_line("::1\t\tlocalhost  # loopback").into_entry().unwrap();
/// assert_eq!(entry.address(), "::1");
/// assert_eq!(entry.hostname(), "localhost");
/// ```
#[must_use]
pub fn parse_line(line: &str) -> ParsedLine {
    let trimmed = line.trim_start();
    if trimmed.trim_end().is_empty() {
        return ParsedLine::Blank;
    }
    if let Some(stamp) = trimmed.strip_prefix(CONTROL_MARKER) {
        return ParsedLine::Control(stamp.trim().to_string());
    }
    if trimmed.starts_with('#') {
        return ParsedLine::Comment;
    }

    let mut tokens = line
        .split([' ', '\t'])
        .map(str::trim)
        .filter(|t| !t.is_empty());
    match (tokens.next(), tokens.next()) {
        (Some(address), Some(hostname)) => ParsedLine::Host(HostEntry::from_parts(
            hostname.to_string(),
            address.to_string(),
        )),
        _ => ParsedLine::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::AddressFamily;

    fn host(line: &str) -> HostEntry {
        parse_line(line).into_entry().expect("host line")
    }

    #[test]
    fn blank_lines() {
        assert_eq!(parse_line(""), ParsedLine::Blank);
        assert_eq!(parse_line("  \t  "), ParsedLine::Blank);
    }

    #[test]
    fn comment_lines() {
        assert_eq!(parse_line("#"), ParsedLine::Comment);
        assert_eq!(parse_line("####"), ParsedLine::Comment);
        assert_eq!(parse_line("# fdafdasf"), ParsedLine::Comment);
        assert_eq!(parse_line("  \t# 10.0.0.1 indented.com"), ParsedLine::Comment);
        assert_eq!(parse_line("# ::56\t\t      v6.com"), ParsedLine::Comment);
    }

    #[test]
    fn whitespace_before_text_is_not_a_comment() {
        let e = host("   10.0.0.1 indented.com");
        assert_eq!(e.hostname(), "indented.com");
    }

    #[test]
    fn control_line() {
        assert_eq!(
            parse_line("# MODIFIED BY HOST MANAGER: 2024-01-02 03:04:05"),
            ParsedLine::Control("2024-01-02 03:04:05".into())
        );
    }

    #[test]
    fn single_token_is_unknown() {
        assert_eq!(parse_line("localhost"), ParsedLine::Unknown);
        assert_eq!(parse_line("  10.0.0.1\t "), ParsedLine::Unknown);
    }

    #[test]
    fn separators_collapse() {
        let e = host("10.0.1.2                                        abc.com");
        assert_eq!((e.address(), e.hostname()), ("10.0.1.2", "abc.com"));
        assert_eq!(e.address_family(), AddressFamily::Ipv4);

        let e = host("255.122.111.56\t  def.com");
        assert_eq!((e.address(), e.hostname()), ("255.122.111.56", "def.com"));
    }

    #[test]
    fn ipv6_is_not_split_on_colons() {
        let e = host("2001:0db8:85a3:0000:0000:8a2e:0370:7334    \tbigv6.net");
        assert_eq!(e.address(), "2001:0db8:85a3:0000:0000:8a2e:0370:7334");
        assert_eq!(e.hostname(), "bigv6.net");
        assert_eq!(e.address_family(), AddressFamily::Ipv6);
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let e = host("127.0.0.1 app.local alias.local # dev box");
        assert_eq!(e.hostname(), "app.local");
    }

    #[test]
    fn unknown_family_still_parses() {
        let e = host("notanip somehost");
        assert_eq!(e.address_family(), AddressFamily::Unknown);
    }

    #[test]
    fn carriage_return_is_trimmed() {
        let e = host("127.0.0.1\tcrlf.local\r");
        assert_eq!(e.hostname(), "crlf.local");
    }
}
