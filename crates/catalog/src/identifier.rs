//! Parsing of user-supplied `name[@version]` extension identifiers.
//!
//! The input format matches one identifier per line, as produced by
//! `code --list-extensions --show-versions`, though nothing here depends on
//! that command — only on the line format.

use derive_more::Display;
use std::convert::Infallible;
use std::str::FromStr;

/// Which of an extension's available versions the user asked for.
#[derive(Debug, Display, Clone, PartialEq, Eq, Default)]
pub enum VersionSelector {
    /// No explicit version; resolves to the first version the gallery lists.
    #[default]
    #[display("latest")]
    Latest,
    /// An explicit version string, matched exactly against the gallery's
    /// version list. An unmatched selector falls back to the first listed
    /// version rather than failing.
    #[display("{_0}")]
    Exact(String),
}

/// One extension the user asked to resolve.
///
/// Parsed from a line of the form `name@version`; a bare `name` implies
/// [`VersionSelector::Latest`]. The split happens at the *first* `@`, so a
/// selector may itself contain `@` characters.
///
/// # Examples
///
/// ```
/// use extdown_catalog::{Identifier, VersionSelector};
///
/// let ident: Identifier = "rust-lang.rust-analyzer@0.3.1850".parse().unwrap();
/// assert_eq!(ident.name, "rust-lang.rust-analyzer");
/// assert_eq!(ident.version, VersionSelector::Exact("0.3.1850".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub version: VersionSelector,
}
impl FromStr for Identifier {
    type Err = Infallible;

    /// Parsing never fails: malformed lines (such as an empty name before
    /// `@`) are passed through as-is, and the gallery query will simply find
    /// no match for them.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, version) = match s.split_once('@') {
            Some((name, version)) => {
                let version = version.trim();
                // "name@" and "name@latest" both mean the default selector.
                let selector = if version.is_empty() || version == "latest" {
                    VersionSelector::Latest
                } else {
                    VersionSelector::Exact(version.to_string())
                };
                (name.trim(), selector)
            },
            None => (s.trim(), VersionSelector::Latest),
        };
        Ok(Self { name: name.to_string(), version })
    }
}
impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            VersionSelector::Latest => write!(f, "{}", self.name),
            VersionSelector::Exact(v) => write!(f, "{}@{v}", self.name),
        }
    }
}

/// Splits a raw multi-line input block into identifiers.
///
/// Lines that are empty after trimming produce no identifier and no output
/// slot. Trailing carriage returns from CRLF input are stripped along with
/// other surrounding whitespace.
pub fn parse_list(input: &str) -> Vec<Identifier> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        // Infallible by construction.
        .filter_map(|line| line.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("rust-lang.rust-analyzer", "rust-lang.rust-analyzer", VersionSelector::Latest)]
    #[case("ms-python.python@2024.2.1", "ms-python.python", VersionSelector::Exact("2024.2.1".into()))]
    #[case("name@latest", "name", VersionSelector::Latest)]
    #[case("name@", "name", VersionSelector::Latest)]
    #[case("a@b@c", "a", VersionSelector::Exact("b@c".into()))]
    #[case("@1.0.0", "", VersionSelector::Exact("1.0.0".into()))]
    fn test_parses_single_identifier(
        #[case] line: &str,
        #[case] name: &str,
        #[case] version: VersionSelector,
    ) {
        let ident: Identifier = line.parse().unwrap();
        assert_eq!(ident.name, name);
        assert_eq!(ident.version, version);
    }

    #[test]
    fn test_blank_lines_produce_no_entry() {
        let input = "one.ext\n\n   \ntwo.ext@1.0.0\n";
        let parsed = parse_list(input);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "one.ext");
        assert_eq!(parsed[1].name, "two.ext");
    }

    #[test]
    fn test_empty_input_produces_no_entries() {
        assert!(parse_list("").is_empty());
        assert!(parse_list("\n\n").is_empty());
    }

    #[test]
    fn test_crlf_input_is_trimmed() {
        let parsed = parse_list("one.ext@1.2.3\r\ntwo.ext\r\n");
        assert_eq!(parsed[0].version, VersionSelector::Exact("1.2.3".into()));
        assert_eq!(parsed[1].name, "two.ext");
    }

    #[test]
    fn test_display_roundtrip() {
        let ident: Identifier = "pub.ext@0.1.0".parse().unwrap();
        assert_eq!(ident.to_string(), "pub.ext@0.1.0");
        let ident: Identifier = "pub.ext".parse().unwrap();
        assert_eq!(ident.to_string(), "pub.ext");
    }
}
