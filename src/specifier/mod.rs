//! Package identifier parsing.
//!
//! An identifier names an npm package, optionally pinned to a version and
//! optionally pointing into the package:
//!
//! ```text
//! lodash
//! lodash@4.17.21
//! @scope/pkg@1.0.0/lib/index
//! ```
//!
//! The version divider is the last `@` after the optional `@scope/` prefix
//! and before the first `/` that follows the name. Anything after that `/`
//! is the sub-path, `@` included.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::alias::build_alias;

#[cfg(test)]
mod tests;

/// Version used when the identifier does not pin one.
pub const LATEST: &str = "latest";

/// Guidance appended to every parse failure.
pub const IDENTIFIER_HELP: &str =
    "specify a package name and a version (e.g., 'lodash@4.17.21' or '@konard/use@1.0.0')";

/// A parsed package identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PackageSpec {
    /// Package name, including the `@scope/` prefix when present.
    pub name: String,
    /// Requested version; `"latest"` when omitted.
    pub version: String,
    /// Path inside the package, starting with `/`, or empty.
    pub sub_path: String,
}

impl PackageSpec {
    /// Parse an identifier such as `"@scope/pkg@1.0.0/lib/index"`.
    pub fn parse(identifier: &str) -> Result<PackageSpec, ParseError> {
        parse(identifier)
    }

    /// True when the version is the unpinned `"latest"` marker.
    pub fn is_latest(&self) -> bool {
        self.version == LATEST
    }

    /// Directory name this spec is installed under in the global root.
    pub fn alias(&self) -> String {
        build_alias(&self.name, &self.version)
    }

    /// `name@version`, without the sub-path.
    pub fn package(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}{}", self.name, self.version, self.sub_path)
    }
}

impl FromStr for PackageSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

// ─── Errors ────────────────────────────────────────────────────────

/// Why an identifier was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Nothing to parse.
    Empty,
    /// `@scope` with no `/name` after it, or an empty scope.
    MissingScopedName,
    /// No name before the version divider.
    MissingName,
    /// A version divider with nothing after it.
    MissingVersion,
    /// The name still contains `@` after splitting off the version.
    InvalidName,
}

impl ParseErrorKind {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            ParseErrorKind::Empty => "package identifier is empty",
            ParseErrorKind::MissingScopedName => "scope is not followed by a package name",
            ParseErrorKind::MissingName => "package name is missing",
            ParseErrorKind::MissingVersion => "version is missing after '@'",
            ParseErrorKind::InvalidName => "package name contains '@'",
        }
    }
}

/// A rejected package identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub identifier: String,
    pub kind: ParseErrorKind,
    /// Byte range of the offending part of `identifier`.
    pub span: Range<usize>,
}

impl ParseError {
    fn new(identifier: &str, kind: ParseErrorKind, span: Range<usize>) -> Self {
        Self {
            identifier: identifier.to_string(),
            kind,
            span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == ParseErrorKind::Empty {
            write!(
                f,
                "name for a package to be installed and imported is not provided; {}",
                IDENTIFIER_HELP
            )
        } else {
            write!(
                f,
                "invalid package identifier '{}': {}; {}",
                self.identifier,
                self.kind.describe(),
                IDENTIFIER_HELP
            )
        }
    }
}

impl std::error::Error for ParseError {}

// ─── Parser ────────────────────────────────────────────────────────

/// Parse a package identifier into name, version and sub-path.
pub fn parse(identifier: &str) -> Result<PackageSpec, ParseError> {
    use ParseErrorKind::*;

    if identifier.is_empty() {
        return Err(ParseError::new(identifier, Empty, 0..0));
    }

    // Length of the `@scope/` prefix, zero for unscoped names.
    let scope_len = if identifier.starts_with('@') {
        match identifier.find('/') {
            Some(1) | None => {
                return Err(ParseError::new(
                    identifier,
                    MissingScopedName,
                    0..identifier.len(),
                ))
            }
            Some(slash) => {
                if let Some(at) = identifier[1..slash].find('@') {
                    return Err(ParseError::new(identifier, InvalidName, at + 1..at + 2));
                }
                slash + 1
            }
        }
    } else {
        0
    };

    let body = &identifier[scope_len..];
    let head_len = body.find('/').unwrap_or(body.len());
    let head = &body[..head_len];
    let sub_path = &body[head_len..];

    let (name_seg, version) = match head.rfind('@') {
        Some(at) => {
            let version = &head[at + 1..];
            if version.is_empty() {
                let pos = scope_len + at;
                return Err(ParseError::new(identifier, MissingVersion, pos..pos + 1));
            }
            (&head[..at], version)
        }
        None => (head, LATEST),
    };

    if name_seg.is_empty() {
        let span = if scope_len > 0 {
            0..scope_len
        } else {
            0..head_len.min(1)
        };
        return Err(ParseError::new(identifier, MissingName, span));
    }
    if let Some(at) = name_seg.find('@') {
        let pos = scope_len + at;
        return Err(ParseError::new(identifier, InvalidName, pos..pos + 1));
    }

    Ok(PackageSpec {
        name: identifier[..scope_len + name_seg.len()].to_string(),
        version: version.to_string(),
        sub_path: sub_path.to_string(),
    })
}
