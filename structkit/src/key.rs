//! Namespaced identifiers for block types, tags and processor types.

use std::str::FromStr;
use std::fmt;

use arcstr::ArcStr;


/// Namespace under which this crate registers its builtin processor types.
pub const NAMESPACE: &str = "structkit";

/// Namespace assumed for identifiers written without an explicit namespace.
pub const DEFAULT_NAMESPACE: &str = "core";


/// A namespaced `namespace:path` identifier.
///
/// Both parts are shared strings, so cloning a key is cheap and keys can be
/// used freely as map keys. Identifiers are restricted to lowercase ASCII,
/// digits, `_`, `-` and `.` (plus `/` in the path), which keeps them stable
/// across serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    namespace: ArcStr,
    path: ArcStr,
}

impl Key {

    /// Create a key from raw parts, without validation.
    pub fn new(namespace: &str, path: &str) -> Self {
        Self {
            namespace: ArcStr::from(namespace),
            path: ArcStr::from(path),
        }
    }

    /// Create a key in the crate's builtin namespace.
    pub fn builtin(path: &str) -> Self {
        Self::new(NAMESPACE, path)
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Key {

    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {

        let (namespace, path) = match s.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (DEFAULT_NAMESPACE, s),
        };

        if namespace.is_empty() || path.is_empty() {
            return Err(KeyError::Empty { key: s.to_string() });
        }

        let legal_namespace = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.');
        let legal_path = |c: char| legal_namespace(c) || c == '/';

        if let Some(ch) = namespace.chars().find(|&c| !legal_namespace(c)) {
            return Err(KeyError::IllegalChar { key: s.to_string(), ch });
        }
        if let Some(ch) = path.chars().find(|&c| !legal_path(c)) {
            return Err(KeyError::IllegalChar { key: s.to_string(), ch });
        }

        Ok(Self::new(namespace, path))

    }

}


/// Error type for malformed identifiers.
#[derive(thiserror::Error, Debug)]
pub enum KeyError {
    #[error("empty namespace or path in identifier {key:?}")]
    Empty { key: String },
    #[error("illegal character {ch:?} in identifier {key:?}")]
    IllegalChar { key: String, ch: char },
}
