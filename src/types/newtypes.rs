//! NewType wrappers for primitive types.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Project identifier.
///
/// Doubles as the first segment of every storage key, so it is restricted
/// to ASCII letters, digits, `-`, `_` and `.` and may not be `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a new ProjectId, rejecting values that are unsafe as a key prefix.
    pub fn new(s: impl Into<String>) -> Result<Self, ReportError> {
        let s = s.into();
        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');

        if s.is_empty() || s == "." || s == ".." || !s.chars().all(allowed) {
            return Err(ReportError::InvalidProjectId(s));
        }
        Ok(Self(s))
    }

    /// Get the underlying string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume self and return the inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ProjectId {
    type Error = ReportError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl FromStr for ProjectId {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Project access token.
///
/// Implements a secure Debug that doesn't leak the token value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectToken(String);

impl ProjectToken {
    /// Create a new ProjectToken from any string-like type.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the underlying token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ProjectToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "ProjectToken(empty)")
        } else {
            write!(f, "ProjectToken(***)")
        }
    }
}

impl From<&str> for ProjectToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProjectToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}
