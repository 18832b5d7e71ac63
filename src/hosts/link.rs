//! Routing rule identity.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Identity of one routing rule: the hostname plus the path it routes.
///
/// Two links with empty hostname and path represent "no link".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PathLink {
    hostname: String,
    path: String,
}

impl PathLink {
    /// Create a link for `hostname` and `path`.
    pub fn new(hostname: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            path: path.into(),
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// True when both the hostname and the path are empty.
    pub fn is_empty(&self) -> bool {
        self.hostname.is_empty() && self.path.is_empty()
    }

    /// Ordering used by every sort of links.
    ///
    /// Hostnames always compare ascending. Paths compare ascending, or
    /// descending when `reverse_path` is set, which is the order routing
    /// needs so that longer paths are tested before their prefixes.
    pub fn cmp_with(&self, other: &PathLink, reverse_path: bool) -> Ordering {
        self.hostname.cmp(&other.hostname).then_with(|| {
            if reverse_path {
                other.path.cmp(&self.path)
            } else {
                self.path.cmp(&other.path)
            }
        })
    }

    /// Strict "less than" under [`PathLink::cmp_with`].
    pub fn less(&self, other: &PathLink, reverse_path: bool) -> bool {
        self.cmp_with(other, reverse_path) == Ordering::Less
    }
}

impl fmt::Display for PathLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.hostname, self.path)
    }
}
