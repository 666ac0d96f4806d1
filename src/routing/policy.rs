//! Access policy for relayed sub-paths.

use crate::routing::matcher::{AnyMatcher, Matcher, PathPrefixMatcher};

/// Why a sub-path was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRejection {
    /// Contains `.` or `..` segments.
    InvalidPath,
    /// Not covered by the configured allow-list.
    NotAllowed,
}

#[derive(Debug)]
pub struct ProxyPathPolicy {
    allowed: AnyMatcher,
}

impl ProxyPathPolicy {
    /// Build from configured prefixes. An empty list allows every sub-path.
    pub fn from_prefixes(prefixes: &[String]) -> Self {
        let matchers = prefixes
            .iter()
            .map(|p| Box::new(PathPrefixMatcher::new(p.as_str())) as Box<dyn Matcher>)
            .collect();
        Self {
            allowed: AnyMatcher::new(matchers),
        }
    }

    pub fn check(&self, sub_path: &str) -> Result<(), PathRejection> {
        if sub_path.split('/').any(is_dot_segment) {
            return Err(PathRejection::InvalidPath);
        }
        if self.allowed.is_empty() || self.allowed.matches(sub_path) {
            Ok(())
        } else {
            Err(PathRejection::NotAllowed)
        }
    }
}

/// `.` or `..`, including percent-encoded forms such as `%2e%2E` that URL
/// parsing later collapses the same way.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}
