//! Sub-path matching.
//!
//! # Design Decisions
//! - Matching is per path segment: `projects` matches `projects/7`
//!   but not `projectsx`
//! - Leading and trailing slashes are ignored
//! - Case-sensitive, like HTTP paths

/// Trait for matching proxy sub-paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the sub-path matches this condition.
    fn matches(&self, sub_path: &str) -> bool;
}

/// Matches a path prefix on segment boundaries.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().trim_matches('/').to_string(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, sub_path: &str) -> bool {
        let path = sub_path.trim_matches('/');
        if self.prefix.is_empty() {
            return true;
        }
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, sub_path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(sub_path))
    }
}
