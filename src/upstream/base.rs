//! API base URL resolution.

use std::fmt;

use thiserror::Error;

/// The upstream backend is not configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("API base not configured")]
pub struct Unconfigured;

/// Upstream base URL without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    /// Normalize the configured base. Absent or blank means unconfigured.
    pub fn resolve(raw: Option<&str>) -> Option<Self> {
        let trimmed = raw?.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a path, inserting exactly one separating slash.
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_stripped() {
        let base = ApiBase::resolve(Some("https://api.example.com/v1/")).unwrap();
        assert_eq!(base.as_str(), "https://api.example.com/v1");

        let base = ApiBase::resolve(Some("https://api.example.com//")).unwrap();
        assert_eq!(base.as_str(), "https://api.example.com");
    }

    #[test]
    fn test_absent_or_blank_is_unconfigured() {
        assert_eq!(ApiBase::resolve(None), None);
        assert_eq!(ApiBase::resolve(Some("")), None);
        assert_eq!(ApiBase::resolve(Some("   ")), None);
        assert_eq!(ApiBase::resolve(Some("/")), None);
    }

    #[test]
    fn test_join() {
        let base = ApiBase::resolve(Some("http://localhost:4000/")).unwrap();
        assert_eq!(base.join("/projects"), "http://localhost:4000/projects");
        assert_eq!(base.join("projects"), "http://localhost:4000/projects");
    }
}
