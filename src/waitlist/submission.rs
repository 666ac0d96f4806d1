//! Waitlist payload and its validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_NAME_CHARS: usize = 2;
pub const MAX_ABOUT_CHARS: usize = 1000;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// A signup request from the landing page form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistSubmission {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

/// Every problem found in a submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .problems.join("; "))]
pub struct InvalidSubmission {
    pub problems: Vec<String>,
}

impl WaitlistSubmission {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: None,
            about: None,
        }
    }

    /// Deserialize a JSON body and validate it.
    pub fn parse(body: &[u8]) -> Result<Self, InvalidSubmission> {
        let submission: Self = serde_json::from_slice(body).map_err(|e| InvalidSubmission {
            problems: vec![format!("invalid payload: {}", e)],
        })?;
        submission.validate()?;
        Ok(submission)
    }

    pub fn validate(&self) -> Result<(), InvalidSubmission> {
        let mut problems = Vec::new();

        if self.name.chars().count() < MIN_NAME_CHARS {
            problems.push(format!("name must be at least {} characters", MIN_NAME_CHARS));
        }
        if !is_valid_email(&self.email) {
            problems.push("email is not a valid address".to_string());
        }
        if let Some(about) = &self.about {
            if about.chars().count() > MAX_ABOUT_CHARS {
                problems.push(format!("about must be at most {} characters", MAX_ABOUT_CHARS));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(InvalidSubmission { problems })
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    let local = email.split('@').next().unwrap_or_default();
    !local.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}
