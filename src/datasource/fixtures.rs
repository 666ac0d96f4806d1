//! In-memory stand-in data for mock mode.

use std::sync::LazyLock;

use crate::datasource::types::{Profile, Project};

static MOCK_PROJECTS: LazyLock<Vec<Project>> = LazyLock::new(|| {
    vec![
        project(
            "1",
            "OpenBoard Core",
            "Monorepo for the OpenBoard platform — APIs, UI kit, and matching engine.",
            &["TypeScript", "Next.js", "Tailwind"],
            128,
            "openboard-devs",
        ),
        project(
            "2",
            "LensKit",
            "Computer vision utilities for document scanning and enhancement on-device.",
            &["Swift", "Vision", "iOS"],
            412,
            "vision-labs",
        ),
        project(
            "3",
            "StreamQL",
            "Streaming SQL for edge analytics with a simple JSX-style DSL.",
            &["Rust", "WASM", "Edge"],
            986,
            "compute-collective",
        ),
        project(
            "4",
            "DocuWeave",
            "AI-powered docs builder that converts READMEs into interactive tutorials.",
            &["Python", "LangChain", "Docs"],
            233,
            "docu-team",
        ),
    ]
});

fn project(id: &str, name: &str, description: &str, tags: &[&str], stars: u64, maintainer: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        stars,
        maintainer: maintainer.to_string(),
    }
}

/// The fixture set, in fixture order.
pub fn mock_projects() -> Vec<Project> {
    MOCK_PROJECTS.clone()
}

pub fn mock_profile() -> Profile {
    Profile {
        email: "mock@openboard.dev".to_string(),
        roles: vec!["user".to_string()],
        name: "Mock User".to_string(),
    }
}
