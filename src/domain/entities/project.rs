use std::borrow::Cow;

use serde::Serialize;
use validator::{Validate, ValidationError};

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Language {
    pub name: String,
    pub color: String,
}

/// A pinned repository scraped from the profile page. Uniqueness is keyed by
/// `(owner, name)`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct Project {
    #[validate(url)]
    pub url: String,

    #[validate(custom(function = "validate_nonempty"))]
    pub owner: String,

    #[validate(custom(function = "validate_nonempty"))]
    pub name: String,

    pub description: String,
    pub language: Language,
    pub stars: u32,
    pub forks: u32,
}

/// A project with an attached narrative, selected when the content
/// repository holds a story document at `projects/<owner>/<name>.md`.
#[derive(Debug, Clone, Serialize)]
pub struct FeaturedProject {
    #[serde(flatten)]
    pub project: Project,
    pub story: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectStats {
    pub stars: u32,
    pub forks: u32,
}

/// `(owner, name)` of a story document found in the content repository tree.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryRef {
    pub owner: String,
    pub name: String,
}

fn validate_nonempty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("empty");
        err.message = Some(Cow::Borrowed("must not be empty"));
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_a_project_without_a_name() {
        let project = Project {
            url: "https://github.com/owner/thing".to_string(),
            owner: "owner".to_string(),
            name: "".to_string(),
            description: "".to_string(),
            language: Language { name: "Rust".to_string(), color: "black".to_string() },
            stars: 0,
            forks: 0,
        };
        assert!(project.validate().is_err());
    }

    #[test]
    fn empty_description_is_allowed() {
        let project = Project {
            url: "https://github.com/owner/thing".to_string(),
            owner: "owner".to_string(),
            name: "thing".to_string(),
            description: "".to_string(),
            language: Language { name: "Rust".to_string(), color: "black".to_string() },
            stars: 3,
            forks: 1,
        };
        assert!(project.validate().is_ok());
    }
}
