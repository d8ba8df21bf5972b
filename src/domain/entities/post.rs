use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::errors::AppError;

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PostImage {
    pub src: String,
    pub alt: String,
}

/// A fully resolved blog post. Immutable once constructed; every field is
/// populated or the construction failed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub name: String,
    pub markdown: String,
    pub title: String,
    pub description: String,
    pub image: PostImage,
    pub published: DateTime<Utc>,
    pub tags: Vec<String>,
    pub discussion_href: String,
    pub edit_href: String,
}

/// Where derived post links point. Owned by the post handler, built once
/// from [`crate::settings::AppConfig`].
#[derive(Debug, Clone)]
pub struct PostLinks {
    pub site_url: String,
    pub content_owner: String,
    pub content_repo: String,
    pub content_branch: String,
}

impl PostLinks {
    pub fn discussion_href(&self, name: &str) -> String {
        let canonical = format!("{}/posts/{}", self.site_url.trim_end_matches('/'), name);
        format!("https://x.com/search?q={}", urlencoding::encode(&canonical))
    }

    pub fn edit_href(&self, name: &str) -> String {
        format!(
            "https://github.com/{}/{}/edit/{}/posts/{}/index.md",
            self.content_owner, self.content_repo, self.content_branch, name
        )
    }
}

// ───── Frontmatter Schema ───────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct Frontmatter {
    #[validate(custom(function = "validate_nonempty"))]
    pub title: String,

    #[validate(custom(function = "validate_nonempty"))]
    pub description: String,

    #[validate(custom(function = "validate_nonempty"))]
    pub image_src: String,

    #[validate(custom(function = "validate_nonempty"))]
    pub image_alt: String,

    #[serde(deserialize_with = "deserialize_published")]
    pub published: DateTime<Utc>,

    pub tags: Vec<String>,
}

fn validate_nonempty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("empty");
        err.message = Some(Cow::Borrowed("must not be empty"));
        return Err(err);
    }
    Ok(())
}

/// Frontmatter authors write dates in a handful of shapes; accept the common
/// ones and normalize to UTC.
fn deserialize_published<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    parse_published(&raw).ok_or_else(|| {
        D::Error::custom(format!("unrecognized published date: {:?}", raw))
    })
}

fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

// ───── Document Parsing ─────────────────────────────────────────────

/// Splits a raw document into its YAML frontmatter block and markdown body.
/// Posts are required to carry frontmatter; a document without the
/// `---` fence fails validation rather than degrading silently.
pub fn split_frontmatter(document: &str) -> Result<(&str, &str), AppError> {
    let rest = document
        .strip_prefix("---")
        .ok_or_else(|| AppError::field("frontmatter", "document has no frontmatter block"))?;

    let end = rest
        .find("\n---")
        .ok_or_else(|| AppError::field("frontmatter", "frontmatter block is not terminated"))?;

    let yaml = &rest[..end];
    let body = rest[end + 4..].trim_start_matches(['\n', '\r']);
    Ok((yaml, body))
}

impl Post {
    /// Builds a post from the raw `index.md` document. Fails with a
    /// validation error naming the offending field when the frontmatter does
    /// not match the schema.
    pub fn from_document(name: &str, document: &str, links: &PostLinks) -> Result<Post, AppError> {
        let (yaml, markdown) = split_frontmatter(document)?;
        let frontmatter: Frontmatter = serde_yaml::from_str(yaml)?;
        frontmatter.validate()?;

        Ok(Post {
            name: name.to_string(),
            markdown: markdown.to_string(),
            title: frontmatter.title,
            description: frontmatter.description,
            image: PostImage {
                src: frontmatter.image_src,
                alt: frontmatter.image_alt,
            },
            published: frontmatter.published,
            tags: frontmatter.tags,
            discussion_href: links.discussion_href(name),
            edit_href: links.edit_href(name),
        })
    }
}
