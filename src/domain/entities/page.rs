use serde::Serialize;

/// A standalone content page: raw markdown with no metadata beyond its slug.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub name: String,
    pub markdown: String,
}
