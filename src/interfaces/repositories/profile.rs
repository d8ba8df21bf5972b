use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use validator::Validate;

use crate::{
    domain::entities::project::{Language, Project, ProjectStats},
    errors::AppError,
    infrastructure::github::client::GithubClient,
    settings::AppConfig,
};

static BACKGROUND_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"background-color:\s*([^;]+)").expect("background-color regex is valid")
});

/// Access to the public side of GitHub: the profile page's pinned
/// repositories and per-repository stats.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn pinned_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn repo_stats(&self, owner: &str, name: &str) -> Result<ProjectStats, AppError>;
}

#[derive(Debug, Deserialize)]
struct RepoStatsDto {
    stargazers_count: u32,
    forks_count: u32,
}

#[derive(Clone)]
pub struct GithubProfileRepo {
    client: GithubClient,
    api_base: String,
    html_base: String,
    username: String,
}

impl GithubProfileRepo {
    pub fn new(client: GithubClient, config: &AppConfig) -> Self {
        GithubProfileRepo {
            client,
            api_base: config.github_api_base().to_string(),
            html_base: config.github_html_base().to_string(),
            username: config.profile_username.clone(),
        }
    }
}

#[async_trait]
impl ProfileRepository for GithubProfileRepo {
    async fn pinned_projects(&self) -> Result<Vec<Project>, AppError> {
        let url = format!("{}/{}", self.html_base, self.username);
        tracing::debug!(url, "fetching profile page");
        let res = self.client.get(&url).await?;
        let html = res.text().await?;
        parse_pinned_projects(&html, &self.username)
    }

    /// Deliberately unauthenticated: this lookup is meant to be safe to run
    /// from a browser context, where the token must never travel.
    async fn repo_stats(&self, owner: &str, name: &str) -> Result<ProjectStats, AppError> {
        let url = format!("{}/repos/{}/{}", self.api_base, owner, name);
        let res = self.client.get_unauthenticated(&url).await?;
        let stats = res.json::<RepoStatsDto>().await?;
        Ok(ProjectStats {
            stars: stats.stargazers_count,
            forks: stats.forks_count,
        })
    }
}

// ───── Profile HTML Parsing ─────────────────────────────────────────
//
// The whole dependency on GitHub's profile markup lives below this line.
// The selectors mirror the class names GitHub currently renders pinned
// items with; when the markup changes, this is the only place to touch.

fn selector(css: &'static str) -> Result<Selector, AppError> {
    Selector::parse(css)
        .map_err(|e| AppError::Internal(format!("Invalid selector {:?}: {}", css, e)))
}

/// Extracts pinned repositories from profile page HTML. Fails fast on the
/// first record that does not validate; a partially scraped project list is
/// worse than an error.
pub fn parse_pinned_projects(html: &str, username: &str) -> Result<Vec<Project>, AppError> {
    let document = Html::parse_document(html);

    let item_sel = selector(".pinned-item-list-item-content")?;
    let owner_sel = selector("a .owner")?;
    let repo_sel = selector("a .repo")?;
    let desc_sel = selector(".pinned-item-desc")?;
    let color_sel = selector(".repo-language-color")?;
    let language_sel = selector(r#"[itemprop="programmingLanguage"]"#)?;
    let stars_sel = selector(r#"a[href$="stargazers"]"#)?;
    let forks_sel = selector(r#"a[href$="forks"]"#)?;

    let mut projects = Vec::new();
    for item in document.select(&item_sel) {
        let owner = match first_text(&item, &owner_sel) {
            Some(owner) => owner.trim_end_matches('/').to_string(),
            None => username.to_string(),
        };
        let name = first_text(&item, &repo_sel).unwrap_or_default();
        let description = first_text(&item, &desc_sel).unwrap_or_default();

        let language_name = first_text(&item, &language_sel).unwrap_or_default();
        let language_color = item
            .select(&color_sel)
            .next()
            .and_then(|el| el.value().attr("style"))
            .and_then(|style| {
                BACKGROUND_COLOR
                    .captures(style)
                    .map(|caps| caps[1].trim().to_string())
            })
            .unwrap_or_else(|| "black".to_string());

        let stars = first_count(&item, &stars_sel);
        let forks = first_count(&item, &forks_sel);

        let project = Project {
            url: format!("https://github.com/{}/{}", owner, name),
            owner,
            name,
            description,
            language: Language {
                name: language_name,
                color: language_color,
            },
            stars,
            forks,
        };
        project.validate()?;
        projects.push(project);
    }

    Ok(projects)
}

fn first_text(item: &ElementRef, sel: &Selector) -> Option<String> {
    let text = item
        .select(sel)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    if text.is_empty() { None } else { Some(text) }
}

/// Counts render as visible anchor text ("42", "1,204"). Anything that does
/// not parse, including a missing element, counts as zero.
fn first_count(item: &ElementRef, sel: &Selector) -> u32 {
    first_text(item, sel)
        .map(|text| text.replace(',', ""))
        .and_then(|text| text.parse().ok())
        .unwrap_or(0)
}
