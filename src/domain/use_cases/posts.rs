use chrono::Utc;
use futures::future::try_join_all;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    constants::MAX_ASSET_TREE_DEPTH,
    domain::entities::post::{Post, PostLinks},
    errors::AppError,
    interfaces::repositories::content::ContentRepository,
    settings::AppConfig,
};

/// A path that ends in a file extension is a leaf; everything else in a
/// contents listing is treated as a directory to descend into.
static LEAF_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[a-z0-9]+$").expect("leaf-path regex is valid"));

pub struct PostHandler<R>
where
    R: ContentRepository,
{
    pub content_repo: R,
    links: PostLinks,
    production: bool,
}

impl<R> PostHandler<R>
where
    R: ContentRepository,
{
    pub fn new(content_repo: R, config: &AppConfig) -> Self {
        PostHandler {
            content_repo,
            links: PostLinks {
                site_url: config.site_url.clone(),
                content_owner: config.content_owner.clone(),
                content_repo: config.content_repo.clone(),
                content_branch: config.content_branch.clone(),
            },
            production: config.is_production(),
        }
    }

    /// Lists post slugs: the directory entries under `posts/`. File entries
    /// (README, dotfiles) are skipped by their listed type.
    pub async fn list(&self) -> Result<Vec<String>, AppError> {
        let entries = self.content_repo.list_dir("posts").await?;
        Ok(entries
            .into_iter()
            .filter(|entry| entry.is_dir())
            .map(|entry| entry.name)
            .collect())
    }

    /// Fetches and parses a single post.
    pub async fn get_by_name(&self, name: &str) -> Result<Post, AppError> {
        let document = self
            .content_repo
            .get_raw(&format!("posts/{}/index.md", name))
            .await?;
        Post::from_document(name, &document, &self.links)
    }

    /// Fetches every listed post concurrently, hides future-dated posts in
    /// production, and orders the result newest first.
    pub async fn list_with_details(&self) -> Result<Vec<Post>, AppError> {
        let names = self.list().await?;
        let mut posts =
            try_join_all(names.iter().map(|name| self.get_by_name(name))).await?;

        if self.production {
            let now = Utc::now();
            posts.retain(|post| post.published <= now);
        }

        posts.sort_by(|a, b| b.published.cmp(&a.published));
        Ok(posts)
    }

    /// The most recently published post, or `None` when nothing is
    /// published yet. Emptiness is a normal state, not an error.
    pub async fn get_latest(&self) -> Result<Option<Post>, AppError> {
        let posts = self.list_with_details().await?;
        Ok(posts.into_iter().next())
    }

    /// Walks the post's asset tree and returns every leaf file path,
    /// `/`-prefixed. The walk is a breadth-first worklist rather than
    /// recursion: each round lists all pending directories concurrently, and
    /// a depth cap guards against a malformed tree. Any failed listing
    /// aborts the walk; a partial asset list would silently lose files.
    pub async fn list_assets_by_name(&self, name: &str) -> Result<Vec<String>, AppError> {
        let mut assets = Vec::new();
        let mut entries = self
            .content_repo
            .list_dir(&format!("posts/{}/assets", name))
            .await?;

        let mut depth = 0;
        loop {
            let mut subdirs = Vec::new();
            for entry in entries {
                if LEAF_PATH.is_match(&entry.path) {
                    assets.push(format!("/{}", entry.path));
                } else {
                    subdirs.push(entry.url);
                }
            }

            if subdirs.is_empty() {
                return Ok(assets);
            }

            depth += 1;
            if depth > MAX_ASSET_TREE_DEPTH {
                return Err(AppError::Internal(format!(
                    "Asset tree for post {:?} exceeds maximum depth {}",
                    name, MAX_ASSET_TREE_DEPTH
                )));
            }

            let listings = try_join_all(
                subdirs.iter().map(|url| self.content_repo.list_dir_url(url)),
            )
            .await?;
            entries = listings.into_iter().flatten().collect();
        }
    }

    /// Raw bytes of one asset file, for the proxy route.
    pub async fn get_asset(&self, name: &str, path: &str) -> Result<bytes::Bytes, AppError> {
        self.content_repo
            .get_raw_bytes(&format!("posts/{}/assets/{}", name, path))
            .await
    }
}
