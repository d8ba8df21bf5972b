use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

use crate::{
    errors::AppError,
    infrastructure::github::client::GithubClient,
    settings::AppConfig,
};

/// One entry of a contents-API directory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ContentEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == "dir"
    }
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<TreeEntry>,
}

/// Read access to the GitHub-backed content repository. Every call is a
/// fresh network request; there is deliberately no caching at this layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Lists the entries directly under `path` in the content repository.
    async fn list_dir(&self, path: &str) -> Result<Vec<ContentEntry>, AppError>;

    /// Lists a directory by the absolute listing URL a previous call
    /// returned. Used by the asset-tree walk.
    async fn list_dir_url(&self, url: &str) -> Result<Vec<ContentEntry>, AppError>;

    /// Fetches the raw text of a file at `path`.
    async fn get_raw(&self, path: &str) -> Result<String, AppError>;

    /// Fetches the raw bytes of a file at `path`.
    async fn get_raw_bytes(&self, path: &str) -> Result<Bytes, AppError>;

    /// Flat list of every path in the repository tree, recursively.
    async fn list_tree(&self) -> Result<Vec<String>, AppError>;
}

#[derive(Clone)]
pub struct GithubContentRepo {
    client: GithubClient,
    api_base: String,
    raw_base: String,
    owner: String,
    repo: String,
    branch: String,
}

impl GithubContentRepo {
    pub fn new(client: GithubClient, config: &AppConfig) -> Self {
        GithubContentRepo {
            client,
            api_base: config.github_api_base().to_string(),
            raw_base: config.github_raw_base().to_string(),
            owner: config.content_owner.clone(),
            repo: config.content_repo.clone(),
            branch: config.content_branch.clone(),
        }
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    fn raw_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base, self.owner, self.repo, self.branch, path
        )
    }
}

#[async_trait]
impl ContentRepository for GithubContentRepo {
    async fn list_dir(&self, path: &str) -> Result<Vec<ContentEntry>, AppError> {
        self.list_dir_url(&self.contents_url(path)).await
    }

    async fn list_dir_url(&self, url: &str) -> Result<Vec<ContentEntry>, AppError> {
        tracing::debug!(url, "listing content directory");
        let res = self.client.get(url).await?;
        let entries = res.json::<Vec<ContentEntry>>().await?;
        Ok(entries)
    }

    async fn get_raw(&self, path: &str) -> Result<String, AppError> {
        let url = self.raw_url(path);
        tracing::debug!(url, "fetching raw content");
        let res = self.client.get(&url).await?;
        Ok(res.text().await?)
    }

    async fn get_raw_bytes(&self, path: &str) -> Result<Bytes, AppError> {
        let url = self.raw_url(path);
        tracing::debug!(url, "fetching raw bytes");
        let res = self.client.get(&url).await?;
        Ok(res.bytes().await?)
    }

    async fn list_tree(&self) -> Result<Vec<String>, AppError> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=true",
            self.api_base, self.owner, self.repo, self.branch
        );
        tracing::debug!(url, "listing repository tree");
        let res = self.client.get(&url).await?;
        let tree = res.json::<TreeResponse>().await?;
        Ok(tree.tree.into_iter().map(|entry| entry.path).collect())
    }
}
