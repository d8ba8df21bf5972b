use reqwest::{Client, RequestBuilder, Response};

use crate::{errors::AppError, settings::AppConfig};

const USER_AGENT: &str = concat!("site_backend/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over a shared [`reqwest::Client`] that attaches the
/// configured GitHub bearer token to outbound requests. Cheap to clone.
#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(GithubClient {
            http,
            token: config.github_token.clone(),
        })
    }

    /// Attaches `Authorization: Bearer <token>` when a token is configured.
    /// Without a token the request passes through unchanged; unauthenticated
    /// requests are valid, they just get lower rate limits upstream.
    pub fn configure(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Authenticated GET that treats any non-2xx status as an upstream error.
    pub async fn get(&self, url: &str) -> Result<Response, AppError> {
        let res = self.configure(self.http.get(url)).send().await?;
        Self::ensure_success(res)
    }

    /// GET without the auth header. Used for the public repo-stats lookup,
    /// which is meant to be callable from a browser context where the token
    /// must never appear.
    pub async fn get_unauthenticated(&self, url: &str) -> Result<Response, AppError> {
        let res = self.http.get(url).send().await?;
        Self::ensure_success(res)
    }

    fn ensure_success(res: Response) -> Result<Response, AppError> {
        let status = res.status();
        if status.is_success() {
            Ok(res)
        } else {
            Err(AppError::Upstream {
                url: res.url().to_string(),
                status: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppEnvironment;

    fn config_with_token(token: Option<&str>) -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            worker_count: 1,
            cors_allowed_origins: vec!["*".to_string()],
            github_token: token.map(String::from),
            site_url: "https://example.com".to_string(),
            content_owner: "owner".to_string(),
            content_repo: "writing".to_string(),
            content_branch: "master".to_string(),
            profile_username: "owner".to_string(),
            github_api_url: "https://api.github.com".to_string(),
            github_raw_url: "https://raw.githubusercontent.com".to_string(),
            github_html_url: "https://github.com".to_string(),
        }
    }

    #[test]
    fn configure_attaches_bearer_token() {
        let client = GithubClient::new(&config_with_token(Some("token123"))).unwrap();
        let req = client
            .configure(client.http.get("https://api.github.com/repos/a/b"))
            .build()
            .unwrap();
        let auth = req.headers().get("authorization").unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer token123");
    }

    #[test]
    fn configure_passes_through_without_token() {
        let client = GithubClient::new(&config_with_token(None)).unwrap();
        let req = client
            .configure(client.http.get("https://api.github.com/repos/a/b"))
            .build()
            .unwrap();
        assert!(req.headers().get("authorization").is_none());
    }
}
