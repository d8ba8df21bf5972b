use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// GitHub access token. Optional: without it requests still go through,
    /// subject to the API's unauthenticated rate limits.
    #[serde(default)]
    pub github_token: Option<String>,

    /// Canonical URL of the rendered site, used for derived post links.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default = "default_content_owner")]
    pub content_owner: String,

    #[serde(default = "default_content_repo")]
    pub content_repo: String,

    #[serde(default = "default_content_branch")]
    pub content_branch: String,

    /// Profile whose pinned repositories feed the projects view.
    #[serde(default = "default_profile_username")]
    pub profile_username: String,

    // GitHub endpoints, overridable so tests can point at a local stub.
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    #[serde(default = "default_github_raw_url")]
    pub github_raw_url: String,

    #[serde(default = "default_github_html_url")]
    pub github_html_url: String,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Site-Content-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_site_url() -> String {
    "https://nsaunders.dev".to_string()
}
fn default_content_owner() -> String {
    "nsaunders".to_string()
}
fn default_content_repo() -> String {
    "writing".to_string()
}
fn default_content_branch() -> String {
    "master".to_string()
}
fn default_profile_username() -> String {
    "nsaunders".to_string()
}
fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_github_raw_url() -> String {
    "https://raw.githubusercontent.com".to_string()
}
fn default_github_html_url() -> String {
    "https://github.com".to_string()
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            // Keys stay flat: APP_CONTENT_OWNER maps to content_owner, not content.owner.
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins"),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.content_owner.trim().is_empty() {
            errors.push("content_owner cannot be empty".to_string());
        }
        if self.content_repo.trim().is_empty() {
            errors.push("content_repo cannot be empty".to_string());
        }
        if self.profile_username.trim().is_empty() {
            errors.push("profile_username cannot be empty".to_string());
        }
        for (label, value) in [
            ("site_url", &self.site_url),
            ("github_api_url", &self.github_api_url),
            ("github_raw_url", &self.github_raw_url),
            ("github_html_url", &self.github_html_url),
        ] {
            if url::Url::parse(value).is_err() {
                errors.push(format!("{} is not a valid URL: {}", label, value));
            }
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn github_api_base(&self) -> &str {
        self.github_api_url.trim_end_matches('/')
    }

    pub fn github_raw_base(&self) -> &str {
        self.github_raw_url.trim_end_matches('/')
    }

    pub fn github_html_base(&self) -> &str {
        self.github_html_url.trim_end_matches('/')
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field(
                "github_token",
                &self.github_token.as_deref().unwrap_or("").redact(),
            )
            .field("site_url", &self.site_url)
            .field("content_owner", &self.content_owner)
            .field("content_repo", &self.content_repo)
            .field("content_branch", &self.content_branch)
            .field("profile_username", &self.profile_username)
            .field("github_api_url", &self.github_api_url)
            .field("github_raw_url", &self.github_raw_url)
            .field("github_html_url", &self.github_html_url)
            .finish()
    }
}
