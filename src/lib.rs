mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{github, utils};

use errors::AppError;
use github::client::GithubClient;
use repositories::{content::GithubContentRepo, profile::GithubProfileRepo};
use use_cases::{pages::PageHandler, posts::PostHandler, projects::ProjectHandler};

pub type AppPostHandler = PostHandler<GithubContentRepo>;
pub type AppPageHandler = PageHandler<GithubContentRepo>;
pub type AppProjectHandler = ProjectHandler<GithubProfileRepo, GithubContentRepo>;

pub struct AppState {
    pub post_handler: AppPostHandler,
    pub page_handler: AppPageHandler,
    pub project_handler: AppProjectHandler,
}

impl AppState {
    pub fn new(config: &settings::AppConfig) -> Result<Self, AppError> {
        let client = GithubClient::new(config)?;
        let content_repo = GithubContentRepo::new(client.clone(), config);
        let profile_repo = GithubProfileRepo::new(client, config);

        Ok(AppState {
            post_handler: PostHandler::new(content_repo.clone(), config),
            page_handler: PageHandler::new(content_repo.clone()),
            project_handler: ProjectHandler::new(profile_repo, content_repo),
        })
    }
}
