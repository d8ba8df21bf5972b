use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    domain::entities::project::{FeaturedProject, Project, ProjectStats, StoryRef},
    errors::AppError,
    interfaces::repositories::{content::ContentRepository, profile::ProfileRepository},
};

static STORY_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^projects/(.+)\.md$").expect("story-path regex is valid"));

pub struct ProjectHandler<P, C>
where
    P: ProfileRepository,
    C: ContentRepository,
{
    pub profile_repo: P,
    pub content_repo: C,
}

impl<P, C> ProjectHandler<P, C>
where
    P: ProfileRepository,
    C: ContentRepository,
{
    pub fn new(profile_repo: P, content_repo: C) -> Self {
        ProjectHandler {
            profile_repo,
            content_repo,
        }
    }

    /// The pinned repositories from the profile page.
    pub async fn list(&self) -> Result<Vec<Project>, AppError> {
        self.profile_repo.pinned_projects().await
    }

    /// The first pinned project that has a story document in the content
    /// repository, with the story text attached. `None` when no pinned
    /// project has a story; that is an ordinary state, not an error.
    pub async fn get_featured(&self) -> Result<Option<FeaturedProject>, AppError> {
        let projects = self.list().await?;
        let stories = self.list_stories().await?;

        let Some(project) = projects.into_iter().find(|p| {
            stories
                .iter()
                .any(|s| s.owner == p.owner && s.name == p.name)
        }) else {
            return Ok(None);
        };

        let story = self
            .content_repo
            .get_raw(&format!("projects/{}/{}.md", project.owner, project.name))
            .await?;

        Ok(Some(FeaturedProject { project, story }))
    }

    /// Live star/fork counts for one repository.
    pub async fn get_stats_by_owner_and_name(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<ProjectStats, AppError> {
        self.profile_repo.repo_stats(owner, name).await
    }

    /// Story documents are any `projects/<owner>/<name>.md` path in the
    /// content repository tree. Paths shaped differently are ignored.
    async fn list_stories(&self) -> Result<Vec<StoryRef>, AppError> {
        let paths = self.content_repo.list_tree().await?;
        Ok(paths
            .iter()
            .filter_map(|path| {
                let caps = STORY_PATH.captures(path)?;
                let (owner, name) = caps[1].split_once('/')?;
                Some(StoryRef {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::project::Language;
    use crate::interfaces::repositories::{
        content::MockContentRepository, profile::MockProfileRepository,
    };

    fn project(owner: &str, name: &str) -> Project {
        Project {
            url: format!("https://github.com/{}/{}", owner, name),
            owner: owner.to_string(),
            name: name.to_string(),
            description: "".to_string(),
            language: Language {
                name: "Rust".to_string(),
                color: "black".to_string(),
            },
            stars: 1,
            forks: 0,
        }
    }

    #[tokio::test]
    async fn featured_is_none_without_a_matching_story() {
        let mut profile = MockProfileRepository::new();
        profile
            .expect_pinned_projects()
            .returning(|| Ok(vec![project("me", "tool")]));

        let mut content = MockContentRepository::new();
        content
            .expect_list_tree()
            .returning(|| Ok(vec!["projects/other/repo.md".to_string(), "posts/x/index.md".to_string()]));

        let handler = ProjectHandler::new(profile, content);
        assert!(handler.get_featured().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn featured_picks_the_first_pinned_project_with_a_story() {
        let mut profile = MockProfileRepository::new();
        profile.expect_pinned_projects().returning(|| {
            Ok(vec![project("me", "unstoried"), project("me", "storied")])
        });

        let mut content = MockContentRepository::new();
        content
            .expect_list_tree()
            .returning(|| Ok(vec!["projects/me/storied.md".to_string()]));
        content
            .expect_get_raw()
            .withf(|path| path == "projects/me/storied.md")
            .returning(|_| Ok("the story".to_string()));

        let handler = ProjectHandler::new(profile, content);
        let featured = handler.get_featured().await.unwrap().unwrap();
        assert_eq!(featured.project.name, "storied");
        assert_eq!(featured.story, "the story");
    }

    #[tokio::test]
    async fn a_failed_story_fetch_is_an_error() {
        let mut profile = MockProfileRepository::new();
        profile
            .expect_pinned_projects()
            .returning(|| Ok(vec![project("me", "storied")]));

        let mut content = MockContentRepository::new();
        content
            .expect_list_tree()
            .returning(|| Ok(vec!["projects/me/storied.md".to_string()]));
        content.expect_get_raw().returning(|_| {
            Err(AppError::Upstream {
                url: "https://raw.test/projects/me/storied.md".to_string(),
                status: 500,
            })
        });

        let handler = ProjectHandler::new(profile, content);
        assert!(handler.get_featured().await.is_err());
    }

    #[tokio::test]
    async fn malformed_tree_paths_are_ignored() {
        let mut profile = MockProfileRepository::new();
        profile
            .expect_pinned_projects()
            .returning(|| Ok(vec![project("me", "tool")]));

        let mut content = MockContentRepository::new();
        // "projects/flat.md" has no owner/name split and must not match.
        content
            .expect_list_tree()
            .returning(|| Ok(vec!["projects/flat.md".to_string()]));

        let handler = ProjectHandler::new(profile, content);
        assert!(handler.get_featured().await.unwrap().is_none());
    }
}
