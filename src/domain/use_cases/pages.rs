use crate::{
    domain::entities::page::Page,
    errors::AppError,
    interfaces::repositories::content::ContentRepository,
};

pub struct PageHandler<R>
where
    R: ContentRepository,
{
    pub content_repo: R,
}

impl<R> PageHandler<R>
where
    R: ContentRepository,
{
    pub fn new(content_repo: R) -> Self {
        PageHandler { content_repo }
    }

    /// Fetches a page by slug. Pages are plain markdown, no frontmatter.
    pub async fn get_by_name(&self, name: &str) -> Result<Page, AppError> {
        let markdown = self
            .content_repo
            .get_raw(&format!("pages/{}/index.md", name))
            .await?;
        Ok(Page {
            name: name.to_string(),
            markdown,
        })
    }
}
