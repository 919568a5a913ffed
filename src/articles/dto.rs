use serde::Deserialize;
use time::OffsetDateTime;

use super::repo::NewArticle;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub category_name: String,
}

impl CreateArticleRequest {
    pub fn into_new_article(self) -> Result<NewArticle, ApiError> {
        if self.title.is_empty()
            || self.content.is_empty()
            || self.username.is_empty()
            || self.category_name.is_empty()
        {
            return Err(ApiError::validation(
                "title, content, username and category_name are required",
            ));
        }
        Ok(NewArticle {
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            published_at: self.published_at.unwrap_or_else(OffsetDateTime::now_utc),
            username: self.username,
            category_name: self.category_name,
        })
    }
}

/// Only title and content are writable; anything else in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateArticleRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let empty = |field: &Option<String>| field.as_deref().is_some_and(str::is_empty);
        if empty(&self.title) || empty(&self.content) {
            return Err(ApiError::validation("title and content cannot be empty"));
        }
        Ok(())
    }
}
