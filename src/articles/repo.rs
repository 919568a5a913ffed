use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::db::StoreError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
    pub username: String, // author, copied at creation
    pub category_name: String,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub published_at: OffsetDateTime,
    pub username: String,
    pub category_name: String,
}

#[async_trait]
pub trait ArticleRepo: Send + Sync {
    async fn insert(&self, new: NewArticle) -> Result<Article, StoreError>;
    async fn list(&self) -> Result<Vec<Article>, StoreError>;
    async fn author_of(&self, id: i32) -> Result<Option<String>, StoreError>;
    /// Overwrites the given columns only; `None` keeps the stored value.
    /// Returns the number of rows touched.
    async fn update_text(
        &self,
        id: i32,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<u64, StoreError>;
    async fn delete(&self, id: i32) -> Result<u64, StoreError>;
}

pub struct PgArticleRepo {
    db: PgPool,
}

impl PgArticleRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ArticleRepo for PgArticleRepo {
    async fn insert(&self, new: NewArticle) -> Result<Article, StoreError> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (title, content, image_url, published_at, username, category_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, content, image_url, published_at, username, category_name
            "#,
        )
        .bind(new.title)
        .bind(new.content)
        .bind(new.image_url)
        .bind(new.published_at)
        .bind(new.username)
        .bind(new.category_name)
        .fetch_one(&self.db)
        .await?;
        Ok(article)
    }

    async fn list(&self) -> Result<Vec<Article>, StoreError> {
        let rows = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, content, image_url, published_at, username, category_name
            FROM articles
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn author_of(&self, id: i32) -> Result<Option<String>, StoreError> {
        let author = sqlx::query_scalar::<_, String>("SELECT username FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(author)
    }

    async fn update_text(
        &self,
        id: i32,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE articles
               SET title = COALESCE($1, title),
                   content = COALESCE($2, content)
             WHERE id = $3
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
