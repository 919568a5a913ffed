use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    articles::repo::{ArticleRepo, PgArticleRepo},
    auth::{
        jwt::JwtKeys,
        repo::{PgUserRepo, UserRepo},
    },
    config::AppConfig,
};

/// Everything a handler needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt: JwtKeys,
    pub users: Arc<dyn UserRepo>,
    pub articles: Arc<dyn ArticleRepo>,
}

impl AppState {
    pub fn postgres(db: PgPool, config: Arc<AppConfig>) -> Self {
        let users = Arc::new(PgUserRepo::new(db.clone())) as Arc<dyn UserRepo>;
        let articles = Arc::new(PgArticleRepo::new(db)) as Arc<dyn ArticleRepo>;
        Self::from_parts(config, users, articles)
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepo>,
        articles: Arc<dyn ArticleRepo>,
    ) -> Self {
        Self {
            jwt: JwtKeys::new(&config.jwt),
            config,
            users,
            articles,
        }
    }
}
