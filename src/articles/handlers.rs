use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{CreateArticleRequest, UpdateArticleRequest},
    repo::Article,
};
use crate::{
    auth::{claims::ADMIN_ROLE, extractors::BearerClaims},
    dto::MessageResponse,
    error::ApiError,
    state::AppState,
};

pub fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/articles", get(list_articles).post(create_article))
        .route("/articles/:id", put(update_article).delete(delete_article))
}

fn article_not_found() -> ApiError {
    ApiError::not_found("Article not found")
}

// TODO: creation is open to anonymous callers; gate it behind BearerClaims
// once the front end sends a token on create.
#[instrument(skip(state, payload))]
pub async fn create_article(
    State(state): State<AppState>,
    payload: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let Json(payload) = payload?;
    let new = payload.into_new_article().inspect_err(|_| {
        warn!("create article with missing fields");
    })?;

    let article = state.articles.insert(new).await?;

    info!(article_id = article.id, author = %article.username, "article created");
    Ok((StatusCode::CREATED, Json(article)))
}

#[instrument(skip(state))]
pub async fn list_articles(State(state): State<AppState>) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = state.articles.list().await?;
    Ok(Json(articles))
}

#[instrument(skip(state, claims, payload))]
pub async fn update_article(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    claims: Result<BearerClaims, ApiError>,
    payload: Result<Json<UpdateArticleRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    let BearerClaims(claims) = claims?;

    let (Some(username), Some(role)) = (claims.username.as_deref(), claims.role.as_deref()) else {
        warn!(user_id = claims.user_id, "token without username or role");
        return Err(ApiError::auth("Invalid token: missing username or role"));
    };

    let Json(payload) = payload?;
    payload.validate()?;

    let author = state
        .articles
        .author_of(id)
        .await?
        .ok_or_else(article_not_found)?;

    if role != ADMIN_ROLE && author != username {
        warn!(article_id = id, %username, %author, "update by non-author");
        return Err(ApiError::forbidden(
            "You are not allowed to edit this article",
        ));
    }

    let updated = state
        .articles
        .update_text(id, payload.title.as_deref(), payload.content.as_deref())
        .await?;
    if updated == 0 {
        // Deleted between the author lookup and the update.
        warn!(article_id = id, "article vanished before update");
        return Err(article_not_found());
    }

    info!(article_id = id, %username, "article updated");
    Ok(Json(MessageResponse::new("Article updated")))
}

#[instrument(skip(state, claims))]
pub async fn delete_article(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    claims: Result<BearerClaims, ApiError>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    let BearerClaims(claims) = claims?;

    if !claims.is_admin() {
        warn!(article_id = id, user_id = claims.user_id, "delete by non-admin");
        return Err(ApiError::forbidden(
            "Only administrators can delete articles",
        ));
    }

    if state.articles.delete(id).await? == 0 {
        warn!(article_id = id, "delete of unknown article");
        return Err(article_not_found());
    }

    info!(article_id = id, user_id = claims.user_id, "article deleted");
    Ok(Json(MessageResponse::new("Article deleted")))
}
