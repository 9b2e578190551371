//! Blog service routes

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{error::ApiError, openapi, state::AppState};

pub mod blogs;
pub mod users;

/// Create the router for the blog service
///
/// Anything that matches no route is looked up in the upload directory.
pub fn create_router(state: AppState, upload_max_bytes: usize) -> Router {
    let public_files = ServeDir::new(state.image_store.root());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/blogs",
            get(blogs::list_blogs)
                .post(blogs::create_blog)
                .patch(blogs::patch_blog),
        )
        .route("/blogs/pagination", get(blogs::paginate_blogs))
        .route("/blogs/image", post(blogs::upload_image))
        .route(
            "/blogs/:id",
            get(blogs::get_blog).delete(blogs::delete_blog),
        )
        .route("/users/login", post(users::login))
        .merge(openapi::swagger_ui())
        .fallback_service(public_files)
        .layer(DefaultBodyLimit::max(upload_max_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    if !state.blog_repository.health_check().await? {
        return Err(ApiError::StoreUnavailable("Database unreachable".to_string()));
    }

    Ok(Json(json!({
        "status": "ok",
        "service": "blog-service"
    })))
}
