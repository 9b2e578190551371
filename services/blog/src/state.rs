//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    jwt::JwtService,
    repositories::{BlogRepository, UserDirectory},
    uploads::ImageStore,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub blog_repository: Arc<dyn BlogRepository>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub jwt_service: JwtService,
    pub image_store: ImageStore,
}
