//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    http::{Request, StatusCode, header},
};
use blog::{
    AppState, create_router,
    jwt::{JwtConfig, JwtService},
    models::UserCredential,
    repositories::{BlogRepository, MemoryBlogRepository, StaticUserDirectory},
    uploads::ImageStore,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub repository: Arc<MemoryBlogRepository>,
    pub jwt_service: JwtService,
    pub public_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let repository = Arc::new(MemoryBlogRepository::new());
        let public_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let jwt_service = JwtService::new(&JwtConfig {
            secret: TEST_SECRET.to_string(),
        });

        let users = StaticUserDirectory::new(vec![UserCredential {
            username: "tienkim9920".to_string(),
            password: "123".to_string(),
        }]);

        let state = AppState {
            blog_repository: repository.clone() as Arc<dyn BlogRepository>,
            user_directory: Arc::new(users),
            jwt_service: jwt_service.clone(),
            image_store: ImageStore::new(public_dir.path(), None),
        };

        TestApp {
            router: create_router(state, 1024 * 1024),
            repository,
            jwt_service,
            public_dir,
        }
    }

    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Bytes) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, body)
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = self.send_raw(request).await;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("Response is not JSON")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send_form(&self, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Create a post through the API and return the response body
    pub async fn create_blog(&self, title: &str) -> Value {
        let (status, body) = self
            .send_json(
                "POST",
                "/blogs",
                serde_json::json!({
                    "title": title,
                    "username": "Nguyen Kim Tien",
                    "body": "Lorem...",
                    "phone": "0123456789",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create failed: {}", body);
        body
    }
}
