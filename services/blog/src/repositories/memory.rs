//! In-memory blog repository
//!
//! Used with `BLOG_STORE=memory` and as the store behind the HTTP tests.

use async_trait::async_trait;
use common::error::DatabaseResult;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::BlogRepository;
use crate::models::{BlogFields, BlogPost};

/// Blog repository keeping posts in a vector, in insertion order
#[derive(Default)]
pub struct MemoryBlogRepository {
    posts: RwLock<Vec<BlogPost>>,
}

impl MemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogRepository for MemoryBlogRepository {
    async fn list(&self) -> DatabaseResult<Vec<BlogPost>> {
        Ok(self.posts.read().await.clone())
    }

    async fn insert(&self, fields: BlogFields) -> DatabaseResult<BlogPost> {
        let post = BlogPost::new(Uuid::new_v4(), fields);
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<BlogPost>> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.id == id).cloned())
    }

    async fn replace(&self, post: &BlogPost) -> DatabaseResult<bool> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|stored| stored.id == post.id) {
            Some(stored) => {
                *stored = post.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|post| post.id != id);
        Ok(posts.len() != before)
    }

    async fn page(&self, offset: u64, limit: u64) -> DatabaseResult<Vec<BlogPost>> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        let posts = self.posts.read().await;
        Ok(posts.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        Ok(true)
    }
}
