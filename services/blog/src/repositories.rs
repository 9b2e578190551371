//! Repositories for record storage and credential lookup

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{BlogFields, BlogPost};

pub mod memory;
pub mod postgres;
pub mod user;

pub use memory::MemoryBlogRepository;
pub use postgres::PgBlogRepository;
pub use user::{StaticUserDirectory, UserDirectory};

/// Record store for blog posts
///
/// Listing and paging return posts in insertion order. No operation holds a
/// lock across calls, so a read followed by [`BlogRepository::replace`] can
/// overwrite a concurrent update.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Get all posts
    async fn list(&self) -> DatabaseResult<Vec<BlogPost>>;

    /// Persist a new post and return it with its assigned identifier
    async fn insert(&self, fields: BlogFields) -> DatabaseResult<BlogPost>;

    /// Find a post by ID
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<BlogPost>>;

    /// Overwrite every field of an existing post. Returns false when no post
    /// has the given identifier.
    async fn replace(&self, post: &BlogPost) -> DatabaseResult<bool>;

    /// Delete a post by ID. Returns whether a post was removed.
    async fn delete(&self, id: Uuid) -> DatabaseResult<bool>;

    /// Get at most `limit` posts starting at `offset`
    async fn page(&self, offset: u64, limit: u64) -> DatabaseResult<Vec<BlogPost>>;

    /// Check that the store is reachable
    async fn health_check(&self) -> DatabaseResult<bool>;
}
