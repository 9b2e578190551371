//! PostgreSQL blog repository

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::BlogRepository;
use crate::models::{BlogFields, BlogPost};

/// Blog repository backed by the `blog` table
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    /// Create a new blog repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `blog` table when it does not exist yet
    ///
    /// `seq` records insertion order, which is the order every listing uses.
    pub async fn migrate(&self) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blog (
                seq BIGSERIAL NOT NULL,
                id UUID PRIMARY KEY,
                title TEXT NOT NULL,
                username TEXT NOT NULL,
                body TEXT NOT NULL,
                phone TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

        info!("Blog schema is up to date");
        Ok(())
    }
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    async fn list(&self) -> DatabaseResult<Vec<BlogPost>> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, title, username, body, phone
            FROM blog
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn insert(&self, fields: BlogFields) -> DatabaseResult<BlogPost> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog (id, title, username, body, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, username, body, phone
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&fields.title)
        .bind(&fields.username)
        .bind(&fields.body)
        .bind(&fields.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<BlogPost>> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, title, username, body, phone
            FROM blog
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn replace(&self, post: &BlogPost) -> DatabaseResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE blog
            SET title = $2, username = $3, body = $4, phone = $5
            WHERE id = $1
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.username)
        .bind(&post.body)
        .bind(&post.phone)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM blog
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn page(&self, offset: u64, limit: u64) -> DatabaseResult<Vec<BlogPost>> {
        // Postgres takes signed bigints; clamp instead of wrapping
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, title, username, body, phone
            FROM blog
            ORDER BY seq
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        common::database::health_check(&self.pool).await
    }
}
