//! Blog post models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Blog post as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[schema(example = json!({
    "_id": "5b0e3f1c-6a43-4a6f-9a8e-2f9c7d1d8b10",
    "title": "Chạy Bộ",
    "username": "Nguyen Kim Tien",
    "body": "Lorem...",
    "phone": "TextString"
}))]
pub struct BlogPost {
    /// Identifier assigned by the store, immutable after creation
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// The blog title
    pub title: String,
    /// The author display name
    pub username: String,
    pub body: String,
    /// The blog phone
    pub phone: String,
}

impl BlogPost {
    pub fn new(id: Uuid, fields: BlogFields) -> Self {
        Self {
            id,
            title: fields.title,
            username: fields.username,
            body: fields.body,
            phone: fields.phone,
        }
    }
}

/// Validated content of a blog post, without its identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogFields {
    pub title: String,
    pub username: String,
    pub body: String,
    pub phone: String,
}

/// Request body for blog creation
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation failure instead of a deserialisation rejection.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[schema(example = json!({
    "title": "Chạy Bộ",
    "username": "Nguyen Kim Tien",
    "body": "Lorem...",
    "phone": "TextString"
}))]
pub struct NewBlogPost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl NewBlogPost {
    /// Check that all four fields are present and not blank
    pub fn validate(self) -> ApiResult<BlogFields> {
        Ok(BlogFields {
            title: required("title", self.title)?,
            username: required("username", self.username)?,
            body: required("body", self.body)?,
            phone: required("phone", self.phone)?,
        })
    }
}

fn required(name: &str, value: Option<String>) -> ApiResult<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::ValidationFailed(format!("`{}` is required", name))),
    }
}

/// Request body for a partial blog update
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[schema(example = json!({
    "_id": "5b0e3f1c-6a43-4a6f-9a8e-2f9c7d1d8b10",
    "title": "Chạy Bộ"
}))]
pub struct BlogPatch {
    /// Identifier of the post to update; when absent the request is a no-op
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl BlogPatch {
    /// Overwrite the supplied fields of `post`. Empty strings count as omitted.
    pub fn apply_to(&self, post: &mut BlogPost) {
        overwrite(&mut post.title, self.title.as_deref());
        overwrite(&mut post.username, self.username.as_deref());
        overwrite(&mut post.body, self.body.as_deref());
        overwrite(&mut post.phone, self.phone.as_deref());
    }
}

fn overwrite(slot: &mut String, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        *slot = value.to_string();
    }
}

/// Query parameters for the pagination endpoint
///
/// Both values arrive as strings and are parsed by the handler.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Maximum number of posts per page
    #[param(example = "2")]
    pub limit: String,
    /// 1-based page number
    #[param(example = "1")]
    pub page: String,
}

impl PaginationQuery {
    /// Resolve the query into `(offset, limit)`.
    ///
    /// Returns `None` when the window is empty (non-positive limit or page).
    pub fn window(&self) -> ApiResult<Option<(u64, u64)>> {
        let limit = parse_integer("limit", &self.limit)?;
        let page = parse_integer("page", &self.page)?;

        if limit <= 0 || page <= 0 {
            return Ok(None);
        }

        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| ApiError::ValidationFailed("page is out of range".to_string()))?;

        Ok(Some((offset as u64, limit as u64)))
    }
}

fn parse_integer(name: &str, raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::ValidationFailed(format!("`{}` must be an integer", name)))
}

/// Parse a blog identifier received from a path or a body
pub fn parse_blog_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError::ValidationFailed(format!("`{}` is not a valid blog id", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> BlogPost {
        BlogPost {
            id: Uuid::new_v4(),
            title: "Chạy Bộ".to_string(),
            username: "Nguyen Kim Tien".to_string(),
            body: "Lorem...".to_string(),
            phone: "0123".to_string(),
        }
    }

    #[test]
    fn test_new_blog_post_requires_every_field() {
        let missing_phone = NewBlogPost {
            title: Some("title".into()),
            username: Some("user".into()),
            body: Some("body".into()),
            phone: None,
        };
        assert!(matches!(
            missing_phone.validate(),
            Err(ApiError::ValidationFailed(msg)) if msg.contains("phone")
        ));

        let blank_title = NewBlogPost {
            title: Some("   ".into()),
            username: Some("user".into()),
            body: Some("body".into()),
            phone: Some("0123".into()),
        };
        assert!(blank_title.validate().is_err());
    }

    #[test]
    fn test_new_blog_post_keeps_values_verbatim() {
        let fields = NewBlogPost {
            title: Some(" spaced title ".into()),
            username: Some("user".into()),
            body: Some("body".into()),
            phone: Some("0123".into()),
        }
        .validate()
        .unwrap();

        assert_eq!(fields.title, " spaced title ");
    }

    #[test]
    fn test_patch_leaves_omitted_fields_unchanged() {
        let mut post = sample_post();
        let before = post.clone();

        let patch = BlogPatch {
            title: Some("New title".into()),
            body: Some(String::new()),
            ..Default::default()
        };
        patch.apply_to(&mut post);

        assert_eq!(post.title, "New title");
        assert_eq!(post.body, before.body);
        assert_eq!(post.username, before.username);
        assert_eq!(post.phone, before.phone);
        assert_eq!(post.id, before.id);
    }

    #[test]
    fn test_patch_deserialises_mongo_style_id() {
        let patch: BlogPatch =
            serde_json::from_str(r#"{"_id":"abc","phone":"999"}"#).unwrap();
        assert_eq!(patch.id.as_deref(), Some("abc"));
        assert_eq!(patch.phone.as_deref(), Some("999"));
        assert!(patch.title.is_none());
    }

    #[test]
    fn test_blog_post_serialises_id_as_underscore_id() {
        let post = sample_post();
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["_id"], post.id.to_string());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_pagination_window() {
        let query = |limit: &str, page: &str| PaginationQuery {
            limit: limit.to_string(),
            page: page.to_string(),
        };

        assert_eq!(query("2", "1").window().unwrap(), Some((0, 2)));
        assert_eq!(query("2", "3").window().unwrap(), Some((4, 2)));
        assert_eq!(query("0", "1").window().unwrap(), None);
        assert_eq!(query("5", "-1").window().unwrap(), None);
        assert!(query("two", "1").window().is_err());
        assert!(query(&i64::MAX.to_string(), "3").window().is_err());
    }

    #[test]
    fn test_parse_blog_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_blog_id(&id.to_string()).unwrap(), id);
        assert!(parse_blog_id("62123b3640565ece426e15a9").is_err());
    }
}
