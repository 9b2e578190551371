//! API models for request and response payloads

pub mod blog;
pub mod user;

pub use blog::{BlogFields, BlogPatch, BlogPost, NewBlogPost, PaginationQuery, parse_blog_id};
pub use user::{LoginRequest, UserCredential};
