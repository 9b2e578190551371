//! Blog post handlers

use axum::{
    Json,
    extract::{
        Multipart, Path, Query, State, multipart::MultipartRejection, rejection::QueryRejection,
    },
    http::HeaderMap,
};
use axum_extra::{TypedHeader, headers::Host};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    error::{ApiError, ApiResult, ErrorBody},
    extract::JsonOrForm,
    models::{BlogPatch, BlogPost, NewBlogPost, PaginationQuery, parse_blog_id},
    state::AppState,
};

pub const UPDATE_SUCCESS: &str = "Update Successfully";
pub const DELETE_SUCCESS: &str = "Delete Successfully";

/// Multipart form accepted by the image upload endpoint
#[derive(ToSchema)]
pub struct UploadImageForm {
    /// Image content; only its filename extension is kept
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Returns the list of all the blogs
#[utoipa::path(
    get,
    path = "/blogs",
    tag = "Blogs",
    responses(
        (status = 200, description = "The list of the blogs", body = [BlogPost]),
        (status = 503, description = "Record store unavailable", body = ErrorBody)
    )
)]
pub async fn list_blogs(State(state): State<AppState>) -> ApiResult<Json<Vec<BlogPost>>> {
    let blogs = state.blog_repository.list().await?;
    Ok(Json(blogs))
}

/// Create a new blog
#[utoipa::path(
    post,
    path = "/blogs",
    tag = "Blogs",
    request_body = NewBlogPost,
    responses(
        (status = 200, description = "Create Successfully", body = BlogPost),
        (status = 400, description = "A required field is missing or empty", body = ErrorBody),
        (status = 413, description = "Body exceeds the size limit", body = ErrorBody),
        (status = 503, description = "Record store unavailable", body = ErrorBody)
    )
)]
pub async fn create_blog(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<NewBlogPost>,
) -> ApiResult<Json<BlogPost>> {
    let fields = payload.validate().inspect_err(|e| warn!("Rejected blog: {}", e))?;

    let blog = state.blog_repository.insert(fields).await?;
    info!("Created blog {}", blog.id);

    Ok(Json(blog))
}

/// Update the blog
///
/// A body without `_id` changes nothing and still reports success.
#[utoipa::path(
    patch,
    path = "/blogs",
    tag = "Blogs",
    request_body = BlogPatch,
    responses(
        (status = 200, description = "Updated Successfully", body = String, example = json!("Update Successfully")),
        (status = 400, description = "Malformed body or identifier", body = ErrorBody),
        (status = 404, description = "No blog with this identifier", body = ErrorBody),
        (status = 503, description = "Record store unavailable", body = ErrorBody)
    )
)]
pub async fn patch_blog(
    State(state): State<AppState>,
    JsonOrForm(patch): JsonOrForm<BlogPatch>,
) -> ApiResult<Json<&'static str>> {
    let Some(raw_id) = patch.id.as_deref().filter(|id| !id.is_empty()) else {
        info!("Patch without _id, nothing to update");
        return Ok(Json(UPDATE_SUCCESS));
    };
    let id = parse_blog_id(raw_id)?;

    let mut blog = state
        .blog_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Blog {} not found", id)))?;

    patch.apply_to(&mut blog);

    // The post may have been deleted since the lookup
    if !state.blog_repository.replace(&blog).await? {
        return Err(ApiError::NotFound(format!("Blog {} not found", id)));
    }
    info!("Updated blog {}", id);

    Ok(Json(UPDATE_SUCCESS))
}

/// Remove the blog by id
#[utoipa::path(
    delete,
    path = "/blogs/{id}",
    tag = "Blogs",
    params(("id" = String, Path, description = "The blog id")),
    responses(
        (status = 200, description = "Deleted Successfully", body = String, example = json!("Delete Successfully")),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 503, description = "Record store unavailable", body = ErrorBody)
    )
)]
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<&'static str>> {
    let id = parse_blog_id(&id)?;

    if state.blog_repository.delete(id).await? {
        info!("Deleted blog {}", id);
    } else {
        info!("Delete of unknown blog {}", id);
    }

    Ok(Json(DELETE_SUCCESS))
}

/// Get the blog by query limit & page
#[utoipa::path(
    get,
    path = "/blogs/pagination",
    tag = "Blogs",
    params(PaginationQuery),
    responses(
        (status = 200, description = "The list of the blogs", body = [BlogPost]),
        (status = 400, description = "Missing or non-integer limit/page", body = ErrorBody),
        (status = 503, description = "Record store unavailable", body = ErrorBody)
    )
)]
pub async fn paginate_blogs(
    State(state): State<AppState>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<BlogPost>>> {
    let Query(query) = query?;

    let blogs = match query.window()? {
        Some((offset, limit)) => state.blog_repository.page(offset, limit).await?,
        None => Vec::new(),
    };

    Ok(Json(blogs))
}

/// Get the blog by id
///
/// An unknown identifier yields `null`.
#[utoipa::path(
    get,
    path = "/blogs/{id}",
    tag = "Blogs",
    params(("id" = String, Path, description = "The blog id")),
    responses(
        (status = 200, description = "The blog, or null when absent", body = BlogPost),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 503, description = "Record store unavailable", body = ErrorBody)
    )
)]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<BlogPost>>> {
    let id = parse_blog_id(&id)?;
    let blog = state.blog_repository.find_by_id(id).await?;
    Ok(Json(blog))
}

/// Upload an image and get its public URL
#[utoipa::path(
    post,
    path = "/blogs/image",
    tag = "Blogs",
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Public URL of the stored file", body = String),
        (status = 400, description = "Not a multipart form, or no `file` field", body = ErrorBody),
        (status = 413, description = "Upload exceeds the body limit", body = ErrorBody),
        (status = 503, description = "Upload directory not writable", body = ErrorBody)
    )
)]
pub async fn upload_image(
    State(state): State<AppState>,
    host: Option<TypedHeader<Host>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<String>> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let (stored, size) = state.image_store.save(file_name.as_deref(), field).await?;
        info!("Stored upload {:?} as {} ({} bytes)", file_name, stored, size);

        let origin = host.map(|TypedHeader(host)| request_origin(&host, &headers));
        return Ok(Json(state.image_store.public_url(origin.as_deref(), &stored)));
    }

    Err(ApiError::ValidationFailed("`file` field is required".to_string()))
}

/// `scheme://host[:port]` of the incoming request
fn request_origin(host: &Host, headers: &HeaderMap) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("http");

    match host.port() {
        Some(port) => format!("{}://{}:{}", scheme, host.hostname(), port),
        None => format!("{}://{}", scheme, host.hostname()),
    }
}
