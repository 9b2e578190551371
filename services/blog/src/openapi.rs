//! OpenAPI document for the blog service

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::ErrorBody,
    models::{BlogPatch, BlogPost, LoginRequest, NewBlogPost},
    routes::{
        blogs::{self, UploadImageForm},
        users::{self, LoginFailure},
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Using API Blogs", version = "1.0.0"),
    paths(
        blogs::list_blogs,
        blogs::create_blog,
        blogs::patch_blog,
        blogs::delete_blog,
        blogs::paginate_blogs,
        blogs::get_blog,
        blogs::upload_image,
        users::login,
    ),
    components(schemas(
        BlogPost,
        NewBlogPost,
        BlogPatch,
        UploadImageForm,
        ErrorBody,
        LoginRequest,
        LoginFailure,
    )),
    tags(
        (name = "Blogs", description = "The blogs managing API"),
        (name = "Users", description = "The login API"),
    )
)]
pub struct ApiDoc;

/// Interactive documentation at `/api`, backed by `/api-docs/openapi.json`
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api").url("/api-docs/openapi.json", ApiDoc::openapi())
}
