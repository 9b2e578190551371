//! Request body extractor accepting JSON or URL-encoded forms

use axum::{
    Form, Json, async_trait,
    extract::{FromRequest, Request},
    http::header,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Body deserialised from `application/x-www-form-urlencoded` when the
/// request says so, and from JSON otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            Ok(JsonOrForm(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            Ok(JsonOrForm(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pair {
        a: String,
        b: Option<String>,
    }

    fn request(content_type: &str, body: &'static str) -> Request {
        Request::post("/")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_form_and_json_decode_alike() {
        let JsonOrForm(from_form) = JsonOrForm::<Pair>::from_request(
            request("application/x-www-form-urlencoded; charset=utf-8", "a=x+y&b=z"),
            &(),
        )
        .await
        .unwrap();
        let JsonOrForm(from_json) = JsonOrForm::<Pair>::from_request(
            request("application/json", r#"{"a":"x y","b":"z"}"#),
            &(),
        )
        .await
        .unwrap();

        assert_eq!(from_form, from_json);
    }

    #[tokio::test]
    async fn test_unsupported_content_type_is_rejected() {
        let err = JsonOrForm::<Pair>::from_request(request("text/plain", "a=x"), &())
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), "validation_failed");
    }
}
