//! Axum extractors shared by both gateways.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ServiceError;

/// JSON body extractor that reads a missing body as an empty request.
///
/// A request with no body, a whitespace-only body, or a non-JSON content type
/// yields `T::default()`, so handlers answer it with their usual
/// missing-field error. A JSON body that fails to parse is rejected with
/// `400 {"error": "Invalid request body: ..."}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_body = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_json_content_type);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if !json_body || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        match Json::<T>::from_bytes(&bytes) {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(error = %rejection, "rejected request body");
                Err(ServiceError::BadRequest(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))
                .into_response())
            }
        }
    }
}

/// `application/json` or any `application/*+json` type, parameters ignored.
fn is_json_content_type(value: &str) -> bool {
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Router};
    use axum_test::TestServer;
    use serde::{Deserialize, Serialize};
    use serde_json::{json, Value};

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Echo {
        word: Option<String>,
    }

    async fn echo(LenientJson(body): LenientJson<Echo>) -> Json<Echo> {
        Json(body)
    }

    fn server() -> TestServer {
        TestServer::new(Router::new().route("/echo", post(echo))).unwrap()
    }

    #[test]
    fn json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(is_json_content_type("application/merge-patch+json"));
        assert!(!is_json_content_type("text/plain"));
        assert!(!is_json_content_type("application/x-www-form-urlencoded"));
        assert!(!is_json_content_type(""));
    }

    #[tokio::test]
    async fn parses_json_body() {
        let resp = server().post("/echo").json(&json!({"word": "hi"})).await;
        resp.assert_status_ok();
        assert_eq!(resp.json::<Value>(), json!({"word": "hi"}));
    }

    #[tokio::test]
    async fn empty_json_body_is_default() {
        let resp = server()
            .post("/echo")
            .bytes(Bytes::new())
            .content_type("application/json")
            .await;
        resp.assert_status_ok();
        assert_eq!(resp.json::<Value>(), json!({"word": null}));
    }

    #[tokio::test]
    async fn non_json_content_type_is_default() {
        let resp = server().post("/echo").text(r#"{"word": "hi"}"#).await;
        resp.assert_status_ok();
        assert_eq!(resp.json::<Value>(), json!({"word": null}));
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let resp = server()
            .post("/echo")
            .bytes(Bytes::from_static(b"{not json"))
            .content_type("application/json")
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        let error = resp.json::<Value>()["error"].as_str().unwrap().to_owned();
        assert!(error.starts_with("Invalid request body: "), "got {error}");
    }

    #[tokio::test]
    async fn wrongly_typed_field_is_400() {
        let resp = server().post("/echo").json(&json!({"word": 42})).await;
        resp.assert_status(StatusCode::BAD_REQUEST);
    }
}
