use crate::config::ERROR_BODY_PREVIEW_LIMIT;
use crate::error::HttpError;
use bytes::Bytes;
use http::Response;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::de::DeserializeOwned;

/// Boxed response body as produced by the client's service stack
pub type ResponseBody =
    http_body_util::combinators::BoxBody<Bytes, Box<dyn std::error::Error + Send + Sync>>;

/// HTTP response with body-reading helpers
///
/// All readers enforce the client's `max_body_size`.
#[derive(Debug)]
pub struct HttpResponse {
    pub(crate) inner: Response<ResponseBody>,
    pub(crate) max_body_size: usize,
}

impl HttpResponse {
    /// Read the body, turning a non-2xx status into `HttpError::HttpStatus`
    ///
    /// The error keeps a preview of the error body (at most
    /// 8 KiB).
    ///
    /// # Errors
    /// Returns `HttpError::HttpStatus` for non-2xx responses, `HttpError::BodyTooLarge`
    /// past the size limit, or a transport error
    pub async fn checked_bytes(self) -> Result<Bytes, HttpError> {
        checked_body(self.inner, self.max_body_size).await
    }

    /// Deserialize a 2xx JSON body
    ///
    /// # Errors
    /// Returns `HttpError::HttpStatus` for non-2xx responses and `HttpError::Json`
    /// for malformed bodies
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, HttpError> {
        let body = checked_body(self.inner, self.max_body_size).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

async fn checked_body(
    response: Response<ResponseBody>,
    max_body_size: usize,
) -> Result<Bytes, HttpError> {
    let status = response.status();
    if status.is_success() {
        return read_body_limited(response, max_body_size).await;
    }

    let content_type = response
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    // A too-large error body must not hide the status itself
    let preview_limit = max_body_size.min(ERROR_BODY_PREVIEW_LIMIT);
    let body_preview = match read_body_limited(response, preview_limit).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(HttpError::BodyTooLarge { .. }) => "<body too large for preview>".to_owned(),
        Err(e) => return Err(e),
    };

    Err(HttpError::HttpStatus {
        status,
        body_preview,
        content_type,
    })
}

async fn read_body_limited(
    response: Response<ResponseBody>,
    limit: usize,
) -> Result<Bytes, HttpError> {
    // Boxing erases `Limited`'s `Into<BoxError>` bound from the future's
    // state; without it rustc rejects `Send` for `#[async_trait]` callers.
    let body = Limited::new(response.into_body(), limit).boxed();
    match body.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.is::<LengthLimitError>() => Err(HttpError::BodyTooLarge { limit }),
        Err(err) => Err(HttpError::Transport(err)),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use http::StatusCode;
    use http_body_util::Full;

    fn response(status: StatusCode, body: &'static str) -> HttpResponse {
        let body: ResponseBody = Full::new(Bytes::from_static(body.as_bytes()))
            .map_err(|never| match never {})
            .boxed();
        HttpResponse {
            inner: Response::builder()
                .status(status)
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(body)
                .unwrap(),
            max_body_size: 64,
        }
    }

    #[tokio::test]
    async fn test_json_success() {
        let value: serde_json::Value = response(StatusCode::OK, r#"{"ok":true}"#)
            .json()
            .await
            .unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn test_json_non_2xx_keeps_preview() {
        let err = response(StatusCode::BAD_REQUEST, r#"{"error":"bad"}"#)
            .json::<serde_json::Value>()
            .await
            .unwrap_err();
        match err {
            HttpError::HttpStatus {
                status,
                body_preview,
                content_type,
            } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body_preview, r#"{"error":"bad"}"#);
                assert_eq!(content_type.as_deref(), Some("application/json"));
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_body_limit_enforced() {
        let big = "x".repeat(100);
        let body: ResponseBody = Full::new(Bytes::from(big))
            .map_err(|never| match never {})
            .boxed();
        let resp = HttpResponse {
            inner: Response::new(body),
            max_body_size: 10,
        };
        assert!(matches!(
            resp.checked_bytes().await,
            Err(HttpError::BodyTooLarge { limit: 10 })
        ));
    }

    #[tokio::test]
    async fn test_error_preview_survives_large_body() {
        let big = "x".repeat(100);
        let body: ResponseBody = Full::new(Bytes::from(big))
            .map_err(|never| match never {})
            .boxed();
        let resp = HttpResponse {
            inner: Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(body)
                .unwrap(),
            max_body_size: 10,
        };
        match resp.checked_bytes().await {
            Err(HttpError::HttpStatus { body_preview, .. }) => {
                assert_eq!(body_preview, "<body too large for preview>");
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }
}
