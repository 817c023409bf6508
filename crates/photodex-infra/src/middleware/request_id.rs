use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Request ID, stored in the request extensions
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Tags every request with an ID.
///
/// An incoming `X-Request-ID` is reused, otherwise a UUID is generated. The ID
/// is echoed in the response header and recorded on a span wrapping the rest
/// of the request, so handler logs carry it.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let span = tracing::info_span!("request", request_id = %request_id);
    let mut response = next.run(request).instrument(span).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Extension, Router};
    use axum_test::TestServer;

    fn server() -> TestServer {
        let app = Router::new()
            .route(
                "/",
                get(|Extension(id): Extension<RequestId>| async move { id.0 }),
            )
            .layer(axum::middleware::from_fn(request_id_middleware));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_generates_request_id() {
        let response = server().get("/").await;

        let header = response.header(REQUEST_ID_HEADER);
        let id = header.to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(response.text(), id);
    }

    #[tokio::test]
    async fn test_reuses_incoming_request_id() {
        let response = server()
            .get("/")
            .add_header(REQUEST_ID_HEADER, "trace-123")
            .await;

        assert_eq!(response.header(REQUEST_ID_HEADER), "trace-123");
        assert_eq!(response.text(), "trace-123");
    }
}
