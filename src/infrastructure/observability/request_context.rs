use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";
pub const FORWARDED_HOST_HEADER: &str = "x-forwarded-host";

/// Per-request identity plus the scheme and host the client used when the
/// service sits behind a reverse proxy.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: String,
    pub forwarded_proto: Option<String>,
    pub forwarded_host: Option<String>,
}

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            request_id: first_value(headers, REQUEST_ID_HEADER)
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            forwarded_proto: first_value(headers, FORWARDED_PROTO_HEADER),
            forwarded_host: first_value(headers, FORWARDED_HOST_HEADER),
        }
    }
}

/// Proxies append to forwarding headers; only the first hop is trusted.
fn first_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Opens the request span and echoes the request id on the response.
pub async fn request_context_middleware(request: Request, next: Next) -> Response {
    let context = RequestContext::from_headers(request.headers());

    let span = tracing::info_span!(
        "request",
        request_id = %context.request_id,
        method = %request.method(),
        uri = %request.uri().path(),
        forwarded_proto = context.forwarded_proto.as_deref().unwrap_or("-"),
        forwarded_host = context.forwarded_host.as_deref().unwrap_or("-"),
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(header_value) = HeaderValue::from_str(&context.request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
    }

    response
}
