//! HTTP response building module
//!
//! One builder per status the server produces. Builders never panic; a
//! builder error is logged and degraded to a bare response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build a 200 OK response carrying file content.
///
/// HEAD responses keep the headers (including Content-Length) with an
/// empty body.
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(403)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("403 Forbidden")))
        .unwrap_or_else(|e| {
            log_build_error("403", &e);
            Response::new(Full::new(Bytes::from("403 Forbidden")))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("500 Internal Server Error")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("500 Internal Server Error")))
        })
}

/// Build 501 Not Implemented response for unsupported methods
pub fn build_501_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(501)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD")
        .body(Full::new(Bytes::from("501 Not Implemented")))
        .unwrap_or_else(|e| {
            log_build_error("501", &e);
            Response::new(Full::new(Bytes::from("501 Not Implemented")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_file_response() {
        let resp = build_file_response(Bytes::from("hello"), "text/plain; charset=utf-8", false);
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Length").expect("length"),
            "5"
        );
        let body = resp.into_body().collect().await.expect("body").to_bytes();
        assert_eq!(body.as_ref(), b"hello");
    }

    #[tokio::test]
    async fn test_head_response_keeps_length_drops_body() {
        let resp = build_file_response(Bytes::from("hello"), "text/plain; charset=utf-8", true);
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Length").expect("length"),
            "5"
        );
        let body = resp.into_body().collect().await.expect("body").to_bytes();
        assert!(body.is_empty());
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(build_404_response().status(), 404);
        assert_eq!(build_403_response().status(), 403);
        assert_eq!(build_500_response().status(), 500);
    }

    #[test]
    fn test_501_advertises_methods() {
        let resp = build_501_response();
        assert_eq!(resp.status(), 501);
        assert_eq!(resp.headers().get("Allow").expect("allow"), "GET, HEAD");
    }
}
