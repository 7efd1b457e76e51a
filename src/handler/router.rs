//! Request routing module
//!
//! Classifies each request as one of the three editor API calls or a static
//! asset fetch and dispatches to exactly one handler. The query string and
//! POST body are decoded once, before routing, and shared with whichever
//! handler runs.

use crate::config::Config;
use crate::handler::{browse, glob, save, static_files};
use crate::http::{request::RequestContext, response};
use crate::logger;
use http_body_util::BodyExt;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::path::Path;
use std::sync::Arc;

/// Hyper service entry point. Never fails; every internal error becomes a
/// framed response.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    config: Arc<Config>,
) -> Result<Response<http_body_util::Full<Bytes>>, Infallible> {
    if config.logging.access_log {
        logger::log_request(req.method(), req.uri(), req.version());
    }

    let method = req.method().clone();
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            Bytes::new()
        }
    };

    let ctx = RequestContext::new(&parts.uri, content_type.as_deref(), &body);
    let resp = route(&ctx, &method, &config, Path::new(".")).await;

    if config.logging.access_log {
        let size = resp
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        logger::log_response(resp.status().as_u16(), size);
    }
    Ok(resp)
}

/// Dispatch a decoded request against the project rooted at `root`.
pub async fn route(
    ctx: &RequestContext,
    method: &Method,
    config: &Config,
    root: &Path,
) -> Response<http_body_util::Full<Bytes>> {
    if ctx.path == config.api.save {
        return response::json(&save::save_script(root, &ctx.form));
    }
    if ctx.path == config.api.browse {
        let dir = ctx.param("dir").unwrap_or(".").to_string();
        let filter = browse::TypeFilter::from_params(&ctx.params("type"));
        return match browse::browse_dir(root, &dir, filter, config) {
            Some(listing) => response::json(&listing),
            // Directory moved or never existed; the editor expects silence
            None => response::empty(hyper::StatusCode::OK),
        };
    }
    if ctx.path == config.api.glob {
        let matched = glob::resolve_globs(root, &ctx.params("glob[]"));
        return response::json(&matched);
    }
    if *method == Method::GET {
        return static_files::serve(&ctx.path, config, root).await;
    }
    response::method_not_allowed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt as _;
    use std::fs;

    fn test_config() -> Config {
        Config::load().expect("default config should load")
    }

    fn get(path_and_query: &str) -> RequestContext {
        let uri: hyper::Uri = path_and_query.parse().expect("uri");
        RequestContext::new(&uri, None, &[])
    }

    fn post_form(path: &str, body: &[u8]) -> RequestContext {
        let uri: hyper::Uri = path.parse().expect("uri");
        RequestContext::new(&uri, Some("application/x-www-form-urlencoded"), body)
    }

    async fn body_string(resp: Response<http_body_util::Full<Bytes>>) -> String {
        let bytes = resp
            .into_body()
            .collect()
            .await
            .expect("body should collect")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("lib/game")).expect("mkdir");
        fs::write(dir.path().join("index.html"), "<html></html>").expect("write");
        fs::write(dir.path().join("lib/game/main.js"), "ig.module()").expect("write");
        dir
    }

    #[tokio::test]
    async fn save_path_dispatches_to_script_saver() {
        let dir = project();
        let ctx = post_form(
            "/lib/weltmeister/api/save.php",
            b"path=lib%2Fgame%2Flevels.js&data=x",
        );
        let resp = route(&ctx, &Method::POST, &test_config(), dir.path()).await;
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        let body = body_string(resp).await;
        assert_eq!(body, r#"{"error":0}"#);
        assert!(dir.path().join("lib/game/levels.js").exists());
    }

    #[tokio::test]
    async fn save_without_body_reports_missing_fields() {
        let dir = project();
        let ctx = get("/lib/weltmeister/api/save.php");
        let resp = route(&ctx, &Method::GET, &test_config(), dir.path()).await;
        let body = body_string(resp).await;
        assert!(body.contains(r#""error":1"#), "got: {body}");
    }

    #[tokio::test]
    async fn browse_path_returns_listing_json() {
        let dir = project();
        let ctx = get("/lib/weltmeister/api/browse.php");
        let resp = route(&ctx, &Method::GET, &test_config(), dir.path()).await;
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        let body: serde_json::Value =
            serde_json::from_str(&body_string(resp).await).expect("json");
        assert_eq!(body["parent"], serde_json::json!(false));
        assert_eq!(body["dirs"], serde_json::json!(["lib"]));
    }

    #[tokio::test]
    async fn browse_of_vanished_directory_is_empty_200() {
        let dir = project();
        let ctx = get("/lib/weltmeister/api/browse.php?dir=gone");
        let resp = route(&ctx, &Method::GET, &test_config(), dir.path()).await;
        assert_eq!(resp.status(), 200);
        assert!(body_string(resp).await.is_empty());
    }

    #[tokio::test]
    async fn glob_path_returns_json_array() {
        let dir = project();
        let ctx = get("/lib/weltmeister/api/glob.php?glob%5B%5D=lib/game/*.js");
        let resp = route(&ctx, &Method::GET, &test_config(), dir.path()).await;
        let body: Vec<String> =
            serde_json::from_str(&body_string(resp).await).expect("json array");
        assert_eq!(body.len(), 1);
        assert!(body[0].ends_with("lib/game/main.js"));
    }

    #[tokio::test]
    async fn unmatched_get_serves_static_files() {
        let dir = project();
        let ctx = get("/index.html");
        let resp = route(&ctx, &Method::GET, &test_config(), dir.path()).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_string(resp).await, "<html></html>");
    }

    #[tokio::test]
    async fn post_to_unmatched_path_is_405() {
        let dir = project();
        let ctx = post_form("/index.html", b"");
        let resp = route(&ctx, &Method::POST, &test_config(), dir.path()).await;
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(body_string(resp).await, "Method Not Allowed");
    }

    #[tokio::test]
    async fn delete_to_unmatched_path_is_405() {
        let dir = project();
        let ctx = get("/index.html");
        let resp = route(&ctx, &Method::DELETE, &test_config(), dir.path()).await;
        assert_eq!(resp.status(), 405);
    }
}
