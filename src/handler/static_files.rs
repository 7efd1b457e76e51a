//! Static file serving module
//!
//! Maps a URL path to a file under the project root and streams it back.
//! `/` and `/editor` alias to the configured entry HTML files; a missing
//! `favicon.ico` is answered with a built-in blank GIF so the browser stops
//! asking.

use crate::config::Config;
use crate::http::{mime, response};
use crate::logger;
use crate::sanitize;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::path::Path;
use tokio::fs;

/// 1x1 transparent GIF served when no favicon exists on disk.
const BLANK_FAVICON: &[u8] = b"GIF89a\x01\x00\x01\x00\xf0\x00\x00\xff\xff\xff\x00\x00\x00\
!\xff\x0bXMP DataXMP\x02?x\x00!\xf9\x04\x05\x00\x00\x00\x00,\
\x00\x00\x00\x00\x01\x00\x01\x00@\x02\x02D\x01\x00;";

pub async fn serve(url_path: &str, config: &Config, root: &Path) -> Response<Full<Bytes>> {
    let aliased = match url_path {
        "/" => config.resources.game_entry.as_str(),
        "/editor" => config.resources.editor_entry.as_str(),
        other => other,
    };
    let relative = aliased.strip_prefix('/').unwrap_or(aliased);
    let file_path = sanitize::project_path(root, relative);

    match fs::read(&file_path).await {
        Ok(content) => {
            let content_type =
                mime::content_type(file_path.extension().and_then(|e| e.to_str()));
            response::raw(StatusCode::OK, Bytes::from(content), content_type)
        }
        Err(_) if is_favicon(&file_path) => response::raw(
            StatusCode::OK,
            Bytes::from_static(BLANK_FAVICON),
            Some("image/gif"),
        ),
        Err(e) => {
            logger::log_warning(&format!("Not found: {} ({e})", file_path.display()));
            response::empty(StatusCode::NOT_FOUND)
        }
    }
}

fn is_favicon(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == "favicon.ico")
}
