//! MIME type lookup module
//!
//! Maps a file extension to a `Content-Type`. Unknown extensions yield `None`
//! and the response is framed without a `Content-Type` header.

/// Get the MIME `Content-Type` for a file extension, if recognized.
pub fn content_type(extension: Option<&str>) -> Option<&'static str> {
    match extension {
        // Text
        Some("html" | "htm") => Some("text/html; charset=utf-8"),
        Some("css") => Some("text/css"),
        Some("txt" | "md") => Some("text/plain; charset=utf-8"),
        Some("xml") => Some("application/xml"),

        // Scripts and data
        Some("js" | "mjs") => Some("application/javascript"),
        Some("json") => Some("application/json"),
        Some("wasm") => Some("application/wasm"),

        // Images
        Some("png") => Some("image/png"),
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        Some("gif") => Some("image/gif"),
        Some("svg") => Some("image/svg+xml"),
        Some("ico") => Some("image/x-icon"),
        Some("webp") => Some("image/webp"),

        // Audio (ImpactJS sound assets)
        Some("ogg") => Some("audio/ogg"),
        Some("mp3") => Some("audio/mpeg"),
        Some("m4a") => Some("audio/mp4"),
        Some("wav") => Some("audio/wav"),

        // Fonts
        Some("woff") => Some("font/woff"),
        Some("woff2") => Some("font/woff2"),
        Some("ttf") => Some("font/ttf"),

        _ => None,
    }
}
