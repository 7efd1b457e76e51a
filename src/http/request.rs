//! Request context module
//!
//! Decodes the pieces of a request the handlers care about: the query-free
//! URL path, the query-parameter multimap, and for POSTs the form-field
//! multimap. Form values stay as raw bytes until a handler decodes them,
//! since the editor submits both text and binary fields.

use std::collections::HashMap;
use url::form_urlencoded;

pub type QueryParams = HashMap<String, Vec<String>>;
pub type FormFields = HashMap<String, Vec<Vec<u8>>>;

/// Per-request state, built once before routing and discarded afterwards.
pub struct RequestContext {
    pub path: String,
    pub query: QueryParams,
    pub form: FormFields,
}

impl RequestContext {
    pub fn new(uri: &hyper::Uri, content_type: Option<&str>, body: &[u8]) -> Self {
        let query = uri.query().map_or_else(HashMap::new, parse_query);
        let form = content_type.map_or_else(HashMap::new, |ct| parse_form(ct, body));
        Self {
            path: uri.path().to_string(),
            query,
            form,
        }
    }

    /// First value for a parameter, checking the query string before the
    /// decoded form fields.
    pub fn param(&self, name: &str) -> Option<&str> {
        if let Some(values) = self.query.get(name) {
            return values.first().map(String::as_str);
        }
        self.form
            .get(name)
            .and_then(|values| values.first())
            .and_then(|raw| std::str::from_utf8(raw).ok())
    }

    /// All values for a parameter, from the query string or, failing that,
    /// the decoded form fields.
    pub fn params(&self, name: &str) -> Vec<String> {
        if let Some(values) = self.query.get(name) {
            return values.clone();
        }
        self.form.get(name).map_or_else(Vec::new, |values| {
            values
                .iter()
                .filter_map(|v| std::str::from_utf8(v).ok())
                .map(ToString::to_string)
                .collect()
        })
    }
}

fn parse_query(query: &str) -> QueryParams {
    let mut params: QueryParams = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    params
}

fn parse_form(content_type: &str, body: &[u8]) -> FormFields {
    let (mime, attrs) = split_content_type(content_type);
    match mime {
        "application/x-www-form-urlencoded" => parse_urlencoded(body),
        "multipart/form-data" => attrs
            .get("boundary")
            .map_or_else(HashMap::new, |boundary| parse_multipart(body, boundary)),
        _ => HashMap::new(),
    }
}

fn parse_urlencoded(body: &[u8]) -> FormFields {
    let mut fields: FormFields = HashMap::new();
    for (key, value) in form_urlencoded::parse(body) {
        fields
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned().into_bytes());
    }
    fields
}

/// Split `multipart/form-data; boundary=xyz` into the MIME type and its
/// attribute map.
fn split_content_type(header: &str) -> (&str, HashMap<&str, &str>) {
    let mut parts = header.split(';');
    let mime = parts.next().unwrap_or("").trim();
    let mut attrs = HashMap::new();
    for part in parts {
        if let Some((key, value)) = part.split_once('=') {
            attrs.insert(key.trim(), value.trim().trim_matches('"'));
        }
    }
    (mime, attrs)
}

/// Minimal multipart/form-data parser covering what the editor sends:
/// CRLF-delimited parts, `Content-Disposition: form-data; name="..."`.
fn parse_multipart(body: &[u8], boundary: &str) -> FormFields {
    let mut fields: FormFields = HashMap::new();
    let delimiter = format!("--{boundary}").into_bytes();

    let mut segments = split_on(body, &delimiter);
    // Preamble before the first delimiter
    if !segments.is_empty() {
        segments.remove(0);
    }

    for segment in segments {
        // The closing delimiter leaves a bare `--` segment
        if segment.starts_with(b"--") {
            break;
        }
        let part = strip_crlf(segment);
        let Some(header_end) = find(part, b"\r\n\r\n") else {
            continue;
        };
        let headers = &part[..header_end];
        let value = trim_trailing_crlf(&part[header_end + 4..]);
        if let Some(name) = disposition_name(headers) {
            fields.entry(name).or_default().push(value.to_vec());
        }
    }
    fields
}

fn disposition_name(headers: &[u8]) -> Option<String> {
    for line in headers.split(|&b| b == b'\n') {
        let Ok(line) = std::str::from_utf8(line) else {
            continue;
        };
        let Some((header, rest)) = line.trim().split_once(':') else {
            continue;
        };
        if !header.eq_ignore_ascii_case("content-disposition") {
            continue;
        }
        for attr in rest.split(';') {
            if let Some((key, value)) = attr.split_once('=') {
                if key.trim() == "name" {
                    return Some(value.trim().trim_matches('"').to_string());
                }
            }
        }
    }
    None
}

fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut segments = Vec::new();
    let mut start = 0;
    while let Some(pos) = find(&haystack[start..], needle) {
        segments.push(&haystack[start..start + pos]);
        start += pos + needle.len();
    }
    segments.push(&haystack[start..]);
    segments
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn strip_crlf(segment: &[u8]) -> &[u8] {
    segment.strip_prefix(b"\r\n").unwrap_or(segment)
}

fn trim_trailing_crlf(value: &[u8]) -> &[u8] {
    value.strip_suffix(b"\r\n").unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> hyper::Uri {
        s.parse().expect("test uri should parse")
    }

    fn first_form<'a>(ctx: &'a RequestContext, name: &str) -> &'a [u8] {
        ctx.form
            .get(name)
            .and_then(|values| values.first())
            .expect("field should be present")
    }

    #[test]
    fn query_string_is_stripped_from_path() {
        let ctx = RequestContext::new(&uri("/lib/weltmeister/api/browse.php?dir=media"), None, &[]);
        assert_eq!(ctx.path, "/lib/weltmeister/api/browse.php");
        assert_eq!(ctx.param("dir"), Some("media"));
    }

    #[test]
    fn repeated_query_params_keep_order() {
        let ctx = RequestContext::new(
            &uri("/api/glob.php?glob%5B%5D=a/*.js&glob%5B%5D=b/*.png"),
            None,
            &[],
        );
        assert_eq!(ctx.params("glob[]"), ["a/*.js", "b/*.png"]);
    }

    #[test]
    fn urlencoded_body_decodes_to_form_fields() {
        let body = b"path=lib%2Fgame%2Flevels%2Ftest.js&data=ig.module%28%29";
        let ctx = RequestContext::new(
            &uri("/api/save.php"),
            Some("application/x-www-form-urlencoded"),
            body,
        );
        assert_eq!(first_form(&ctx, "path"), b"lib/game/levels/test.js");
        assert_eq!(first_form(&ctx, "data"), b"ig.module()");
    }

    #[test]
    fn multipart_body_decodes_to_form_fields() {
        let body = b"--XX\r\n\
            Content-Disposition: form-data; name=\"path\"\r\n\
            \r\n\
            lib/game/levels/test.js\r\n\
            --XX\r\n\
            Content-Disposition: form-data; name=\"data\"\r\n\
            \r\n\
            ig.module('game.levels.test')\r\n\
            --XX--\r\n";
        let ctx = RequestContext::new(
            &uri("/api/save.php"),
            Some("multipart/form-data; boundary=XX"),
            body,
        );
        assert_eq!(first_form(&ctx, "path"), b"lib/game/levels/test.js");
        assert_eq!(first_form(&ctx, "data"), b"ig.module('game.levels.test')");
    }

    #[test]
    fn multipart_value_may_contain_crlf() {
        let body = b"--B\r\n\
            Content-Disposition: form-data; name=\"data\"\r\n\
            \r\n\
            line one\r\nline two\r\n\
            --B--\r\n";
        let ctx = RequestContext::new(
            &uri("/api/save.php"),
            Some("multipart/form-data; boundary=B"),
            body,
        );
        assert_eq!(first_form(&ctx, "data"), b"line one\r\nline two");
    }

    #[test]
    fn unknown_content_type_yields_no_fields() {
        let ctx = RequestContext::new(&uri("/api/save.php"), Some("text/plain"), b"path=x");
        assert!(ctx.form.is_empty());
    }
}
