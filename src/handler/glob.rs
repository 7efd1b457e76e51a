//! Glob resolution module
//!
//! Expands the editor's `glob[]` patterns against the project tree. Results
//! are concatenated in pattern order and never deduplicated; the client is
//! responsible for whatever it wants to do with overlaps.

use crate::logger;
use crate::sanitize;
use std::path::{Path, MAIN_SEPARATOR};

/// Expand each pattern under `root`, preserving pattern order. Matches within
/// one pattern come back in the alphabetical order the `glob` crate yields.
pub fn resolve_globs(root: &Path, patterns: &[String]) -> Vec<String> {
    let mut matched = Vec::new();

    for pattern in patterns {
        let cleaned = sanitize::strip_parent_tokens(pattern);
        let full = format!("{}{}{}", root.display(), MAIN_SEPARATOR, cleaned);
        match glob::glob(&full) {
            Ok(paths) => {
                for path in paths.filter_map(Result::ok) {
                    matched.push(client_path(&path.to_string_lossy()));
                }
            }
            Err(e) => {
                logger::log_warning(&format!("Bad glob pattern '{pattern}': {e}"));
            }
        }
    }
    matched
}

/// Forward slashes only, no `./` prefix, for client-side consistency.
fn client_path(path: &str) -> String {
    let slashed = path.replace('\\', "/");
    match slashed.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => slashed,
    }
}
