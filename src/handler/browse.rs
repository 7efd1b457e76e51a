//! Directory browsing module
//!
//! Backs the editor's asset panel. Produces a fresh listing on every call;
//! nothing is cached because the project tree changes under the editor.
//!
//! Two branches return no listing at all (and the handler answers with an
//! empty body): the named directory cannot be located in the tree, or it
//! vanished between locate and list. The editor relies on the empty reply to
//! survive reload races, so these are ordinary outcomes, not errors.

use crate::config::Config;
use crate::sanitize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

#[derive(Debug, Serialize)]
pub struct DirListing {
    pub files: Vec<String>,
    pub dirs: Vec<String>,
    pub parent: Parent,
}

/// `false` for the project root, a path string otherwise.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parent {
    Root(bool),
    Dir(String),
}

/// Filter applied to the file list, from the `type` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    Images,
    Scripts,
    All,
}

impl TypeFilter {
    /// `images` wins over `scripts` when both are supplied.
    pub fn from_params(values: &[String]) -> Self {
        if values.iter().any(|v| v == "images") {
            Self::Images
        } else if values.iter().any(|v| v == "scripts") {
            Self::Scripts
        } else {
            Self::All
        }
    }
}

/// List the directory named by `dir_param` under `root`. `None` means the
/// caller should reply with an empty body.
pub fn browse_dir(
    root: &Path,
    dir_param: &str,
    filter: TypeFilter,
    config: &Config,
) -> Option<DirListing> {
    let cleaned = sanitize::strip_parent_tokens(dir_param);

    let mut dir = if cleaned == "." {
        root.display().to_string()
    } else {
        locate_dir(root, &cleaned)?.display().to_string()
    };
    if !dir.ends_with(MAIN_SEPARATOR) {
        dir.push(MAIN_SEPARATOR);
    }

    let dir_path = Path::new(&dir);
    if !dir_path.is_dir() {
        return None;
    }

    let mut subdirs: Vec<String> = fs::read_dir(dir_path)
        .ok()?
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.contains('.'))
        .collect();
    subdirs.sort();

    let mut files: Vec<PathBuf> = glob::glob(&format!("{dir}*.*"))
        .map_or_else(|_| Vec::new(), |paths| paths.filter_map(Result::ok).collect());
    files.sort();

    let files = files
        .into_iter()
        .filter(|path| matches_filter(path, filter, config))
        .map(|path| sanitize::normalize(&path))
        .collect();

    let root_marker = format!("{}{}", root.display(), MAIN_SEPARATOR);
    let parent = if dir == root_marker {
        Parent::Root(false)
    } else {
        Parent::Dir(dirname(dirname(&dir)).to_string())
    };

    Some(DirListing {
        files,
        dirs: subdirs,
        parent,
    })
}

fn matches_filter(path: &Path, filter: TypeFilter, config: &Config) -> bool {
    let dotted = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"));
    match (filter, dotted) {
        (TypeFilter::All, _) => true,
        (TypeFilter::Images, Some(ext)) => config.is_image_extension(&ext),
        (TypeFilter::Scripts, Some(ext)) => ext == ".js",
        (_, None) => false,
    }
}

/// Depth-first search of the project tree for the first directory whose base
/// name equals `name`. Each level checks all of its children before
/// descending.
fn locate_dir(base: &Path, name: &str) -> Option<PathBuf> {
    let mut children: Vec<PathBuf> = fs::read_dir(base)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    children.sort();

    for child in &children {
        if child.file_name().is_some_and(|n| n == name) {
            return Some(child.clone());
        }
    }
    children.iter().find_map(|child| locate_dir(child, name))
}

/// Everything before the last path separator, or `""` if there is none.
/// Matches Python's `os.path.dirname`, which the parent computation leans on.
fn dirname(path: &str) -> &str {
    path.rfind(MAIN_SEPARATOR).map_or("", |i| &path[..i])
}
