//! Path sanitizing module
//!
//! Confines client-supplied relative paths to the project root. The cleaning
//! rule is a textual denylist: every literal `..` is removed from the input
//! before any joining happens. This is intentionally not a canonicalizing
//! resolve; callers that need a hardened containment check should swap this
//! module out rather than adding checks of their own.

use std::path::{Component, Path, PathBuf};

/// Remove every literal occurrence of the parent-directory token.
///
/// `"a/../../b"` becomes `"a//b"`, not an error. The result still has to be
/// joined under the project root before any file system access.
pub fn strip_parent_tokens(path: &str) -> String {
    path.replace("..", "")
}

/// Join a cleaned relative path onto the project root.
///
/// The join is a plain string concatenation with the platform separator, so a
/// leading slash in `relative` cannot replace `root` the way `Path::join`
/// would. The result is not checked for existence or readability.
pub fn project_path(root: &Path, relative: &str) -> PathBuf {
    let cleaned = strip_parent_tokens(relative);
    PathBuf::from(format!(
        "{}{}{}",
        root.display(),
        std::path::MAIN_SEPARATOR,
        cleaned
    ))
}

/// Collapse redundant separators and `.` segments, yielding a `/`-separated
/// string for client-side consumption.
pub fn normalize(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
            Component::ParentDir => parts.push("..".to_string()),
            Component::RootDir | Component::Prefix(_) => {
                parts.push(component.as_os_str().to_string_lossy().into_owned());
            }
        }
    }
    if parts.is_empty() {
        return ".".to_string();
    }
    let joined = parts.join("/");
    // A root component already carries its separator
    joined.replace("//", "/")
}
