//! Script saving module
//!
//! The only mutation endpoint. Writes editor-submitted level code back to
//! disk, restricted to `.js` targets so a stray request cannot overwrite
//! arbitrary project files.

use crate::http::request::FormFields;
use crate::sanitize;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// JSON reply for a save attempt. `msg` only accompanies failures.
#[derive(Debug, Serialize)]
pub struct SaveOutcome {
    pub error: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl SaveOutcome {
    const fn ok() -> Self {
        Self {
            error: 0,
            msg: None,
        }
    }

    fn fail(error: u8, msg: String) -> Self {
        Self {
            error,
            msg: Some(msg),
        }
    }
}

/// Error codes: 0 success, 1 missing fields, 2 write failure, 3 wrong
/// extension.
pub fn save_script(root: &Path, form: &FormFields) -> SaveOutcome {
    let (Some(path_raw), Some(data_raw)) = (first(form, "path"), first(form, "data")) else {
        return SaveOutcome::fail(1, "No Data or Path specified".to_string());
    };
    let (Ok(rel_path), Ok(data)) = (
        std::str::from_utf8(path_raw),
        std::str::from_utf8(data_raw),
    ) else {
        return SaveOutcome::fail(1, "No Data or Path specified".to_string());
    };

    let target = sanitize::project_path(root, rel_path);
    if !target.to_string_lossy().ends_with(".js") {
        return SaveOutcome::fail(3, "File must have a .js suffix".to_string());
    }

    match fs::write(&target, data) {
        Ok(()) => SaveOutcome::ok(),
        Err(e) => SaveOutcome::fail(
            2,
            format!("Couldn't write to file {} ({e})", target.display()),
        ),
    }
}

fn first<'a>(form: &'a FormFields, name: &str) -> Option<&'a [u8]> {
    form.get(name).and_then(|v| v.first()).map(Vec::as_slice)
}
