//! Request handlers: routing plus the static file, browse, glob, and save
//! endpoints behind it.

pub mod browse;
pub mod glob;
pub mod router;
pub mod save;
pub mod static_files;
