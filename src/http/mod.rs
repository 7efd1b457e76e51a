//! HTTP support modules: request decoding, response framing, MIME lookup.

pub mod mime;
pub mod request;
pub mod response;
