//! Output rendering for extracted documents.
//!
//! JSON is the only output format; the content model serializes directly
//! through serde.

mod json;

pub use json::{to_json, to_json_default, JsonFormat};
