mod patch;
mod request;
mod response;

pub use patch::*;
pub use request::*;
pub use response::*;

/// Custom field id (UUID string) -> JSON value.
pub type CustomFieldValues = std::collections::BTreeMap<String, serde_json::Value>;
