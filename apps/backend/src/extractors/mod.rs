pub mod auth_context;
pub mod validated_json;

pub use validated_json::ValidatedJson;
