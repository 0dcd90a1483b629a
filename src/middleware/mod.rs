pub mod auth;
pub mod json;

pub use json::JsonBody;
