// handlers/protected/mod.rs - Protected handlers (bearer JWT required)
//
// Every handler here takes an `AuthUser`; the extractor rejects the request
// with 401 before the handler body runs.
pub mod posts;
pub mod profile;
pub mod users;
