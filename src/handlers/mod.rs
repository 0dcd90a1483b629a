// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) handlers serve reads; protected handlers take an
// `AuthUser` and only run once the bearer token has been verified.
pub mod protected;
pub mod public;

use uuid::Uuid;

/// Path ids that do not parse can never match a document, so they resolve to
/// the nil id and fall through to the ordinary not-found handling.
pub(crate) fn path_id(raw: &str) -> Uuid {
    Uuid::parse_str(raw.trim()).unwrap_or_else(|_| {
        tracing::debug!("Malformed id in path: {:?}", raw);
        Uuid::nil()
    })
}
