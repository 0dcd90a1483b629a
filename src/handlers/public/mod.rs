// handlers/public/mod.rs - Public handlers (no authentication required)
pub mod posts;
pub mod profile;
pub mod system;
