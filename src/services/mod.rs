pub mod error;
pub mod post_service;
pub mod profile_service;

pub use error::ServiceError;
pub use post_service::PostService;
pub use profile_service::ProfileService;
