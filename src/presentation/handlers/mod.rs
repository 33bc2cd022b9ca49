mod digest;
mod health;

pub use digest::{DigestError, ErrorDetail, ErrorResponse, digest_handler};
pub use health::{HealthResponse, health_handler};
