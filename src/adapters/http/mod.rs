//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with handlers, DTOs, and routes; `router`
//! assembles them behind the shared middleware stack.

pub mod error;
pub mod exercises;
pub mod middleware;
pub mod profile;
pub mod router;
pub mod speech;

pub use error::ErrorResponse;
pub use router::{build_router, AppServices};
