//! Taskboard library modules.
//!
//! The binary in `main.rs` wires these into an Actix server; integration
//! tests mount the same routes against in-memory adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
