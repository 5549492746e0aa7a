//! HTTP surface of the intake service.
//!
//! `POST /process` receives form-service webhooks; `/api/*` exposes a
//! health check and read-back of stored records. The router is
//! composable: `intake_router()` returns a `Router` that can be mounted
//! on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::intake_router;
pub use server::{start_server, IntakeServer, ServerSession};
pub use types::ApiContext;
