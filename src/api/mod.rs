//! HTTP API.
//!
//! JSON endpoints under `/api/` for prediction, history and PDF reports.
//! `api_router()` returns a composable `Router`; `server` owns the bind,
//! spawn and shutdown lifecycle.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server, ApiServer};
pub use types::ApiContext;
