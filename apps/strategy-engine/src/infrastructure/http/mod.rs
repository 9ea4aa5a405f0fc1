//! HTTP/REST API adapter.
//!
//! Inbound adapter exposing sessions, instruments, quotes, and the
//! watchlist over REST.

mod controller;
mod request;
mod response;

pub use controller::{create_router, ApiError, AppState, EngineSessionService};
pub use request::*;
pub use response::*;
