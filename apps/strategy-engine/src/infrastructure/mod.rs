//! Infrastructure Layer
//!
//! Concrete adapters for the ports defined in the application layer:
//!
//! - **Driven Adapters (Outbound)**:
//!   - `market/`: instrument directory and manually-fed quote board
//!   - `persistence/`: in-memory watchlist store
//!
//! - **Driver Adapters (Inbound)**:
//!   - `http/`: REST API controller
//!
//! - **Cross-cutting**:
//!   - `config/`: environment-driven configuration

pub mod config;
pub mod http;
pub mod market;
pub mod persistence;
