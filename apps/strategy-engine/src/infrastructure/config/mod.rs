//! Configuration Module
//!
//! Environment-driven configuration for the strategy engine.

mod settings;

pub use settings::{EngineConfig, HttpSettings};
