//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Aggregates**: Consistency boundaries with invariants
//! - **Domain Services**: Stateless strike and payoff arithmetic
//!
//! # Bounded Contexts
//!
//! - [`instrument`]: Index contract parameters, expiry calendars, trading symbols
//! - [`strategy`]: Leg book composition, templates, and risk summary analytics

pub mod instrument;
pub mod shared;
pub mod strategy;
