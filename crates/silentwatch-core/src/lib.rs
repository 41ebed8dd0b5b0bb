//! # silentwatch-core
//!
//! Foundation crate for the silentwatch verification engine.
//! Defines the shared domain types, errors, config, tracing setup, and
//! stable identity hashing. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod identity;
pub mod observability;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::SilentwatchConfig;
pub use errors::error_code::ErrorCode;
pub use identity::FindingIdentity;
pub use types::confidence::Confidence;
pub use types::truth_status::TruthStatus;
