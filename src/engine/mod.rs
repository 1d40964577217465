//! Reconciliation engine: tiered matching of bank records against book records

pub mod config;
pub mod distance;
pub mod matcher;
pub mod summary;

pub use config::*;
pub use matcher::*;
pub use summary::*;
