//! Provider implementations.

pub mod azure_ai;
