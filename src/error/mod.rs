//! Error handling types for the Azure AI provider.
//!
//! A single error enum is shared by every model in this crate.

mod conversions;
pub mod types;

pub use types::*;
