//! Shared helpers.

pub mod cancel;
pub mod headers;
