//! Error handling for Snappy operations
//!
//! This module re-exports the error types used throughout the crate.
//! They are derived with thiserror and carry context for each decode failure.

pub use crate::common::DecodeError;
pub use crate::common::Result;
pub use crate::common::SnappyError;
