//! Wirestack Core Library
//!
//! This crate provides the error taxonomy and shared packet type for the
//! wirestack packet crafting toolkit.

pub mod error;
pub mod packet;

// Re-export commonly used types
pub use error::{Error, Result};
pub use packet::Packet;
