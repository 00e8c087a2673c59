//! Error types for the container engine
//!
//! Running out of room or holdings is not an error: those outcomes are
//! reported through [`TransactionResult`](crate::result::TransactionResult).
//! The variants here are programming or setup mistakes.

use thiserror::Error;

/// Container errors
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Direct write addressed a slot outside the container
    #[error("Slot {slot} is out of bounds for container of capacity {capacity}")]
    SlotOutOfBounds { slot: usize, capacity: usize },

    /// Capacity is zero or too large to address with an amount
    #[error("Invalid container capacity: {0}")]
    InvalidCapacity(usize),

    /// Item definitions could not be parsed
    #[error("Item catalog error: {0}")]
    Catalog(#[from] serde_json::Error),
}

/// Result type for container setup and unchecked writes
pub type Result<T> = std::result::Result<T, ContainerError>;
