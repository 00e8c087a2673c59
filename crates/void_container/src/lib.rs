//! Void Container - Slot-Indexed Item Storage
//!
//! This crate provides the transactional core behind inventories, banks and
//! equipment: a fixed number of slots, each holding at most one item stack.
//!
//! # Features
//!
//! - Fixed-capacity slot storage with dirty tracking for encoders
//! - Stackable and discrete (one unit per slot) items
//! - Full-stacking containers that aggregate every item type
//! - Bank placeholders that keep an item's slot while it is withdrawn
//! - Saturating stack arithmetic and overflow reporting
//! - Shared, reloadable item definition catalog
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use void_container::prelude::*;
//!
//! let catalog = Arc::new(
//!     ItemCatalog::new().with(ItemDefinition::new(995).with_stackable(true)),
//! );
//!
//! let mut inventory = ItemContainer::new(ContainerConfig::inventory(), catalog)?;
//! let result = inventory.add(&Item::new(995, 500));
//! if result.failed() {
//!     // drop the remainder on the ground
//! }
//! ```

pub mod config;
pub mod container;
pub mod definition;
pub mod error;
pub mod item;
pub mod placeholder;
pub mod result;
pub mod slots;
pub mod stacking;

pub mod prelude {
    pub use crate::config::{ContainerConfig, StackPolicy};
    pub use crate::container::{ItemContainer, OverflowSink};
    pub use crate::definition::{ItemCatalog, ItemDefinition, ItemDefinitionProvider};
    pub use crate::error::ContainerError;
    pub use crate::item::{Amount, Item, ItemId, ItemProperties, ItemProperty, MAX_AMOUNT};
    pub use crate::result::TransactionResult;
    pub use crate::slots::SlotMatch;
}

pub use prelude::*;
