//! Container configuration

use crate::error::{ContainerError, Result};
use crate::item::MAX_AMOUNT;
use serde::{Deserialize, Serialize};

/// Capacity that identifies a container as bank-style storage
pub const DEFAULT_BANK_CAPACITY: usize = 800;

/// Marker value carried by definitions that are themselves placeholders
pub const DEFAULT_PLACEHOLDER_TEMPLATE: u32 = 14401;

/// Stacking policy applied to every item added to a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackPolicy {
    /// Stack only what the item definition marks stackable
    Regular,
    /// Aggregate every property-less item into a single stack per id
    FullStacking,
}

impl Default for StackPolicy {
    fn default() -> Self {
        Self::Regular
    }
}

/// Construction parameters for an [`ItemContainer`](crate::container::ItemContainer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Number of slots
    pub capacity: usize,
    /// Stacking policy
    #[serde(default)]
    pub policy: StackPolicy,
    /// Capacity that switches on placeholder handling
    #[serde(default = "default_bank_capacity")]
    pub bank_capacity: usize,
    /// Marker id identifying placeholder definitions
    #[serde(default = "default_placeholder_template")]
    pub placeholder_template: u32,
}

fn default_bank_capacity() -> usize {
    DEFAULT_BANK_CAPACITY
}

fn default_placeholder_template() -> u32 {
    DEFAULT_PLACEHOLDER_TEMPLATE
}

impl ContainerConfig {
    /// Create a config with the given capacity and regular stacking
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policy: StackPolicy::Regular,
            bank_capacity: DEFAULT_BANK_CAPACITY,
            placeholder_template: DEFAULT_PLACEHOLDER_TEMPLATE,
        }
    }

    /// Player inventory: 28 slots
    pub fn inventory() -> Self {
        Self::new(28)
    }

    /// Worn equipment: 14 slots
    pub fn equipment() -> Self {
        Self::new(14)
    }

    /// Bank: 800 slots, everything stacks
    pub fn bank() -> Self {
        Self::new(DEFAULT_BANK_CAPACITY).with_policy(StackPolicy::FullStacking)
    }

    /// Set stacking policy
    pub fn with_policy(mut self, policy: StackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the bank-identifying capacity
    pub fn with_bank_capacity(mut self, capacity: usize) -> Self {
        self.bank_capacity = capacity;
        self
    }

    /// Set the placeholder marker id
    pub fn with_placeholder_template(mut self, template: u32) -> Self {
        self.placeholder_template = template;
        self
    }

    /// Whether containers built from this config use placeholder logic
    pub fn is_bank(&self) -> bool {
        self.capacity == self.bank_capacity
    }

    /// Check the capacity is usable
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 || self.capacity > MAX_AMOUNT as usize {
            return Err(ContainerError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self::inventory()
    }
}
