//! Item values stored in container slots

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Item type identifier (references an `ItemDefinition`)
pub type ItemId = u32;

/// Signed quantity. Values `<= 0` only ever appear on rejected input.
pub type Amount = i32;

/// Largest amount a single stack can hold
pub const MAX_AMOUNT: Amount = i32::MAX;

/// Instance property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemProperty {
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<ItemProperty>),
}

impl ItemProperty {
    /// Get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// Get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

/// Distinguishing per-instance state (charges, degradation, owner, ...)
pub type ItemProperties = BTreeMap<String, ItemProperty>;

/// An item stack held in a slot.
///
/// Items are plain values: containers copy them in and out and never hand
/// out a mutable reference to a stored item. Two items compare equal when
/// their ids match and both either carry or lack properties; the amount is
/// not part of identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<ItemProperties>,
}

impl Item {
    /// Create a new item stack
    pub fn new(id: ItemId, amount: Amount) -> Self {
        Self {
            id,
            amount,
            properties: None,
        }
    }

    /// Create a single unit
    pub fn single(id: ItemId) -> Self {
        Self::new(id, 1)
    }

    /// Copy of this item with a different amount, keeping its properties
    pub fn with_amount(&self, amount: Amount) -> Self {
        Self {
            id: self.id,
            amount,
            properties: self.properties.clone(),
        }
    }

    /// Attach a property, making this instance unique
    pub fn with_property(mut self, key: impl Into<String>, value: ItemProperty) -> Self {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value);
        self
    }

    /// Item type id
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Quantity in this stack
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Instance properties, if any
    pub fn properties(&self) -> Option<&ItemProperties> {
        self.properties.as_ref()
    }

    /// Get a single property value
    pub fn property(&self, key: &str) -> Option<&ItemProperty> {
        self.properties.as_ref()?.get(key)
    }

    /// Whether this instance carries distinguishing state
    pub fn has_properties(&self) -> bool {
        self.properties.is_some()
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.has_properties() == other.has_properties()
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.has_properties().hash(state);
    }
}
