//! Item definitions and the lookup seam used by containers

use crate::error::Result;
use crate::item::ItemId;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static per-type item data the container engine cares about
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Item type id
    pub id: ItemId,
    /// Whether units of this type aggregate into one stack
    #[serde(default)]
    pub stackable: bool,
    /// Linked placeholder type (or, for a placeholder, the real type)
    #[serde(default)]
    pub placeholder_id: Option<ItemId>,
    /// Marker id; equals the placeholder template when this type is a placeholder
    #[serde(default)]
    pub placeholder_marker_id: u32,
}

impl ItemDefinition {
    /// Create a non-stackable definition
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Set stackability
    pub fn with_stackable(mut self, stackable: bool) -> Self {
        self.stackable = stackable;
        self
    }

    /// Link to a placeholder type
    pub fn with_placeholder(mut self, placeholder_id: ItemId) -> Self {
        self.placeholder_id = Some(placeholder_id);
        self
    }

    /// Set the placeholder marker id
    pub fn with_placeholder_marker(mut self, marker: u32) -> Self {
        self.placeholder_marker_id = marker;
        self
    }

    /// Whether this definition describes a placeholder itself
    pub fn is_placeholder(&self, template: u32) -> bool {
        self.placeholder_marker_id == template
    }
}

/// Source of item definitions.
///
/// Containers call this on every `add`/`remove`/`count` without caching,
/// so implementations should answer from memory.
pub trait ItemDefinitionProvider: Send + Sync {
    /// Look up the definition for an item id
    fn definition(&self, id: ItemId) -> Option<ItemDefinition>;
}

impl ItemDefinitionProvider for HashMap<ItemId, ItemDefinition> {
    fn definition(&self, id: ItemId) -> Option<ItemDefinition> {
        self.get(&id).cloned()
    }
}

/// Shared, reloadable definition cache
#[derive(Debug, Default)]
pub struct ItemCatalog {
    definitions: RwLock<HashMap<ItemId, ItemDefinition>>,
}

impl ItemCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a JSON array of definitions
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog = Self::new();
        catalog.reload_json(json)?;
        Ok(catalog)
    }

    /// Replace every definition with the contents of a JSON array.
    /// On parse failure the current definitions are left untouched.
    pub fn reload_json(&self, json: &str) -> Result<usize> {
        let parsed: Vec<ItemDefinition> = serde_json::from_str(json)?;
        let count = parsed.len();
        let map = parsed.into_iter().map(|def| (def.id, def)).collect();
        *self.definitions.write() = map;
        log::debug!("Loaded {} item definitions", count);
        Ok(count)
    }

    /// Insert or overwrite a single definition
    pub fn register(&self, definition: ItemDefinition) {
        self.definitions.write().insert(definition.id, definition);
    }

    /// Builder-style registration
    pub fn with(self, definition: ItemDefinition) -> Self {
        self.register(definition);
        self
    }

    /// Number of known definitions
    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    /// Whether the catalog has no definitions
    pub fn is_empty(&self) -> bool {
        self.definitions.read().is_empty()
    }
}

impl ItemDefinitionProvider for ItemCatalog {
    fn definition(&self, id: ItemId) -> Option<ItemDefinition> {
        self.definitions.read().get(&id).cloned()
    }
}
