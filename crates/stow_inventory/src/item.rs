//! Item handles

use stow_scene::{CanvasId, NodeId};

/// Names the slot an item currently occupies.
///
/// This is a back-reference only: a (container, slot) name pair, never a
/// handle to the slot itself, so item and slot lifetimes stay decoupled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRef {
    /// Name of the owning container
    pub container: String,
    /// Name of the slot within that container
    pub slot: String,
}

impl SlotRef {
    /// Create a new slot reference
    pub fn new(container: impl Into<String>, slot: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            slot: slot.into(),
        }
    }
}

/// Handle to a placeable object.
///
/// Items are created by the surrounding game code, never by the inventory
/// system. Handing one to
/// [`InventoryManager::add_item`](crate::InventoryManager::add_item)
/// transfers it into the system; a failed placement hands it straight
/// back. The canvas and location fields are maintained by the system and
/// are read-only from the outside.
#[derive(Debug)]
pub struct Item {
    name: String,
    node: NodeId,
    canvas: Option<CanvasId>,
    location: Option<SlotRef>,
}

impl Item {
    /// Create a new item handle for a scene object
    pub fn new(name: impl Into<String>, node: NodeId) -> Self {
        Self {
            name: name.into(),
            node,
            canvas: None,
            location: None,
        }
    }

    /// Get the item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the item's scene node
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Get the canvas the item was last placed on, if any
    pub fn canvas(&self) -> Option<CanvasId> {
        self.canvas
    }

    /// Get the slot currently holding the item, if any
    pub fn location(&self) -> Option<&SlotRef> {
        self.location.as_ref()
    }

    /// Check if the item currently sits in a slot
    pub fn is_slotted(&self) -> bool {
        self.location.is_some()
    }

    pub(crate) fn set_canvas(&mut self, canvas: CanvasId) {
        self.canvas = Some(canvas);
    }

    pub(crate) fn set_location(&mut self, location: Option<SlotRef>) {
        self.location = location;
    }
}
