//! Slots - named locations holding at most one item

use crate::item::{Item, SlotRef};

/// Role marker a scene node must carry to be discovered as a slot
pub const SLOT_TAG: &str = "stowage.slot";

/// A named location capable of holding a single item.
///
/// The slot owns its occupant's handle while occupied and keeps the
/// occupant's location back-reference in step with its own record.
/// "Already occupied" is an ordinary outcome that callers branch on,
/// never an error.
#[derive(Debug)]
pub struct Slot {
    name: String,
    owner: String,
    occupant: Option<Item>,
}

impl Slot {
    /// Slots are built during container setup and live as long as their
    /// owning container.
    pub(crate) fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            occupant: None,
        }
    }

    /// Get the slot name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the name of the owning container
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Check if the slot currently holds an item
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Read-only access to the current occupant
    pub fn occupant(&self) -> Option<&Item> {
        self.occupant.as_ref()
    }

    /// Place an item into the slot.
    ///
    /// Succeeds only while the slot is empty. When it is occupied the item
    /// is handed back unchanged and the prior occupant is untouched; there
    /// is no implicit eviction - callers wanting replace semantics must
    /// [`clear`](Self::clear) first.
    pub fn assign(&mut self, mut item: Item) -> Result<(), Item> {
        if self.occupant.is_some() {
            return Err(item);
        }
        item.set_location(Some(SlotRef::new(&self.owner, &self.name)));
        self.occupant = Some(item);
        Ok(())
    }

    /// Remove and return the current occupant.
    ///
    /// Returns `None` when the slot is already empty; idempotent. The
    /// returned item's location back-reference is cleared.
    pub fn clear(&mut self) -> Option<Item> {
        let mut item = self.occupant.take()?;
        item.set_location(None);
        Some(item)
    }
}
