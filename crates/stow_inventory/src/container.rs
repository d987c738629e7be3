//! Containers - named collections of slots

use std::collections::HashMap;

use log::warn;
use stow_scene::{NodeId, Scene};

use crate::error::SetupError;
use crate::item::Item;
use crate::manager::Validation;
use crate::slot::{Slot, SLOT_TAG};

/// Role marker a scene node must carry to be discovered as a container
pub const CONTAINER_TAG: &str = "stowage.container";

/// A named collection of slots.
///
/// Containers are discovered from the scene during manager setup and are
/// never created or removed afterwards. Slot names are unique within a
/// container; the same slot name may appear in other containers.
#[derive(Debug)]
pub struct Container {
    name: String,
    slots: HashMap<String, Slot>,
}

impl Container {
    /// Build a container from a scene node whose children define the
    /// slots.
    ///
    /// Every child must carry [`SLOT_TAG`] and a name unique within this
    /// container. Under [`Validation::Permissive`] an unmarked child is
    /// skipped with a warning instead of failing; duplicate slot names are
    /// fatal in both modes.
    pub(crate) fn from_node(
        scene: &Scene,
        node: NodeId,
        validation: Validation,
    ) -> Result<Self, SetupError> {
        let name = scene.name(node).unwrap_or_default().to_string();
        let mut slots = HashMap::new();

        for &child in scene.children(node) {
            let child_name = scene.name(child).unwrap_or_default();
            if scene.tag(child) != Some(SLOT_TAG) {
                match validation {
                    Validation::Strict => {
                        return Err(SetupError::NotASlot {
                            container: name,
                            node: child_name.to_string(),
                        });
                    }
                    Validation::Permissive => {
                        warn!(
                            "skipping node '{}' under container '{}': not a slot",
                            child_name, name
                        );
                        continue;
                    }
                }
            }
            if slots.contains_key(child_name) {
                return Err(SetupError::DuplicateSlot {
                    container: name,
                    name: child_name.to_string(),
                });
            }
            slots.insert(child_name.to_string(), Slot::new(&name, child_name));
        }

        Ok(Self { name, slots })
    }

    /// Get the container name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a slot by name
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    /// Get the full slot index, keyed by slot name.
    ///
    /// This is a read-only view; all mutation goes through
    /// [`try_add_to_slot`](Self::try_add_to_slot) so the occupancy
    /// bookkeeping stays consistent.
    pub fn slots(&self) -> &HashMap<String, Slot> {
        &self.slots
    }

    /// Get the number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the container has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Try to place an item into a named slot.
    ///
    /// An unknown slot name is an ordinary negative result - the item is
    /// handed back with no side effect, since slot names routinely come
    /// from dynamic UI state. Otherwise the slot's own
    /// [`assign`](Slot::assign) decides, and its result is passed through
    /// unchanged.
    pub fn try_add_to_slot(&mut self, slot_name: &str, item: Item) -> Result<(), Item> {
        match self.slots.get_mut(slot_name) {
            Some(slot) => slot.assign(item),
            None => Err(item),
        }
    }

    /// Remove and return the occupant of a named slot, if any
    pub fn clear_slot(&mut self, slot_name: &str) -> Option<Item> {
        self.slots.get_mut(slot_name)?.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stow_scene::Scene;

    fn build_scene() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let node = scene.spawn("belt");
        scene.set_tag(node, CONTAINER_TAG).unwrap();
        scene.spawn_tagged(node, "left", SLOT_TAG).unwrap();
        scene.spawn_tagged(node, "right", SLOT_TAG).unwrap();
        (scene, node)
    }

    #[test]
    fn test_discovery() {
        let (scene, node) = build_scene();
        let container = Container::from_node(&scene, node, Validation::Strict).unwrap();

        assert_eq!(container.name(), "belt");
        assert_eq!(container.len(), 2);
        assert!(container.slot("left").is_some());
        assert!(container.slot("right").is_some());
        assert!(container.slot("middle").is_none());
    }

    #[test]
    fn test_unmarked_child_is_fatal_when_strict() {
        let (mut scene, node) = build_scene();
        scene.spawn_child(node, "decoration").unwrap();

        let result = Container::from_node(&scene, node, Validation::Strict);
        assert_eq!(
            result.unwrap_err(),
            SetupError::NotASlot {
                container: "belt".to_string(),
                node: "decoration".to_string(),
            }
        );
    }

    #[test]
    fn test_unmarked_child_is_skipped_when_permissive() {
        let (mut scene, node) = build_scene();
        scene.spawn_child(node, "decoration").unwrap();

        let container = Container::from_node(&scene, node, Validation::Permissive).unwrap();
        assert_eq!(container.len(), 2);
    }

    #[test]
    fn test_duplicate_slot_names_are_fatal() {
        let (mut scene, node) = build_scene();
        scene.spawn_tagged(node, "left", SLOT_TAG).unwrap();

        let result = Container::from_node(&scene, node, Validation::Permissive);
        assert_eq!(
            result.unwrap_err(),
            SetupError::DuplicateSlot {
                container: "belt".to_string(),
                name: "left".to_string(),
            }
        );
    }

    #[test]
    fn test_try_add_to_unknown_slot() {
        let (scene, node) = build_scene();
        let mut container = Container::from_node(&scene, node, Validation::Strict).unwrap();

        let item = Item::new("dagger", NodeId::new(9, 0));
        let rejected = container.try_add_to_slot("middle", item).unwrap_err();
        assert_eq!(rejected.name(), "dagger");
    }

    #[test]
    fn test_add_and_clear_round_trip() {
        let (scene, node) = build_scene();
        let mut container = Container::from_node(&scene, node, Validation::Strict).unwrap();

        let item = Item::new("dagger", NodeId::new(9, 0));
        assert!(container.try_add_to_slot("left", item).is_ok());
        assert!(container.slot("left").unwrap().is_occupied());

        let removed = container.clear_slot("left").unwrap();
        assert_eq!(removed.name(), "dagger");
        assert!(!container.slot("left").unwrap().is_occupied());
    }
}
