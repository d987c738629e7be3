//! The inventory manager
//!
//! Owns the container registry and the lost-item policy, and is the one
//! entry point game and UI code use to place items.

use std::collections::HashMap;

use log::warn;
use stow_scene::{Canvas, NodeId, Scene};

use crate::container::{Container, CONTAINER_TAG};
use crate::error::{LookupError, SetupError};
use crate::item::Item;
use crate::slot::Slot;

/// Policy for items that end up with nowhere to go.
///
/// A single swappable value, not a subscriber list: setting a new handler
/// fully replaces the old one. The handler receives the scene so it can
/// remove the item's node from play.
pub type LostItemHandler = Box<dyn FnMut(&mut Scene, Item)>;

/// How setup treats scene nodes that do not conform to the expected
/// container/slot shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Any malformed child is a fatal setup error. The default; catches
    /// authoring mistakes before any gameplay runs.
    Strict,
    /// Unmarked children are skipped with a warning. Duplicate names are
    /// fatal in this mode too.
    Permissive,
}

/// The inventory system root.
///
/// Holds the name-keyed container registry, the shared canvas, the scene
/// node that visually collects placed items, and the current lost-item
/// policy. The registry is fully populated before construction returns
/// and never changes afterwards.
pub struct InventoryManager {
    canvas: Canvas,
    item_root: NodeId,
    containers: HashMap<String, Container>,
    lost_item_handler: LostItemHandler,
}

impl InventoryManager {
    /// Build the manager with strict validation.
    ///
    /// Iterates the direct children of `container_root`; each must carry
    /// the container marker and a registry-unique name, and each of their
    /// children must be a well-formed slot. Any violation aborts setup.
    pub fn new(
        scene: &Scene,
        canvas: Canvas,
        container_root: NodeId,
        item_root: NodeId,
    ) -> Result<Self, SetupError> {
        Self::with_validation(scene, canvas, container_root, item_root, Validation::Strict)
    }

    /// Build the manager with an explicit validation mode.
    pub fn with_validation(
        scene: &Scene,
        canvas: Canvas,
        container_root: NodeId,
        item_root: NodeId,
        validation: Validation,
    ) -> Result<Self, SetupError> {
        if !scene.is_alive(container_root) {
            return Err(SetupError::MissingRoot {
                which: "container root",
            });
        }
        if !scene.is_alive(item_root) {
            return Err(SetupError::MissingRoot { which: "item root" });
        }

        let mut containers = HashMap::new();
        for &child in scene.children(container_root) {
            let child_name = scene.name(child).unwrap_or_default();
            if scene.tag(child) != Some(CONTAINER_TAG) {
                match validation {
                    Validation::Strict => {
                        return Err(SetupError::NotAContainer {
                            node: child_name.to_string(),
                        });
                    }
                    Validation::Permissive => {
                        warn!(
                            "skipping node '{}' under the container root: not a container",
                            child_name
                        );
                        continue;
                    }
                }
            }
            if containers.contains_key(child_name) {
                return Err(SetupError::DuplicateContainer {
                    name: child_name.to_string(),
                });
            }
            let container = Container::from_node(scene, child, validation)?;
            containers.insert(container.name().to_string(), container);
        }

        Ok(Self {
            canvas,
            item_root,
            containers,
            lost_item_handler: default_lost_item_handler(),
        })
    }

    /// Get the shared canvas placed items are stamped with
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Get the scene node that visually collects placed items
    pub fn item_root(&self) -> NodeId {
        self.item_root
    }

    /// Look up a registered container by name.
    ///
    /// An unknown name here means mis-authored content, so it surfaces as
    /// an error rather than a silent negative.
    pub fn get_container(&self, name: &str) -> Result<&Container, LookupError> {
        self.containers.get(name).ok_or_else(|| LookupError::ContainerNotFound {
            name: name.to_string(),
        })
    }

    /// Look up a registered container by name, mutably.
    ///
    /// This is the path for direct container operations such as
    /// [`clear_slot`](Container::clear_slot). Adding items this way skips
    /// the re-parenting and canvas stamping that
    /// [`add_item`](Self::add_item) performs.
    pub fn get_container_mut(&mut self, name: &str) -> Result<&mut Container, LookupError> {
        self.containers
            .get_mut(name)
            .ok_or_else(|| LookupError::ContainerNotFound {
                name: name.to_string(),
            })
    }

    /// Get a container's full slot index, keyed by slot name
    pub fn container_slots(&self, name: &str) -> Result<&HashMap<String, Slot>, LookupError> {
        self.get_container(name).map(Container::slots)
    }

    /// Iterate all registered containers
    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.containers.values()
    }

    /// Replace the lost-item policy
    pub fn set_lost_item_handler(&mut self, handler: LostItemHandler) {
        self.lost_item_handler = handler;
    }

    /// Access the current lost-item policy
    pub fn lost_item_handler(&mut self) -> &mut LostItemHandler {
        &mut self.lost_item_handler
    }

    /// Run the current lost-item policy on an item.
    ///
    /// [`add_item`](Self::add_item) never calls this on its own: a failed
    /// placement only reports, and the caller decides whether the item is
    /// truly lost or should be retried elsewhere.
    pub fn handle_lost_item(&mut self, scene: &mut Scene, item: Item) {
        (self.lost_item_handler)(scene, item)
    }

    /// Place an item into a named slot of a named container.
    ///
    /// The item is moved under the item root and stamped with the shared
    /// canvas before any lookup happens, so it ends up in the system's
    /// part of the scene even when placement fails. On failure the item
    /// comes back in the `Err` variant - still re-parented, not slotted -
    /// and the caller chooses what to do with it, typically
    /// [`handle_lost_item`](Self::handle_lost_item) or another attempt.
    pub fn add_item(
        &mut self,
        scene: &mut Scene,
        container_name: &str,
        slot_name: &str,
        mut item: Item,
    ) -> Result<(), Item> {
        if let Err(err) = scene.set_parent(item.node(), self.item_root) {
            warn!(
                "could not move item '{}' under the item root: {}",
                item.name(),
                err
            );
        }
        item.set_canvas(self.canvas.id());

        let Some(container) = self.containers.get_mut(container_name) else {
            return Err(item);
        };
        container.try_add_to_slot(slot_name, item)
    }
}

fn default_lost_item_handler() -> LostItemHandler {
    Box::new(|scene, item| {
        warn!("lost item '{}', destroying it", item.name());
        scene.despawn(item.node());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::SLOT_TAG;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Fixture {
        scene: Scene,
        container_root: NodeId,
        item_root: NodeId,
    }

    fn fixture() -> Fixture {
        let mut scene = Scene::new();
        let stage = scene.spawn("stage");
        let container_root = scene.spawn_child(stage, "containers").unwrap();
        let item_root = scene.spawn_child(stage, "items").unwrap();

        let belt = scene
            .spawn_tagged(container_root, "belt", CONTAINER_TAG)
            .unwrap();
        scene.spawn_tagged(belt, "left", SLOT_TAG).unwrap();
        scene.spawn_tagged(belt, "right", SLOT_TAG).unwrap();

        let chest = scene
            .spawn_tagged(container_root, "chest", CONTAINER_TAG)
            .unwrap();
        scene.spawn_tagged(chest, "lid", SLOT_TAG).unwrap();

        Fixture {
            scene,
            container_root,
            item_root,
        }
    }

    fn manager(fx: &Fixture) -> InventoryManager {
        InventoryManager::new(
            &fx.scene,
            Canvas::new(1280.0, 720.0),
            fx.container_root,
            fx.item_root,
        )
        .unwrap()
    }

    fn spawn_item(fx: &mut Fixture, name: &str) -> Item {
        Item::new(name, fx.scene.spawn(name))
    }

    #[test]
    fn test_setup_discovers_containers() {
        let fx = fixture();
        let manager = manager(&fx);

        assert_eq!(manager.containers().count(), 2);
        assert_eq!(manager.get_container("belt").unwrap().len(), 2);
        assert_eq!(manager.get_container("chest").unwrap().len(), 1);
    }

    #[test]
    fn test_setup_fails_on_dead_roots() {
        let mut fx = fixture();
        fx.scene.despawn(fx.item_root);

        let result = InventoryManager::new(
            &fx.scene,
            Canvas::new(1280.0, 720.0),
            fx.container_root,
            fx.item_root,
        );
        assert_eq!(
            result.err(),
            Some(SetupError::MissingRoot { which: "item root" })
        );
    }

    #[test]
    fn test_setup_fails_on_unmarked_child() {
        let mut fx = fixture();
        fx.scene.spawn_child(fx.container_root, "stray").unwrap();

        let result = InventoryManager::new(
            &fx.scene,
            Canvas::new(1280.0, 720.0),
            fx.container_root,
            fx.item_root,
        );
        assert_eq!(
            result.err(),
            Some(SetupError::NotAContainer {
                node: "stray".to_string()
            })
        );
    }

    #[test]
    fn test_permissive_setup_skips_unmarked_child() {
        let mut fx = fixture();
        fx.scene.spawn_child(fx.container_root, "stray").unwrap();

        let manager = InventoryManager::with_validation(
            &fx.scene,
            Canvas::new(1280.0, 720.0),
            fx.container_root,
            fx.item_root,
            Validation::Permissive,
        )
        .unwrap();
        assert_eq!(manager.containers().count(), 2);
    }

    #[test]
    fn test_setup_fails_on_duplicate_container() {
        let mut fx = fixture();
        fx.scene
            .spawn_tagged(fx.container_root, "belt", CONTAINER_TAG)
            .unwrap();

        let result = InventoryManager::new(
            &fx.scene,
            Canvas::new(1280.0, 720.0),
            fx.container_root,
            fx.item_root,
        );
        assert_eq!(
            result.err(),
            Some(SetupError::DuplicateContainer {
                name: "belt".to_string()
            })
        );
    }

    #[test]
    fn test_get_container_identity_is_stable() {
        let fx = fixture();
        let manager = manager(&fx);

        let first = manager.get_container("belt").unwrap();
        let second = manager.get_container("belt").unwrap();
        assert!(std::ptr::eq(first, second));

        assert_eq!(
            manager.get_container("vault").err(),
            Some(LookupError::ContainerNotFound {
                name: "vault".to_string()
            })
        );
    }

    #[test]
    fn test_add_item_success() {
        let mut fx = fixture();
        let mut manager = manager(&fx);
        let item = spawn_item(&mut fx, "dagger");
        let node = item.node();

        assert!(manager.add_item(&mut fx.scene, "belt", "left", item).is_ok());

        let slots = manager.container_slots("belt").unwrap();
        let occupant = slots["left"].occupant().unwrap();
        assert_eq!(occupant.name(), "dagger");
        assert_eq!(occupant.canvas(), Some(manager.canvas().id()));
        assert_eq!(fx.scene.parent(node), Some(fx.item_root));
    }

    #[test]
    fn test_add_item_to_occupied_slot() {
        let mut fx = fixture();
        let mut manager = manager(&fx);
        let first = spawn_item(&mut fx, "dagger");
        manager.add_item(&mut fx.scene, "belt", "left", first).unwrap();

        let second = spawn_item(&mut fx, "torch");
        let node = second.node();
        let rejected = manager
            .add_item(&mut fx.scene, "belt", "left", second)
            .unwrap_err();

        assert_eq!(rejected.name(), "torch");
        assert!(!rejected.is_slotted());
        // Prior occupant is untouched
        let slots = manager.container_slots("belt").unwrap();
        assert_eq!(slots["left"].occupant().unwrap().name(), "dagger");
        // The failed item was still moved under the item root
        assert_eq!(fx.scene.parent(node), Some(fx.item_root));
    }

    #[test]
    fn test_add_item_to_unknown_container() {
        let mut fx = fixture();
        let mut manager = manager(&fx);
        let item = spawn_item(&mut fx, "dagger");
        let node = item.node();

        let rejected = manager
            .add_item(&mut fx.scene, "vault", "left", item)
            .unwrap_err();

        assert_eq!(rejected.name(), "dagger");
        // Re-parenting and canvas stamping happen even on this path
        assert_eq!(fx.scene.parent(node), Some(fx.item_root));
        assert!(rejected.canvas().is_some());
    }

    #[test]
    fn test_clear_then_replace() {
        let mut fx = fixture();
        let mut manager = manager(&fx);
        let dagger = spawn_item(&mut fx, "dagger");
        manager.add_item(&mut fx.scene, "belt", "left", dagger).unwrap();

        let removed = manager
            .get_container_mut("belt")
            .unwrap()
            .clear_slot("left")
            .unwrap();
        assert_eq!(removed.name(), "dagger");
        assert!(!removed.is_slotted());

        let torch = spawn_item(&mut fx, "torch");
        assert!(manager.add_item(&mut fx.scene, "belt", "left", torch).is_ok());
    }

    #[test]
    fn test_add_item_to_unknown_slot() {
        let mut fx = fixture();
        let mut manager = manager(&fx);
        let item = spawn_item(&mut fx, "dagger");

        let rejected = manager
            .add_item(&mut fx.scene, "belt", "middle", item)
            .unwrap_err();
        assert_eq!(rejected.name(), "dagger");
        assert!(!rejected.is_slotted());
    }

    #[test]
    fn test_default_lost_item_handler_despawns() {
        let mut fx = fixture();
        let mut manager = manager(&fx);
        let item = spawn_item(&mut fx, "dagger");
        let node = item.node();

        let rejected = manager
            .add_item(&mut fx.scene, "vault", "left", item)
            .unwrap_err();
        manager.handle_lost_item(&mut fx.scene, rejected);

        assert!(!fx.scene.is_alive(node));
    }

    #[test]
    fn test_replacing_lost_item_handler() {
        let mut fx = fixture();
        let mut manager = manager(&fx);

        let first_calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&first_calls);
        manager.set_lost_item_handler(Box::new(move |_, _| {
            counter.set(counter.get() + 1);
        }));

        let item = spawn_item(&mut fx, "dagger");
        manager.handle_lost_item(&mut fx.scene, item);
        assert_eq!(first_calls.get(), 1);

        let second_calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&second_calls);
        manager.set_lost_item_handler(Box::new(move |_, _| {
            counter.set(counter.get() + 1);
        }));

        let item = spawn_item(&mut fx, "torch");
        manager.handle_lost_item(&mut fx.scene, item);

        // Only the replacement runs; the old handler is never invoked again
        assert_eq!(first_calls.get(), 1);
        assert_eq!(second_calls.get(), 1);
    }
}
