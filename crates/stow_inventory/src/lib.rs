//! stow_inventory - Container and slot bookkeeping
//!
//! The runtime layer between a game's item objects and its UI: a registry
//! of named containers, each holding named slots, into which items are
//! placed, removed, and queried.
//!
//! # Features
//!
//! - Two-level name index: container name -> slot name -> item
//! - Single-occupancy slots with no implicit eviction
//! - Ownership-transferring placement: a failed placement hands the item
//!   back to the caller
//! - Swappable lost-item policy per manager instance
//! - Fail-fast setup from a tagged scene tree, with an opt-in permissive
//!   mode
//! - Data-driven layouts loadable from JSON
//!
//! # Example
//!
//! ```ignore
//! use stow_inventory::prelude::*;
//! use stow_scene::{Canvas, Scene};
//!
//! let mut scene = Scene::new();
//! let stage = scene.spawn("stage");
//!
//! let layout = LayoutDefinition::from_json(r#"{
//!     "containers": [{ "name": "belt", "slots": ["left", "right"] }]
//! }"#)?;
//! let container_root = layout.spawn(&mut scene, stage)?;
//! let item_root = scene.spawn_child(stage, "items")?;
//!
//! let mut manager = InventoryManager::new(
//!     &scene,
//!     Canvas::new(1280.0, 720.0),
//!     container_root,
//!     item_root,
//! )?;
//!
//! let dagger = Item::new("dagger", scene.spawn("dagger"));
//! if let Err(lost) = manager.add_item(&mut scene, "belt", "left", dagger) {
//!     manager.handle_lost_item(&mut scene, lost);
//! }
//! ```

pub mod container;
pub mod error;
pub mod item;
pub mod layout;
pub mod manager;
pub mod slot;

pub mod prelude {
    pub use crate::container::{Container, CONTAINER_TAG};
    pub use crate::error::{LookupError, SetupError};
    pub use crate::item::{Item, SlotRef};
    pub use crate::layout::{ContainerLayout, LayoutDefinition};
    pub use crate::manager::{InventoryManager, LostItemHandler, Validation};
    pub use crate::slot::{Slot, SLOT_TAG};
}

pub use prelude::*;
