//! Data-driven container layouts
//!
//! A layout describes the container/slot tree as plain data, so the node
//! structure the manager discovers at setup can come from a config file
//! instead of hand-written spawning code.

use serde::{Deserialize, Serialize};
use stow_scene::{NodeId, Scene, SceneError};

use crate::container::CONTAINER_TAG;
use crate::slot::SLOT_TAG;

/// One container and the slots it should expose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerLayout {
    /// Container name, unique within the layout
    pub name: String,
    /// Slot names, unique within the container
    pub slots: Vec<String>,
}

impl ContainerLayout {
    /// Create an empty container layout
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
        }
    }

    /// Add a slot
    pub fn with_slot(mut self, name: impl Into<String>) -> Self {
        self.slots.push(name.into());
        self
    }
}

/// A full inventory layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutDefinition {
    /// The containers to spawn, in order
    pub containers: Vec<ContainerLayout>,
}

impl LayoutDefinition {
    /// Parse a layout from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add a container
    pub fn with_container(mut self, container: ContainerLayout) -> Self {
        self.containers.push(container);
        self
    }

    /// Spawn the tagged container/slot tree under `parent` and return the
    /// container root to hand to the manager.
    ///
    /// Spawning performs no name validation; the manager's setup remains
    /// the single authority on well-formedness.
    pub fn spawn(&self, scene: &mut Scene, parent: NodeId) -> Result<NodeId, SceneError> {
        let root = scene.spawn_child(parent, "containers")?;
        for container in &self.containers {
            let node = scene.spawn_tagged(root, &container.name, CONTAINER_TAG)?;
            for slot in &container.slots {
                scene.spawn_tagged(node, slot, SLOT_TAG)?;
            }
        }
        Ok(root)
    }
}
