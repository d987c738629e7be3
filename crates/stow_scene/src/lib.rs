//! stow_scene - Retained scene tree for Stowage
//!
//! A deliberately small scene layer: named nodes with role tags and
//! parent-child links, plus the canvas handle that placed objects share.
//! There is no rendering and no transform math here - higher layers treat
//! this tree as the single source of truth for "what hangs under what".
//!
//! # Example
//!
//! ```ignore
//! use stow_scene::Scene;
//!
//! let mut scene = Scene::new();
//! let root = scene.spawn("stage");
//! let shelf = scene.spawn_child(root, "shelf")?;
//! let crate_node = scene.spawn_child(root, "crate")?;
//!
//! // Hang the crate under the shelf
//! scene.set_parent(crate_node, shelf)?;
//! ```

mod canvas;
mod node;
mod scene;

pub use canvas::{Canvas, CanvasId};
pub use node::{Node, NodeId};
pub use scene::{Scene, SceneError};
