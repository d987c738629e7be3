//! The scene tree
//!
//! A retained tree of named nodes with a free-list allocator. The tree is
//! purely logical: it tracks names, role tags, and parent-child links, and
//! leaves rendering concerns to whatever sits on top of it.

use core::fmt;

use crate::node::{Node, NodeId};

/// Errors that can occur during scene operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Node is dead or was never spawned
    NodeNotFound {
        /// The offending id
        node: NodeId,
    },
    /// Re-parenting would create a cycle
    CycleDetected {
        /// Child of the rejected operation
        child: NodeId,
        /// Parent of the rejected operation
        parent: NodeId,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound { node } => write!(f, "Node not found: {}", node),
            Self::CycleDetected { child, parent } => {
                write!(f, "Parenting {} under {} would create a cycle", child, parent)
            }
        }
    }
}

impl std::error::Error for SceneError {}

struct Entry {
    generation: u32,
    node: Option<Node>,
}

/// A scene tree with generational node storage.
///
/// Despawned indices are recycled through a free list; their generation is
/// bumped so stale [`NodeId`]s are detectably dead.
pub struct Scene {
    entries: Vec<Entry>,
    free_list: Vec<u32>,
    alive_count: usize,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            alive_count: 0,
        }
    }

    /// Create with initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            alive_count: 0,
        }
    }

    /// Spawn a root node
    pub fn spawn(&mut self, name: impl Into<String>) -> NodeId {
        self.allocate(Node::new(name))
    }

    /// Spawn a node as a child of an existing node
    pub fn spawn_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
    ) -> Result<NodeId, SceneError> {
        if !self.is_alive(parent) {
            return Err(SceneError::NodeNotFound { node: parent });
        }
        let mut node = Node::new(name);
        node.parent = Some(parent);
        let id = self.allocate(node);
        self.node_mut(parent).children.push(id);
        Ok(id)
    }

    /// Spawn a tagged child node
    pub fn spawn_tagged(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        tag: impl Into<String>,
    ) -> Result<NodeId, SceneError> {
        let id = self.spawn_child(parent, name)?;
        self.node_mut(id).tag = Some(tag.into());
        Ok(id)
    }

    /// Set or replace a node's role tag
    pub fn set_tag(&mut self, id: NodeId, tag: impl Into<String>) -> Result<(), SceneError> {
        if !self.is_alive(id) {
            return Err(SceneError::NodeNotFound { node: id });
        }
        self.node_mut(id).tag = Some(tag.into());
        Ok(())
    }

    /// Despawn a node and all of its descendants.
    ///
    /// Returns false if the node was already dead.
    pub fn despawn(&mut self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }

        // Detach from the parent's child list first
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|&c| c != id);
        }

        // Free the whole subtree
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let entry = &mut self.entries[current.index() as usize];
            if let Some(node) = entry.node.take() {
                entry.generation = entry.generation.wrapping_add(1);
                self.free_list.push(current.index());
                self.alive_count -= 1;
                stack.extend(node.children);
            }
        }
        true
    }

    /// Move a node under a new parent.
    ///
    /// The node is detached from its current parent (if any) and appended
    /// to the new parent's children. Both nodes must be alive, a node
    /// cannot be its own parent, and the new parent must not be a
    /// descendant of the child.
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) -> Result<(), SceneError> {
        if !self.is_alive(child) {
            return Err(SceneError::NodeNotFound { node: child });
        }
        if !self.is_alive(parent) {
            return Err(SceneError::NodeNotFound { node: parent });
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(SceneError::CycleDetected { child, parent });
        }

        if let Some(old_parent) = self.node(child).parent {
            if old_parent == parent {
                return Ok(());
            }
            self.node_mut(old_parent).children.retain(|&c| c != child);
        }

        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
        Ok(())
    }

    /// Check if `ancestor` appears in the parent chain of `node`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.get(node).and_then(Node::parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(Node::parent);
        }
        false
    }

    /// Check if a node id refers to a live node
    #[inline]
    pub fn is_alive(&self, id: NodeId) -> bool {
        if id.is_null() {
            return false;
        }
        self.entries
            .get(id.index() as usize)
            .map(|entry| entry.generation == id.generation() && entry.node.is_some())
            .unwrap_or(false)
    }

    /// Get a node by id
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !self.is_alive(id) {
            return None;
        }
        self.entries[id.index() as usize].node.as_ref()
    }

    /// Get a node's name
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Node::name)
    }

    /// Get a node's role tag
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::tag)
    }

    /// Get a node's parent
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// Get a node's children, in insertion order.
    ///
    /// Returns an empty slice for a dead node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    /// Find a direct child by name
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.name(child) == Some(name))
    }

    /// Get the number of live nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.alive_count
    }

    /// Check if the scene has no live nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alive_count == 0
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        self.alive_count += 1;

        if let Some(index) = self.free_list.pop() {
            let entry = &mut self.entries[index as usize];
            entry.node = Some(node);
            NodeId::new(index, entry.generation)
        } else {
            let index = self.entries.len() as u32;
            self.entries.push(Entry {
                generation: 0,
                node: Some(node),
            });
            NodeId::new(index, 0)
        }
    }

    // Callers must have checked liveness; indexes directly into storage.
    fn node(&self, id: NodeId) -> &Node {
        self.entries[id.index() as usize].node.as_ref().unwrap()
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.entries[id.index() as usize].node.as_mut().unwrap()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
