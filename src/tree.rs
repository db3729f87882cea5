//! Namespace tree — arena storage for entities grouped by dotted namespace path.
//!
//! Nodes and entities live in flat vectors and refer to each other by index.
//! Ownership is strictly top-down; the parent link on each node is a plain
//! [`NodeId`], so the tree never holds reference cycles.
//!
//! Every public lookup is checked: an id outside this tree's arena (for
//! example one taken from a larger tree) yields `None` instead of panicking.

use std::collections::HashMap;

use crate::model::Entity;

/// Index of a node in a [`NamespaceTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Index of an entity in a [`NamespaceTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl EntityId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A namespace level holding entities and nested namespaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceNode {
    /// `None` only for the root.
    pub name: Option<String>,
    /// Owning node, `None` for the root.
    pub parent: Option<NodeId>,
    /// Distance from the root (root = 0, top-level namespaces = 1).
    pub depth: usize,
    /// Entities in first-insertion order, unique by name.
    pub entities: Vec<EntityId>,
    /// Child namespaces in first-discovery order, unique by name.
    pub children: Vec<NodeId>,
}

impl NamespaceNode {
    fn root() -> Self {
        Self {
            name: None,
            parent: None,
            depth: 0,
            entities: Vec::new(),
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[derive(Clone, Debug)]
struct StoredEntity {
    entity: Entity,
    location: NodeId,
    resolved_parent: Option<EntityId>,
}

/// Tree of namespaces built once per export from a flat entity list.
///
/// Provides:
/// - Path-guided insertion that creates intermediate namespaces on demand
/// - Silent de-duplication of same-named entities within a namespace
/// - Resolution of `parent` names to stored entities
#[derive(Clone, Debug)]
pub struct NamespaceTree {
    nodes: Vec<NamespaceNode>,
    entities: Vec<StoredEntity>,
}

impl Default for NamespaceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![NamespaceNode::root()],
            entities: Vec::new(),
        }
    }

    /// Build a tree from entities in input order and resolve parent references.
    pub fn assemble(entities: impl IntoIterator<Item = Entity>) -> Self {
        let mut tree = Self::new();
        for entity in entities {
            tree.insert(entity);
        }
        tree.resolve_parents();
        tree
    }

    /// Insert an entity at the namespace its path addresses, starting from the root.
    ///
    /// Returns `None` if the target namespace already holds an entity with the
    /// same name; the new entity is dropped in that case.
    pub fn insert(&mut self, entity: Entity) -> Option<EntityId> {
        self.insert_at(NodeId::ROOT, entity)
    }

    /// Insert an entity relative to `start`.
    ///
    /// Each namespace segment is looked up among the current node's children
    /// and created when missing. Returns `None` without inserting when `start`
    /// is not a node of this tree.
    pub fn insert_at(&mut self, start: NodeId, entity: Entity) -> Option<EntityId> {
        self.node(start)?;
        // From here on `current` is always an index handed out by this arena.
        let segments: Vec<String> = entity.namespace_segments().map(String::from).collect();

        let mut current = start;
        for segment in &segments {
            current = match self.find_child(current, segment) {
                Some(existing) => existing,
                None => self.create_child(current, segment),
            };
        }

        if self.find_entity(current, &entity.name).is_some() {
            tracing::trace!(
                entity = %entity.qualified_name(),
                "skipping duplicate entity"
            );
            return None;
        }

        let id = EntityId(self.entities.len());
        self.entities.push(StoredEntity {
            entity,
            location: current,
            resolved_parent: None,
        });
        self.nodes[current.0].entities.push(id);
        Some(id)
    }

    fn create_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        let depth = self.nodes[parent.0].depth + 1;
        self.nodes.push(NamespaceNode {
            name: Some(name.to_string()),
            parent: Some(parent),
            depth,
            entities: Vec::new(),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        tracing::trace!(namespace = name, depth, "created namespace");
        id
    }

    /// Resolve every entity's `parent` name to a stored entity.
    ///
    /// Lookup tries the full qualified path first, then falls back to the
    /// first entity inserted with that bare name. Names that match nothing
    /// stay unresolved and are rendered verbatim.
    pub fn resolve_parents(&mut self) {
        let mut by_path: HashMap<String, EntityId> = HashMap::new();
        let mut by_name: HashMap<&str, EntityId> = HashMap::new();
        for (idx, stored) in self.entities.iter().enumerate() {
            let id = EntityId(idx);
            if let Some(path) = self.qualified_name(id) {
                by_path.entry(path).or_insert(id);
            }
            by_name.entry(stored.entity.name.as_str()).or_insert(id);
        }

        let resolved: Vec<Option<EntityId>> = self
            .entities
            .iter()
            .map(|stored| {
                let parent = stored.entity.parent.as_deref()?;
                by_path
                    .get(parent)
                    .or_else(|| by_name.get(parent))
                    .copied()
            })
            .collect();

        for (stored, parent) in self.entities.iter_mut().zip(resolved) {
            stored.resolved_parent = parent;
        }
    }

    /// Entities whose `parent` name did not resolve, with that name.
    pub fn unresolved_parents(&self) -> Vec<(EntityId, &str)> {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, stored)| stored.resolved_parent.is_none())
            .filter_map(|(idx, stored)| Some((EntityId(idx), stored.entity.parent.as_deref()?)))
            .collect()
    }

    /// Resolved supertype of an entity.
    pub fn parent_of(&self, id: EntityId) -> Option<&Entity> {
        let parent = self.entities.get(id.0)?.resolved_parent?;
        self.entity(parent)
    }

    #[inline]
    pub fn root(&self) -> &NamespaceNode {
        &self.nodes[NodeId::ROOT.0]
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&NamespaceNode> {
        self.nodes.get(id.0)
    }

    #[inline]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0).map(|stored| &stored.entity)
    }

    /// Namespace node that owns an entity.
    #[inline]
    pub fn location_of(&self, id: EntityId) -> Option<NodeId> {
        self.entities.get(id.0).map(|stored| stored.location)
    }

    /// Child namespace of `node` with the given name.
    pub fn find_child(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.node(node)?
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).and_then(|n| n.name.as_deref()) == Some(name))
    }

    /// Entity directly owned by `node` with the given name.
    pub fn find_entity(&self, node: NodeId, name: &str) -> Option<EntityId> {
        self.node(node)?
            .entities
            .iter()
            .copied()
            .find(|&id| self.entity(id).is_some_and(|e| e.name == name))
    }

    /// Walk "A.B.C" from the root without creating anything.
    pub fn node_by_path(&self, path: &str) -> Option<NodeId> {
        if path.is_empty() {
            return Some(NodeId::ROOT);
        }
        path.split('.')
            .try_fold(NodeId::ROOT, |node, segment| self.find_child(node, segment))
    }

    /// Dot-separated path of a node, empty for the root.
    pub fn node_path(&self, id: NodeId) -> Option<String> {
        self.node(id)?;
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current.and_then(|id| self.node(id)) {
            if let Some(name) = &node.name {
                segments.push(name.as_str());
            }
            current = node.parent;
        }
        segments.reverse();
        Some(segments.join("."))
    }

    /// Full dot-separated name of a stored entity, derived from where it lives.
    pub fn qualified_name(&self, id: EntityId) -> Option<String> {
        let stored = self.entities.get(id.0)?;
        let path = self.node_path(stored.location)?;
        Some(if path.is_empty() {
            stored.entity.name.clone()
        } else {
            format!("{}.{}", path, stored.entity.name)
        })
    }

    /// All stored entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(idx, stored)| (EntityId(idx), &stored.entity))
    }

    /// Number of stored entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of namespace nodes, root included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

// =============================================================================
// Tests
// =============================================================================
