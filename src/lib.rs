//! # Namespace Declaration Builder (decl-tree)
//!
//! Turns a flat list of class/interface descriptions into one ambient
//! TypeScript declaration document.
//!
//! ## Design
//!
//! Two passes, data flows one way:
//!
//! ```text
//! Vec<Entity> ──assemble──▶ NamespaceTree ──render──▶ String
//! ```
//!
//! 1. [`NamespaceTree::assemble`] splits each entity's dotted namespace
//!    (`"Game.Render"`) and walks or creates one node per segment. Entities
//!    are unique by name inside a node; later duplicates are dropped.
//! 2. [`render`] emits the tree. Namespaces directly under the root become
//!    `declare namespace`, deeper ones plain `namespace`.
//!
//! ```
//! use decl_tree::{Entity, NamespaceTree, render};
//!
//! let tree = NamespaceTree::assemble([
//!     Entity::class("A").in_namespace("Foo"),
//!     Entity::class("B").in_namespace("Foo.Bar"),
//! ]);
//! let text = render(&tree);
//! assert!(text.starts_with("declare namespace Foo {"));
//! assert!(text.contains("    namespace Bar {"));
//! ```
//!
//! Writing the result to disk (with a prelude) lives in `decl-tree-build`.

pub mod model;
pub mod render;
pub mod tree;

pub use model::{Entity, EntityKind, Method, Parameter, Property, PropertyAccess, TypeRef};
pub use render::{
    DEFAULT_INDENT, Renderer, claimed_member_names, property_prefix, render, render_parameters,
    renderable_properties, type_annotation,
};
pub use tree::{EntityId, NamespaceNode, NamespaceTree, NodeId};
