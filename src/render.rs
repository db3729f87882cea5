//! Declaration renderer — turns a [`NamespaceTree`] into ambient declaration text.
//!
//! Output shape:
//!
//! ```text
//! declare class Root {
//! }
//!
//! declare namespace Game {
//!     class Sprite extends Node {
//!         static readonly MAX: number;
//!
//!         /**
//!          * Draws the sprite.
//!          */
//!         draw(x?: number): string | number;
//!     }
//!
//!     namespace Render {
//!         interface IDrawable {
//!         }
//!     }
//! }
//! ```
//!
//! Only entities at the root carry `declare`; everything inside a
//! `declare namespace` is already ambient.

use std::collections::HashSet;

use crate::model::{Entity, EntityKind, Method, Parameter, Property, PropertyAccess, TypeRef};
use crate::tree::{EntityId, NamespaceTree, NodeId};

/// Default indent width in spaces.
pub const DEFAULT_INDENT: usize = 4;

/// Render the whole tree with default settings.
pub fn render(tree: &NamespaceTree) -> String {
    Renderer::new(tree).render()
}

/// Renders namespaces and entities of a tree.
#[derive(Clone, Copy, Debug)]
pub struct Renderer<'a> {
    tree: &'a NamespaceTree,
    indent: usize,
}

impl<'a> Renderer<'a> {
    pub fn new(tree: &'a NamespaceTree) -> Self {
        Self {
            tree,
            indent: DEFAULT_INDENT,
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Render from the root. No trailing newline.
    pub fn render(&self) -> String {
        self.render_node(NodeId::ROOT)
    }

    /// Render a namespace node and everything below it.
    ///
    /// The root renders its content bare; depth-1 namespaces get
    /// `declare namespace`, deeper ones plain `namespace`.
    pub fn render_node(&self, id: NodeId) -> String {
        let Some(node) = self.tree.node(id) else {
            return String::new();
        };

        let entities: Vec<String> = node
            .entities
            .iter()
            .map(|&entity| self.render_entity(entity))
            .collect();
        let children: Vec<String> = node
            .children
            .iter()
            .map(|&child| self.render_node(child))
            .collect();

        let mut content = entities.join("\n\n");
        if !entities.is_empty() && !children.is_empty() {
            content.push_str("\n\n");
        }
        content.push_str(&children.join("\n\n"));

        if node.is_root() {
            return content;
        }

        let qualifier = if node.depth == 1 { "declare " } else { "" };
        self.block(
            &format!("{}namespace {}", qualifier, node.name()),
            &content,
        )
    }

    /// Render one entity as a class or interface block.
    pub fn render_entity(&self, id: EntityId) -> String {
        let (Some(entity), Some(location)) = (self.tree.entity(id), self.tree.location_of(id))
        else {
            return String::new();
        };
        let at_root = location == NodeId::ROOT;

        let mut body = self.render_properties(entity, location);
        body.push_str(&render_methods(&entity.methods, entity.kind));

        let header = format!(
            "{}{} {}{}",
            if at_root { "declare " } else { "" },
            entity.kind.keyword(),
            entity.name,
            heritage_clause(entity)
        );
        // Member blocks end in newlines; the closing brace goes on the next line.
        self.block(&header, body.trim_end_matches('\n'))
    }

    fn render_properties(&self, entity: &Entity, location: NodeId) -> String {
        let properties = renderable_properties(self.tree, location, entity);
        if properties.is_empty() {
            return String::new();
        }
        let lines: Vec<String> = properties
            .into_iter()
            .map(|p| render_property(p, entity.kind))
            .collect();
        lines.join("\n") + "\n"
    }

    fn block(&self, header: &str, content: &str) -> String {
        if content.is_empty() {
            return format!("{} {{\n}}", header);
        }
        format!("{} {{\n{}\n}}", header, indent_lines(content, self.indent))
    }
}

/// ` extends P implements I` for classes, ` extends P, I` for interfaces.
fn heritage_clause(entity: &Entity) -> String {
    match entity.kind {
        EntityKind::Class => {
            let mut clause = String::new();
            if let Some(parent) = &entity.parent {
                clause.push_str(" extends ");
                clause.push_str(parent);
            }
            if !entity.interfaces.is_empty() {
                clause.push_str(" implements ");
                clause.push_str(&entity.interfaces.join(", "));
            }
            clause
        }
        EntityKind::Interface => {
            let supertypes: Vec<&str> = entity
                .parent
                .iter()
                .chain(&entity.interfaces)
                .map(String::as_str)
                .collect();
            if supertypes.is_empty() {
                String::new()
            } else {
                format!(" extends {}", supertypes.join(", "))
            }
        }
    }
}

// =============================================================================
// Duplicate filter
// =============================================================================

/// Names claimed by the namespace sharing the entity's name.
///
/// When `location` has a child namespace named like the entity, every
/// entity and child namespace inside it claims its name. Empty otherwise.
pub fn claimed_member_names<'t>(
    tree: &'t NamespaceTree,
    location: NodeId,
    entity_name: &str,
) -> HashSet<&'t str> {
    let Some(same_name) = tree.find_child(location, entity_name) else {
        return HashSet::new();
    };
    let Some(node) = tree.node(same_name) else {
        return HashSet::new();
    };

    let structures = node
        .entities
        .iter()
        .filter_map(|&id| tree.entity(id))
        .map(|e| e.name.as_str());
    let namespaces = node
        .children
        .iter()
        .filter_map(|&id| tree.node(id))
        .map(|n| n.name());
    structures.chain(namespaces).collect()
}

/// Properties of `entity` minus those claimed by its same-named namespace.
pub fn renderable_properties<'e>(
    tree: &NamespaceTree,
    location: NodeId,
    entity: &'e Entity,
) -> Vec<&'e Property> {
    let claimed = claimed_member_names(tree, location, &entity.name);
    entity
        .properties
        .iter()
        .filter(|p| !claimed.contains(p.name.as_str()))
        .collect()
}

// =============================================================================
// Members
// =============================================================================

/// Modifier prefix for a property of an entity of the given kind.
///
/// Interface members are type members and cannot be `static`: constants
/// keep only `readonly`, static properties lose their modifier.
pub fn property_prefix(access: PropertyAccess, kind: EntityKind) -> &'static str {
    match (kind, access) {
        (EntityKind::Class, access) => access.prefix(),
        (EntityKind::Interface, PropertyAccess::Constant) => "readonly ",
        (EntityKind::Interface, _) => "",
    }
}

fn render_property(property: &Property, kind: EntityKind) -> String {
    format!(
        "{}{}{};\n",
        property_prefix(property.access, kind),
        property.name,
        type_annotation(property.ty.as_ref())
    )
}

fn render_methods(methods: &[Method], kind: EntityKind) -> String {
    methods
        .iter()
        .map(|m| render_method(m, kind))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_method(method: &Method, kind: EntityKind) -> String {
    let mut out = String::new();
    if let Some(comment) = &method.comment {
        out.push_str(&doc_comment(comment));
    }
    if method.is_static && kind == EntityKind::Class {
        out.push_str("static ");
    }
    out.push_str(&format!(
        "{}({}){};\n",
        method.name,
        render_parameters(&method.parameters),
        type_annotation(method.return_type.as_ref())
    ));
    out
}

/// `a, b?: number, c: string | null`
pub fn render_parameters(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| {
            format!(
                "{}{}{}",
                p.name,
                if p.optional { "?" } else { "" },
                type_annotation(p.ty.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `: T`, `: T1 | T2`, or nothing.
pub fn type_annotation(ty: Option<&TypeRef>) -> String {
    match ty.and_then(TypeRef::expression) {
        Some(expr) => format!(": {}", expr),
        None => String::new(),
    }
}

fn doc_comment(comment: &str) -> String {
    let mut out = String::from("/**\n");
    for line in comment.lines() {
        if line.trim().is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(" * ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    out.push_str(" */\n");
    out
}

fn indent_lines(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Tests
// =============================================================================
