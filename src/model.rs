//! Entity model — the flat structural descriptions fed into the assembler.
//!
//! Field names follow the camelCase JSON emitted by the documentation
//! scraper, so an entity list can be deserialized directly:
//!
//! ```json
//! {
//!   "name": "Sprite",
//!   "namespace": "Game.Render",
//!   "parent": "Node",
//!   "properties": [{ "name": "MAX", "access": "constant", "type": "number" }],
//!   "methods": [{ "name": "draw", "parameters": [{ "name": "x", "optional": true, "type": "number" }] }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Declaration keyword of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Class,
    Interface,
}

impl EntityKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
        }
    }
}

/// A class or interface to be rendered as a declaration block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,
    #[serde(default, alias = "type")]
    pub kind: EntityKind,
    /// Dot-separated namespace path (e.g., "Game.Render"). `None` means root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Supertype name as written in the source documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Entity {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntityKind::Interface,
            ..Self::default()
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Namespace path segments; empty for root-level entities.
    pub fn namespace_segments(&self) -> impl Iterator<Item = &str> {
        self.namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .into_iter()
            .flat_map(|ns| ns.split('.'))
    }

    /// Full dot-separated name, e.g. "Game.Render.Sprite".
    pub fn qualified_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }
}

/// How a property is accessed: controls the rendered modifier prefix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyAccess {
    #[default]
    #[serde(rename = "normal", alias = "instance")]
    Instance,
    #[serde(rename = "static")]
    Static,
    /// Static and immutable.
    #[serde(rename = "constant")]
    Constant,
}

impl PropertyAccess {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Instance => "",
            Self::Static => "static ",
            Self::Constant => "static readonly ",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub access: PropertyAccess,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,
}

impl Property {
    pub fn new(name: impl Into<String>, access: PropertyAccess) -> Self {
        Self {
            name: name.into(),
            access,
            ty: None,
        }
    }

    pub fn typed(mut self, ty: impl Into<TypeRef>) -> Self {
        self.ty = Some(ty.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    #[serde(default, alias = "static")]
    pub is_static: bool,
    #[serde(default, alias = "arguments")]
    pub parameters: Vec<Parameter>,
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    /// Documentation text, rendered as a `/** ... */` block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn static_method(name: impl Into<String>) -> Self {
        Self {
            is_static: true,
            ..Self::new(name)
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, ty: impl Into<TypeRef>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn documented(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            ty: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn typed(mut self, ty: impl Into<TypeRef>) -> Self {
        self.ty = Some(ty.into());
        self
    }
}

/// A single type name or an ordered union of alternatives.
///
/// Deserializes from either `"string"` or `["string", "number"]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Single(String),
    Union(Vec<String>),
}

impl TypeRef {
    /// Type expression text, `None` for an empty union.
    pub fn expression(&self) -> Option<String> {
        match self {
            Self::Single(name) => Some(name.clone()),
            Self::Union(names) if names.is_empty() => None,
            Self::Union(names) => Some(names.join(" | ")),
        }
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::Single(name.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        Self::Single(name)
    }
}

impl<const N: usize> From<[&str; N]> for TypeRef {
    fn from(names: [&str; N]) -> Self {
        Self::Union(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<String>> for TypeRef {
    fn from(names: Vec<String>) -> Self {
        Self::Union(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_segments_split_on_dots() {
        let e = Entity::class("C").in_namespace("A.B");
        assert_eq!(e.namespace_segments().collect::<Vec<_>>(), ["A", "B"]);
    }

    #[test]
    fn empty_namespace_means_root() {
        let e = Entity::class("C").in_namespace("");
        assert_eq!(e.namespace_segments().count(), 0);
        assert_eq!(e.qualified_name(), "C");
    }

    #[test]
    fn qualified_name_joins_namespace() {
        let e = Entity::class("Sprite").in_namespace("Game.Render");
        assert_eq!(e.qualified_name(), "Game.Render.Sprite");
    }

    #[test]
    fn union_expression_keeps_order() {
        let ty = TypeRef::from(["string", "number"]);
        assert_eq!(ty.expression().as_deref(), Some("string | number"));
    }

    #[test]
    fn empty_union_has_no_expression() {
        assert_eq!(TypeRef::Union(Vec::new()).expression(), None);
    }

    #[test]
    fn deserialize_scraper_json() {
        let json = r#"{
            "name": "Sprite",
            "namespace": "Game",
            "parent": "Node",
            "properties": [
                { "name": "MAX", "access": "constant", "type": "number" },
                { "name": "pos", "access": "normal" }
            ],
            "methods": [
                {
                    "name": "draw",
                    "static": true,
                    "arguments": [{ "name": "x", "optional": true, "type": "number" }],
                    "type": ["string", "number"],
                    "comment": "Draws it."
                }
            ]
        }"#;
        let e: Entity = serde_json::from_str(json).unwrap();

        assert_eq!(e.kind, EntityKind::Class);
        assert_eq!(e.parent.as_deref(), Some("Node"));
        assert_eq!(e.properties[0].access, PropertyAccess::Constant);
        assert_eq!(e.properties[1].access, PropertyAccess::Instance);
        assert!(e.methods[0].is_static);
        assert!(e.methods[0].parameters[0].optional);
        assert_eq!(e.methods[0].return_type, Some(TypeRef::from(["string", "number"])));
        assert_eq!(e.methods[0].comment.as_deref(), Some("Draws it."));
    }

    #[test]
    fn deserialize_interface_kind() {
        let e: Entity =
            serde_json::from_str(r#"{ "name": "ITest", "kind": "interface" }"#).unwrap();
        assert_eq!(e.kind, EntityKind::Interface);
        assert!(e.methods.is_empty());
    }
}
