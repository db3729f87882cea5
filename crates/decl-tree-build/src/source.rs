//! Entity list loading.
//!
//! The scraping stage writes a JSON array of entities; this module only reads it.

use decl_tree::Entity;
use std::path::Path;

/// Read a JSON entity array from a file.
pub fn load_entities(path: impl AsRef<Path>) -> Result<Vec<Entity>, EntitySourceError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        EntitySourceError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_entities(&content).map_err(|e| match e {
        EntitySourceError::Parse(msg) => {
            EntitySourceError::Parse(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Parse a JSON entity array.
pub fn parse_entities(json: &str) -> Result<Vec<Entity>, EntitySourceError> {
    serde_json::from_str(json).map_err(|e| EntitySourceError::Parse(e.to_string()))
}

/// Errors while loading the entity list.
#[derive(Debug)]
pub enum EntitySourceError {
    /// IO error
    Io(String),
    /// JSON parse error
    Parse(String),
}

impl std::fmt::Display for EntitySourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for EntitySourceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_entity_array() {
        let entities = parse_entities(
            r#"[
                { "name": "A" },
                { "name": "B", "namespace": "Ns", "parent": "A" }
            ]"#,
        )
        .unwrap();

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[1].parent.as_deref(), Some("A"));
    }

    #[test]
    fn parse_empty_array() {
        assert!(parse_entities("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_array() {
        let err = parse_entities(r#"{ "name": "A" }"#).unwrap_err();
        assert!(matches!(err, EntitySourceError::Parse(_)));
    }

    #[test]
    fn rejects_entity_without_name() {
        assert!(parse_entities(r#"[{ "namespace": "Ns" }]"#).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_entities("/nonexistent/decl-tree/entities.json").unwrap_err();
        assert!(matches!(err, EntitySourceError::Io(_)));
    }
}
