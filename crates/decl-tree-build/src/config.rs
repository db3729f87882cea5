//! TOML configuration parser for decl.toml.

use decl_tree::{DEFAULT_INDENT, Entity};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Largest accepted indent width.
pub const MAX_INDENT: usize = 8;

/// Behavior when an entity's `parent` names nothing in the entity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnUnresolved {
    /// Render the name verbatim (default; the parent may live in the prelude)
    #[default]
    Ignore,
    /// Render verbatim and report via `cargo:warning`
    Warn,
    /// Fail the export
    Error,
}

/// Parsed export configuration.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Destination of the generated declaration file
    pub output: PathBuf,
    /// Optional file copied verbatim ahead of the generated declarations
    pub prelude: Option<PathBuf>,
    /// Optional JSON file holding an entity array
    pub entities_path: Option<PathBuf>,
    /// Spaces per nesting level
    pub indent: usize,
    /// Behavior for unresolved parent names
    pub on_unresolved: OnUnresolved,
    /// Entities declared inline with `[[entity]]`
    inline_entities: Vec<Entity>,
}

/// Raw TOML structure.
#[derive(Debug, Deserialize)]
struct RawExportConfig {
    output: Option<String>,
    prelude: Option<String>,
    /// Path to a JSON entity list
    entities: Option<String>,
    indent: Option<usize>,
    /// "ignore" (default), "warn" or "error"
    on_unresolved: Option<String>,
    #[serde(default)]
    entity: Vec<Entity>,
}

impl ExportConfig {
    /// Parse from a TOML file.
    ///
    /// Relative paths inside the file are resolved against its directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ExportConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExportConfigError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_str(&content)?;
        Ok(match path.parent() {
            Some(dir) => config.relative_to(dir),
            None => config,
        })
    }

    /// Parse from a TOML string. Paths are kept as written.
    pub fn from_str(content: &str) -> Result<Self, ExportConfigError> {
        let raw: RawExportConfig =
            toml::from_str(content).map_err(|e| ExportConfigError::Parse(e.to_string()))?;

        let output = match raw.output.as_deref() {
            Some(output) if !output.trim().is_empty() => PathBuf::from(output),
            _ => {
                return Err(ExportConfigError::Validation(
                    "Missing or empty 'output' path".into(),
                ));
            }
        };

        let indent = raw.indent.unwrap_or(DEFAULT_INDENT);
        if indent == 0 || indent > MAX_INDENT {
            return Err(ExportConfigError::Validation(format!(
                "Invalid indent {}: expected 1..={}",
                indent, MAX_INDENT
            )));
        }

        let on_unresolved = match raw.on_unresolved.as_deref() {
            None | Some("ignore") => OnUnresolved::Ignore,
            Some("warn") => OnUnresolved::Warn,
            Some("error") => OnUnresolved::Error,
            Some(other) => {
                return Err(ExportConfigError::Validation(format!(
                    "Invalid on_unresolved value '{}': expected 'ignore', 'warn' or 'error'",
                    other
                )));
            }
        };

        if raw.entities.is_none() && raw.entity.is_empty() {
            return Err(ExportConfigError::Validation(
                "No entities: set 'entities' to a JSON file or add [[entity]] tables".into(),
            ));
        }

        Ok(Self {
            output,
            prelude: raw.prelude.map(PathBuf::from),
            entities_path: raw.entities.map(PathBuf::from),
            indent,
            on_unresolved,
            inline_entities: raw.entity,
        })
    }

    /// Resolve relative paths against `dir`.
    pub fn relative_to(mut self, dir: &Path) -> Self {
        let join = |p: PathBuf| if p.is_relative() { dir.join(p) } else { p };
        self.output = join(self.output);
        self.prelude = self.prelude.map(join);
        self.entities_path = self.entities_path.map(join);
        self
    }

    /// Entities declared inline.
    pub fn inline_entities(&self) -> &[Entity] {
        &self.inline_entities
    }
}

/// Errors during config parsing.
#[derive(Debug)]
pub enum ExportConfigError {
    /// IO error
    Io(String),
    /// TOML parse error
    Parse(String),
    /// Validation error
    Validation(String),
}

impl std::fmt::Display for ExportConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ExportConfigError {}
