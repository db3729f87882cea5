//! Build-time utilities for decl-tree.
//!
//! This crate provides tools for:
//! - Parsing `decl.toml` export configuration files
//! - Loading entity lists produced by the documentation scraper (JSON)
//! - Writing the rendered declarations, optionally behind a prelude file
//!
//! # Usage in build.rs
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     decl_tree_build::generate("decl.toml").expect("Failed to generate declarations");
//! }
//! ```
//!
//! # Output Layout
//!
//! ```text
//! <prelude file contents>
//! <rendered namespace tree>
//! ```
//!
//! Every write is synchronous and checked: a missing prelude or an
//! unwritable destination is returned as an error and nothing is written.

mod config;
mod source;

pub use config::{ExportConfig, ExportConfigError, MAX_INDENT, OnUnresolved};
pub use source::{EntitySourceError, load_entities, parse_entities};

use decl_tree::{Entity, EntityId, NamespaceTree, Renderer};
use std::path::{Path, PathBuf};

/// Main entry point for build.rs integration.
///
/// Reads `decl.toml`, loads its entities, and writes the declaration file.
///
/// # Errors
///
/// Returns an error if:
/// - `decl.toml` cannot be read, parsed or validated
/// - The entity JSON cannot be read or parsed
/// - A parent name is unresolved and `on_unresolved = "error"`
/// - The prelude cannot be read or the output cannot be written
///
/// # Example
///
/// ```ignore
/// // build.rs
/// fn main() {
///     println!("cargo:rerun-if-changed=decl.toml");
///     decl_tree_build::generate("decl.toml").expect("Failed to generate declarations");
/// }
/// ```
pub fn generate(config_path: impl AsRef<Path>) -> Result<(), GenerateError> {
    let config = ExportConfig::from_file(config_path.as_ref())?;

    if let Some(path) = &config.entities_path {
        println!("cargo:rerun-if-changed={}", path.display());
    }
    if let Some(path) = &config.prelude {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    generate_from_config(&config)
}

/// Generate from an already parsed configuration.
pub fn generate_from_config(config: &ExportConfig) -> Result<(), GenerateError> {
    // 1. Collect entities: JSON file first, then inline tables
    let mut entities = match &config.entities_path {
        Some(path) => load_entities(path)?,
        None => Vec::new(),
    };
    entities.extend(config.inline_entities().iter().cloned());

    // 2. Assemble
    let tree = NamespaceTree::assemble(entities);
    tracing::debug!(
        entities = tree.len(),
        namespaces = tree.node_count() - 1,
        "assembled namespace tree"
    );

    // 3. Apply unresolved-parent policy
    check_unresolved(&tree, config.on_unresolved)?;

    // 4. Render and write
    let body = Renderer::new(&tree).with_indent(config.indent).render();
    write_document(&body, config.prelude.as_deref(), &config.output)
}

/// Assemble, render and write entities without a prelude.
pub fn export_entities(
    entities: impl IntoIterator<Item = Entity>,
    output_path: impl AsRef<Path>,
) -> Result<(), GenerateError> {
    let tree = NamespaceTree::assemble(entities);
    write_document(&decl_tree::render(&tree), None, output_path.as_ref())
}

/// Assemble, render and write entities behind the contents of `prelude_path`.
pub fn export_entities_with_prelude(
    entities: impl IntoIterator<Item = Entity>,
    prelude_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<(), GenerateError> {
    let tree = NamespaceTree::assemble(entities);
    write_document(
        &decl_tree::render(&tree),
        Some(prelude_path.as_ref()),
        output_path.as_ref(),
    )
}

/// Join an optional prelude and the rendered body into the final document.
pub fn compose_document(prelude: Option<&str>, body: &str) -> String {
    match prelude {
        Some(prelude) => format!("{}\n{}\n", prelude, body),
        None => format!("{}\n", body),
    }
}

fn write_document(
    body: &str,
    prelude_path: Option<&Path>,
    output_path: &Path,
) -> Result<(), GenerateError> {
    // Read the prelude before touching the output so a failure writes nothing
    let prelude = match prelude_path {
        Some(path) => Some(std::fs::read_to_string(path).map_err(|source| {
            GenerateError::Prelude {
                path: path.to_path_buf(),
                source,
            }
        })?),
        None => None,
    };

    let document = compose_document(prelude.as_deref(), body);
    std::fs::write(output_path, document)?;

    tracing::debug!(output = %output_path.display(), "wrote declaration file");
    Ok(())
}

fn check_unresolved(tree: &NamespaceTree, policy: OnUnresolved) -> Result<(), GenerateError> {
    let unresolved = tree.unresolved_parents();
    if unresolved.is_empty() {
        return Ok(());
    }

    match policy {
        OnUnresolved::Ignore => Ok(()),
        OnUnresolved::Warn => {
            for (id, parent) in &unresolved {
                let name = tree.qualified_name(*id).unwrap_or_default();
                tracing::warn!(entity = %name, parent = %parent, "unresolved parent reference");
                println!(
                    "cargo:warning=decl-tree: '{}' extends '{}', which is not in the entity list",
                    name, parent
                );
            }
            Ok(())
        }
        OnUnresolved::Error => Err(GenerateError::Unresolved(format_unresolved_error(
            tree,
            &unresolved,
        ))),
    }
}

fn format_unresolved_error(tree: &NamespaceTree, unresolved: &[(EntityId, &str)]) -> String {
    let mut msg = String::new();
    msg.push_str("decl-tree: Unresolved parent references!\n\n");
    for (id, parent) in unresolved {
        msg.push_str(&format!(
            "    - {} extends {}\n",
            tree.qualified_name(*id).unwrap_or_default(),
            parent
        ));
    }
    msg.push_str("\n  To fix:\n");
    msg.push_str("    1. Add the parent entities to the entity list, OR\n");
    msg.push_str("    2. Set `on_unresolved = \"warn\"` or \"ignore\" if they come from the prelude\n");
    msg
}

/// Errors that can occur during generation.
#[derive(Debug)]
pub enum GenerateError {
    /// Failed to parse decl.toml
    ConfigError(ExportConfigError),
    /// Failed to read/parse the entity list
    EntitiesError(EntitySourceError),
    /// Failed to read the prelude file
    Prelude {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Parent references that match no entity (with `on_unresolved = "error"`)
    Unresolved(String),
    /// IO error
    Io(std::io::Error),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigError(e) => write!(f, "Config error: {}", e),
            Self::EntitiesError(e) => write!(f, "Entity list error: {}", e),
            Self::Prelude { path, source } => {
                write!(f, "Failed to read prelude {}: {}", path.display(), source)
            }
            Self::Unresolved(msg) => write!(f, "{}", msg),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Prelude { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ExportConfigError> for GenerateError {
    fn from(e: ExportConfigError) -> Self {
        Self::ConfigError(e)
    }
}

impl From<EntitySourceError> for GenerateError {
    fn from(e: EntitySourceError) -> Self {
        Self::EntitiesError(e)
    }
}

impl From<std::io::Error> for GenerateError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
