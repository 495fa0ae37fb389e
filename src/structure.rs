use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{DocGraphError, Result};

/// Canonical name components of a type.
///
/// `name` may carry a generic-arity suffix (`` List`1 ``) and nested-type
/// separators (`Outer+Inner`); generic instantiations in parameter positions
/// use the documentation format (`` List`1{System.String} `` is written as
/// `List{System.String}` by metadata producers). `full_name` normalizes the
/// nested-type separator so both identifier derivations agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypePath {
    pub namespace: String,
    pub name: String,
}

impl TypePath {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Fully-qualified dotted name, with nested-type `+` separators
    /// normalized to `.`.
    pub fn full_name(&self) -> String {
        let joined = if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        };
        joined.replace('+', ".")
    }
}

/// A formal method parameter: name plus the type it is declared with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub parameter_type: TypePath,
}

/// One structural member descriptor, as produced by an external
/// binary-inspection step and consumed here as JSON.
///
/// Each variant exposes its owning type; methods additionally carry an
/// ordered formal-parameter list and an optional return type (`None` means
/// the method returns nothing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralMember {
    Type {
        path: TypePath,
    },
    Method {
        owner: TypePath,
        name: String,
        #[serde(default)]
        return_type: Option<TypePath>,
        #[serde(default)]
        parameters: Vec<ParameterDescriptor>,
    },
    Property {
        owner: TypePath,
        name: String,
        value_type: TypePath,
    },
    Field {
        owner: TypePath,
        name: String,
        value_type: TypePath,
    },
    Event {
        owner: TypePath,
        name: String,
        value_type: TypePath,
    },
}

impl StructuralMember {
    /// The type this member is declared on. For a `Type` member that is the
    /// type itself; its namespace is where the member's node ends up.
    pub fn declaring_type(&self) -> &TypePath {
        match self {
            StructuralMember::Type { path } => path,
            StructuralMember::Method { owner, .. }
            | StructuralMember::Property { owner, .. }
            | StructuralMember::Field { owner, .. }
            | StructuralMember::Event { owner, .. } => owner,
        }
    }

    /// Short display label used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            StructuralMember::Type { path } => format!("type {}", path.full_name()),
            StructuralMember::Method { owner, name, .. } => {
                format!("method {}.{}", owner.full_name(), name)
            }
            StructuralMember::Property { owner, name, .. } => {
                format!("property {}.{}", owner.full_name(), name)
            }
            StructuralMember::Field { owner, name, .. } => {
                format!("field {}.{}", owner.full_name(), name)
            }
            StructuralMember::Event { owner, name, .. } => {
                format!("event {}.{}", owner.full_name(), name)
            }
        }
    }
}

/// Parses structural metadata from its JSON representation.
pub fn parse_metadata(source: &str) -> Result<Vec<StructuralMember>> {
    Ok(serde_json::from_str(source)?)
}

/// Loads structural metadata from a JSON file.
pub fn load_metadata(path: &Path) -> Result<Vec<StructuralMember>> {
    let contents = fs::read_to_string(path).map_err(|e| DocGraphError::Metadata {
        message: format!("failed to read metadata file: {}", e),
        path: path.display().to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| DocGraphError::Metadata {
        message: format!("failed to parse metadata: {}", e),
        path: path.display().to_string(),
    })
}
