use std::fmt;

use serde::{Deserialize, Serialize};

use crate::structure::{StructuralMember, TypePath};

/// Kinds of entities an identifier can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierKind {
    Namespace,
    Type,
    Method,
    Property,
    Field,
    Event,
}

impl IdentifierKind {
    /// Returns the string representation of this identifier kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Namespace => "namespace",
            IdentifierKind::Type => "type",
            IdentifierKind::Method => "method",
            IdentifierKind::Property => "property",
            IdentifierKind::Field => "field",
            IdentifierKind::Event => "event",
        }
    }

    /// The single-letter prefix used in documentation snippet names.
    /// Namespaces have no snippet form.
    fn prefix(&self) -> char {
        match self {
            IdentifierKind::Namespace => 'N',
            IdentifierKind::Type => 'T',
            IdentifierKind::Method => 'M',
            IdentifierKind::Property => 'P',
            IdentifierKind::Field => 'F',
            IdentifierKind::Event => 'E',
        }
    }
}

/// Canonical kind-tagged key for one documentable entity.
///
/// This is the join key the whole system depends on: the identifier derived
/// from a structural descriptor and the one parsed from a documentation
/// snippet's name must compare equal for the same member, so both
/// derivations run through the same normalization. Method identifiers embed
/// the parameter-type signature to keep overloads distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    kind: IdentifierKind,
    name: String,
}

impl Identifier {
    /// Creates an identifier, normalizing the name: whitespace is stripped,
    /// nested-type `+` separators become `.`, and empty parameter lists
    /// (`()`) are removed so a parameterless method has a bare path.
    pub fn new(kind: IdentifierKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: normalize(&name.into()),
        }
    }

    /// Identifier for a namespace.
    pub fn namespace(namespace: &str) -> Self {
        Self::new(IdentifierKind::Namespace, namespace)
    }

    /// Identifier for the type named by a `TypePath`.
    pub fn from_type_path(path: &TypePath) -> Self {
        Self::new(IdentifierKind::Type, path.full_name())
    }

    /// Derives the identifier of a structural member descriptor.
    pub fn from_structural(member: &StructuralMember) -> Self {
        match member {
            StructuralMember::Type { path } => Self::from_type_path(path),
            StructuralMember::Method {
                owner,
                name,
                parameters,
                ..
            } => {
                let mut full = format!("{}.{}", owner.full_name(), name);
                if !parameters.is_empty() {
                    let types: Vec<String> = parameters
                        .iter()
                        .map(|p| p.parameter_type.full_name())
                        .collect();
                    full.push('(');
                    full.push_str(&types.join(","));
                    full.push(')');
                }
                Self::new(IdentifierKind::Method, full)
            }
            StructuralMember::Property { owner, name, .. } => Self::new(
                IdentifierKind::Property,
                format!("{}.{}", owner.full_name(), name),
            ),
            StructuralMember::Field { owner, name, .. } => Self::new(
                IdentifierKind::Field,
                format!("{}.{}", owner.full_name(), name),
            ),
            StructuralMember::Event { owner, name, .. } => Self::new(
                IdentifierKind::Event,
                format!("{}.{}", owner.full_name(), name),
            ),
        }
    }

    /// Parses a documentation snippet name of the form
    /// `<Kind>:<dotted-path>[(<param-types>)]` where `<Kind>` is one of
    /// `T`, `M`, `P`, `E`, `F`.
    ///
    /// Returns `None` for an unrecognized kind prefix or an empty path; the
    /// caller drops such snippets.
    pub fn from_snippet_name(text: &str) -> Option<Self> {
        let (prefix, rest) = text.split_once(':')?;
        let kind = match prefix {
            "T" => IdentifierKind::Type,
            "M" => IdentifierKind::Method,
            "P" => IdentifierKind::Property,
            "E" => IdentifierKind::Event,
            "F" => IdentifierKind::Field,
            _ => return None,
        };
        let name = normalize(rest);
        if name.is_empty() {
            return None;
        }
        Some(Self { kind, name })
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// The canonical full name, including any parameter signature.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The last dotted segment of the path, ignoring any parameter list.
    /// This is the member's display name.
    pub fn short_name(&self) -> &str {
        let base = self.name.split('(').next().unwrap_or(&self.name);
        base.rsplit('.').next().unwrap_or(base)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.prefix(), self.name)
    }
}

/// Shared normalization applied to both identifier derivations.
fn normalize(name: &str) -> String {
    let mut out: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '+' { '.' } else { c })
        .collect();
    if out.ends_with("()") {
        out.truncate(out.len() - 2);
    }
    out
}
