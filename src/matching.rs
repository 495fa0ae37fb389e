use crate::comments::ParsedComment;
use crate::identifiers::Identifier;
use crate::snippets::Snippet;
use crate::structure::StructuralMember;

/// A structural member joined (or not yet joined) with its documentation.
///
/// `comment: None` is the undocumented state; a member with no snippet still
/// contributes a graph node, since code often lacks comments.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentationMember {
    pub identifier: Identifier,
    pub member: StructuralMember,
    pub comment: Option<ParsedComment>,
}

impl DocumentationMember {
    pub fn is_documented(&self) -> bool {
        self.comment.is_some()
    }
}

/// Wraps every structural member as an undocumented documentation member,
/// deriving its identifier.
pub fn undocumented_members(members: Vec<StructuralMember>) -> Vec<DocumentationMember> {
    members
        .into_iter()
        .map(|member| DocumentationMember {
            identifier: Identifier::from_structural(&member),
            member,
            comment: None,
        })
        .collect()
}

/// Joins raw snippets against the member list by identifier equality.
///
/// The returned list has the same length and order as the input; matched
/// slots carry the snippet's parsed comment. Snippets with an unrecognized
/// kind prefix or no matching member are dropped silently, which is the
/// normal case for documentation on members excluded from the structural
/// source. When several snippets target one identifier the last one wins.
pub fn match_snippets(
    mut members: Vec<DocumentationMember>,
    snippets: &[Snippet],
) -> Vec<DocumentationMember> {
    for snippet in snippets {
        let Some(identifier) = Identifier::from_snippet_name(&snippet.name) else {
            tracing::debug!(name = %snippet.name, "snippet has no recognized kind prefix, dropping");
            continue;
        };

        match members.iter_mut().find(|m| m.identifier == identifier) {
            Some(slot) => slot.comment = Some(snippet.comment.clone()),
            None => {
                tracing::debug!(identifier = %identifier, "snippet has no structural member, dropping");
            }
        }
    }
    members
}
