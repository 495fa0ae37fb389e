use docgraph::comments::{Inline, ParsedComment, Text};
use docgraph::matching::{match_snippets, undocumented_members};
use docgraph::snippets::Snippet;
use docgraph::structure::{StructuralMember, TypePath};

fn members() -> Vec<StructuralMember> {
    vec![
        StructuralMember::Type {
            path: TypePath::new("Lib", "Foo"),
        },
        StructuralMember::Method {
            owner: TypePath::new("Lib", "Foo"),
            name: "Bar".to_string(),
            return_type: None,
            parameters: Vec::new(),
        },
    ]
}

fn snippet(name: &str, summary: &str) -> Snippet {
    Snippet {
        name: name.to_string(),
        comment: ParsedComment {
            summary: Text::new(vec![Inline::Text(summary.to_string())]),
            ..ParsedComment::default()
        },
    }
}

#[test]
fn test_matched_snippet_documents_the_member() {
    let joined = match_snippets(
        undocumented_members(members()),
        &[snippet("M:Lib.Foo.Bar", "Does work")],
    );

    assert_eq!(joined.len(), 2, "output length must equal input length");
    assert!(!joined[0].is_documented(), "the type had no snippet");
    assert!(joined[1].is_documented(), "the method snippet should match");

    let comment = joined[1].comment.as_ref().expect("documented");
    assert_eq!(comment.summary.to_plain_string(), "Does work");
}

#[test]
fn test_order_and_length_are_preserved() {
    let joined = match_snippets(
        undocumented_members(members()),
        &[snippet("T:Lib.Foo", "A type")],
    );

    assert_eq!(joined.len(), 2);
    assert_eq!(joined[0].identifier.name(), "Lib.Foo");
    assert_eq!(joined[1].identifier.name(), "Lib.Foo.Bar");
}

#[test]
fn test_unmatched_snippet_is_dropped() {
    let joined = match_snippets(
        undocumented_members(members()),
        &[snippet("T:Lib.Private", "Not in the structural source")],
    );

    assert!(
        joined.iter().all(|m| !m.is_documented()),
        "a snippet with no structural member must not document anything"
    );
}

#[test]
fn test_unrecognized_prefix_is_dropped() {
    let joined = match_snippets(
        undocumented_members(members()),
        &[snippet("N:Lib", "Namespaces have no snippet form")],
    );
    assert!(joined.iter().all(|m| !m.is_documented()));
}

#[test]
fn test_kind_mismatch_never_matches() {
    // Same path as the method, but a property-flavored snippet.
    let joined = match_snippets(
        undocumented_members(members()),
        &[snippet("P:Lib.Foo.Bar", "Wrong kind")],
    );
    assert!(
        !joined[1].is_documented(),
        "a property snippet must not document a method"
    );
}

#[test]
fn test_last_snippet_wins_for_duplicate_identifiers() {
    let joined = match_snippets(
        undocumented_members(members()),
        &[
            snippet("M:Lib.Foo.Bar", "First"),
            snippet("M:Lib.Foo.Bar", "Second"),
        ],
    );

    let comment = joined[1].comment.as_ref().expect("documented");
    assert_eq!(
        comment.summary.to_plain_string(),
        "Second",
        "a later snippet for the same identifier overwrites an earlier one"
    );
}

#[test]
fn test_overloads_match_by_signature() {
    let overloads = vec![
        StructuralMember::Method {
            owner: TypePath::new("Lib", "Foo"),
            name: "Bar".to_string(),
            return_type: None,
            parameters: Vec::new(),
        },
        StructuralMember::Method {
            owner: TypePath::new("Lib", "Foo"),
            name: "Bar".to_string(),
            return_type: None,
            parameters: vec![docgraph::structure::ParameterDescriptor {
                name: "s".to_string(),
                parameter_type: TypePath::new("System", "String"),
            }],
        },
    ];

    let joined = match_snippets(
        undocumented_members(overloads),
        &[snippet("M:Lib.Foo.Bar(System.String)", "The string overload")],
    );

    assert!(!joined[0].is_documented(), "bare overload has no snippet");
    assert!(
        joined[1].is_documented(),
        "the snippet signature selects the matching overload"
    );
}
