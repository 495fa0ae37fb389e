use docgraph::comments::{Inline, ParsedComment, Text};
use docgraph::events::CollectingSink;
use docgraph::generation::generate;
use docgraph::identifiers::{Identifier, IdentifierKind};
use docgraph::matching::{match_snippets, undocumented_members};
use docgraph::model::{DocModel, Node, NodeData, TypeRef};
use docgraph::resolution::resolve_model;
use docgraph::snippets::Snippet;
use docgraph::structure::{ParameterDescriptor, StructuralMember, TypePath};

fn build_unresolved(members: Vec<StructuralMember>, snippets: &[Snippet]) -> DocModel {
    let joined = match_snippets(undocumented_members(members), snippets);
    let mut sink = CollectingSink::new();
    generate(&joined, &mut sink).expect("generation should succeed")
}

fn type_member(ns: &str, name: &str) -> StructuralMember {
    StructuralMember::Type {
        path: TypePath::new(ns, name),
    }
}

#[test]
fn test_cycle_resolves_without_duplicates() {
    // Foo.Clone() returns Foo: the classic self-reference cycle.
    let mut model = build_unresolved(
        vec![
            type_member("Lib", "Foo"),
            StructuralMember::Method {
                owner: TypePath::new("Lib", "Foo"),
                name: "Clone".to_string(),
                return_type: Some(TypePath::new("Lib", "Foo")),
                parameters: Vec::new(),
            },
        ],
        &[],
    );
    resolve_model(&mut model).expect("resolution should terminate");

    let type_id = model
        .lookup(&Identifier::from_snippet_name("T:Lib.Foo").unwrap())
        .expect("type node");
    let method_id = model
        .lookup(&Identifier::from_snippet_name("M:Lib.Foo.Clone").unwrap())
        .expect("method node");

    let NodeData::Method { return_type, .. } = &model.node(method_id).data else {
        panic!("expected a method node");
    };
    assert_eq!(
        return_type.target(),
        Some(type_id),
        "the return reference points back at the very same type node"
    );
    assert!(model.node(type_id).resolved);
    assert!(model.node(method_id).resolved);

    let type_count = model
        .nodes()
        .iter()
        .filter(|n| n.identifier.name() == "Lib.Foo" && n.identifier.kind() == IdentifierKind::Type)
        .count();
    assert_eq!(type_count, 1, "the cycle must not mint duplicate nodes");
}

#[test]
fn test_unknown_reference_becomes_shared_external_node() {
    let mut model = build_unresolved(
        vec![
            type_member("Lib", "Foo"),
            StructuralMember::Method {
                owner: TypePath::new("Lib", "Foo"),
                name: "Name".to_string(),
                return_type: Some(TypePath::new("System", "String")),
                parameters: Vec::new(),
            },
            StructuralMember::Property {
                owner: TypePath::new("Lib", "Foo"),
                name: "Title".to_string(),
                value_type: TypePath::new("System", "String"),
            },
        ],
        &[],
    );
    resolve_model(&mut model).expect("resolution should succeed");

    let external_id = model
        .lookup(&Identifier::from_snippet_name("T:System.String").unwrap())
        .expect("external node is interned in the index");
    let external = model.node(external_id);
    assert!(external.external, "external flag set");
    assert!(external.summary.is_empty(), "externals carry no text");
    assert!(
        !external.resolved,
        "externals stay terminally unresolved"
    );

    let method_id = model
        .lookup(&Identifier::from_snippet_name("M:Lib.Foo.Name").unwrap())
        .expect("method node");
    let property_id = model
        .lookup(&Identifier::from_snippet_name("P:Lib.Foo.Title").unwrap())
        .expect("property node");

    let NodeData::Method { return_type, .. } = &model.node(method_id).data else {
        panic!("expected a method node");
    };
    let NodeData::Property { value_type, .. } = &model.node(property_id).data else {
        panic!("expected a property node");
    };
    assert_eq!(return_type.target(), Some(external_id));
    assert_eq!(
        value_type.target(),
        Some(external_id),
        "every reference to the same external identifier shares one node"
    );
}

#[test]
fn test_void_return_stays_void() {
    let mut model = build_unresolved(
        vec![
            type_member("Lib", "Foo"),
            StructuralMember::Method {
                owner: TypePath::new("Lib", "Foo"),
                name: "Run".to_string(),
                return_type: None,
                parameters: Vec::new(),
            },
        ],
        &[],
    );
    resolve_model(&mut model).expect("resolution should succeed");

    let method_id = model
        .lookup(&Identifier::from_snippet_name("M:Lib.Foo.Run").unwrap())
        .expect("method node");
    let NodeData::Method { return_type, .. } = &model.node(method_id).data else {
        panic!("expected a method node");
    };
    assert_eq!(
        *return_type,
        TypeRef::Void,
        "a method without a return type must not grow an external reference"
    );
}

#[test]
fn test_resolution_is_idempotent() {
    let mut model = build_unresolved(
        vec![
            type_member("Lib", "Foo"),
            StructuralMember::Method {
                owner: TypePath::new("Lib", "Foo"),
                name: "Name".to_string(),
                return_type: Some(TypePath::new("System", "String")),
                parameters: Vec::new(),
            },
        ],
        &[],
    );
    resolve_model(&mut model).expect("first pass");
    let before = serde_json::to_string(&model).expect("serializable");

    resolve_model(&mut model).expect("second pass");
    let after = serde_json::to_string(&model).expect("serializable");

    assert_eq!(before, after, "a second pass must change nothing");
}

#[test]
fn test_no_dangling_references_after_resolution() {
    let mut model = build_unresolved(
        vec![
            type_member("Lib", "Foo"),
            StructuralMember::Method {
                owner: TypePath::new("Lib", "Foo"),
                name: "Render".to_string(),
                return_type: Some(TypePath::new("System", "String")),
                parameters: vec![ParameterDescriptor {
                    name: "other".to_string(),
                    parameter_type: TypePath::new("Lib", "Foo"),
                }],
            },
            StructuralMember::Field {
                owner: TypePath::new("Lib", "Foo"),
                name: "count".to_string(),
                value_type: TypePath::new("System", "Int32"),
            },
        ],
        &[],
    );
    resolve_model(&mut model).expect("resolution should succeed");

    for node in model.nodes() {
        match &node.data {
            NodeData::Method {
                return_type,
                parameters,
                ..
            } => {
                assert!(return_type.is_resolved(), "return ref on {}", node.identifier);
                for p in parameters {
                    assert!(
                        p.parameter_type.is_resolved(),
                        "parameter ref on {}",
                        node.identifier
                    );
                }
            }
            NodeData::Property { value_type, .. }
            | NodeData::Field { value_type, .. }
            | NodeData::Event { value_type, .. } => {
                assert!(value_type.is_resolved(), "value ref on {}", node.identifier);
            }
            NodeData::Namespace { .. } | NodeData::Type { .. } => {}
        }
    }
}

#[test]
fn test_see_reference_resolves_to_same_node_as_direct_reference() {
    let snippet = Snippet {
        name: "T:Lib.Foo".to_string(),
        comment: ParsedComment {
            summary: Text::new(vec![
                Inline::Text("Pairs with".to_string()),
                Inline::See(TypeRef::Unresolved(
                    Identifier::from_snippet_name("T:Lib.Other").unwrap(),
                )),
            ]),
            ..ParsedComment::default()
        },
    };
    let mut model = build_unresolved(
        vec![type_member("Lib", "Foo"), type_member("Lib", "Other")],
        &[snippet],
    );
    resolve_model(&mut model).expect("resolution should succeed");

    let other_id = model
        .lookup(&Identifier::from_snippet_name("T:Lib.Other").unwrap())
        .expect("type node");
    let foo_id = model
        .lookup(&Identifier::from_snippet_name("T:Lib.Foo").unwrap())
        .expect("type node");

    let summary = &model.node(foo_id).summary;
    assert!(summary.resolved, "the block is flagged once closed");
    let Some(Inline::See(reference)) = summary
        .inlines
        .iter()
        .find(|i| matches!(i, Inline::See(_)))
    else {
        panic!("the see reference survives resolution");
    };
    assert_eq!(reference.target(), Some(other_id));
    assert!(!model.node(other_id).external, "Lib.Other was generated");
}

#[test]
fn test_kind_mismatch_is_fatal() {
    // Hand-build an inconsistent model: the index maps a type identifier to
    // a node carrying method data.
    let mut model = DocModel::new();
    let ns_id = model.insert(Node::unresolved(
        Identifier::namespace("Lib"),
        NodeData::Namespace { types: Vec::new() },
    ));
    model.push_namespace(ns_id);

    let bogus = model.insert(Node::unresolved(
        Identifier::from_snippet_name("T:Lib.Bogus").unwrap(),
        NodeData::Method {
            owner: None,
            return_type: TypeRef::Void,
            returns: Text::default(),
            parameters: Vec::new(),
        },
    ));
    let field = model.insert(Node::unresolved(
        Identifier::from_snippet_name("F:Lib.Holder.X").unwrap(),
        NodeData::Field {
            owner: None,
            value_type: TypeRef::Unresolved(Identifier::from_snippet_name("T:Lib.Bogus").unwrap()),
        },
    ));
    let holder = model.insert(Node::unresolved(
        Identifier::from_snippet_name("T:Lib.Holder").unwrap(),
        NodeData::Type {
            namespace: Some(ns_id),
            declared: true,
            methods: Vec::new(),
            properties: Vec::new(),
            fields: vec![field],
            events: Vec::new(),
        },
    ));
    if let NodeData::Namespace { types } = &mut model.node_mut(ns_id).data {
        types.push(holder);
    }
    let _ = bogus;

    let err = resolve_model(&mut model).expect_err("mismatched kind must abort");
    assert!(
        matches!(err, docgraph::errors::DocGraphError::KindMismatch { .. }),
        "expected KindMismatch, got {err}"
    );
}
