use crate::comments::ParsedComment;
use crate::errors::{DocGraphError, Result};
use crate::events::{EventSink, Notification};
use crate::identifiers::Identifier;
use crate::matching::DocumentationMember;
use crate::model::{DocModel, Node, NodeData, NodeId, Parameter, TypeRef};
use crate::structure::{ParameterDescriptor, StructuralMember, TypePath};

/// Which member collection of a type a generated node belongs in.
enum MemberList {
    Properties,
    Fields,
    Events,
}

/// Runs every entity generator over the joined member list, producing a
/// fresh model with all nodes generated as unresolved stubs.
///
/// Namespaces are generated for every member first, then each member is
/// dispatched to its kind-specific generator. All generators share the one
/// model: a later generator for an already-seen namespace or type extends
/// the node an earlier one created instead of duplicating it.
pub fn generate(members: &[DocumentationMember], events: &mut dyn EventSink) -> Result<DocModel> {
    let mut model = DocModel::new();

    for member in members {
        add_namespace(&mut model, member)?;
    }

    for member in members {
        match &member.member {
            StructuralMember::Type { .. } => add_type(&mut model, member, events)?,
            StructuralMember::Method { .. } => add_method(&mut model, member, events)?,
            StructuralMember::Property { .. } => add_property(&mut model, member, events)?,
            StructuralMember::Field { .. } => add_field(&mut model, member, events)?,
            StructuralMember::Event { .. } => add_event(&mut model, member, events)?,
        }
    }

    Ok(model)
}

/// Namespace generator: creates the member's namespace node once per
/// distinct namespace identifier. A member with no namespace at all is a
/// fatal input error.
fn add_namespace(model: &mut DocModel, member: &DocumentationMember) -> Result<NodeId> {
    let namespace = &member.member.declaring_type().namespace;
    if namespace.is_empty() {
        return Err(DocGraphError::MissingNamespace {
            member: member.member.describe(),
        });
    }
    Ok(find_or_create_namespace(model, namespace))
}

fn find_or_create_namespace(model: &mut DocModel, namespace: &str) -> NodeId {
    let identifier = Identifier::namespace(namespace);
    if let Some(id) = model.lookup(&identifier) {
        return id;
    }
    let mut node = Node::unresolved(identifier, NodeData::Namespace { types: Vec::new() });
    // A namespace displays its full dotted path, not the last segment.
    node.name = namespace.to_string();
    node.pretty_name = namespace.to_string();
    let id = model.insert(node);
    model.push_namespace(id);
    id
}

/// Locates the node for an owning type, creating an undeclared forward stub
/// (attached to its namespace) when the type's own declaration has not been
/// generated yet.
fn find_or_create_type(model: &mut DocModel, path: &TypePath) -> Result<NodeId> {
    let identifier = Identifier::from_type_path(path);
    if let Some(id) = model.lookup(&identifier) {
        return Ok(id);
    }

    if path.namespace.is_empty() {
        return Err(DocGraphError::MissingNamespace {
            member: format!("type {}", path.full_name()),
        });
    }
    let namespace_id = find_or_create_namespace(model, &path.namespace);

    let node = Node::unresolved(
        identifier,
        NodeData::Type {
            namespace: Some(namespace_id),
            declared: false,
            methods: Vec::new(),
            properties: Vec::new(),
            fields: Vec::new(),
            events: Vec::new(),
        },
    );
    let id = model.insert(node);
    if let NodeData::Namespace { types } = &mut model.node_mut(namespace_id).data {
        types.push(id);
    }
    Ok(id)
}

/// Type generator: locates or creates the declared type, claims forward
/// stubs, and copies the snippet's text blocks onto the node.
fn add_type(
    model: &mut DocModel,
    member: &DocumentationMember,
    events: &mut dyn EventSink,
) -> Result<()> {
    let StructuralMember::Type { path } = &member.member else {
        return Ok(());
    };

    let id = find_or_create_type(model, path)?;
    let node = model.node_mut(id);
    if let NodeData::Type { declared, .. } = &mut node.data {
        if *declared {
            events.notify(Notification::Warning(format!(
                "skipping duplicate declaration of {}",
                member.identifier
            )));
            return Ok(());
        }
        *declared = true;
    }

    if let Some(comment) = &member.comment {
        copy_text_blocks(node, comment);
    }
    Ok(())
}

/// Method generator: builds the unresolved method node with its return-type
/// reference and per-parameter type references, then attaches it to its
/// owning type.
fn add_method(
    model: &mut DocModel,
    member: &DocumentationMember,
    events: &mut dyn EventSink,
) -> Result<()> {
    let StructuralMember::Method {
        owner,
        return_type,
        parameters,
        ..
    } = &member.member
    else {
        return Ok(());
    };

    let owner_id = resolve_owner(model, owner)?;
    if duplicate(model, member, events) {
        return Ok(());
    }

    let return_ref = match return_type {
        Some(path) => TypeRef::Unresolved(Identifier::from_type_path(path)),
        None => TypeRef::Void,
    };
    let params = build_parameters(parameters, member.comment.as_ref());
    let returns = member
        .comment
        .as_ref()
        .map(|c| c.returns.clone())
        .unwrap_or_default();

    let mut node = Node::unresolved(
        member.identifier.clone(),
        NodeData::Method {
            owner: owner_id,
            return_type: return_ref,
            returns,
            parameters: params,
        },
    );
    if let Some(comment) = &member.comment {
        copy_text_blocks(&mut node, comment);
    }

    let id = model.insert(node);
    if let Some(owner_id) = owner_id {
        if let NodeData::Type { methods, .. } = &mut model.node_mut(owner_id).data {
            methods.push(id);
        }
    }
    Ok(())
}

fn add_property(
    model: &mut DocModel,
    member: &DocumentationMember,
    events: &mut dyn EventSink,
) -> Result<()> {
    let StructuralMember::Property {
        owner, value_type, ..
    } = &member.member
    else {
        return Ok(());
    };
    add_valued_member(
        model,
        member,
        events,
        owner,
        value_type,
        MemberList::Properties,
    )
}

fn add_field(
    model: &mut DocModel,
    member: &DocumentationMember,
    events: &mut dyn EventSink,
) -> Result<()> {
    let StructuralMember::Field {
        owner, value_type, ..
    } = &member.member
    else {
        return Ok(());
    };
    add_valued_member(model, member, events, owner, value_type, MemberList::Fields)
}

fn add_event(
    model: &mut DocModel,
    member: &DocumentationMember,
    events: &mut dyn EventSink,
) -> Result<()> {
    let StructuralMember::Event {
        owner, value_type, ..
    } = &member.member
    else {
        return Ok(());
    };
    add_valued_member(model, member, events, owner, value_type, MemberList::Events)
}

/// Shared generator body for properties, fields and events: an owning type
/// plus a single unresolved value-type reference.
fn add_valued_member(
    model: &mut DocModel,
    member: &DocumentationMember,
    events: &mut dyn EventSink,
    owner: &TypePath,
    value_type: &TypePath,
    list: MemberList,
) -> Result<()> {
    let owner_id = resolve_owner(model, owner)?;
    if duplicate(model, member, events) {
        return Ok(());
    }

    let value_ref = TypeRef::Unresolved(Identifier::from_type_path(value_type));
    let data = match list {
        MemberList::Properties => NodeData::Property {
            owner: owner_id,
            value_type: value_ref,
        },
        MemberList::Fields => NodeData::Field {
            owner: owner_id,
            value_type: value_ref,
        },
        MemberList::Events => NodeData::Event {
            owner: owner_id,
            value_type: value_ref,
        },
    };

    let mut node = Node::unresolved(member.identifier.clone(), data);
    if let Some(comment) = &member.comment {
        copy_text_blocks(&mut node, comment);
    }

    let id = model.insert(node);
    if let Some(owner_id) = owner_id {
        if let NodeData::Type {
            properties,
            fields,
            events: event_members,
            ..
        } = &mut model.node_mut(owner_id).data
        {
            match list {
                MemberList::Properties => properties.push(id),
                MemberList::Fields => fields.push(id),
                MemberList::Events => event_members.push(id),
            }
        }
    }
    Ok(())
}

/// Locates the owning type, creating a forward stub when needed. An owner
/// with no name is not resolvable; the member node is still registered but
/// left unattached.
fn resolve_owner(model: &mut DocModel, owner: &TypePath) -> Result<Option<NodeId>> {
    if owner.name.is_empty() {
        return Ok(None);
    }
    find_or_create_type(model, owner).map(Some)
}

/// Guards against the same member being declared twice: the first node wins
/// and the second occurrence is reported and dropped.
fn duplicate(model: &DocModel, member: &DocumentationMember, events: &mut dyn EventSink) -> bool {
    if model.lookup(&member.identifier).is_some() {
        events.notify(Notification::Warning(format!(
            "skipping duplicate declaration of {}",
            member.identifier
        )));
        return true;
    }
    false
}

fn build_parameters(
    parameters: &[ParameterDescriptor],
    comment: Option<&ParsedComment>,
) -> Vec<Parameter> {
    parameters
        .iter()
        .map(|p| Parameter {
            name: p.name.clone(),
            summary: comment
                .and_then(|c| c.params.get(&p.name).cloned())
                .unwrap_or_default(),
            parameter_type: TypeRef::Unresolved(Identifier::from_type_path(&p.parameter_type)),
        })
        .collect()
}

fn copy_text_blocks(node: &mut Node, comment: &ParsedComment) {
    node.summary = comment.summary.clone();
    node.remarks = comment.remarks.clone();
    node.value = comment.value.clone();
    node.example = comment.example.clone();
}
