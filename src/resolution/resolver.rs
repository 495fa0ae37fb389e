use std::mem;

use crate::comments::{Inline, Text};
use crate::errors::{DocGraphError, Result};
use crate::identifiers::{Identifier, IdentifierKind};
use crate::model::{DocModel, NodeData, NodeId, TypeRef};

/// Resolves the whole model by walking every namespace root.
///
/// After this pass every reference field on every reachable node points at
/// a node in the model, internal or external; nothing dangles. Running the
/// pass again is a no-op.
pub fn resolve_model(model: &mut DocModel) -> Result<()> {
    let roots: Vec<NodeId> = model.namespace_roots().to_vec();
    for root in roots {
        resolve_node(model, root)?;
    }
    Ok(())
}

/// Resolves one node and, recursively, everything it references.
///
/// A node whose identifier is absent from the global index is converted to
/// an external reference and left terminally unresolved.
pub fn resolve_node(model: &mut DocModel, id: NodeId) -> Result<()> {
    {
        let node = model.node(id);
        if node.resolved || node.external {
            return Ok(());
        }
    }

    let identifier = model.node(id).identifier.clone();
    if model.lookup(&identifier).is_none() {
        convert_to_external(model, id);
        return Ok(());
    }

    // Mark resolved before recursing. This ordering is what terminates
    // reference cycles: a revisit short-circuits on the flag above.
    model.node_mut(id).resolved = true;

    resolve_text_blocks(model, id)?;

    match model.node(id).data.kind() {
        IdentifierKind::Namespace => {
            let children = match &model.node(id).data {
                NodeData::Namespace { types } => types.clone(),
                _ => Vec::new(),
            };
            for child in children {
                resolve_node(model, child)?;
            }
        }
        IdentifierKind::Type => {
            let children = match &model.node(id).data {
                NodeData::Type {
                    methods,
                    properties,
                    fields,
                    events,
                    ..
                } => {
                    let mut all = methods.clone();
                    all.extend_from_slice(properties);
                    all.extend_from_slice(fields);
                    all.extend_from_slice(events);
                    all
                }
                _ => Vec::new(),
            };
            for child in children {
                resolve_node(model, child)?;
            }
        }
        IdentifierKind::Method => resolve_method(model, id)?,
        IdentifierKind::Property | IdentifierKind::Field | IdentifierKind::Event => {
            resolve_valued(model, id)?
        }
    }

    Ok(())
}

fn resolve_method(model: &mut DocModel, id: NodeId) -> Result<()> {
    let return_ref = match &model.node(id).data {
        NodeData::Method { return_type, .. } => return_type.clone(),
        _ => TypeRef::Void,
    };
    let return_ref = resolve_type_ref(model, return_ref)?;
    if let NodeData::Method { return_type, .. } = &mut model.node_mut(id).data {
        *return_type = return_ref;
    }

    let mut returns = match &mut model.node_mut(id).data {
        NodeData::Method { returns, .. } => mem::take(returns),
        _ => Text::default(),
    };
    resolve_text(model, &mut returns)?;

    let mut parameters = match &mut model.node_mut(id).data {
        NodeData::Method { parameters, .. } => mem::take(parameters),
        _ => Vec::new(),
    };
    for parameter in &mut parameters {
        let type_ref = mem::replace(&mut parameter.parameter_type, TypeRef::Void);
        parameter.parameter_type = resolve_type_ref(model, type_ref)?;
        resolve_text(model, &mut parameter.summary)?;
    }

    if let NodeData::Method {
        returns: slot_returns,
        parameters: slot_parameters,
        ..
    } = &mut model.node_mut(id).data
    {
        *slot_returns = returns;
        *slot_parameters = parameters;
    }
    Ok(())
}

fn resolve_valued(model: &mut DocModel, id: NodeId) -> Result<()> {
    let value_ref = match &model.node(id).data {
        NodeData::Property { value_type, .. }
        | NodeData::Field { value_type, .. }
        | NodeData::Event { value_type, .. } => value_type.clone(),
        _ => TypeRef::Void,
    };
    let value_ref = resolve_type_ref(model, value_ref)?;
    if let NodeData::Property { value_type, .. }
    | NodeData::Field { value_type, .. }
    | NodeData::Event { value_type, .. } = &mut model.node_mut(id).data
    {
        *value_type = value_ref;
    }
    Ok(())
}

/// Substitutes a reference placeholder with a handle to the real node,
/// interning an external placeholder when the index has no entry. Already
/// resolved references pass through unchanged.
fn resolve_type_ref(model: &mut DocModel, type_ref: TypeRef) -> Result<TypeRef> {
    match type_ref {
        TypeRef::Void => Ok(TypeRef::Void),
        TypeRef::Resolved(id) => Ok(TypeRef::Resolved(id)),
        TypeRef::Unresolved(identifier) => {
            resolve_identifier(model, &identifier).map(TypeRef::Resolved)
        }
    }
}

fn resolve_identifier(model: &mut DocModel, identifier: &Identifier) -> Result<NodeId> {
    match model.lookup(identifier) {
        Some(id) => {
            let node = model.node(id);
            if node.data.kind() != identifier.kind() {
                // A mismatched kind means the identifier derivation is
                // broken, not that documentation is missing.
                return Err(DocGraphError::KindMismatch {
                    identifier: identifier.to_string(),
                    expected: identifier.kind().as_str().to_string(),
                    actual: node.data.kind().as_str().to_string(),
                });
            }
            resolve_node(model, id)?;
            Ok(id)
        }
        None => {
            tracing::debug!(identifier = %identifier, "no generated node, using external reference");
            Ok(model.intern_external(identifier.clone()))
        }
    }
}

/// Resolves the four shared text blocks of a node, flag-guarded per block.
fn resolve_text_blocks(model: &mut DocModel, id: NodeId) -> Result<()> {
    let mut summary = mem::take(&mut model.node_mut(id).summary);
    let mut remarks = mem::take(&mut model.node_mut(id).remarks);
    let mut value = mem::take(&mut model.node_mut(id).value);
    let mut example = mem::take(&mut model.node_mut(id).example);

    resolve_text(model, &mut summary)?;
    resolve_text(model, &mut remarks)?;
    resolve_text(model, &mut value)?;
    resolve_text(model, &mut example)?;

    let node = model.node_mut(id);
    node.summary = summary;
    node.remarks = remarks;
    node.value = value;
    node.example = example;
    Ok(())
}

/// Resolves the cross-references embedded in one text block.
fn resolve_text(model: &mut DocModel, text: &mut Text) -> Result<()> {
    if text.resolved {
        return Ok(());
    }
    text.resolved = true;
    resolve_inlines(model, &mut text.inlines)
}

fn resolve_inlines(model: &mut DocModel, inlines: &mut [Inline]) -> Result<()> {
    for inline in inlines.iter_mut() {
        match inline {
            Inline::See(reference) => {
                let type_ref = mem::replace(reference, TypeRef::Void);
                *reference = resolve_type_ref(model, type_ref)?;
            }
            Inline::Para(children) => resolve_inlines(model, children)?,
            _ => {}
        }
    }
    Ok(())
}

/// Flips a node to an external placeholder: empty text blocks, external
/// flag set, resolution flag left false-but-terminal.
fn convert_to_external(model: &mut DocModel, id: NodeId) {
    tracing::debug!(identifier = %model.node(id).identifier, "converting to external reference");
    let node = model.node_mut(id);
    node.external = true;
    node.summary = Text::default();
    node.remarks = Text::default();
    node.value = Text::default();
    node.example = Text::default();
    if let NodeData::Method {
        returns,
        parameters,
        ..
    } = &mut node.data
    {
        *returns = Text::default();
        for parameter in parameters {
            parameter.summary = Text::default();
        }
    }
}
