use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::comments::Text;
use crate::identifiers::{Identifier, IdentifierKind};

/// Handle to a node in the model's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// A reference to a type held by some other node.
///
/// References start as `Unresolved` placeholders carrying only an identifier
/// and are substituted with `Resolved` handles during the resolution pass.
/// `Void` is the explicit no-type marker for methods that return nothing; it
/// never becomes an external reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    Void,
    Unresolved(Identifier),
    Resolved(NodeId),
}

impl TypeRef {
    pub fn is_resolved(&self) -> bool {
        matches!(self, TypeRef::Void | TypeRef::Resolved(_))
    }

    /// The target node, if the reference has been resolved to one.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            TypeRef::Resolved(id) => Some(*id),
            _ => None,
        }
    }
}

/// A formal method parameter attached to a method node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub summary: Text,
    pub parameter_type: TypeRef,
}

/// Kind-specific payload of a graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeData {
    Namespace {
        types: Vec<NodeId>,
    },
    Type {
        namespace: Option<NodeId>,
        /// Whether the type's own structural declaration has been seen.
        /// Forward stubs created for references start out undeclared and are
        /// claimed by the declaration when it arrives.
        declared: bool,
        methods: Vec<NodeId>,
        properties: Vec<NodeId>,
        fields: Vec<NodeId>,
        events: Vec<NodeId>,
    },
    Method {
        owner: Option<NodeId>,
        return_type: TypeRef,
        returns: Text,
        parameters: Vec<Parameter>,
    },
    Property {
        owner: Option<NodeId>,
        value_type: TypeRef,
    },
    Field {
        owner: Option<NodeId>,
        value_type: TypeRef,
    },
    Event {
        owner: Option<NodeId>,
        value_type: TypeRef,
    },
}

impl NodeData {
    /// The identifier kind this payload corresponds to.
    pub fn kind(&self) -> IdentifierKind {
        match self {
            NodeData::Namespace { .. } => IdentifierKind::Namespace,
            NodeData::Type { .. } => IdentifierKind::Type,
            NodeData::Method { .. } => IdentifierKind::Method,
            NodeData::Property { .. } => IdentifierKind::Property,
            NodeData::Field { .. } => IdentifierKind::Field,
            NodeData::Event { .. } => IdentifierKind::Event,
        }
    }

    /// Empty payload matching an identifier kind, used for external stubs.
    fn empty_for(kind: IdentifierKind) -> Self {
        match kind {
            IdentifierKind::Namespace => NodeData::Namespace { types: Vec::new() },
            IdentifierKind::Type => NodeData::Type {
                namespace: None,
                declared: false,
                methods: Vec::new(),
                properties: Vec::new(),
                fields: Vec::new(),
                events: Vec::new(),
            },
            IdentifierKind::Method => NodeData::Method {
                owner: None,
                return_type: TypeRef::Void,
                returns: Text::default(),
                parameters: Vec::new(),
            },
            IdentifierKind::Property => NodeData::Property {
                owner: None,
                value_type: TypeRef::Void,
            },
            IdentifierKind::Field => NodeData::Field {
                owner: None,
                value_type: TypeRef::Void,
            },
            IdentifierKind::Event => NodeData::Event {
                owner: None,
                value_type: TypeRef::Void,
            },
        }
    }
}

/// One entity in the documentation graph.
///
/// Nodes are created once as unresolved stubs during generation, mutated
/// exactly once more by the resolution pass, and never deleted within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub identifier: Identifier,
    /// Short display name.
    pub name: String,
    /// Display form with generic arity rendered (`List<T>` for `` List`1 ``).
    pub pretty_name: String,
    pub summary: Text,
    pub remarks: Text,
    pub value: Text,
    pub example: Text,
    /// Once true, resolution never re-evaluates this node.
    pub resolved: bool,
    /// True for placeholder nodes standing in for out-of-scope entities.
    pub external: bool,
    pub data: NodeData,
}

impl Node {
    /// Creates an unresolved stub carrying only locally-known data.
    pub fn unresolved(identifier: Identifier, data: NodeData) -> Self {
        let name = identifier.short_name().to_string();
        let pretty_name = pretty_name_of(&name);
        Self {
            id: NodeId(0),
            identifier,
            name,
            pretty_name,
            summary: Text::default(),
            remarks: Text::default(),
            value: Text::default(),
            example: Text::default(),
            resolved: false,
            external: false,
            data,
        }
    }

    /// Creates an external placeholder for an identifier with no generated
    /// node. External nodes expose empty text blocks and stay terminally
    /// unresolved.
    pub fn external(identifier: Identifier) -> Self {
        let data = NodeData::empty_for(identifier.kind());
        let mut node = Self::unresolved(identifier, data);
        node.external = true;
        node
    }
}

/// The documentation model: an arena of nodes, the global identifier index,
/// and the namespace forest roots.
///
/// The index enforces one node per distinct identifier within a run; the
/// first writer wins and later insertions for the same identifier are
/// dropped. Both structures live for exactly one build.
#[derive(Debug, Default, Serialize)]
pub struct DocModel {
    nodes: Vec<Node>,
    #[serde(skip)]
    index: HashMap<Identifier, NodeId>,
    namespaces: Vec<NodeId>,
}

impl DocModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, registering it in the global index.
    ///
    /// If a node already exists for the identifier the existing handle is
    /// returned and the new node is dropped.
    pub fn insert(&mut self, mut node: Node) -> NodeId {
        if let Some(&existing) = self.index.get(&node.identifier) {
            return existing;
        }
        let id = NodeId(self.nodes.len() as u32);
        node.id = id;
        self.index.insert(node.identifier.clone(), id);
        self.nodes.push(node);
        id
    }

    /// Looks up the node generated for an identifier, if any.
    pub fn lookup(&self, identifier: &Identifier) -> Option<NodeId> {
        self.index.get(identifier).copied()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// Returns or creates the shared external placeholder for an identifier.
    pub fn intern_external(&mut self, identifier: Identifier) -> NodeId {
        if let Some(id) = self.lookup(&identifier) {
            return id;
        }
        self.insert(Node::external(identifier))
    }

    /// Appends a namespace node to the forest roots.
    pub fn push_namespace(&mut self, id: NodeId) {
        self.namespaces.push(id);
    }

    /// The root namespace nodes, in generation order.
    pub fn namespace_roots(&self) -> &[NodeId] {
        &self.namespaces
    }

    /// All nodes in the arena, in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Renders a generic-arity suffix as a readable parameter list.
fn pretty_name_of(short: &str) -> String {
    match short.split_once('`') {
        Some((base, arity)) => {
            let n: usize = arity.parse().unwrap_or(0);
            match n {
                0 => base.to_string(),
                1 => format!("{base}<T>"),
                _ => {
                    let params: Vec<String> = (1..=n).map(|i| format!("T{i}")).collect();
                    format!("{}<{}>", base, params.join(", "))
                }
            }
        }
        None => short.to_string(),
    }
}
