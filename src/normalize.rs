use crate::error::BurrowError;
use crate::model::document::{Document, DocumentItem, PrimaryDataItem};
use crate::model::resource::{IdentifierData, Resource, ResourceIdentifier};
use crate::model::{Id, Meta};
use crate::BurrowResult;
use log::trace;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::ops::Index;

/// Handle to a node inside a [`NormalizedGraph`]. Every relationship naming
/// the same (type, id) pair resolves to the same key, so key equality is
/// reference identity for the graph.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct NodeKey(usize);

/// A resolved relationship: direct references into the graph, never raw
/// identifiers.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Linkage {
    ToOne(Option<NodeKey>),
    ToMany(Vec<NodeKey>),
}

/// A dereferenced resource. A *stub* is a node whose identifier appeared in
/// some relationship but whose resource object was absent from the document;
/// it carries only `ty` and `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub ty: String,
    pub id: Id,
    pub attributes: HashMap<String, Value>,
    pub relationships: HashMap<String, Linkage>,
    pub meta: Meta,
    stub: bool,
}

impl Node {
    pub fn is_stub(&self) -> bool { self.stub }
}

/// What the document's `data` member held.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Primary {
    /// `data: null`
    None,
    Single(NodeKey),
    /// Preserves the order of the `data` array; `data: []` yields an empty
    /// list, which is distinct from `Primary::None`.
    Multiple(Vec<NodeKey>),
}

/// The dereferenced object graph of one compound document.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGraph {
    nodes: Vec<Node>,
    primary: Primary,
}

struct Interner<'a> {
    pool: HashMap<ResourceIdentifier, &'a Resource>,
    memo: HashMap<ResourceIdentifier, NodeKey>,
    nodes: Vec<Node>,
    pending: Vec<(NodeKey, &'a Resource)>,
}

impl<'a> Interner<'a> {
    fn new(primary: &[&'a Resource], included: &'a [Resource]) -> Self {
        let mut pool: HashMap<ResourceIdentifier, &'a Resource> = HashMap::new();
        // First occurrence wins; primary data is scanned before `included`.
        for res in primary.iter().copied().chain(included.iter()) {
            pool.entry(res.identifier()).or_insert(res);
        }
        Self { pool, memo: HashMap::new(), nodes: Vec::new(), pending: Vec::new() }
    }

    /// Returns the key for `ident`, materializing its node on first sight.
    /// Relationship resolution is deferred to the pending worklist so that
    /// deep or cyclic graphs never grow the call stack.
    fn intern(&mut self, ident: &ResourceIdentifier) -> NodeKey {
        if let Some(&key) = self.memo.get(ident) {
            return key;
        }
        let key = NodeKey(self.nodes.len());
        self.memo.insert(ident.clone(), key);
        match self.pool.get(ident).copied() {
            Some(res) => {
                self.nodes.push(Node {
                    ty: res.ty.clone(),
                    id: res.id.clone(),
                    attributes: res.attributes.clone().into_inner(),
                    relationships: HashMap::new(),
                    meta: res.meta.clone(),
                    stub: false,
                });
                self.pending.push((key, res));
            },
            None => {
                trace!("no resource object for `{}:{}`, linking a stub", ident.ty, ident.id);
                self.nodes.push(Node {
                    ty: ident.ty.clone(),
                    id: ident.id.clone(),
                    attributes: HashMap::new(),
                    relationships: HashMap::new(),
                    meta: HashMap::new(),
                    stub: true,
                });
            },
        }
        key
    }

    fn resolve_pending(&mut self) {
        while let Some((key, res)) = self.pending.pop() {
            let mut relationships = HashMap::with_capacity(res.relationships.len());
            for (name, relationship) in &res.relationships {
                let linkage = match &relationship.data {
                    IdentifierData::Single(None) => Linkage::ToOne(None),
                    IdentifierData::Single(Some(ident)) => {
                        Linkage::ToOne(Some(self.intern(ident)))
                    },
                    IdentifierData::Multiple(idents) => {
                        Linkage::ToMany(idents.iter().map(|ident| self.intern(ident)).collect())
                    },
                };
                relationships.insert(name.clone(), linkage);
            }
            self.nodes[key.0].relationships = relationships;
        }
    }
}

impl NormalizedGraph {
    pub fn from_document(document: &Document) -> BurrowResult<NormalizedGraph> {
        match &document.item {
            DocumentItem::Errors(errors) => Err(BurrowError::ErrorDocument(errors.clone())),
            DocumentItem::PrimaryData(None) => {
                Ok(NormalizedGraph { nodes: Vec::new(), primary: Primary::None })
            },
            DocumentItem::PrimaryData(Some((data, included))) => {
                let primary_refs: Vec<&Resource> = match data {
                    PrimaryDataItem::Single(res) => vec![res.as_ref()],
                    PrimaryDataItem::Multiple(reses) => reses.iter().collect(),
                };
                let mut interner = Interner::new(&primary_refs, included);
                let keys: Vec<NodeKey> =
                    primary_refs.iter().map(|res| interner.intern(&res.identifier())).collect();
                interner.resolve_pending();

                let primary = match data {
                    PrimaryDataItem::Single(_) => Primary::Single(keys[0]),
                    PrimaryDataItem::Multiple(_) => Primary::Multiple(keys),
                };
                Ok(NormalizedGraph { nodes: interner.nodes, primary })
            },
        }
    }

    pub fn primary(&self) -> &Primary { &self.primary }

    /// `true` for a `data: null` document.
    pub fn is_null(&self) -> bool { self.primary == Primary::None }

    pub fn node(&self, key: NodeKey) -> Option<&Node> { self.nodes.get(key.0) }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.nodes.iter().enumerate().map(|(idx, node)| (NodeKey(idx), node))
    }

    pub fn find(&self, ty: &str, id: &str) -> Option<NodeKey> {
        self.nodes
            .iter()
            .position(|node| node.ty == ty && node.id == id)
            .map(NodeKey)
    }

    pub fn related(&self, key: NodeKey, field: &str) -> Option<&Linkage> {
        self.node(key).and_then(|node| node.relationships.get(field))
    }

    /// Renders the graph as plain JSON with relationships expanded in place.
    /// A node already being expanded on the current path re-appears as its
    /// bare `{type, id}` pair, since JSON cannot represent cycles.
    pub fn to_value(&self) -> Value {
        match &self.primary {
            Primary::None => Value::Null,
            Primary::Single(key) => self.render(*key),
            Primary::Multiple(keys) => {
                Value::Array(keys.iter().map(|key| self.render(*key)).collect())
            },
        }
    }

    fn bare_identifier(&self, key: NodeKey) -> Map<String, Value> {
        let node = &self.nodes[key.0];
        let mut map = Map::new();
        map.insert("type".into(), Value::String(node.ty.clone()));
        map.insert("id".into(), Value::String(node.id.clone()));
        map
    }

    /// Expands one primary node with an explicit task stack, the same
    /// worklist discipline the interner uses, so chain depth is bounded by
    /// memory instead of call-stack frames. `on_path` holds the keys whose
    /// assembly is still open, which is exactly the ancestor chain of the
    /// node being rendered.
    fn render(&self, root: NodeKey) -> Value {
        let mut tasks = vec![RenderTask::Node(root)];
        let mut out: Vec<Value> = Vec::new();
        let mut on_path: HashSet<NodeKey> = HashSet::new();

        while let Some(task) = tasks.pop() {
            match task {
                RenderTask::Literal(value) => out.push(value),
                RenderTask::Node(key) => {
                    if on_path.contains(&key) {
                        out.push(Value::Object(self.bare_identifier(key)));
                        continue;
                    }
                    on_path.insert(key);
                    let rels: Vec<(&String, &Linkage)> =
                        self.nodes[key.0].relationships.iter().collect();
                    let names = rels.iter().map(|(name, _)| (*name).clone()).collect();
                    // The assembly task runs once every linkage group below
                    // has produced its value; groups are pushed in reverse so
                    // they complete in `names` order.
                    tasks.push(RenderTask::Assemble(key, names));
                    for (_, linkage) in rels.iter().rev() {
                        match linkage {
                            Linkage::ToOne(None) => tasks.push(RenderTask::Literal(Value::Null)),
                            Linkage::ToOne(Some(target)) => {
                                tasks.push(RenderTask::Node(*target))
                            },
                            Linkage::ToMany(targets) => {
                                tasks.push(RenderTask::Collect(targets.len()));
                                for target in targets.iter().rev() {
                                    tasks.push(RenderTask::Node(*target));
                                }
                            },
                        }
                    }
                },
                RenderTask::Assemble(key, names) => {
                    let node = &self.nodes[key.0];
                    let mut map = self.bare_identifier(key);
                    for (name, value) in &node.attributes {
                        map.insert(name.clone(), value.clone());
                    }
                    let values = out.split_off(out.len() - names.len());
                    for (name, value) in names.into_iter().zip(values) {
                        map.insert(name, value);
                    }
                    on_path.remove(&key);
                    out.push(Value::Object(map));
                },
                RenderTask::Collect(len) => {
                    let values = out.split_off(out.len() - len);
                    out.push(Value::Array(values));
                },
            }
        }

        out.pop().unwrap_or(Value::Null)
    }
}

enum RenderTask {
    /// Expand a node, or fold back to its identifier when it is an ancestor.
    Node(NodeKey),
    /// Pop one value per listed relationship and build the node object.
    Assemble(NodeKey, Vec<String>),
    /// Pop `len` values and build a to-many array.
    Collect(usize),
    Literal(Value),
}

impl Index<NodeKey> for NormalizedGraph {
    type Output = Node;

    fn index(&self, key: NodeKey) -> &Node { &self.nodes[key.0] }
}

/// Parses a raw JSON:API document and normalizes it in one step.
pub fn deserialize(value: Value) -> BurrowResult<NormalizedGraph> {
    let document: Document = serde_json::from_value(value)?;
    NormalizedGraph::from_document(&document)
}
