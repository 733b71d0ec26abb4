//! The in-memory diagram model: nodes, edges and the editing operations the
//! canvas performs on them.
//!
//! A [`Diagram`] owns its nodes and edges in insertion order. That order is
//! the order every consumer (serializer, document codec) observes; nothing
//! here sorts.
//!
//! Edges may reference node ids that do not exist. Loaders keep such edges
//! because a diagram saved mid-edit can contain them; the serializer drops
//! them. Only [`Diagram::connect`], the interactive operation, insists that
//! both endpoints exist.

use std::collections::HashSet;

use log::{debug, trace};
use thiserror::Error;

use crate::{identifier::Id, palette::Palette};

/// Errors raised by editing operations on a [`Diagram`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    #[error("node `{0}` already exists")]
    DuplicateNode(Id),

    #[error("edge `{0}` already exists")]
    DuplicateEdge(Id),

    #[error("node `{0}` does not exist")]
    UnknownNode(Id),
}

/// A labeled, typed vertex of a diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: Id,
    label: String,
    kind: String,
}

impl Node {
    /// Creates a node.
    ///
    /// # Arguments
    ///
    /// * `id` - Identity of the node, unique within its diagram
    /// * `label` - Human-readable display name
    /// * `kind` - Category tag such as `"aws"` or `"process"`
    pub fn new(id: Id, label: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            kind: kind.into(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the category tag of the node.
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// A directed connection between two node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    id: Id,
    source: Id,
    target: Id,
}

impl Edge {
    pub fn new(id: Id, source: Id, target: Id) -> Self {
        Self { id, source, target }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }
}

/// An ordered collection of nodes and edges.
///
/// # Examples
///
/// ```
/// use umlsketch_core::{
///     diagram::{Diagram, Node},
///     identifier::Id,
///     palette::Palette,
/// };
///
/// let mut diagram = Diagram::new();
/// diagram.add_node(Node::new(Id::new("1"), "Database", "database")).unwrap();
/// let server = diagram.place("nginx", &Palette::default());
///
/// let edge = diagram.connect(Id::new("1"), server).unwrap();
/// assert_eq!(edge, Some(Id::new("edge-1-nginx-2")));
///
/// // Deleting a node takes its edges with it
/// diagram.remove_node(server);
/// assert!(diagram.edges().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagram {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Diagram {
    /// Creates an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Looks up a node by id.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn contains_node(&self, id: Id) -> bool {
        self.node(id).is_some()
    }

    /// Looks up an edge by id.
    pub fn edge(&self, id: Id) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    /// Appends a node.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::DuplicateNode`] if a node with the same id is
    /// already present. The diagram is left unchanged.
    pub fn add_node(&mut self, node: Node) -> Result<(), DiagramError> {
        if self.contains_node(node.id) {
            return Err(DiagramError::DuplicateNode(node.id));
        }
        trace!(node_id:% = node.id; "Adding node");
        self.nodes.push(node);
        Ok(())
    }

    /// Creates a node for the palette kind `kind` and returns its id.
    ///
    /// The id is `"{kind}-{n}"` with `n` starting at the node count plus one
    /// and bumped until the id is free. The label is the palette display name
    /// when the kind is known, otherwise the kind with its first character
    /// upper-cased.
    pub fn place(&mut self, kind: &str, palette: &Palette) -> Id {
        let mut n = self.nodes.len() + 1;
        let id = loop {
            let candidate = Id::new(&format!("{kind}-{n}"));
            if !self.contains_node(candidate) {
                break candidate;
            }
            n += 1;
        };

        let label = match palette.lookup(kind) {
            Some(entry) => entry.label().to_string(),
            None => capitalize(kind),
        };

        debug!(node_id:% = id, kind; "Placing node");
        self.nodes.push(Node::new(id, label, kind));
        id
    }

    /// Changes the display label of a node.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnknownNode`] if no node has the given id.
    pub fn relabel(&mut self, id: Id, label: impl Into<String>) -> Result<(), DiagramError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|node| node.id == id)
            .ok_or(DiagramError::UnknownNode(id))?;
        node.label = label.into();
        Ok(())
    }

    /// Removes a node together with every edge that starts or ends at it.
    ///
    /// Returns the removed node, or `None` if the id is unknown.
    pub fn remove_node(&mut self, id: Id) -> Option<Node> {
        let index = self.nodes.iter().position(|node| node.id == id)?;
        let node = self.nodes.remove(index);

        let before = self.edges.len();
        self.edges
            .retain(|edge| edge.source != id && edge.target != id);
        debug!(
            node_id:% = id,
            removed_edges = before - self.edges.len();
            "Removed node"
        );

        Some(node)
    }

    /// Removes an edge by id, returning it if it existed.
    pub fn remove_edge(&mut self, id: Id) -> Option<Edge> {
        let index = self.edges.iter().position(|edge| edge.id == id)?;
        Some(self.edges.remove(index))
    }

    /// Connects `source` to `target` with a new edge `"edge-{source}-{target}"`.
    ///
    /// Returns `Ok(None)` without changing anything when the ordered pair is
    /// already connected.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnknownNode`] if either endpoint is missing.
    pub fn connect(&mut self, source: Id, target: Id) -> Result<Option<Id>, DiagramError> {
        for endpoint in [source, target] {
            if !self.contains_node(endpoint) {
                return Err(DiagramError::UnknownNode(endpoint));
            }
        }

        if self
            .edges
            .iter()
            .any(|edge| edge.source == source && edge.target == target)
        {
            debug!(source:% = source, target:% = target; "Nodes already connected");
            return Ok(None);
        }

        Ok(Some(self.append_edge(source, target)))
    }

    /// Appends an edge as-is.
    ///
    /// Endpoints are not checked; this is the entry point for loaders that
    /// must keep edges left dangling by an interrupted edit.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::DuplicateEdge`] if the edge id is taken.
    pub fn push_edge(&mut self, edge: Edge) -> Result<(), DiagramError> {
        if self.edge(edge.id).is_some() {
            return Err(DiagramError::DuplicateEdge(edge.id));
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Appends an edge from `source` to `target` under a fresh id and returns
    /// the id. Endpoints are not checked and repeated pairs are kept.
    pub fn append_edge(&mut self, source: Id, target: Id) -> Id {
        let id = self.next_edge_id(source, target);
        self.edges.push(Edge::new(id, source, target));
        id
    }

    /// Returns a fresh edge id for a connection from `source` to `target`.
    ///
    /// The first candidate is `"edge-{source}-{target}"`; repeats get a
    /// `-2`, `-3`, ... suffix.
    pub fn next_edge_id(&self, source: Id, target: Id) -> Id {
        let base = format!("edge-{source}-{target}");
        let mut id = Id::new(&base);
        let mut n = 2;
        while self.edge(id).is_some() {
            id = Id::new(&format!("{base}-{n}"));
            n += 1;
        }
        id
    }

    /// Iterates over edges whose source or target is not a node of this diagram.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        let ids: HashSet<Id> = self.nodes.iter().map(Node::id).collect();
        self.edges
            .iter()
            .filter(move |edge| !ids.contains(&edge.source) || !ids.contains(&edge.target))
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Diagram {
        let mut diagram = Diagram::new();
        diagram
            .add_node(Node::new(Id::new("1"), "Database", "database"))
            .unwrap();
        diagram
            .add_node(Node::new(Id::new("2"), "Server", "server"))
            .unwrap();
        diagram
            .add_node(Node::new(Id::new("3"), "Container", "container"))
            .unwrap();
        diagram
            .push_edge(Edge::new(Id::new("e1-2"), Id::new("1"), Id::new("2")))
            .unwrap();
        diagram
            .push_edge(Edge::new(Id::new("e1-3"), Id::new("1"), Id::new("3")))
            .unwrap();
        diagram
    }

    #[test]
    fn test_add_node_rejects_duplicate_id() {
        let mut diagram = sample();
        let err = diagram
            .add_node(Node::new(Id::new("1"), "Other", "redis"))
            .unwrap_err();

        assert_eq!(err, DiagramError::DuplicateNode(Id::new("1")));
        assert_eq!(diagram.nodes().len(), 3);
        assert_eq!(diagram.node(Id::new("1")).unwrap().label(), "Database");
    }

    #[test]
    fn test_place_uses_palette_label() {
        let mut diagram = Diagram::new();
        let id = diagram.place("cpp", &Palette::default());

        assert_eq!(id, "cpp-1");
        let node = diagram.node(id).unwrap();
        assert_eq!(node.label(), "C++");
        assert_eq!(node.kind(), "cpp");
    }

    #[test]
    fn test_place_capitalizes_unknown_kind() {
        let mut diagram = Diagram::new();
        let id = diagram.place("server", &Palette::default());

        assert_eq!(diagram.node(id).unwrap().label(), "Server");
    }

    #[test]
    fn test_place_skips_taken_ids() {
        let mut diagram = Diagram::new();
        diagram
            .add_node(Node::new(Id::new("aws-2"), "AWS", "aws"))
            .unwrap();

        // One node present, so the first candidate is `aws-2`, which is taken
        let id = diagram.place("aws", &Palette::default());
        assert_eq!(id, "aws-3");
    }

    #[test]
    fn test_place_after_removal_does_not_collide() {
        let mut diagram = Diagram::new();
        let palette = Palette::default();
        let first = diagram.place("redis", &palette);
        let second = diagram.place("redis", &palette);
        diagram.remove_node(first);

        let third = diagram.place("redis", &palette);
        assert_ne!(third, second);
        assert_eq!(diagram.nodes().len(), 2);
    }

    #[test]
    fn test_connect_creates_edge() {
        let mut diagram = sample();
        let id = diagram.connect(Id::new("2"), Id::new("3")).unwrap();

        assert_eq!(id, Some(Id::new("edge-2-3")));
        let edge = diagram.edges().last().unwrap();
        assert_eq!(edge.source(), "2");
        assert_eq!(edge.target(), "3");
    }

    #[test]
    fn test_connect_ignores_existing_connection() {
        let mut diagram = sample();
        let result = diagram.connect(Id::new("1"), Id::new("2")).unwrap();

        assert_eq!(result, None);
        assert_eq!(diagram.edges().len(), 2);
    }

    #[test]
    fn test_connect_reverse_direction_is_new_edge() {
        let mut diagram = sample();
        let result = diagram.connect(Id::new("2"), Id::new("1")).unwrap();

        assert_eq!(result, Some(Id::new("edge-2-1")));
    }

    #[test]
    fn test_connect_requires_existing_nodes() {
        let mut diagram = sample();
        let err = diagram.connect(Id::new("1"), Id::new("99")).unwrap_err();

        assert_eq!(err, DiagramError::UnknownNode(Id::new("99")));
        assert_eq!(diagram.edges().len(), 2);
    }

    #[test]
    fn test_remove_node_removes_incident_edges() {
        let mut diagram = sample();
        let removed = diagram.remove_node(Id::new("1")).unwrap();

        assert_eq!(removed.label(), "Database");
        assert_eq!(diagram.nodes().len(), 2);
        assert!(diagram.edges().is_empty());
    }

    #[test]
    fn test_remove_unknown_node() {
        let mut diagram = sample();
        assert!(diagram.remove_node(Id::new("42")).is_none());
        assert_eq!(diagram, sample());
    }

    #[test]
    fn test_remove_edge() {
        let mut diagram = sample();
        let edge = diagram.remove_edge(Id::new("e1-2")).unwrap();

        assert_eq!(edge.target(), "2");
        assert_eq!(diagram.edges().len(), 1);
        assert!(diagram.remove_edge(Id::new("e1-2")).is_none());
    }

    #[test]
    fn test_relabel() {
        let mut diagram = sample();
        diagram.relabel(Id::new("2"), "API Server").unwrap();

        assert_eq!(diagram.node(Id::new("2")).unwrap().label(), "API Server");
        assert_eq!(
            diagram.relabel(Id::new("9"), "x"),
            Err(DiagramError::UnknownNode(Id::new("9")))
        );
    }

    #[test]
    fn test_push_edge_keeps_dangling_edges() {
        let mut diagram = sample();
        diagram
            .push_edge(Edge::new(Id::new("e2"), Id::new("1"), Id::new("99")))
            .unwrap();

        let dangling: Vec<_> = diagram.dangling_edges().map(Edge::id).collect();
        assert_eq!(dangling, vec![Id::new("e2")]);
    }

    #[test]
    fn test_push_edge_rejects_duplicate_id() {
        let mut diagram = sample();
        let err = diagram
            .push_edge(Edge::new(Id::new("e1-2"), Id::new("2"), Id::new("3")))
            .unwrap_err();

        assert_eq!(err, DiagramError::DuplicateEdge(Id::new("e1-2")));
    }

    #[test]
    fn test_next_edge_id_suffixes_repeats() {
        let mut diagram = sample();
        let first = diagram.next_edge_id(Id::new("2"), Id::new("3"));
        diagram
            .push_edge(Edge::new(first, Id::new("2"), Id::new("3")))
            .unwrap();
        let second = diagram.next_edge_id(Id::new("2"), Id::new("3"));

        assert_eq!(first, "edge-2-3");
        assert_eq!(second, "edge-2-3-2");
    }

    #[test]
    fn test_append_edge_keeps_repeats_and_dangling() {
        let mut diagram = sample();
        let first = diagram.append_edge(Id::new("1"), Id::new("2"));
        let second = diagram.append_edge(Id::new("1"), Id::new("404"));

        assert_eq!(first, "edge-1-2");
        assert_eq!(second, "edge-1-404");
        assert_eq!(diagram.edges().len(), 4);
        assert_eq!(diagram.dangling_edges().count(), 1);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("kubernetes"), "Kubernetes");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("édition"), "Édition");
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn placed_ids_stay_unique(
                kinds in prop::collection::vec(prop::sample::select(vec!["aws", "redis", "process"]), 0..24),
                removals in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
            ) {
                let palette = Palette::default();
                let mut diagram = Diagram::new();
                for (i, kind) in kinds.iter().enumerate() {
                    diagram.place(kind, &palette);
                    if let Some(index) = removals.get(i) {
                        let victim = diagram.nodes()[index.index(diagram.nodes().len())].id();
                        diagram.remove_node(victim);
                    }
                }

                let ids: HashSet<Id> = diagram.nodes().iter().map(Node::id).collect();
                prop_assert_eq!(ids.len(), diagram.nodes().len());
            }
        }
    }
}
