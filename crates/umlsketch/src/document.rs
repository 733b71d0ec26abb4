//! JSON document codec.
//!
//! A saved flowchart is a JSON object with a name and the canvas nodes and
//! edges:
//!
//! ```json
//! {
//!   "name": "My Flowchart",
//!   "nodes": [
//!     { "id": "1", "type": "custom", "position": { "x": 0, "y": 0 },
//!       "data": { "label": "Database", "type": "database" } }
//!   ],
//!   "edges": [{ "id": "e1-2", "source": "1", "target": "2" }]
//! }
//! ```
//!
//! Only the fields the diagram model needs are interpreted. Unknown fields are
//! ignored on read. The canvas fields (`type`, `position`) are not part of the
//! diagram model; [`Document::with_layout_from`] copies them from a saved
//! document onto a freshly built one so that re-saving keeps the layout.

use log::debug;
use serde::{Deserialize, Serialize};

use umlsketch_core::{
    diagram::{Diagram, Edge, Node},
    identifier::Id,
};

use crate::UmlSketchError;

const DEFAULT_NAME: &str = "Untitled Flowchart";

/// Canvas node type used when writing nodes that came from elsewhere.
const CANVAS_NODE_TYPE: &str = "custom";

/// A saved diagram document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    nodes: Vec<DocumentNode>,
    #[serde(default)]
    edges: Vec<DocumentEdge>,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

/// A node as stored in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    canvas_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
    #[serde(default)]
    data: NodeData,
}

/// Canvas coordinates of a node. Not used by the diagram model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct NodeData {
    #[serde(default)]
    label: String,
    #[serde(rename = "type", default)]
    kind: String,
}

/// An edge as stored in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEdge {
    id: String,
    source: String,
    target: String,
}

impl Document {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`UmlSketchError::Document`] when the text is not valid JSON or
    /// lacks a required field.
    pub fn from_json(json: &str) -> Result<Self, UmlSketchError> {
        let document: Self = serde_json::from_str(json)?;
        debug!(
            name = document.name.as_str(),
            nodes = document.nodes.len(),
            edges = document.edges.len();
            "Document loaded"
        );
        Ok(document)
    }

    /// Build a document from a diagram.
    pub fn from_diagram(name: impl Into<String>, diagram: &Diagram) -> Self {
        let nodes = diagram
            .nodes()
            .iter()
            .map(|node| DocumentNode {
                id: node.id().as_string(),
                canvas_type: Some(CANVAS_NODE_TYPE.to_string()),
                position: None,
                data: NodeData {
                    label: node.label().to_owned(),
                    kind: node.kind().to_owned(),
                },
            })
            .collect();

        let edges = diagram
            .edges()
            .iter()
            .map(|edge| DocumentEdge {
                id: edge.id().as_string(),
                source: edge.source().as_string(),
                target: edge.target().as_string(),
            })
            .collect();

        Self {
            name: name.into(),
            nodes,
            edges,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[DocumentNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DocumentEdge] {
        &self.edges
    }

    /// Convert the document into a [`Diagram`], keeping node and edge order.
    ///
    /// Edges with dangling endpoints are kept; the serializer drops them.
    ///
    /// # Errors
    ///
    /// Returns [`UmlSketchError::Graph`] if two nodes or two edges share an id.
    pub fn into_diagram(self) -> Result<Diagram, UmlSketchError> {
        self.to_diagram()
    }

    /// Like [`Document::into_diagram`], leaving the document in place.
    ///
    /// # Errors
    ///
    /// Returns [`UmlSketchError::Graph`] if two nodes or two edges share an id.
    pub fn to_diagram(&self) -> Result<Diagram, UmlSketchError> {
        let mut diagram = Diagram::new();

        for node in &self.nodes {
            diagram.add_node(Node::new(
                Id::new(&node.id),
                node.data.label.clone(),
                node.data.kind.clone(),
            ))?;
        }

        for edge in &self.edges {
            diagram.push_edge(Edge::new(
                Id::new(&edge.id),
                Id::new(&edge.source),
                Id::new(&edge.target),
            ))?;
        }

        Ok(diagram)
    }

    /// Copy canvas type and position from `saved` onto nodes with the same id.
    ///
    /// Nodes that `saved` does not know keep what they have.
    pub fn with_layout_from(mut self, saved: &Document) -> Self {
        for node in &mut self.nodes {
            if let Some(old) = saved.nodes.iter().find(|old| old.id == node.id) {
                if old.canvas_type.is_some() {
                    node.canvas_type.clone_from(&old.canvas_type);
                }
                node.position = old.position;
            }
        }
        self
    }

    /// Render the document as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`UmlSketchError::Document`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, UmlSketchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl DocumentNode {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }

    /// The node's category tag (`data.type`).
    pub fn kind(&self) -> &str {
        &self.data.kind
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }
}

impl DocumentEdge {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}
