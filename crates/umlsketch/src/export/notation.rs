//! UML component notation writer.
//!
//! Turns a node list and an edge list into PlantUML-style component text:
//!
//! ```text
//! @startuml
//! component "Database" as 1 <<database>>
//! component "Server" as 2 <<server>>
//!
//! 1 --> 2
//! @enduml
//! ```
//!
//! Relationship lines name node identifiers, not labels, so two nodes with
//! the same label stay distinguishable. Edges with an endpoint that is not
//! among the nodes are left out.

use std::collections::HashSet;

use log::debug;

use umlsketch_core::{
    diagram::{Diagram, Edge, Node},
    identifier::{self, Id},
};

const HEADER: &str = "@startuml";
const FOOTER: &str = "@enduml";

/// Serialize nodes and edges into component notation.
///
/// Node lines follow the order of `nodes` and relationship lines the order
/// of `edges`. The function is pure: equal inputs give byte-identical output.
///
/// # Examples
///
/// ```
/// use umlsketch::{
///     export::serialize,
///     identifier::Id,
///     diagram::{Edge, Node},
/// };
///
/// let nodes = [
///     Node::new(Id::new("1"), "Database", "database"),
///     Node::new(Id::new("2"), "Server", "server"),
/// ];
/// let edges = [
///     Edge::new(Id::new("e1"), Id::new("1"), Id::new("2")),
///     Edge::new(Id::new("e2"), Id::new("1"), Id::new("99")),
/// ];
///
/// let text = serialize(&nodes, &edges);
/// assert_eq!(
///     text,
///     "@startuml\n\
///      component \"Database\" as 1 <<database>>\n\
///      component \"Server\" as 2 <<server>>\n\
///      \n\
///      1 --> 2\n\
///      @enduml\n"
/// );
/// ```
pub fn serialize(nodes: &[Node], edges: &[Edge]) -> String {
    let known: HashSet<Id> = nodes.iter().map(Node::id).collect();

    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for node in nodes {
        write_node(&mut out, node);
    }

    out.push('\n');

    let mut dropped = 0usize;
    for edge in edges {
        if known.contains(&edge.source()) && known.contains(&edge.target()) {
            write_edge(&mut out, edge);
        } else {
            dropped += 1;
        }
    }

    out.push_str(FOOTER);
    out.push('\n');

    if dropped > 0 {
        debug!(dropped; "Dropped edges with unresolved endpoints");
    }

    out
}

/// Serialize a whole [`Diagram`]. Same as [`serialize`] over its parts.
pub fn serialize_diagram(diagram: &Diagram) -> String {
    serialize(diagram.nodes(), diagram.edges())
}

fn write_node(out: &mut String, node: &Node) {
    out.push_str("component ");
    write_quoted(out, node.label());
    out.push_str(" as ");
    node.id().with_str(|id| write_identifier(out, id));

    let kind = node.kind();
    if !kind.is_empty() {
        out.push_str(" <<");
        if identifier::is_bare(kind) {
            out.push_str(kind);
        } else {
            write_quoted(out, kind);
        }
        out.push_str(">>");
    }

    out.push('\n');
}

fn write_edge(out: &mut String, edge: &Edge) {
    edge.source().with_str(|id| write_identifier(out, id));
    out.push_str(" --> ");
    edge.target().with_str(|id| write_identifier(out, id));
    out.push('\n');
}

fn write_identifier(out: &mut String, id: &str) {
    if identifier::is_bare(id) {
        out.push_str(id);
    } else {
        write_quoted(out, id);
    }
}

/// Writes `text` as a double-quoted string literal.
fn write_quoted(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}


#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    fn arb_nodes() -> impl Strategy<Value = Vec<Node>> {
        proptest::collection::vec(("[a-z0-9 ]{0,8}", "[a-z]{0,6}"), 0..12).prop_map(|entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (label, kind))| Node::new(Id::new(&format!("n{i}")), label, kind))
                .collect()
        })
    }

    fn arb_edges(max_node: usize) -> impl Strategy<Value = Vec<Edge>> {
        // Endpoints may point past the last node to exercise dangling edges
        proptest::collection::vec((0..max_node + 3, 0..max_node + 3), 0..16).prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(i, (s, t))| {
                    Edge::new(
                        Id::new(&format!("e{i}")),
                        Id::new(&format!("n{s}")),
                        Id::new(&format!("n{t}")),
                    )
                })
                .collect()
        })
    }

    fn arb_graph() -> impl Strategy<Value = (Vec<Node>, Vec<Edge>)> {
        arb_nodes().prop_flat_map(|nodes| {
            let len = nodes.len();
            (Just(nodes), arb_edges(len))
        })
    }

    proptest! {
        #[test]
        fn deterministic((nodes, edges) in arb_graph()) {
            prop_assert_eq!(serialize(&nodes, &edges), serialize(&nodes, &edges));
        }

        #[test]
        fn one_line_per_node_in_order((nodes, edges) in arb_graph()) {
            let text = serialize(&nodes, &edges);
            let declared: Vec<&str> = text
                .lines()
                .filter(|line| line.starts_with("component "))
                .collect();

            prop_assert_eq!(declared.len(), nodes.len());
            for (line, node) in declared.iter().zip(&nodes) {
                let suffix = format!(" as {}", node.id());
                prop_assert!(line.contains(&suffix));
            }
        }

        #[test]
        fn dangling_edges_dropped((nodes, edges) in arb_graph()) {
            let text = serialize(&nodes, &edges);
            let resolvable: Vec<String> = edges
                .iter()
                .filter(|e| {
                    nodes.iter().any(|n| n.id() == e.source())
                        && nodes.iter().any(|n| n.id() == e.target())
                })
                .map(|e| format!("{} --> {}", e.source(), e.target()))
                .collect();

            let written: Vec<String> = text
                .lines()
                .filter(|line| line.contains(" --> "))
                .map(str::to_owned)
                .collect();
            prop_assert_eq!(written, resolvable);
        }

        #[test]
        fn reversing_input_reverses_output((nodes, edges) in arb_graph()) {
            let forward = serialize(&nodes, &edges);

            let mut rev_nodes = nodes.clone();
            rev_nodes.reverse();
            let mut rev_edges = edges.clone();
            rev_edges.reverse();
            let backward = serialize(&rev_nodes, &rev_edges);

            let body = |text: &str, relations: bool| -> Vec<String> {
                text.lines()
                    .filter(|l| !l.is_empty() && !l.starts_with('@'))
                    .filter(|l| l.contains(" --> ") == relations)
                    .map(str::to_owned)
                    .collect()
            };

            let mut expected_nodes = body(&forward, false);
            expected_nodes.reverse();
            prop_assert_eq!(body(&backward, false), expected_nodes);

            let mut expected_edges = body(&forward, true);
            expected_edges.reverse();
            prop_assert_eq!(body(&backward, true), expected_edges);
        }
    }
}
