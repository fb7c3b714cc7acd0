use super::ids::NodeId;
use crate::core::io::dot::quote;
use slotmap::{SecondaryMap, SlotMap};
use std::collections::HashMap;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Directed,
    Undirected,
}

#[derive(Debug, Clone, PartialEq)]
struct Node<N> {
    name: String,
    data: N,
}

#[derive(Debug, Clone, PartialEq)]
struct Edge<E> {
    source: NodeId,
    target: NodeId,
    data: E,
}

/// A graph whose nodes are identified by name.
///
/// Nodes live in a slot map; a name lookup table and an adjacency list are kept
/// alongside it. Inserting a node or edge that already exists replaces its
/// attributes instead of duplicating it. Iteration follows insertion order.
#[derive(Debug, Clone)]
pub struct NamedGraph<N, E> {
    direction: Direction,
    nodes: SlotMap<NodeId, Node<N>>,
    order: Vec<NodeId>,
    name_map: HashMap<String, NodeId>,
    edges: Vec<Edge<E>>,
    edge_map: HashMap<(NodeId, NodeId), usize>,
    adjacency: SecondaryMap<NodeId, Vec<NodeId>>,
}

impl<N, E> NamedGraph<N, E> {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            nodes: SlotMap::with_key(),
            order: Vec::new(),
            name_map: HashMap::new(),
            edges: Vec::new(),
            edge_map: HashMap::new(),
            adjacency: SecondaryMap::new(),
        }
    }

    pub fn directed() -> Self {
        Self::new(Direction::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(Direction::Undirected)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.name_map.get(name).copied()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.name_map.contains_key(name)
    }

    pub fn node(&self, name: &str) -> Option<&N> {
        self.node_id(name)
            .and_then(|id| self.nodes.get(id))
            .map(|node| &node.data)
    }

    /// Inserts a node or replaces the attributes of an existing one.
    pub fn add_node(&mut self, name: &str, data: N) -> NodeId {
        if let Some(id) = self.node_id(name) {
            if let Some(node) = self.nodes.get_mut(id) {
                node.data = data;
            }
            return id;
        }
        let id = self.nodes.insert(Node {
            name: name.to_string(),
            data,
        });
        self.order.push(id);
        self.name_map.insert(name.to_string(), id);
        self.adjacency.insert(id, Vec::new());
        id
    }

    /// Inserts a node with default attributes unless it already exists.
    pub fn ensure_node(&mut self, name: &str) -> NodeId
    where
        N: Default,
    {
        match self.node_id(name) {
            Some(id) => id,
            None => self.add_node(name, N::default()),
        }
    }

    fn edge_key(&self, source: NodeId, target: NodeId) -> (NodeId, NodeId) {
        match self.direction {
            Direction::Directed => (source, target),
            Direction::Undirected if target < source => (target, source),
            Direction::Undirected => (source, target),
        }
    }

    /// Inserts an edge, creating missing endpoints with default attributes.
    pub fn add_edge(&mut self, source: &str, target: &str, data: E)
    where
        N: Default,
    {
        let source_id = self.ensure_node(source);
        let target_id = self.ensure_node(target);
        let key = self.edge_key(source_id, target_id);

        if let Some(&index) = self.edge_map.get(&key) {
            if let Some(edge) = self.edges.get_mut(index) {
                edge.data = data;
            }
            return;
        }

        self.edge_map.insert(key, self.edges.len());
        self.edges.push(Edge {
            source: source_id,
            target: target_id,
            data,
        });
        if let Some(neighbors) = self.adjacency.get_mut(source_id) {
            neighbors.push(target_id);
        }
        if self.direction == Direction::Undirected && source_id != target_id {
            if let Some(neighbors) = self.adjacency.get_mut(target_id) {
                neighbors.push(source_id);
            }
        }
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        match (self.node_id(source), self.node_id(target)) {
            (Some(s), Some(t)) => self.edge_map.contains_key(&self.edge_key(s, t)),
            _ => false,
        }
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&E> {
        let key = self.edge_key(self.node_id(source)?, self.node_id(target)?);
        let index = *self.edge_map.get(&key)?;
        self.edges.get(index).map(|edge| &edge.data)
    }

    fn name_of(&self, id: NodeId) -> &str {
        self.nodes.get(id).map_or("", |node| node.name.as_str())
    }

    /// Node names and attributes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &N)> {
        self.order
            .iter()
            .filter_map(|&id| self.nodes.get(id))
            .map(|node| (node.name.as_str(), &node.data))
    }

    /// Edges as `(source, target, attributes)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &E)> {
        self.edges
            .iter()
            .map(|edge| (self.name_of(edge.source), self.name_of(edge.target), &edge.data))
    }

    /// Successors for directed graphs, all adjacent nodes for undirected ones.
    pub fn neighbors(&self, name: &str) -> Option<Vec<&str>> {
        let id = self.node_id(name)?;
        let neighbors = self.adjacency.get(id)?;
        Some(neighbors.iter().map(|&n| self.name_of(n)).collect())
    }

    pub fn in_degree(&self, name: &str) -> usize {
        let Some(id) = self.node_id(name) else {
            return 0;
        };
        match self.direction {
            Direction::Directed => self.edges.iter().filter(|e| e.target == id).count(),
            Direction::Undirected => self.out_degree(name),
        }
    }

    pub fn out_degree(&self, name: &str) -> usize {
        self.node_id(name)
            .and_then(|id| self.adjacency.get(id))
            .map_or(0, Vec::len)
    }

    /// Renders the graph in Graphviz DOT syntax.
    ///
    /// `node_attrs` and `edge_attrs` return the bracketed attribute list
    /// contents for each element, or an empty string for none.
    pub fn to_dot(
        &self,
        title: &str,
        node_attrs: impl Fn(&N) -> String,
        edge_attrs: impl Fn(&E) -> String,
    ) -> String {
        let (keyword, connector) = match self.direction {
            Direction::Directed => ("digraph", "->"),
            Direction::Undirected => ("graph", "--"),
        };

        let mut out = String::new();
        let _ = writeln!(out, "{keyword} {} {{", quote(title));
        let _ = writeln!(out, "  rankdir=TB;");
        for (name, data) in self.nodes() {
            let attrs = node_attrs(data);
            if attrs.is_empty() {
                let _ = writeln!(out, "  {};", quote(name));
            } else {
                let _ = writeln!(out, "  {} [{attrs}];", quote(name));
            }
        }
        for (source, target, data) in self.edges() {
            let attrs = edge_attrs(data);
            if attrs.is_empty() {
                let _ = writeln!(out, "  {} {connector} {};", quote(source), quote(target));
            } else {
                let _ = writeln!(
                    out,
                    "  {} {connector} {} [{attrs}];",
                    quote(source),
                    quote(target)
                );
            }
        }
        out.push_str("}\n");
        out
    }
}
