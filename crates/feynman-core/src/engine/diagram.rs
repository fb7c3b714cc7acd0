use super::algorithm::Operation;
use super::graph::NamedGraph;
use super::replay::{Replay, ReplayError};
use crate::core::interaction::{DiagramRule, VertexOutcome};
use crate::core::particles::{Leg, Particle};

/// The undirected graph of one Feynman diagram, keyed by particle name.
#[derive(Debug, Clone)]
pub struct FeynmanDiagram {
    graph: NamedGraph<(), ()>,
    history_of_particle_lists: Vec<Vec<String>>,
    amplitude: String,
}

impl FeynmanDiagram {
    pub fn nodes(&self) -> Vec<&str> {
        self.graph.nodes().map(|(name, _)| name).collect()
    }

    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .edges()
            .map(|(source, target, _)| (source, target))
            .collect()
    }

    pub fn neighbors(&self, name: &str) -> Option<Vec<&str>> {
        self.graph.neighbors(name)
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.graph.contains_node(name)
    }

    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        self.graph.contains_edge(a, b)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Particle names before the first and after every fusion.
    pub fn history_of_particle_lists(&self) -> &[Vec<String>] {
        &self.history_of_particle_lists
    }

    /// The symbolic amplitude, e.g. `M(C(a1,b1),a2,b2)`.
    pub fn amplitude_expression(&self) -> &str {
        &self.amplitude
    }

    pub fn to_dot(&self, title: &str) -> String {
        self.graph
            .to_dot(title, |_| String::new(), |_| String::new())
    }
}

/// Replays a branch symbolically and records the diagram graph.
#[derive(Debug, Clone)]
pub struct DiagramBuilder {
    replay: Replay<DiagramRule>,
    graph: NamedGraph<(), ()>,
    amplitude: Option<String>,
}

impl DiagramBuilder {
    pub fn new(externals: Vec<Particle>, operations: Vec<Operation>) -> Result<Self, ReplayError> {
        Ok(Self {
            replay: Replay::new(DiagramRule, externals, operations)?,
            graph: NamedGraph::undirected(),
            amplitude: None,
        })
    }

    pub fn number_of_operations(&self) -> usize {
        self.replay.number_of_operations()
    }

    /// Applies the next operation and adds its vertex to the graph.
    pub fn do_next_operation(&mut self) -> Result<(), ReplayError> {
        let event = self.replay.do_next_operation()?;
        let names: Vec<&str> = event.inputs.iter().map(Leg::name).collect();
        for name in &names {
            self.graph.ensure_node(name);
        }

        match &event.outcome {
            VertexOutcome::Particle(product) => {
                let vertex = product.name.as_str();
                self.graph.ensure_node(vertex);
                for name in &names {
                    self.graph.add_edge(vertex, name, ());
                }
            }
            VertexOutcome::Amplitude(expression) => {
                let vertex = format!("{}+{}", names[1], names[2]);
                self.graph.ensure_node(&vertex);
                for name in &names {
                    self.graph.add_edge(name, &vertex, ());
                }
                self.amplitude = Some(expression.clone());
            }
        }
        Ok(())
    }

    /// Applies all remaining operations and returns the finished diagram.
    pub fn build(mut self) -> Result<FeynmanDiagram, ReplayError> {
        while self.replay.remaining() > 0 {
            self.do_next_operation()?;
        }
        let amplitude = self.amplitude.ok_or(ReplayError::Unterminated)?;
        let history_of_particle_lists = self
            .replay
            .history_of_particle_lists()
            .iter()
            .map(|list| list.iter().map(|p| p.name.clone()).collect())
            .collect();
        Ok(FeynmanDiagram {
            graph: self.graph,
            history_of_particle_lists,
            amplitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::particles::Species;

    fn abab() -> Vec<Particle> {
        vec![
            Particle::incoming("a1", Species::A),
            Particle::incoming("b1", Species::B),
            Particle::outgoing("a2", Species::A),
            Particle::outgoing("b2", Species::B),
        ]
    }

    fn s_channel() -> FeynmanDiagram {
        DiagramBuilder::new(abab(), vec![Operation::Fuse(0, 1), Operation::Close])
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn fusion_connects_product_to_inputs() {
        let diagram = s_channel();
        assert!(diagram.contains_edge("C(a1,b1)", "a1"));
        assert!(diagram.contains_edge("b1", "C(a1,b1)"));
    }

    #[test]
    fn closure_adds_named_vertex() {
        let diagram = s_channel();
        assert!(diagram.contains_node("a2+b2"));
        let mut neighbors = diagram.neighbors("a2+b2").unwrap();
        neighbors.sort_unstable();
        assert_eq!(neighbors, ["C(a1,b1)", "a2", "b2"]);
    }

    #[test]
    fn diagram_has_expected_size() {
        let diagram = s_channel();
        // a1 b1 a2 b2, the propagator and the closing vertex.
        assert_eq!(diagram.node_count(), 6);
        assert_eq!(diagram.edge_count(), 5);
        assert_eq!(diagram.amplitude_expression(), "M(C(a1,b1),a2,b2)");
    }

    #[test]
    fn history_records_each_generation() {
        let diagram = s_channel();
        assert_eq!(
            diagram.history_of_particle_lists(),
            [
                vec!["a1", "b1", "a2", "b2"],
                vec!["C(a1,b1)", "a2", "b2"],
            ]
        );
    }

    #[test]
    fn step_by_step_matches_build() {
        let mut builder =
            DiagramBuilder::new(abab(), vec![Operation::Fuse(0, 3), Operation::Close]).unwrap();
        assert_eq!(builder.number_of_operations(), 2);
        builder.do_next_operation().unwrap();
        builder.do_next_operation().unwrap();
        assert!(builder.do_next_operation().is_err());
        let diagram = builder.build().unwrap();
        assert_eq!(diagram.amplitude_expression(), "M(C(a1,b2),b1,a2)");
        assert!(diagram.contains_node("b1+a2"));
    }

    #[test]
    fn dot_lists_all_edges() {
        let dot = s_channel().to_dot("branch 1.");
        assert!(dot.starts_with("graph \"branch 1.\""));
        assert_eq!(dot.matches(" -- ").count(), 5);
    }
}
