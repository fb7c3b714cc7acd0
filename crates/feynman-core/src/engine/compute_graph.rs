//! The compute graph: all branches of a process merged into one directed graph.
//!
//! Every generation of every branch becomes a layer of named nodes. Intermediate
//! particles with the same name are shared between branches, and the amplitude
//! of each branch feeds a single sum node.

use super::algorithm::{Branch, Operation, branch_calculator, format_operations};
use super::diagram::{DiagramBuilder, FeynmanDiagram};
use super::error::EngineError;
use super::graph::NamedGraph;
use super::matrix_element::MatrixElement;
use crate::core::io::export::AmplitudeRecord;
use crate::core::model::AbcModel;
use crate::core::particles::{Leg, Particle, ParticleState};
use crate::core::utils::numeric::Complex64;
use std::fmt;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Name of the node that sums all amplitudes.
pub const SUM_NODE: &str = "+";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DagColor {
    Cyan,
    Red,
    Lime,
    Black,
    Silver,
}

impl DagColor {
    pub const fn as_str(self) -> &'static str {
        match self {
            DagColor::Cyan => "cyan",
            DagColor::Red => "red",
            DagColor::Lime => "lime",
            DagColor::Black => "black",
            DagColor::Silver => "silver",
        }
    }
}

impl fmt::Display for DagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    pub color: DagColor,
    pub size: u32,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            color: DagColor::Cyan,
            size: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeStyle {
    pub color: DagColor,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            color: DagColor::Black,
        }
    }
}

/// Node and edge styles for ordinary branches, the last branch and the sum node.
struct Palette {
    nodes: [NodeStyle; 3],
    edges: [EdgeStyle; 2],
}

const fn node(color: DagColor, size: u32) -> NodeStyle {
    NodeStyle { color, size }
}

const fn edge(color: DagColor) -> EdgeStyle {
    EdgeStyle { color }
}

const NORMAL_PALETTE: Palette = Palette {
    nodes: [
        node(DagColor::Cyan, 300),
        node(DagColor::Cyan, 300),
        node(DagColor::Lime, 600),
    ],
    edges: [edge(DagColor::Black), edge(DagColor::Black)],
};

const HIGHLIGHT_PALETTE: Palette = Palette {
    nodes: [
        node(DagColor::Cyan, 300),
        node(DagColor::Red, 500),
        node(DagColor::Lime, 600),
    ],
    edges: [edge(DagColor::Silver), edge(DagColor::Black)],
};

/// The styled directed graph produced by [`ComputeGraph::dag`].
#[derive(Debug, Clone)]
pub struct ComputeDag {
    graph: NamedGraph<NodeStyle, EdgeStyle>,
    highlighted: Option<String>,
}

impl ComputeDag {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.graph.contains_node(name)
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.graph.contains_edge(source, target)
    }

    pub fn node_style(&self, name: &str) -> Option<&NodeStyle> {
        self.graph.node(name)
    }

    pub fn edge_style(&self, source: &str, target: &str) -> Option<&EdgeStyle> {
        self.graph.edge(source, target)
    }

    pub fn in_degree(&self, name: &str) -> usize {
        self.graph.in_degree(name)
    }

    pub fn successors(&self, name: &str) -> Option<Vec<&str>> {
        self.graph.neighbors(name)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &NodeStyle)> {
        self.graph.nodes()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &EdgeStyle)> {
        self.graph.edges()
    }

    /// Label of the highlighted branch, if any.
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn to_dot(&self, title: &str) -> String {
        self.graph.to_dot(
            title,
            |style| {
                format!(
                    "style=filled fillcolor={} width={:.2}",
                    style.color,
                    f64::from(style.size).sqrt() / 72.0
                )
            },
            |style| format!("color={}", style.color),
        )
    }
}

/// The amplitude of one branch.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchAmplitude {
    pub label: String,
    pub operations: Vec<Operation>,
    pub value: Complex64,
}

/// Per-branch amplitudes and their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeSummary {
    pub amplitudes: Vec<BranchAmplitude>,
    pub total: Complex64,
}

impl AmplitudeSummary {
    pub fn from_amplitudes(amplitudes: Vec<BranchAmplitude>) -> Self {
        let total = amplitudes.iter().map(|a| a.value).sum();
        Self { amplitudes, total }
    }

    pub fn to_records(&self) -> Vec<AmplitudeRecord> {
        self.amplitudes
            .iter()
            .map(|a| AmplitudeRecord {
                branch: a.label.clone(),
                operations: format_operations(&a.operations),
                re: a.value.re,
                im: a.value.im,
            })
            .collect()
    }
}

/// All branches of one process, with the external particles they refer to.
#[derive(Debug, Clone)]
pub struct ComputeGraph {
    particles: Vec<Particle>,
    branches: Vec<Branch>,
}

impl ComputeGraph {
    pub fn new(particles: Vec<Particle>, branches: Vec<Branch>) -> Self {
        Self {
            particles,
            branches,
        }
    }

    #[instrument(skip_all, name = "compute_graph_generate")]
    pub fn generate(particles: Vec<Particle>) -> Result<Self, EngineError> {
        let branches = branch_calculator(&particles)?;
        info!(
            particles = particles.len(),
            branches = branches.len(),
            "Branch calculation complete."
        );
        Ok(Self::new(particles, branches))
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn branch(&self, index: usize) -> Result<&Branch, EngineError> {
        self.branches
            .get(index)
            .ok_or(EngineError::BranchOutOfRange {
                index,
                len: self.branches.len(),
            })
    }

    fn build_diagram(&self, branch: &Branch) -> Result<FeynmanDiagram, EngineError> {
        DiagramBuilder::new(self.particles.clone(), branch.operations.clone())
            .and_then(DiagramBuilder::build)
            .map_err(|source| EngineError::Replay {
                label: branch.label.clone(),
                source,
            })
    }

    pub fn diagram(&self, index: usize) -> Result<FeynmanDiagram, EngineError> {
        self.build_diagram(self.branch(index)?)
    }

    /// One diagram per branch, in branch order.
    pub fn diagrams(&self) -> Result<Vec<FeynmanDiagram>, EngineError> {
        #[cfg(not(feature = "parallel"))]
        let iterator = self.branches.iter();

        #[cfg(feature = "parallel")]
        let iterator = self.branches.par_iter();

        iterator.map(|branch| self.build_diagram(branch)).collect()
    }

    /// Node names per generation of `branch`, followed by its amplitude as a final layer.
    pub fn dag_nodes(&self, branch: &Branch) -> Result<Vec<Vec<String>>, EngineError> {
        let diagram = self.build_diagram(branch)?;
        let mut layers = diagram.history_of_particle_lists().to_vec();
        layers.push(vec![diagram.amplitude_expression().to_string()]);
        Ok(layers)
    }

    /// Builds the directed compute graph, optionally emphasising one branch.
    ///
    /// The highlighted branch is drawn last so that its styles win for shared
    /// nodes; all other edges are drawn in the muted colour.
    #[instrument(skip_all, name = "dag_generator")]
    pub fn dag(&self, highlight: Option<usize>) -> Result<ComputeDag, EngineError> {
        let mut ordered: Vec<&Branch> = self.branches.iter().collect();
        let palette = match highlight {
            Some(index) => {
                let chosen = self.branch(index)?;
                ordered.remove(index);
                ordered.push(chosen);
                &HIGHLIGHT_PALETTE
            }
            None => &NORMAL_PALETTE,
        };

        let mut graph = NamedGraph::directed();
        let mut amplitudes = Vec::with_capacity(ordered.len());
        let last = ordered.len().saturating_sub(1);

        for (position, branch) in ordered.iter().enumerate() {
            let k = usize::from(position == last);
            let layers = self.dag_nodes(branch)?;

            for layer in &layers {
                for name in layer {
                    graph.add_node(name, palette.nodes[k]);
                }
            }

            for (p, operation) in branch.operations.iter().enumerate() {
                let (Some(inputs), Some(outputs)) = (layers.get(p), layers.get(p + 1)) else {
                    return Err(EngineError::Internal(format!(
                        "branch '{}' has fewer layers than operations",
                        branch.label
                    )));
                };
                let Some(target) = outputs.first() else {
                    return Err(EngineError::Internal(format!(
                        "empty layer in branch '{}'",
                        branch.label
                    )));
                };
                for index in operation.indices() {
                    if let Some(source) = inputs.get(index) {
                        graph.add_edge(source, target, palette.edges[k]);
                    }
                }
            }

            if let Some(amplitude) = layers.last().and_then(|layer| layer.first()) {
                amplitudes.push(amplitude.clone());
            }
        }

        graph.add_node(SUM_NODE, palette.nodes[2]);
        for (position, amplitude) in amplitudes.iter().enumerate() {
            let k = usize::from(position == last);
            graph.add_edge(amplitude, SUM_NODE, palette.edges[k]);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Compute graph assembled."
        );
        Ok(ComputeDag {
            graph,
            highlighted: highlight
                .and_then(|index| self.branches.get(index))
                .map(|branch| branch.label.clone()),
        })
    }

    fn check_states(&self, states: &[ParticleState]) -> Result<(), EngineError> {
        if states.len() != self.particles.len() {
            return Err(EngineError::StateMismatch(format!(
                "expected {} states, got {}",
                self.particles.len(),
                states.len()
            )));
        }
        for (particle, state) in self.particles.iter().zip(states) {
            if particle.name != state.name() || particle.species != state.species() {
                return Err(EngineError::StateMismatch(format!(
                    "state '{}' does not match particle '{}'",
                    state.name(),
                    particle.name
                )));
            }
        }
        Ok(())
    }

    /// Evaluates every branch with the given external states.
    #[instrument(skip_all, name = "matrix_elements")]
    pub fn matrix_elements(
        &self,
        states: &[ParticleState],
        model: &AbcModel,
    ) -> Result<AmplitudeSummary, EngineError> {
        self.check_states(states)?;

        #[cfg(not(feature = "parallel"))]
        let iterator = self.branches.iter();

        #[cfg(feature = "parallel")]
        let iterator = self.branches.par_iter();

        let amplitudes = iterator
            .map(|branch| -> Result<BranchAmplitude, EngineError> {
                let value = MatrixElement::new(states.to_vec(), branch.operations.clone(), *model)
                    .and_then(MatrixElement::evaluate)
                    .map_err(|source| EngineError::Replay {
                        label: branch.label.clone(),
                        source,
                    })?;
                Ok(BranchAmplitude {
                    label: branch.label.clone(),
                    operations: branch.operations.clone(),
                    value,
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        let summary = AmplitudeSummary::from_amplitudes(amplitudes);
        info!(
            branches = summary.amplitudes.len(),
            total_re = summary.total.re,
            total_im = summary.total.im,
            "Matrix elements evaluated."
        );
        Ok(summary)
    }
}
