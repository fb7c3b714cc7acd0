use crate::core::io::process::ProcessSpec;
use crate::engine::compute_graph::{AmplitudeSummary, ComputeDag, ComputeGraph};
use crate::engine::config::GenerationConfig;
use crate::engine::diagram::FeynmanDiagram;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub graph: ComputeGraph,
    pub diagrams: Vec<FeynmanDiagram>,
    pub dag: ComputeDag,
    pub amplitudes: Option<AmplitudeSummary>,
}

#[instrument(skip_all, name = "generation_workflow")]
pub fn run(
    process: &ProcessSpec,
    config: &GenerationConfig,
    reporter: &ProgressReporter,
) -> Result<GenerationResult, EngineError> {
    // === Phase 1: Branch calculation ===
    let graph = reporter.phase("Branch Calculation", || {
        ComputeGraph::generate(process.symbolic_particles())
    })?;
    reporter.report(Progress::Message(format!(
        "{} branches for {} external particles",
        graph.len(),
        process.len()
    )));

    // === Phase 2: Diagram graphs ===
    reporter.report(Progress::PhaseStart {
        name: "Building Diagrams",
    });
    reporter.report(Progress::TaskStart {
        total_steps: graph.len() as u64,
    });
    let mut diagrams = Vec::with_capacity(graph.len());
    for index in 0..graph.len() {
        diagrams.push(graph.diagram(index)?);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    info!(diagrams = diagrams.len(), "Diagram graphs built.");

    // === Phase 3: Compute graph ===
    let dag = reporter.phase("Building Compute Graph", || graph.dag(config.highlight))?;
    info!(
        nodes = dag.node_count(),
        edges = dag.edge_count(),
        "Compute graph built."
    );

    // === Phase 4: Matrix elements (optional) ===
    let amplitudes = if config.evaluate {
        let summary = reporter.phase("Evaluating Matrix Elements", || {
            let states = process.states(&config.model)?;
            graph.matrix_elements(&states, &config.model)
        })?;
        info!(
            total_re = summary.total.re,
            total_im = summary.total.im,
            "Total amplitude computed."
        );
        Some(summary)
    } else {
        None
    };

    Ok(GenerationResult {
        graph,
        diagrams,
        dag,
        amplitudes,
    })
}
