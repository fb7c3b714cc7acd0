pub mod dag;
pub mod evaluate;
pub mod generate;

use crate::cli::ProcessArgs;
use crate::config::PartialModelConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use feynmandag::core::io::process::ProcessSpec;
use feynmandag::engine::config::GenerationConfig;
use feynmandag::engine::progress::ProgressReporter;
use feynmandag::workflows::{self, generate::GenerationResult};
use tracing::info;

/// Loads the process, resolves the configuration and runs the generation workflow.
fn run_workflow(
    args: &ProcessArgs,
    evaluate: bool,
    highlight: Option<usize>,
    quiet: bool,
) -> Result<(ProcessSpec, GenerationResult)> {
    info!("Loading process from {:?}", &args.input);
    let process = ProcessSpec::load(&args.input)?;

    info!("Merging model parameters from files and CLI arguments...");
    let config: GenerationConfig = PartialModelConfig::from_args(args)?.merge_with_cli(
        args,
        &process,
        evaluate,
        highlight,
    )?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core generation workflow...");
    let result = workflows::generate::run(&process, &config, &reporter)?;
    info!(branches = result.graph.len(), "Workflow finished.");
    Ok((process, result))
}
