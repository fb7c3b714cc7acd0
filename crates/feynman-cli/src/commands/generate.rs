use super::run_workflow;
use crate::cli::GenerateArgs;
use crate::error::Result;
use feynmandag::core::io::dot::write_dot;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: GenerateArgs, quiet: bool) -> Result<()> {
    let (process, result) = run_workflow(&args.process, false, None, quiet)?;

    println!(
        "{} diagram(s) for {} external particle(s):",
        result.graph.len(),
        process.len()
    );
    for (branch, diagram) in result.graph.branches().iter().zip(&result.diagrams) {
        println!(
            "  {:<12} {:<24} {}",
            branch.label,
            branch.operations_string(),
            diagram.amplitude_expression()
        );
    }

    if let Some(dir) = &args.dot_dir {
        for (index, (branch, diagram)) in result
            .graph
            .branches()
            .iter()
            .zip(&result.diagrams)
            .enumerate()
        {
            let path = diagram_path(dir, index + 1);
            info!("Writing {} to {:?}", branch.label, &path);
            write_dot(&path, &diagram.to_dot(branch.label.trim_end_matches('.')))?;
        }
        println!(
            "✓ {} DOT file(s) written to: {}",
            result.diagrams.len(),
            dir.display()
        );
    }

    Ok(())
}

fn diagram_path(dir: &Path, number: usize) -> PathBuf {
    dir.join(format!("diagram_{number}.dot"))
}
