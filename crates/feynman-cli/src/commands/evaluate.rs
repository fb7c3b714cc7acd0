use super::run_workflow;
use crate::cli::EvaluateArgs;
use crate::error::{CliError, Result};
use feynmandag::core::io::export::write_amplitudes_csv;
use tracing::info;

pub fn run(args: EvaluateArgs, quiet: bool) -> Result<()> {
    let (_, result) = run_workflow(&args.process, true, None, quiet)?;
    let summary = result
        .amplitudes
        .ok_or_else(|| CliError::Other(anyhow::anyhow!("workflow skipped the evaluation phase")))?;

    for amplitude in &summary.amplitudes {
        println!(
            "  {:<12} {:+.6e} {:+.6e}i",
            amplitude.label, amplitude.value.re, amplitude.value.im
        );
    }
    println!(
        "Total amplitude: {:+.6e} {:+.6e}i",
        summary.total.re, summary.total.im
    );

    if let Some(path) = &args.csv {
        info!("Writing amplitude table to {:?}", path);
        write_amplitudes_csv(path, &summary.to_records())?;
        println!("✓ Amplitudes written to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use feynmandag::engine::error::EngineError;
    use std::fs;
    use tempfile::tempdir;

    const ABAB: &str = "[[particle]]\nname = \"a1\"\nspecies = \"A\"\nmomentum = 3.0\n\n\
        [[particle]]\nname = \"b1\"\nspecies = \"B\"\nmomentum = 1.0\n\n\
        [[particle]]\nname = \"a2\"\nspecies = \"A\"\nincoming = false\nmomentum = 2.5\n\n\
        [[particle]]\nname = \"b2\"\nspecies = \"B\"\nincoming = false\nmomentum = 1.5\n";

    fn parse(argv: &[&str]) -> EvaluateArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Evaluate(args) => args,
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn writes_amplitude_table() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("abab.toml");
        fs::write(&input, ABAB).unwrap();
        let csv = dir.path().join("amplitudes.csv");

        let args = parse(&[
            "feynmandag",
            "evaluate",
            "-i",
            input.to_str().unwrap(),
            "--csv",
            csv.to_str().unwrap(),
        ]);
        run(args, true).unwrap();

        let content = fs::read_to_string(csv).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("branch,operations,re,im"));
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn on_shell_internal_line_fails_instead_of_printing_a_total() {
        // a1 + b1 carries p = 0.5 = m_C, so branch 1's propagator is singular.
        let process = ABAB.replace("momentum = 3.0", "momentum = 0.25").replace(
            "momentum = 1.0",
            "momentum = 0.25",
        );
        let dir = tempdir().unwrap();
        let input = dir.path().join("pole.toml");
        fs::write(&input, process).unwrap();
        let csv = dir.path().join("amplitudes.csv");

        let args = parse(&[
            "feynmandag",
            "evaluate",
            "-i",
            input.to_str().unwrap(),
            "--csv",
            csv.to_str().unwrap(),
        ]);
        let err = run(args, true).unwrap_err();
        assert!(matches!(err, CliError::Core(EngineError::Replay { .. })));
        assert!(err.to_string().contains("branch 1."));
        assert!(!csv.exists());
    }

    #[test]
    fn missing_process_file_is_reported() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("missing.toml");
        let args = parse(&["feynmandag", "evaluate", "-i", input.to_str().unwrap()]);
        assert!(matches!(run(args, true), Err(CliError::Process(_))));
    }
}
