use crate::cli::ProcessArgs;
use crate::error::{CliError, Result};
use feynmandag::core::io::process::ProcessSpec;
use feynmandag::core::model::AbcModel;
use feynmandag::core::particles::Species;
use feynmandag::engine::config::{GenerationConfig, GenerationConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialMasses {
    #[serde(rename = "A")]
    a: Option<f64>,
    #[serde(rename = "B")]
    b: Option<f64>,
    #[serde(rename = "C")]
    c: Option<f64>,
}

impl PartialMasses {
    fn slot(&mut self, species: Species) -> &mut Option<f64> {
        match species {
            Species::A => &mut self.a,
            Species::B => &mut self.b,
            Species::C => &mut self.c,
        }
    }
}

/// Model overrides on top of a process file's `[model]` table.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct PartialModelConfig {
    coupling: Option<f64>,
    masses: Option<PartialMasses>,
}

impl PartialModelConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading model overrides from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `--model` when given; otherwise starts with no overrides.
    pub fn from_args(args: &ProcessArgs) -> Result<Self> {
        match &args.model {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final settings. Precedence, lowest first: built-in defaults,
    /// the process file, the `--model` file, `--set` values, `--coupling`.
    pub fn merge_with_cli(
        mut self,
        args: &ProcessArgs,
        process: &ProcessSpec,
        evaluate: bool,
        highlight: Option<usize>,
    ) -> Result<GenerationConfig> {
        self.apply_set_values(&args.set_values)?;
        if let Some(coupling) = args.coupling {
            self.coupling = Some(coupling);
        }

        let model = self.apply_to(process.model);
        model.validate()?;
        debug!(?model, "Resolved model parameters.");

        let highlight = highlight
            .map(|n| {
                n.checked_sub(1).ok_or_else(|| {
                    CliError::Argument("--highlight counts branches from 1".to_string())
                })
            })
            .transpose()?;

        GenerationConfigBuilder::new()
            .model(model)
            .evaluate(evaluate)
            .highlight(highlight)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_to(&self, mut model: AbcModel) -> AbcModel {
        if let Some(coupling) = self.coupling {
            model.coupling = coupling;
        }
        if let Some(masses) = &self.masses {
            let overrides = [
                (Species::A, masses.a),
                (Species::B, masses.b),
                (Species::C, masses.c),
            ];
            for (species, mass) in overrides {
                if let Some(mass) = mass {
                    model.masses.set(species, mass);
                }
            }
        }
        model
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let value: f64 = value_str.trim().parse().map_err(|_| {
                CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
            })?;

            match key.trim() {
                "model.coupling" => self.coupling = Some(value),
                other => {
                    let species = other
                        .strip_prefix("model.masses.")
                        .and_then(|name| name.parse::<Species>().ok())
                        .ok_or_else(|| {
                            CliError::Config(format!(
                                "Unsupported configuration key for --set: '{}'",
                                key
                            ))
                        })?;
                    *self
                        .masses
                        .get_or_insert_with(Default::default)
                        .slot(species) = Some(value);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    const PROCESS: &str = r#"
        [model]
        coupling = 0.3

        [model.masses]
        C = 0.7

        [[particle]]
        name = "a1"
        species = "A"

        [[particle]]
        name = "b1"
        species = "B"

        [[particle]]
        name = "c1"
        species = "C"
        incoming = false
    "#;

    fn write_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn process_args(extra: &[&str]) -> ProcessArgs {
        let mut argv = vec!["feynmandag", "evaluate", "-i", "p.toml"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Evaluate(args) => args.process,
            _ => panic!("expected evaluate"),
        }
    }

    fn process() -> ProcessSpec {
        ProcessSpec::parse(PROCESS, "inline").unwrap()
    }

    #[test]
    fn process_model_is_used_without_overrides() {
        let args = process_args(&[]);
        let config = PartialModelConfig::default()
            .merge_with_cli(&args, &process(), true, None)
            .unwrap();
        assert_eq!(config.model.coupling, 0.3);
        assert_eq!(config.model.masses.c, 0.7);
        assert_eq!(config.model.masses.a, 2.0);
        assert!(config.evaluate);
    }

    #[test]
    fn model_file_overrides_process_table() {
        let path = write_file("model_override.toml", "[masses]\nA = 4.0\n");
        let args = process_args(&["--model", path.to_str().unwrap()]);
        let config = PartialModelConfig::from_args(&args)
            .unwrap()
            .merge_with_cli(&args, &process(), false, None)
            .unwrap();
        assert_eq!(config.model.masses.a, 4.0);
        assert_eq!(config.model.masses.c, 0.7);
        assert_eq!(config.model.coupling, 0.3);
    }

    #[test]
    fn set_values_override_files_and_flag_overrides_set() {
        let path = write_file("model_coupling.toml", "coupling = 0.4\n");
        let args = process_args(&[
            "--model",
            path.to_str().unwrap(),
            "-S",
            "model.coupling=0.5",
            "-S",
            "model.masses.b=1.5",
            "--coupling",
            "0.6",
        ]);
        let config = PartialModelConfig::from_args(&args)
            .unwrap()
            .merge_with_cli(&args, &process(), true, None)
            .unwrap();
        assert_eq!(config.model.coupling, 0.6);
        assert_eq!(config.model.masses.b, 1.5);
    }

    #[test]
    fn unknown_set_key_is_rejected() {
        let args = process_args(&["-S", "model.masses.D=1.0"]);
        let result = PartialModelConfig::default().merge_with_cli(&args, &process(), true, None);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn malformed_set_value_is_rejected() {
        let args = process_args(&["-S", "model.coupling"]);
        let result = PartialModelConfig::default().merge_with_cli(&args, &process(), true, None);
        assert!(matches!(result, Err(CliError::Config(_))));

        let args = process_args(&["-S", "model.coupling=strong"]);
        let result = PartialModelConfig::default().merge_with_cli(&args, &process(), true, None);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn negative_mass_fails_validation() {
        let args = process_args(&["-S", "model.masses.C=-1"]);
        let result = PartialModelConfig::default().merge_with_cli(&args, &process(), true, None);
        assert!(matches!(result, Err(CliError::Model(_))));
    }

    #[test]
    fn highlight_is_converted_to_a_zero_based_index() {
        let args = process_args(&[]);
        let config = PartialModelConfig::default()
            .merge_with_cli(&args, &process(), false, Some(2))
            .unwrap();
        assert_eq!(config.highlight, Some(1));

        let result = PartialModelConfig::default().merge_with_cli(&args, &process(), false, Some(0));
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn unknown_field_in_model_file_is_a_parse_error() {
        let path = write_file("model_bad.toml", "couplings = 0.4\n");
        let result = PartialModelConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
