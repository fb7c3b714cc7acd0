use crate::core::model::AbcModel;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Settings for one run of the generation workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub model: AbcModel,
    /// Branch to emphasise in the compute graph.
    pub highlight: Option<usize>,
    /// Whether to evaluate the matrix elements after building the graphs.
    pub evaluate: bool,
}

#[derive(Default)]
pub struct GenerationConfigBuilder {
    model: Option<AbcModel>,
    highlight: Option<usize>,
    evaluate: Option<bool>,
}

impl GenerationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: AbcModel) -> Self {
        self.model = Some(model);
        self
    }
    pub fn highlight(mut self, branch: Option<usize>) -> Self {
        self.highlight = branch;
        self
    }
    pub fn evaluate(mut self, evaluate: bool) -> Self {
        self.evaluate = Some(evaluate);
        self
    }

    pub fn build(self) -> Result<GenerationConfig, ConfigError> {
        Ok(GenerationConfig {
            model: self.model.ok_or(ConfigError::MissingParameter("model"))?,
            highlight: self.highlight,
            evaluate: self
                .evaluate
                .ok_or(ConfigError::MissingParameter("evaluate"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_succeeds_with_required_fields() {
        let config = GenerationConfigBuilder::new()
            .model(AbcModel::default())
            .evaluate(true)
            .highlight(Some(1))
            .build()
            .unwrap();
        assert!(config.evaluate);
        assert_eq!(config.highlight, Some(1));
    }

    #[test]
    fn builder_reports_missing_model() {
        let result = GenerationConfigBuilder::new().evaluate(false).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("model")));
    }

    #[test]
    fn builder_reports_missing_evaluate_flag() {
        let result = GenerationConfigBuilder::new()
            .model(AbcModel::default())
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("evaluate")));
    }
}
