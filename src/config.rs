//! YAML configuration for an obstacle model.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::control::continuous::Parameters;
use crate::control::discretize::validate_sampling_dt;
use crate::control::error::{ModelError, ModelResult};
use crate::control::obstacle::{validate_parameters, Axes, ObstacleModel};

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ModelError),
}

/// Parameters and sample interval of an obstacle model.
///
/// ```yaml
/// drag: 0.1
/// natural_frequency: 1.0
/// damping_ratio: 0.5
/// sample_interval: 0.1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    #[serde(flatten)]
    pub parameters: Parameters,
    /// Sample interval in seconds.
    pub sample_interval: f64,
}

impl Default for ObstacleConfig {
    fn default() -> ObstacleConfig {
        ObstacleConfig {
            parameters: Parameters::default(),
            sample_interval: 0.1,
        }
    }
}

impl ObstacleConfig {
    pub fn from_yaml_str(contents: &str) -> ConfigResult<ObstacleConfig> {
        let config: ObstacleConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> ConfigResult<ObstacleConfig> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        ObstacleConfig::from_yaml_str(&contents)
    }

    /// Applies the same checks as model construction.
    pub fn validate(&self) -> ModelResult<()> {
        validate_parameters(&self.parameters)?;
        validate_sampling_dt(self.sample_interval)
    }

    pub fn build(&self, axes: Axes) -> ModelResult<ObstacleModel> {
        ObstacleModel::new(self.parameters, self.sample_interval, axes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::model::DiscreteStateSpaceModel;

    #[test]
    fn parses_full_document() {
        let config = ObstacleConfig::from_yaml_str(
            "drag: 0.2\nnatural_frequency: 3.0\ndamping_ratio: 0.7\nsample_interval: 0.05\n",
        )
        .unwrap();

        assert_eq!(config.parameters, Parameters::new(0.2, 3.0, 0.7));
        assert_eq!(config.sample_interval, 0.05);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config = ObstacleConfig::from_yaml_str("natural_frequency: 2.0\n").unwrap();

        assert_eq!(config.parameters.w0, 2.0);
        assert_eq!(config.parameters.cx, Parameters::default().cx);
        assert_eq!(config.sample_interval, 0.1);
    }

    #[test]
    fn rejects_non_positive_interval() {
        let err = ObstacleConfig::from_yaml_str("sample_interval: -1.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(ModelError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = ObstacleConfig::from_yaml_str("drag: [not, a, number]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ObstacleConfig::from_path(Path::new("/nonexistent/obstacle.yaml")).unwrap_err();
        match err {
            ConfigError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/obstacle.yaml"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn builds_requested_axes() {
        let model = ObstacleConfig::default().build(Axes::Two).unwrap();
        assert_eq!(model.state_dim(), 8);
        assert_eq!(model.get_sampling_dt(), 0.1);
    }
}
