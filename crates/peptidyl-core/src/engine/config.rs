use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Default slack, in Angstroms, around the summed covalent radii of a bond.
pub const DEFAULT_BOND_TOLERANCE: f64 = 0.2;
/// Default number of bonds a structure signature looks out from each atom.
pub const DEFAULT_SIGNATURE_DEPTH: usize = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct BondingConfig {
    /// Accepted deviation from the expected bond length, in Angstroms.
    pub tolerance: f64,
}

impl Default for BondingConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_BOND_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SignatureConfig {
    /// Neighborhood radius, in bonds, of every per-atom signature tree.
    pub depth: usize,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SIGNATURE_DEPTH,
        }
    }
}

/// Tunable parameters for structure analysis.
///
/// Every field has a default, so an empty TOML document is a valid configuration:
///
/// ```toml
/// [bonding]
/// tolerance = 0.2
///
/// [signature]
/// depth = 3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub bonding: BondingConfig,
    pub signature: SignatureConfig,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tolerance = self.bonding.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "bonding.tolerance",
                reason: format!("must be a finite, non-negative distance (got {tolerance})"),
            });
        }
        if self.signature.depth == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "signature.depth",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Builds an [`AnalysisConfig`] by overriding individual fields of a base
/// configuration, which defaults to [`AnalysisConfig::default`].
#[derive(Default)]
pub struct AnalysisConfigBuilder {
    base: AnalysisConfig,
    tolerance: Option<f64>,
    signature_depth: Option<usize>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(base: AnalysisConfig) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
    pub fn signature_depth(mut self, depth: usize) -> Self {
        self.signature_depth = Some(depth);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let config = AnalysisConfig {
            bonding: BondingConfig {
                tolerance: self.tolerance.unwrap_or(self.base.bonding.tolerance),
            },
            signature: SignatureConfig {
                depth: self.signature_depth.unwrap_or(self.base.signature.depth),
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// Parses and validates a configuration document.
///
/// `origin` names the source of `content` in error messages.
pub fn parse_config(content: &str, origin: &str) -> Result<AnalysisConfig, ConfigError> {
    let config: AnalysisConfig = toml::from_str(content).map_err(|e| ConfigError::Toml {
        path: origin.to_string(),
        source: e,
    })?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    parse_config(&content, &path.to_string_lossy())
}
