use crate::cli::AnalysisArgs;
use crate::error::Result;
use peptidyl::engine::config::{AnalysisConfig, AnalysisConfigBuilder, load_config};
use tracing::info;

/// Layers command-line overrides on top of the configuration file, or on
/// top of the defaults when no file is given.
pub fn resolve(args: &AnalysisArgs) -> Result<AnalysisConfig> {
    let base = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}.", path.display());
            load_config(path)?
        }
        None => AnalysisConfig::default(),
    };

    let mut builder = AnalysisConfigBuilder::from_config(base);
    if let Some(tolerance) = args.tolerance {
        builder = builder.tolerance(tolerance);
    }
    if let Some(depth) = args.depth {
        builder = builder.signature_depth(depth);
    }
    Ok(builder.build()?)
}
