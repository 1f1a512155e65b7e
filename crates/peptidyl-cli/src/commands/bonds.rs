use crate::cli::InputArgs;
use crate::commands::load_bonded;
use crate::error::Result;
use peptidyl::engine::config::AnalysisConfig;

pub fn run(args: InputArgs, config: &AnalysisConfig) -> Result<()> {
    let (structure, report) = load_bonded(&args.input, &config.bonding)?;

    println!(
        "{}: {} atom(s), {} bond(s)",
        args.input.display(),
        structure.len(),
        report.bonds
    );
    for overlap in &report.overlaps {
        let index = |id| structure.index_of(id).map_or(0, |i| i + 1);
        println!(
            "  overlap: atoms {} and {} are {:.3} A apart (bond length {:.3} A)",
            index(overlap.first),
            index(overlap.second),
            overlap.distance,
            overlap.expected
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::path::PathBuf;

    #[test]
    fn runs_on_a_built_peptide() {
        let dir = tempfile::tempdir().unwrap();
        let input = crate::commands::fixtures::peptide_file(dir.path(), "ga.xyz", "GA", &[]);
        assert!(run(InputArgs { input }, &AnalysisConfig::default()).is_ok());
    }

    #[test]
    fn missing_file_is_a_parse_error() {
        let err = run(
            InputArgs {
                input: PathBuf::from("/nonexistent/structure.xyz"),
            },
            &AnalysisConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
    }
}
