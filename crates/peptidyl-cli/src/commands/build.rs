use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use crate::utils::parser::parse_angle_sets;
use crate::utils::progress::CliProgressHandler;
use peptidyl::core::io::traits::MolecularFile;
use peptidyl::core::io::xyz::XyzFile;
use peptidyl::engine::progress::ProgressReporter;
use peptidyl::workflows::peptide;
use tracing::info;

pub fn run(args: BuildArgs) -> Result<()> {
    let angles = match &args.angles {
        Some(text) => parse_angle_sets(text)?,
        None => Vec::new(),
    };

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());
    let built = peptide::build(&args.sequence, &angles, &reporter)?;

    XyzFile::write_to_path(&built.structure, &args.output).map_err(|source| {
        CliError::FileWriting {
            path: args.output.clone(),
            source,
        }
    })?;
    info!("Wrote {} atom(s) to {}.", built.structure.len(), args.output.display());
    println!(
        "{}: {} residue(s), {} atom(s) -> {}",
        built.structure.description(),
        built.residues.len(),
        built.structure.len(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use peptidyl::engine::error::EngineError;

    #[test]
    fn writes_the_peptide_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("gac.xyz");
        run(BuildArgs {
            sequence: "GAC".to_string(),
            angles: Some("180,-60,-45;180,-120,130".to_string()),
            output: output.clone(),
        })
        .unwrap();

        let structure = XyzFile::read_from_path(&output).unwrap();
        assert_eq!(structure.len(), 10 + 13 + 14 - 6);
        assert_eq!(structure.description(), "GLY-ALA-CYS");
    }

    #[test]
    fn unknown_residue_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(BuildArgs {
            sequence: "GZ".to_string(),
            angles: None,
            output: dir.path().join("out.xyz"),
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Core(EngineError::UnknownResidue('Z'))));
    }

    #[test]
    fn unwritable_output_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("ga.xyz");
        let err = run(BuildArgs {
            sequence: "GA".to_string(),
            angles: None,
            output: output.clone(),
        })
        .unwrap_err();

        let CliError::FileWriting { path, .. } = &err else {
            panic!("expected a write error, got {err:?}");
        };
        assert_eq!(path, &output);
        assert!(err.to_string().starts_with("Failed to write file"));
    }

    #[test]
    fn malformed_angles_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(BuildArgs {
            sequence: "GA".to_string(),
            angles: Some("180,x,0".to_string()),
            output: dir.path().join("out.xyz"),
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Argument(_)));
    }
}
