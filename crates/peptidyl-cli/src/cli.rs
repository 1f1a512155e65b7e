use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The Peptidyl Developers",
    version,
    about = "Peptidyl CLI - bond perception, backbone analysis and peptide building for XYZ structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for bond detection and signatures
    #[arg(short = 'j', long, global = true, value_name = "INT")]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Analysis settings shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// Path to a TOML configuration file with `[bonding]` and `[signature]` tables.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the bond length tolerance in Angstroms.
    #[arg(long, global = true, value_name = "FLOAT")]
    pub tolerance: Option<f64>,

    /// Override the signature depth in bonds.
    #[arg(long, global = true, value_name = "INT")]
    pub depth: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect covalent bonds and report overlapping atoms.
    Bonds(InputArgs),
    /// List every amino-acid backbone unit of a structure.
    Backbones(InputArgs),
    /// Print the junction angles along a peptide chain.
    Angles(AnglesArgs),
    /// Build a peptide from a one-letter sequence.
    Build(BuildArgs),
    /// Group structures with identical signatures.
    Dedup(DedupArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Path to the input XYZ file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct AnglesArgs {
    /// Path to the input XYZ file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Also write the angles to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// One-letter amino-acid codes, N-terminus first (e.g. 'GASCP').
    #[arg(short, long, required = true, value_name = "SEQ")]
    pub sequence: String,

    /// Target angles per junction: comma-separated values, junctions separated by ';'.
    /// Example: --angles "180,-57,-47;180,-57,-47"
    #[arg(short, long, value_name = "ANGLES")]
    pub angles: Option<String>,

    /// Path for the output XYZ file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct DedupArgs {
    /// XYZ files to compare.
    #[arg(required = true, num_args = 1.., value_name = "PATH")]
    pub inputs: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "peptidyl", "bonds", "-i", "in.xyz", "-vv", "--tolerance", "0.3",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.analysis.tolerance, Some(0.3));
        assert!(matches!(cli.command, Commands::Bonds(ref args) if args.input == PathBuf::from("in.xyz")));
    }

    #[test]
    fn build_requires_sequence_and_output() {
        assert!(Cli::try_parse_from(["peptidyl", "build", "-s", "GA"]).is_err());
        let cli = Cli::try_parse_from([
            "peptidyl", "build", "-s", "GA", "-a", "180,-60,-45", "-o", "ga.xyz",
        ])
        .unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.angles.as_deref(), Some("180,-60,-45"));
    }

    #[test]
    fn thread_count_is_optional() {
        let cli = Cli::try_parse_from(["peptidyl", "dedup", "a.xyz", "-j", "4"]).unwrap();
        assert_eq!(cli.threads, Some(4));
        let cli = Cli::try_parse_from(["peptidyl", "dedup", "a.xyz"]).unwrap();
        assert_eq!(cli.threads, None);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["peptidyl", "-q", "-v", "bonds", "-i", "x.xyz"]).is_err());
    }

    #[test]
    fn dedup_takes_several_inputs() {
        let cli = Cli::try_parse_from(["peptidyl", "dedup", "a.xyz", "b.xyz"]).unwrap();
        let Commands::Dedup(args) = cli.command else {
            panic!("expected dedup");
        };
        assert_eq!(args.inputs.len(), 2);
    }
}
