use crate::cli::DedupArgs;
use crate::commands::load_bonded;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use peptidyl::core::models::structure::Structure;
use peptidyl::engine::config::AnalysisConfig;
use peptidyl::engine::progress::ProgressReporter;
use peptidyl::workflows::dedup::{self, DuplicateGroup};

pub fn collect_groups(args: &DedupArgs, config: &AnalysisConfig) -> Result<Vec<DuplicateGroup>> {
    let structures: Vec<(String, Structure)> = args
        .inputs
        .iter()
        .map(|path| {
            let (structure, _) = load_bonded(path, &config.bonding)?;
            Ok((path.display().to_string(), structure))
        })
        .collect::<Result<_>>()?;

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());
    Ok(dedup::group(&structures, &config.signature, &reporter))
}

pub fn run(args: DedupArgs, config: &AnalysisConfig) -> Result<()> {
    let groups = collect_groups(&args, config)?;
    let duplicates = groups.iter().filter(|g| g.is_duplicate()).count();

    println!(
        "{} file(s), {} distinct structure(s), {} duplicate group(s)",
        args.inputs.len(),
        groups.len(),
        duplicates
    );
    for (index, group) in groups.iter().enumerate() {
        println!("  group {}: {}", index + 1, group.members.join(", "));
    }
    Ok(())
}
