use crate::cli::InputArgs;
use crate::commands::load_bonded;
use crate::error::Result;
use peptidyl::core::models::ids::AtomId;
use peptidyl::core::models::structure::Structure;
use peptidyl::engine::backbone::{self, AaBackbone};
use peptidyl::engine::config::AnalysisConfig;

fn label(structure: &Structure, id: AtomId) -> String {
    match (structure.element(id), structure.index_of(id)) {
        (Some(element), Some(index)) => format!("{}{}", element, index + 1),
        _ => "?".to_string(),
    }
}

fn describe(structure: &Structure, unit: &AaBackbone) -> String {
    let kind = if unit.is_proline(structure) {
        "proline"
    } else {
        "standard"
    };
    let amine = if unit.has_free_amine() { "free" } else { "bonded" };
    let carboxyl = if unit.has_free_carboxyl() { "free" } else { "bonded" };
    format!(
        "{kind:<8} N={} CA={} C={} O={} payload={} amine={amine} carboxyl={carboxyl}",
        label(structure, unit.n),
        label(structure, unit.cmain),
        label(structure, unit.coo),
        label(structure, unit.o2),
        label(structure, unit.payload),
    )
}

pub fn run(args: InputArgs, config: &AnalysisConfig) -> Result<()> {
    let (structure, _) = load_bonded(&args.input, &config.bonding)?;
    let units = backbone::find_all(&structure);

    println!("{}: {} backbone unit(s)", args.input.display(), units.len());
    for (index, unit) in units.iter().enumerate() {
        println!("  #{:<3} {}", index + 1, describe(&structure, unit));
    }
    Ok(())
}
