use crate::cli::AnglesArgs;
use crate::commands::load_bonded;
use crate::error::Result;
use peptidyl::engine::angles::{AngleKind, JunctionAngles, read_angles_along_chain};
use peptidyl::engine::backbone;
use peptidyl::engine::config::AnalysisConfig;
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
struct AngleRow {
    chain: usize,
    junction: usize,
    omega: f64,
    phi: f64,
    psi: f64,
    #[serde(rename = "adjN")]
    adj_n: f64,
    #[serde(rename = "adjCmain")]
    adj_cmain: f64,
    #[serde(rename = "adjCoo")]
    adj_coo: f64,
    #[serde(rename = "O2Rise")]
    o2_rise: f64,
    #[serde(rename = "O2Tilt")]
    o2_tilt: f64,
    #[serde(rename = "PlRise")]
    pl_rise: f64,
    #[serde(rename = "PlTilt")]
    pl_tilt: f64,
}

impl AngleRow {
    fn new(chain: usize, junction: usize, angles: &JunctionAngles) -> Self {
        Self {
            chain,
            junction,
            omega: angles[AngleKind::Omega],
            phi: angles[AngleKind::Phi],
            psi: angles[AngleKind::Psi],
            adj_n: angles[AngleKind::AdjN],
            adj_cmain: angles[AngleKind::AdjCmain],
            adj_coo: angles[AngleKind::AdjCoo],
            o2_rise: angles[AngleKind::O2Rise],
            o2_tilt: angles[AngleKind::O2Tilt],
            pl_rise: angles[AngleKind::PlRise],
            pl_tilt: angles[AngleKind::PlTilt],
        }
    }
}

fn write_csv(path: &Path, rows: &[AngleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("Wrote {} junction(s) to {}.", rows.len(), path.display());
    Ok(())
}

pub fn run(args: AnglesArgs, config: &AnalysisConfig) -> Result<()> {
    let (structure, _) = load_bonded(&args.input, &config.bonding)?;
    let chains = backbone::find_chains(&structure);

    let header: Vec<String> = AngleKind::ALL.iter().map(|k| format!("{k:>9}")).collect();
    println!("chain junction {}", header.join(""));
    let mut rows = Vec::new();
    for (chain_index, units) in chains.iter().enumerate() {
        for (index, angles) in read_angles_along_chain(&structure, units)?.iter().enumerate() {
            let values: Vec<String> = angles.iter().map(|(_, v)| format!("{v:>9.2}")).collect();
            println!("{:>5} {:>8} {}", chain_index + 1, index + 1, values.join(""));
            rows.push(AngleRow::new(chain_index + 1, index + 1, angles));
        }
    }

    if let Some(path) = &args.csv {
        write_csv(path, &rows)?;
    }
    Ok(())
}
