use crate::core::models::structure::Structure;
use crate::engine::config::SignatureConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::signature::{MoleculeSignature, StructureDb};
use std::collections::HashMap;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Structures sharing one signature, identified by the caller's labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Label of the first structure seen with this signature.
    pub representative: String,
    /// Labels of every structure in the group, the representative first.
    pub members: Vec<String>,
}

impl DuplicateGroup {
    pub fn is_duplicate(&self) -> bool {
        self.members.len() > 1
    }
}

/// Groups labelled structures by signature, in order of first appearance.
///
/// Labels are expected to be unique. Each structure must already carry its
/// bonds, since the signature reads only the bond graph.
#[instrument(skip_all, name = "dedup_workflow", fields(structures = structures.len()))]
pub fn group(
    structures: &[(String, Structure)],
    config: &SignatureConfig,
    reporter: &ProgressReporter,
) -> Vec<DuplicateGroup> {
    reporter.report(Progress::PhaseStart {
        name: "Signatures",
    });
    reporter.report(Progress::TaskStart {
        total_steps: structures.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = structures.iter();

    #[cfg(feature = "parallel")]
    let iterator = structures.par_iter();

    let signatures: Vec<MoleculeSignature> = iterator
        .map(|(_, structure)| {
            let signature = MoleculeSignature::compute(structure, config);
            reporter.report(Progress::TaskIncrement);
            signature
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let mut db = StructureDb::with_config(*config);
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for ((label, _), signature) in structures.iter().zip(signatures) {
        let existing = db.get(&signature).and_then(|rep| positions.get(rep)).copied();
        match existing {
            Some(position) => groups[position].members.push(label.clone()),
            None => {
                db.insert(signature, label);
                positions.insert(label.clone(), groups.len());
                groups.push(DuplicateGroup {
                    representative: label.clone(),
                    members: vec![label.clone()],
                });
            }
        }
    }

    info!(
        structures = structures.len(),
        groups = groups.len(),
        "Deduplication complete."
    );
    groups
}
