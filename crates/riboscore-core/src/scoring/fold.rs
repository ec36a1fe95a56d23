use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::error::{ScoreError, ScoreResult};
use crate::core::validate::validate_sequence;
use crate::oracles::{ConstraintMask, FoldPrediction, FoldService, OracleError};

/// Energy band for suboptimal enumeration, kcal/mol above the MFE.
const SUBOPT_BAND_KCAL: f64 = 5.0;

/// Threshold under which `kT` counts as degenerate.
const KT_EPSILON: f64 = 1e-6;

/// One member of the folding ensemble with its Boltzmann probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleMember {
    pub structure: String,
    pub probability: f64,
}

/// Unconstrained minimum-free-energy fold of a candidate sequence.
#[instrument(skip_all, name = "mfe_fold")]
pub fn mfe_fold(sequence: &str, fold: &FoldService) -> ScoreResult<FoldPrediction> {
    validate_sequence(sequence)?;
    Ok(fold.mfe(sequence)?)
}

/// All structures within [`SUBOPT_BAND_KCAL`] of the minimum free energy,
/// with their energies. The returned list is owned by the caller.
#[instrument(skip_all, name = "suboptimal_fold")]
pub fn suboptimal_fold(sequence: &str, fold: &FoldService) -> ScoreResult<Vec<FoldPrediction>> {
    validate_sequence(sequence)?;
    let predictions = fold.subopt(sequence, None, SUBOPT_BAND_KCAL)?;
    debug!(count = predictions.len(), "suboptimal structures enumerated");
    Ok(predictions)
}

/// Suboptimal ensemble of a candidate with `unpaired_span` forced
/// single-stranded, each structure weighted by its Boltzmann probability
/// `exp((ensemble_energy − energy) / kT)`.
///
/// A non-finite or vanishing `kT` from the partition function is a fatal
/// oracle error for this call.
#[instrument(skip_all, name = "ensemble_fold")]
pub fn ensemble_fold(
    sequence: &str,
    unpaired_span: Range<usize>,
    fold: &FoldService,
) -> ScoreResult<Vec<EnsembleMember>> {
    validate_sequence(sequence)?;

    if unpaired_span.end > sequence.len() {
        return Err(ScoreError::OutOfRange {
            index: unpaired_span.end as i64,
            len: sequence.len(),
        });
    }

    let mut mask = ConstraintMask::free(sequence.len());
    mask.force_unpaired(unpaired_span);

    let predictions = fold.subopt(sequence, Some(&mask), SUBOPT_BAND_KCAL)?;
    let partition = fold.partition(sequence, Some(&mask))?;

    if !partition.kt.is_finite() || partition.kt.abs() < KT_EPSILON {
        return Err(ScoreError::from(OracleError::Degenerate {
            detail: format!("partition function kT = {}", partition.kt),
        }));
    }

    let members = predictions
        .into_iter()
        .map(|p| EnsembleMember {
            probability: ((partition.ensemble_energy - p.energy) / partition.kt).exp(),
            structure: p.structure,
        })
        .collect::<Vec<_>>();

    debug!(count = members.len(), "ensemble probabilities assigned");
    Ok(members)
}
