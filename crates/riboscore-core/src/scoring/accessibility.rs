use tracing::{debug, instrument};

use super::anneal::{AnnealConditions, arm_contribution};
use crate::core::error::{ScoreError, ScoreResult};
use crate::core::region::{extract_regions, unpaired_subruns};
use crate::core::validate::validate_sequence;
use crate::oracles::{ConstraintMask, FoldService, MeltingService};

/// Maximum substrate template length for cut-site accessibility, nt.
const MAX_TEMPLATE_LENGTH: usize = 200;
/// Half-width of the sequence window folded around a cut site, nt.
const EXTENDED_CUTSITE_LENGTH: usize = 100;

fn require_equal_len(left: &str, right: &str) -> ScoreResult<()> {
    if left.len() != right.len() {
        return Err(ScoreError::StructLengthDiffer {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}

/// Accessibility score of a candidate's binding arms on the folded target.
///
/// If every position covered by a binding-arm region is single-stranded
/// (`'.'`) in `folded_structure`, the arms are fully accessible and the
/// score is exactly 0.0 without any oracle call. Otherwise only the
/// unpaired stretches within each region are annealed and penalized
/// against the target temperature; paired stretches cannot anneal and are
/// excluded from the melting evaluation.
#[instrument(skip_all, name = "accessibility_score")]
pub fn accessibility(
    sequence: &str,
    structure: &str,
    folded_structure: &str,
    conditions: &AnnealConditions,
    melting: &MeltingService,
) -> ScoreResult<f64> {
    validate_sequence(sequence)?;
    require_equal_len(sequence, structure)?;
    require_equal_len(sequence, folded_structure)?;
    conditions.validate()?;

    let regions = extract_regions(structure);
    let folded = folded_structure.as_bytes();

    let fully_accessible = regions
        .iter()
        .all(|r| folded[r.start..r.end()].iter().all(|&b| b == b'.'));
    if fully_accessible {
        debug!(
            regions = regions.len(),
            "all arm positions single-stranded"
        );
        return Ok(0.0);
    }

    let mut score = 0.0;
    for region in &regions {
        for run in unpaired_subruns(region, folded_structure) {
            score += arm_contribution(run.arm(sequence), conditions, melting)?;
        }
    }

    debug!(regions = regions.len(), score, "accessibility score computed");
    Ok(score)
}

/// Delta-energy accessibility of a cut site on the substrate RNA.
///
/// Folds a window of up to ±[`EXTENDED_CUTSITE_LENGTH`] nt around the cut
/// site twice, once unconstrained and once with the substrate-binding
/// span forced unpaired, and scores the absolute difference of the two
/// minimum free energies. A large delta means the fold has to be disrupted
/// for the ribozyme to reach its site.
#[instrument(skip_all, name = "cutsite_accessibility_score")]
pub fn cutsite_accessibility(
    rna: &str,
    substrate_sequence: &str,
    cutsite_index: usize,
    cutsite_number: usize,
    fold: &FoldService,
) -> ScoreResult<f64> {
    validate_sequence(rna)?;

    if cutsite_index > rna.len() {
        return Err(ScoreError::OutOfRange {
            index: cutsite_index as i64,
            len: rna.len(),
        });
    }
    if cutsite_number > substrate_sequence.len() {
        return Err(ScoreError::OutOfRange {
            index: cutsite_number as i64,
            len: substrate_sequence.len(),
        });
    }
    if substrate_sequence.len() > MAX_TEMPLATE_LENGTH {
        return Err(ScoreError::InvalidTemplateLength {
            len: substrate_sequence.len(),
            max: MAX_TEMPLATE_LENGTH,
        });
    }

    let window_start = cutsite_index.saturating_sub(EXTENDED_CUTSITE_LENGTH);
    let window_end = (cutsite_index + EXTENDED_CUTSITE_LENGTH).min(rna.len());
    let window = &rna[window_start..window_end];

    let binding_start = (cutsite_index - window_start).saturating_sub(cutsite_number);
    let binding_end = (binding_start + substrate_sequence.len()).min(window.len());
    let mut mask = ConstraintMask::free(window.len());
    mask.force_unpaired(binding_start..binding_end);

    let unconstrained = fold.mfe(window)?;
    let constrained = fold.mfe_constrained(window, &mask)?;

    let delta = (constrained.energy - unconstrained.energy).abs();
    debug!(
        window = window.len(),
        delta, "cut-site accessibility computed"
    );
    Ok(delta)
}
