use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::error::{ScoreError, ScoreResult};
use crate::core::region::extract_regions;
use crate::core::validate::validate_sequence;
use crate::oracles::MeltingService;

/// Minimum physically meaningful concentration, mol/L. Values below this
/// are invalid input, not merely small.
pub const MIN_CONCENTRATION: f64 = 1e-10;

/// Width of the linear penalty regime around the target temperature, °C.
const TOLERANCE_CELSIUS: f64 = 4.0;

/// Arms below this length are skipped with zero contribution: a two-state
/// duplex melting temperature is undefined for a single base, and the
/// historical native oracle misbehaved on such input.
pub(crate) const MIN_MELT_ARM: usize = 2;

/// Reaction conditions for annealing-temperature scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnealConditions {
    /// Sodium/cation concentration, mol/L.
    pub na_concentration: f64,
    /// Probe/oligo strand concentration, mol/L.
    pub probe_concentration: f64,
    /// Desired annealing temperature, °C.
    pub target_celsius: f64,
}

impl AnnealConditions {
    pub(crate) fn validate(&self) -> ScoreResult<()> {
        for value in [self.na_concentration, self.probe_concentration] {
            if value < MIN_CONCENTRATION {
                return Err(ScoreError::InvalidConcentration {
                    value,
                    min: MIN_CONCENTRATION,
                });
            }
        }
        Ok(())
    }
}

/// Piecewise penalty for a melting-temperature deviation `diff` (°C,
/// non-negative): linear inside the tolerance band, quadratic beyond it,
/// continuous at the boundary.
fn penalty(diff: f64) -> f64 {
    if diff <= TOLERANCE_CELSIUS {
        diff
    } else {
        (diff - TOLERANCE_CELSIUS).powi(2) + TOLERANCE_CELSIUS
    }
}

/// Penalty contribution of one arm, melted under the process-wide melting
/// lock. Arms below [`MIN_MELT_ARM`] contribute nothing.
pub(crate) fn arm_contribution(
    arm: &str,
    conditions: &AnnealConditions,
    melting: &MeltingService,
) -> ScoreResult<f64> {
    if arm.len() < MIN_MELT_ARM {
        return Ok(0.0);
    }
    let tm = melting.melt(
        arm,
        conditions.na_concentration,
        conditions.probe_concentration,
    )?;
    Ok(penalty((tm - conditions.target_celsius).abs()))
}

/// Annealing-temperature fitness score for a candidate.
///
/// Extracts every binding-arm region from the structure annotation,
/// predicts each arm's melting temperature against the target's
/// complement, and sums the piecewise penalty of each deviation from the
/// target temperature. Lower is better; a candidate whose every arm melts
/// exactly at the target scores 0.
#[instrument(skip_all, name = "anneal_score")]
pub fn anneal(
    sequence: &str,
    structure: &str,
    conditions: &AnnealConditions,
    melting: &MeltingService,
) -> ScoreResult<f64> {
    validate_sequence(sequence)?;

    if sequence.len() != structure.len() {
        return Err(ScoreError::StructLengthDiffer {
            left: sequence.len(),
            right: structure.len(),
        });
    }

    conditions.validate()?;

    let regions = extract_regions(structure);
    let mut score = 0.0;
    for region in &regions {
        score += arm_contribution(region.arm(sequence), conditions, melting)?;
    }

    debug!(regions = regions.len(), score, "annealing score computed");
    Ok(score)
}
