use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::OracleError;

/// One predicted secondary structure with its free energy in kcal/mol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldPrediction {
    pub structure: String,
    pub energy: f64,
}

/// Ensemble free energy and the temperature-scaled factor `kT` used to
/// convert structure energies into Boltzmann probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartitionFunction {
    pub ensemble_energy: f64,
    pub kt: f64,
}

/// Per-position folding constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseConstraint {
    /// No constraint; the position folds freely.
    Free,
    /// The position is forced to stay unpaired.
    Unpaired,
    /// The position is forced to pair.
    Paired,
}

/// Owned, bounds-checked constraint mask passed to constrained folds.
///
/// One entry per sequence position. Span setters clamp to the mask length
/// rather than indexing out of bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintMask {
    positions: Vec<BaseConstraint>,
}

impl ConstraintMask {
    /// A mask of `len` unconstrained positions.
    pub fn free(len: usize) -> Self {
        Self {
            positions: vec![BaseConstraint::Free; len],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<BaseConstraint> {
        self.positions.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = BaseConstraint> + '_ {
        self.positions.iter().copied()
    }

    /// Forces every position of `span` (clamped to the mask) to stay
    /// unpaired.
    pub fn force_unpaired(&mut self, span: Range<usize>) {
        self.fill(span, BaseConstraint::Unpaired);
    }

    /// Forces every position of `span` (clamped to the mask) to pair.
    pub fn force_paired(&mut self, span: Range<usize>) {
        self.fill(span, BaseConstraint::Paired);
    }

    fn fill(&mut self, span: Range<usize>, constraint: BaseConstraint) {
        let end = span.end.min(self.positions.len());
        for position in &mut self.positions[span.start.min(end)..end] {
            *position = constraint;
        }
    }
}

/// Folding oracle: minimum-free-energy, constrained, suboptimal and
/// partition-function prediction.
///
/// Implementations own all fold-compound state per call and release it
/// before returning, so the trait takes `&self` and the engine imposes no
/// lock. Returned structures are owned values.
pub trait FoldOracle: Send + Sync {
    /// Unconstrained MFE fold.
    fn mfe(&self, sequence: &str) -> Result<FoldPrediction, OracleError>;

    /// MFE fold under a per-position constraint mask.
    fn mfe_constrained(
        &self,
        sequence: &str,
        mask: &ConstraintMask,
    ) -> Result<FoldPrediction, OracleError>;

    /// All structures within `band_kcal` kcal/mol of the MFE, optionally
    /// constrained.
    fn subopt(
        &self,
        sequence: &str,
        mask: Option<&ConstraintMask>,
        band_kcal: f64,
    ) -> Result<Vec<FoldPrediction>, OracleError>;

    /// Ensemble free energy and `kT`, optionally constrained.
    fn partition(
        &self,
        sequence: &str,
        mask: Option<&ConstraintMask>,
    ) -> Result<PartitionFunction, OracleError>;
}

/// Access point for the folding oracle.
///
/// Unlike melting and tree distance there is no serialization lock: every
/// call works on compounds it owns.
pub struct FoldService {
    oracle: Box<dyn FoldOracle>,
}

impl FoldService {
    pub fn new(oracle: Box<dyn FoldOracle>) -> Self {
        Self { oracle }
    }

    pub fn mfe(&self, sequence: &str) -> Result<FoldPrediction, OracleError> {
        self.oracle.mfe(sequence)
    }

    pub fn mfe_constrained(
        &self,
        sequence: &str,
        mask: &ConstraintMask,
    ) -> Result<FoldPrediction, OracleError> {
        self.oracle.mfe_constrained(sequence, mask)
    }

    pub fn subopt(
        &self,
        sequence: &str,
        mask: Option<&ConstraintMask>,
        band_kcal: f64,
    ) -> Result<Vec<FoldPrediction>, OracleError> {
        self.oracle.subopt(sequence, mask, band_kcal)
    }

    pub fn partition(
        &self,
        sequence: &str,
        mask: Option<&ConstraintMask>,
    ) -> Result<PartitionFunction, OracleError> {
        self.oracle.partition(sequence, mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_mask_is_all_unconstrained() {
        let mask = ConstraintMask::free(4);
        assert_eq!(mask.len(), 4);
        assert!(mask.iter().all(|c| c == BaseConstraint::Free));
    }

    #[test]
    fn force_unpaired_marks_exactly_the_span() {
        let mut mask = ConstraintMask::free(6);
        mask.force_unpaired(2..4);
        let positions: Vec<_> = mask.iter().collect();
        assert_eq!(
            positions,
            vec![
                BaseConstraint::Free,
                BaseConstraint::Free,
                BaseConstraint::Unpaired,
                BaseConstraint::Unpaired,
                BaseConstraint::Free,
                BaseConstraint::Free,
            ]
        );
    }

    #[test]
    fn span_setters_clamp_to_the_mask() {
        let mut mask = ConstraintMask::free(3);
        mask.force_paired(1..10);
        assert_eq!(mask.get(2), Some(BaseConstraint::Paired));
        assert_eq!(mask.get(3), None);
    }
}
