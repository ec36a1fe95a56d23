use tracing::{debug, instrument};

use crate::core::error::{ScoreError, ScoreResult};
use crate::core::tree::StructureTree;
use crate::core::validate::validate_structure;
use crate::oracles::TreeDistanceService;

/// Structural dissimilarity between a candidate secondary structure and
/// the ideal one.
///
/// Both structures are validated, converted to their tree form, and
/// compared by the tree-edit-distance oracle under its dedicated lock.
/// Identical structures score 0; the score grows with the number of tree
/// edits separating the two folds.
#[instrument(skip_all, name = "structure_distance_score")]
pub fn structure_distance(
    candidate: &str,
    ideal: &str,
    tree_distance: &TreeDistanceService,
) -> ScoreResult<f64> {
    validate_structure(candidate)?;
    validate_structure(ideal)?;

    if candidate.len() != ideal.len() {
        return Err(ScoreError::StructLengthDiffer {
            left: candidate.len(),
            right: ideal.len(),
        });
    }

    let candidate_tree = StructureTree::from_dot_bracket(candidate);
    let ideal_tree = StructureTree::from_dot_bracket(ideal);
    let distance = tree_distance.distance(&candidate_tree, &ideal_tree)?;

    debug!(distance, "structure distance computed");
    Ok(distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TreeDistanceService {
        TreeDistanceService::zhang_shasha()
    }

    #[test]
    fn identical_structures_score_zero() {
        let svc = service();
        assert_eq!(structure_distance("..", "..", &svc).unwrap(), 0.0);
        assert_eq!(structure_distance("()", "()", &svc).unwrap(), 0.0);
        assert_eq!(
            structure_distance("((..)).", "((..)).", &svc).unwrap(),
            0.0
        );
    }

    #[test]
    fn differing_structures_score_positive() {
        let svc = service();
        assert!(structure_distance("((..))", "......", &svc).unwrap() > 0.0);
    }

    #[test]
    fn length_mismatch_is_an_error_not_a_sentinel() {
        let svc = service();
        let err = structure_distance("..", "...", &svc).unwrap_err();
        assert!(matches!(err, ScoreError::StructLengthDiffer { .. }));
        assert_eq!(err.status(), -6);
    }

    #[test]
    fn invalid_elements_are_caught_before_conversion() {
        let svc = service();
        assert!(matches!(
            structure_distance(".x.", "...", &svc),
            Err(ScoreError::InvalidStructElement)
        ));
        assert!(matches!(
            structure_distance("...", ".[]", &svc),
            Err(ScoreError::InvalidStructElement)
        ));
    }

    #[test]
    fn unbalanced_structures_are_caught_before_conversion() {
        let svc = service();
        assert!(matches!(
            structure_distance("(..", "...", &svc),
            Err(ScoreError::BadPairMatch)
        ));
        assert!(matches!(
            structure_distance("...", "..}", &svc),
            Err(ScoreError::BadPairMatch)
        ));
    }

    #[test]
    fn validation_failure_of_the_candidate_wins_over_the_ideal() {
        let svc = service();
        // Both inputs are invalid; the candidate is checked first.
        assert!(matches!(
            structure_distance("", ".x.", &svc),
            Err(ScoreError::EmptyParameter)
        ));
    }
}
