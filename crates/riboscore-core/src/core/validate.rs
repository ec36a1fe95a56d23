use super::error::{ScoreError, ScoreResult};

/// Checks that a sequence is non-empty and drawn from the RNA alphabet
/// {A, C, G, U}.
///
/// The check is case-sensitive: lowercase bases are rejected, matching the
/// behavior of the thermodynamic tables downstream.
pub fn validate_sequence(sequence: &str) -> ScoreResult<()> {
    if sequence.is_empty() {
        return Err(ScoreError::EmptyParameter);
    }

    if sequence
        .bytes()
        .any(|b| !matches!(b, b'A' | b'C' | b'G' | b'U'))
    {
        return Err(ScoreError::InvalidNucleotide);
    }

    Ok(())
}

/// Checks that a dot-bracket structure is non-empty, uses only the
/// recognized alphabet `.(){}`, and has balanced brackets.
///
/// `()` encodes regular base pairs and `{}` pseudoknot pairs. The two
/// families are independent bonding systems, so balance is tracked on two
/// non-interacting stacks in a single left-to-right pass. Only balance is
/// checked, not the biological validity of the pairing partners.
pub fn validate_structure(structure: &str) -> ScoreResult<()> {
    if structure.is_empty() {
        return Err(ScoreError::EmptyParameter);
    }

    if structure
        .bytes()
        .any(|b| !matches!(b, b'.' | b'(' | b')' | b'{' | b'}'))
    {
        return Err(ScoreError::InvalidStructElement);
    }

    let mut pair_opens: Vec<usize> = Vec::new();
    let mut knot_opens: Vec<usize> = Vec::new();

    for (i, b) in structure.bytes().enumerate() {
        match b {
            b'(' => pair_opens.push(i),
            b'{' => knot_opens.push(i),
            b')' => {
                if pair_opens.pop().is_none() {
                    return Err(ScoreError::BadPairMatch);
                }
            }
            b'}' => {
                if knot_opens.pop().is_none() {
                    return Err(ScoreError::BadPairMatch);
                }
            }
            _ => {}
        }
    }

    if !pair_opens.is_empty() || !knot_opens.is_empty() {
        return Err(ScoreError::BadPairMatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_sequences_over_the_rna_alphabet() {
        assert!(validate_sequence("A").is_ok());
        assert!(validate_sequence("ACGU").is_ok());
        assert!(validate_sequence("AAUUUCCCCGGGGG").is_ok());
    }

    #[test]
    fn rejects_empty_sequence_as_empty_parameter() {
        assert!(matches!(
            validate_sequence(""),
            Err(ScoreError::EmptyParameter)
        ));
    }

    #[test]
    fn rejects_characters_outside_the_alphabet() {
        for seq in ["ACGT", "acgu", "ACG U", "AC-GU", "ACGUN"] {
            assert!(
                matches!(validate_sequence(seq), Err(ScoreError::InvalidNucleotide)),
                "{seq}"
            );
        }
    }

    #[test]
    fn accepts_balanced_structures() {
        for s in [".", "...", "(())", "((..))", "{..}", "(.{.}.)", "({)}"] {
            assert!(validate_structure(s).is_ok(), "{s}");
        }
    }

    #[test]
    fn rejects_empty_structure_as_empty_parameter() {
        assert!(matches!(
            validate_structure(""),
            Err(ScoreError::EmptyParameter)
        ));
    }

    #[test]
    fn rejects_foreign_structure_elements() {
        for s in ["..x..", "[..]", "(a)", "(( ))"] {
            assert!(
                matches!(validate_structure(s), Err(ScoreError::InvalidStructElement)),
                "{s}"
            );
        }
    }

    #[test]
    fn rejects_unbalanced_brackets() {
        for s in ["(", ")", "(()", "())", "{", "}", "{{}", ".}.", "(..}"] {
            assert!(
                matches!(validate_structure(s), Err(ScoreError::BadPairMatch)),
                "{s}"
            );
        }
    }

    #[test]
    fn bracket_families_balance_independently() {
        // An unmatched brace is an error even when parentheses balance.
        assert!(validate_structure("(..)").is_ok());
        assert!(matches!(
            validate_structure("(..){"),
            Err(ScoreError::BadPairMatch)
        ));
        // Interleaving across families is legal; each family only tracks
        // its own depth.
        assert!(validate_structure("({.)}").is_ok());
    }
}
