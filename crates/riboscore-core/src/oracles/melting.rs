use parking_lot::Mutex;
use phf::{Map, phf_map};

use super::OracleError;

/// Duplex melting-temperature oracle.
///
/// `melt` predicts the melting temperature (°C) of the duplex formed by
/// `arm` and its exact complement at the given sodium and probe strand
/// concentrations (mol/L). Implementations are not assumed to be
/// reentrant, hence `&mut self`; all engine calls go through
/// [`MeltingService`], which serializes them.
pub trait MeltingOracle: Send {
    fn melt(
        &mut self,
        arm: &str,
        na_concentration: f64,
        probe_concentration: f64,
    ) -> Result<f64, OracleError>;
}

/// Process-wide, lock-protected access to a melting oracle.
///
/// The lock is held for the duration of one oracle call only; callers may
/// share the service freely across threads.
pub struct MeltingService {
    oracle: Mutex<Box<dyn MeltingOracle>>,
}

impl MeltingService {
    pub fn new(oracle: Box<dyn MeltingOracle>) -> Self {
        Self {
            oracle: Mutex::new(oracle),
        }
    }

    /// Service backed by the built-in nearest-neighbor model.
    pub fn nearest_neighbor() -> Self {
        Self::new(Box::new(NearestNeighborMelt))
    }

    pub fn melt(
        &self,
        arm: &str,
        na_concentration: f64,
        probe_concentration: f64,
    ) -> Result<f64, OracleError> {
        self.oracle
            .lock()
            .melt(arm, na_concentration, probe_concentration)
    }
}

/// RNA nearest-neighbor duplex parameters, ΔH (kcal/mol) and ΔS
/// (cal/(mol·K)) per 5'→3' dinucleotide step against its Watson-Crick
/// complement. Values from Xia et al. (1998), Biochemistry 37:14719;
/// symmetric steps share one entry.
static RNA_NN: Map<&'static str, (f64, f64)> = phf_map! {
    "AA" => (-6.82, -19.0), "UU" => (-6.82, -19.0),
    "AU" => (-9.38, -26.7),
    "UA" => (-7.69, -20.5),
    "CA" => (-10.44, -26.9), "UG" => (-10.44, -26.9),
    "AC" => (-11.40, -29.5), "GU" => (-11.40, -29.5),
    "AG" => (-10.48, -27.1), "CU" => (-10.48, -27.1),
    "GA" => (-12.44, -32.5), "UC" => (-12.44, -32.5),
    "CG" => (-10.64, -26.7),
    "GC" => (-14.88, -36.9),
    "GG" => (-13.39, -32.7), "CC" => (-13.39, -32.7),
};

/// Duplex initiation ΔH/ΔS.
const DUPLEX_INIT: (f64, f64) = (3.61, -1.5);
/// Per-terminus penalty when the duplex ends on an A·U pair.
const TERMINAL_AU: (f64, f64) = (3.72, 10.5);
/// Gas constant, cal/(K·mol).
const GAS_CONSTANT: f64 = 1.9872;
/// Threshold under which the two-state denominator counts as degenerate.
const EPSILON: f64 = 1e-6;

/// Built-in melting oracle: two-state nearest-neighbor thermodynamics.
///
/// Tm is computed as `ΔH·1000 / (ΔS + R·ln(Ct/4)) − 273.15` for a
/// non-self-complementary duplex at total strand concentration `Ct`, then
/// shifted by the Schildkraut-Lifson sodium correction
/// `16.6·log10([Na+])`. Deterministic and reentrant in practice, but still
/// exposed through [`MeltingService`] like any other oracle.
pub struct NearestNeighborMelt;

impl NearestNeighborMelt {
    fn step_params(window: &[u8]) -> Result<(f64, f64), OracleError> {
        let key = std::str::from_utf8(window).unwrap_or_default();
        RNA_NN
            .get(key)
            .copied()
            .ok_or_else(|| OracleError::Internal(format!("no nearest-neighbor entry for {key:?}")))
    }
}

impl MeltingOracle for NearestNeighborMelt {
    fn melt(
        &mut self,
        arm: &str,
        na_concentration: f64,
        probe_concentration: f64,
    ) -> Result<f64, OracleError> {
        let bytes = arm.as_bytes();
        if bytes.len() < 2 {
            return Err(OracleError::ArmTooShort { len: bytes.len() });
        }

        let (mut dh, mut ds) = DUPLEX_INIT;

        for terminal in [bytes[0], bytes[bytes.len() - 1]] {
            if matches!(terminal, b'A' | b'U') {
                dh += TERMINAL_AU.0;
                ds += TERMINAL_AU.1;
            }
        }

        for window in bytes.windows(2) {
            let (step_dh, step_ds) = Self::step_params(window)?;
            dh += step_dh;
            ds += step_ds;
        }

        let denominator = ds + GAS_CONSTANT * (probe_concentration / 4.0).ln();
        if !denominator.is_finite() || denominator.abs() < EPSILON {
            return Err(OracleError::Degenerate {
                detail: format!("two-state denominator {denominator} for {} nt arm", bytes.len()),
            });
        }

        let tm = dh * 1000.0 / denominator - 273.15 + 16.6 * na_concentration.log10();
        if !tm.is_finite() {
            return Err(OracleError::Degenerate {
                detail: format!("non-finite melting temperature for {} nt arm", bytes.len()),
            });
        }

        Ok(tm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn melt(arm: &str) -> f64 {
        NearestNeighborMelt.melt(arm, 1.0, 0.05).unwrap()
    }

    #[test]
    fn rejects_arms_below_two_nucleotides() {
        for arm in ["", "A"] {
            assert!(matches!(
                NearestNeighborMelt.melt(arm, 1.0, 0.05),
                Err(OracleError::ArmTooShort { .. })
            ));
        }
    }

    #[test]
    fn melting_is_deterministic() {
        assert_eq!(melt("GGCGCC"), melt("GGCGCC"));
    }

    #[test]
    fn gc_rich_arms_melt_hotter_than_au_rich_arms() {
        assert!(melt("GGCGCC") > melt("AAUAUU"));
    }

    #[test]
    fn longer_arms_melt_hotter() {
        assert!(melt("GCGCGCGCGC") > melt("GCGC"));
    }

    #[test]
    fn lower_sodium_depresses_the_melting_temperature() {
        let high_salt = NearestNeighborMelt.melt("GCGCGC", 1.0, 0.05).unwrap();
        let low_salt = NearestNeighborMelt.melt("GCGCGC", 0.1, 0.05).unwrap();
        assert!(low_salt < high_salt);
        // Schildkraut-Lifson shift is 16.6 degrees per decade of [Na+].
        assert_relative_eq!(high_salt - low_salt, 16.6, epsilon = 1e-9);
    }

    #[test]
    fn zero_probe_concentration_is_degenerate_not_a_panic() {
        assert!(matches!(
            NearestNeighborMelt.melt("GCGC", 1.0, 0.0),
            Err(OracleError::Degenerate { .. })
        ));
    }

    #[test]
    fn known_duplex_matches_hand_computed_two_state_value() {
        // "GC": init (3.61, -1.5) + one GC step (-14.88, -36.9);
        // Tm = -11270 / (-38.4 + R·ln(0.0125)) - 273.15 at 1 M Na+.
        let dh = 3.61 - 14.88;
        let ds = -1.5 - 36.9;
        let expected = dh * 1000.0 / (ds + GAS_CONSTANT * (0.05f64 / 4.0).ln()) - 273.15;
        assert_relative_eq!(melt("GC"), expected, epsilon = 1e-9);
    }

    #[test]
    fn service_serializes_access_behind_a_shared_reference() {
        let service = MeltingService::nearest_neighbor();
        let a = service.melt("GCGC", 1.0, 0.05).unwrap();
        let b = service.melt("GCGC", 1.0, 0.05).unwrap();
        assert_eq!(a, b);
    }
}
