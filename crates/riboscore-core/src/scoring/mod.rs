//! # Scoring Module
//!
//! The public API layer of the engine: one entry point per fitness
//! dimension of a candidate ribozyme design.
//!
//! ## Overview
//!
//! Every function here is a stateless, synchronous scoring call: it
//! validates its inputs at entry, consults the oracle services it is
//! handed, and returns a non-negative score or a
//! [`ScoreError`](crate::core::error::ScoreError). No score value ever
//! doubles as an error sentinel.
//!
//! - **Annealing** ([`anneal`]) - how far each binding arm's melting
//!   temperature sits from the requested annealing temperature.
//! - **Accessibility** ([`accessibility`]) - whether the arms' target
//!   positions are single-stranded on the folded target, with annealing
//!   penalties for the stretches that are not; plus the delta-MFE
//!   [`cutsite_accessibility`] variant on the substrate side.
//! - **Structure distance** ([`structure`]) - tree-edit distance between
//!   the candidate's predicted fold and the ideal fold.
//! - **Fold surface** ([`fold`]) - MFE, suboptimal and Boltzmann-weighted
//!   ensemble predictions of the folding oracle, exposed as owned result
//!   lists.

pub mod accessibility;
pub mod anneal;
pub mod fold;
pub mod structure;

pub use accessibility::{accessibility, cutsite_accessibility};
pub use anneal::{AnnealConditions, MIN_CONCENTRATION, anneal};
pub use fold::{EnsembleMember, ensemble_fold, mfe_fold, suboptimal_fold};
pub use structure::structure_distance;
