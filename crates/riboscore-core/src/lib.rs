//! # Riboscore Core Library
//!
//! A fast, deterministic fitness-scoring engine for candidate catalytic-RNA
//! (ribozyme) designs: given a candidate's sequence, its binding-arm
//! annotation and the target's fold, it scores how well the arms anneal at
//! the requested temperature, how accessible the cut site is, and how close
//! the predicted secondary structure comes to the ideal one.
//!
//! ## Architectural Philosophy
//!
//! The library is a stateless, synchronous function library arranged in
//! three layers with a strict dependency direction:
//!
//! - **[`core`]: The Foundation.** The consolidated error taxonomy and
//!   status codes, sequence/structure validation (including pseudoknot
//!   bracket balancing), binding-arm region extraction, and the tree form
//!   of secondary structures. Pure computation, no collaborators.
//!
//! - **[`oracles`]: The Collaborator Seams.** Traits for the three external
//!   thermodynamic oracles (duplex melting temperature, folding, tree edit
//!   distance), lock-protected service objects that serialize calls into
//!   the non-reentrant ones, and built-in default implementations where the
//!   engine can stand alone.
//!
//! - **[`scoring`]: The Public API.** One entry point per fitness
//!   dimension. Scoring calls are self-contained: immutable inputs in,
//!   `Result<score, ScoreError>` out, no retained state beyond the two
//!   oracle locks.
//!
//! ## Concurrency
//!
//! Callers may score from any number of threads. Correctness rests on the
//! two process-wide oracle locks held inside [`oracles::MeltingService`]
//! and [`oracles::TreeDistanceService`]; there is no other shared mutable
//! state, no cooperative suspension, and no cancellation.

pub mod core;
pub mod oracles;
pub mod scoring;

pub use self::core::error::{STATUS_OK, ScoreError, ScoreResult, StatusCode};
pub use self::core::validate::{validate_sequence, validate_structure};
pub use oracles::{FoldService, MeltingService, TreeDistanceService};
pub use scoring::{
    AnnealConditions, accessibility, anneal, cutsite_accessibility, ensemble_fold, mfe_fold,
    structure_distance, suboptimal_fold,
};
