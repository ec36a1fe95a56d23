//! # Oracles Module
//!
//! Trait seams for the three external thermodynamic collaborators (the
//! duplex melting-temperature oracle, the folding oracle, and the
//! tree-edit-distance oracle), together with the lock-protected service
//! objects that the scoring layer consumes.
//!
//! ## Concurrency contract
//!
//! The melting and tree-distance oracles are not reentrant; their traits
//! take `&mut self` and their services serialize every call through a
//! dedicated mutex ([`MeltingService`], [`TreeDistanceService`]). The two
//! locks are independent: they guard independent libraries with
//! independent non-reentrancy constraints. The folding oracle owns all of
//! its state per call, so [`FoldService`] carries no lock.
//!
//! Default implementations are provided where the engine can stand alone:
//! [`NearestNeighborMelt`] for melting temperatures and [`ZhangShasha`]
//! for tree edit distance. Folding has no default; callers supply an
//! implementation backed by their folding library of choice.

pub mod fold;
pub mod melting;
pub mod tree;

use thiserror::Error;

pub use fold::{
    BaseConstraint, ConstraintMask, FoldOracle, FoldPrediction, FoldService, PartitionFunction,
};
pub use melting::{MeltingOracle, MeltingService, NearestNeighborMelt};
pub use tree::{TreeDistanceOracle, TreeDistanceService, ZhangShasha};

/// Failure reported by an external oracle.
///
/// Oracle failures are fatal for the call that observed them; they are
/// propagated, never retried.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("arm of {len} nt is too short for duplex melting evaluation")]
    ArmTooShort { len: usize },

    #[error("degenerate thermodynamic parameters: {detail}")]
    Degenerate { detail: String },

    #[error("oracle internal failure: {0}")]
    Internal(String),
}
