//! # Core Module
//!
//! Foundation layer of the scoring engine: the consolidated error taxonomy,
//! sequence/structure validation, binding-arm region extraction, and the
//! tree form of secondary structures.
//!
//! Everything here is pure, allocation-light computation with no oracle
//! dependencies; the [`oracles`](crate::oracles) and
//! [`scoring`](crate::scoring) layers build on top of it.

pub mod error;
pub mod region;
pub mod tree;
pub mod validate;
