//! Post-run verification of flow invariants

pub mod correctness;

pub use self::correctness::{verify_result, InvariantViolation};
