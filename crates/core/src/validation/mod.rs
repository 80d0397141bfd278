//! Save and publish validation for Scapes.
//!
//! Rule types live in [`rules`]; the pure-logic checks live in
//! [`evaluator`]. Violations are always returned as data.

pub mod evaluator;
pub mod rules;

pub use evaluator::{evaluate, validate_scape};
pub use rules::{ScapeValidation, Severity, Violation};
