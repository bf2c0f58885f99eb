#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based test suite entry point.
//!
//! ```bash
//! cargo test -p patient_records --test property
//! PROPTEST_CASES=256 cargo test -p patient_records --test property
//! ```

#[path = "../support/mod.rs"]
mod support;

mod audit;
mod containment;
mod friction;
