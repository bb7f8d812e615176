//! Test helpers shared across crates.
//!
//! This crate provides `figment::Jail` wrappers for filesystem isolation and
//! a one-shot tracing subscriber that writes through the test harness.

pub mod jail;
pub mod logging;
