//! Running a closure once per generated case.
//!
//! Setup failures (anything [`crate::generate`] reports) are kept apart from
//! case failures. A case fails when the closure returns an error or panics,
//! and every failing case is collected before the run is reported.

use std::any::Any;
use std::fmt::Display;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::SourceError;
use crate::error::{CaseFailure, CaseFailures};
use crate::generator::{CaseGenerator, TestCase, TestMethod};
use crate::macros::MacroEngine;

/// Why a run did not pass.
#[derive(Debug, Error)]
pub enum RunError {
    /// Cases could not be generated.
    #[error("test method setup failed: {0}")]
    Setup(#[source] Arc<SourceError>),
    /// At least one case failed.
    #[error("{} of {total} case(s) failed:\n{failures}", .failures.len())]
    Cases {
        /// Number of cases that ran.
        total: usize,
        /// Failing cases in run order.
        failures: CaseFailures,
    },
}

/// Outcome of a run in which every case passed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    passed: Vec<String>,
}

impl RunReport {
    /// Display names of the cases that ran, in order.
    #[must_use]
    pub fn passed(&self) -> &[String] {
        &self.passed
    }

    /// Number of cases that ran.
    #[must_use]
    pub fn len(&self) -> usize {
        self.passed.len()
    }

    /// Whether the source produced no cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.passed.is_empty()
    }
}

/// Generate the cases of `method` and call `case` for each one.
///
/// # Errors
///
/// Returns [`RunError::Setup`] when generation fails and [`RunError::Cases`]
/// when any case returns an error or panics.
///
/// # Examples
///
/// ```
/// use yamaledt::binder::ParameterSlot;
/// use yamaledt::generator::TestMethod;
/// use yamaledt::harness::run_cases;
/// use yamaledt::{ScopeDeclaration, SourceDirective};
///
/// let method = TestMethod::new("doubles")
///     .with_scope(ScopeDeclaration::new("doubles").with_source(
///         SourceDirective::new().with_resource("two:\n  n: 2\n  r: 4\nthree:\n  n: 3\n  r: 6\n"),
///     ))
///     .with_parameter(ParameterSlot::named::<i64>("n"))
///     .with_parameter(ParameterSlot::named::<i64>("r"));
/// let report = run_cases(&method, |case| {
///     let args = case.arguments();
///     assert_eq!(args.value::<i64>(0)? * 2, args.value::<i64>(1)?);
///     Ok::<_, std::sync::Arc<yamaledt::SourceError>>(())
/// })?;
/// assert_eq!(report.passed(), ["two", "three"]);
/// # Ok::<_, yamaledt::harness::RunError>(())
/// ```
pub fn run_cases<F, E>(method: &TestMethod, case: F) -> Result<RunReport, RunError>
where
    F: FnMut(&TestCase) -> Result<(), E>,
    E: Display,
{
    run_cases_with(&CaseGenerator::new(), method, case)
}

/// Like [`run_cases`], generating with `generator`.
///
/// # Errors
///
/// See [`run_cases`].
pub fn run_cases_with<G, F, E>(
    generator: &CaseGenerator<G>,
    method: &TestMethod,
    mut case: F,
) -> Result<RunReport, RunError>
where
    G: MacroEngine,
    F: FnMut(&TestCase) -> Result<(), E>,
    E: Display,
{
    let cases = generator.generate(method).map_err(RunError::Setup)?;
    let total = cases.len();
    let mut passed = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for test_case in &cases {
        let outcome = catch_unwind(AssertUnwindSafe(|| case(test_case)));
        let message = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(err.to_string()),
            Err(payload) => Some(panic_message(payload.as_ref())),
        };
        match message {
            None => passed.push(test_case.display_name().to_owned()),
            Some(text) => {
                debug!(case = test_case.display_name(), "case failed");
                failures.push(CaseFailure::new(test_case.display_name(), text));
            }
        }
    }
    if failures.is_empty() {
        Ok(RunReport { passed })
    } else {
        Err(RunError::Cases {
            total,
            failures: CaseFailures::new(failures),
        })
    }
}

/// Run `method` like [`run_cases`] and panic with the collected failures.
///
/// # Panics
///
/// Panics when generation fails or any case fails, listing every failing
/// case by display name.
pub fn assert_cases<F, E>(method: &TestMethod, case: F) -> RunReport
where
    F: FnMut(&TestCase) -> Result<(), E>,
    E: Display,
{
    match run_cases(method, case) {
        Ok(report) => report,
        Err(err) => panic!("{}: {err}", method.name()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|text| (*text).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "case panicked".to_owned())
}

#[cfg(test)]
mod tests;
