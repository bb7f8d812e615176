//! Case runner outcomes.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    clippy::panic_in_result_fn,
    reason = "tests panic to surface configuration mistakes"
)]

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};

use super::{RunError, assert_cases, run_cases};
use crate::binder::{DisplayName, ParameterSlot};
use crate::generator::TestMethod;
use crate::{ScopeDeclaration, SourceDirective, SourceError};

#[fixture]
fn squares() -> TestMethod {
    TestMethod::new("squares")
        .with_scope(ScopeDeclaration::new("squares").with_source(
            SourceDirective::new()
                .with_resource("two:\n  n: 2\n  r: 4\nthree:\n  n: 3\n  r: 10\nfour:\n  n: 4\n  r: 17\n"),
        ))
        .with_parameter(ParameterSlot::of::<DisplayName>())
        .with_parameter(ParameterSlot::named::<i64>("n"))
        .with_parameter(ParameterSlot::named::<i64>("r"))
}

fn square_matches(case: &crate::generator::TestCase) -> Result<()> {
    let args = case.arguments();
    let n: i64 = args.value(1).map_err(|err| anyhow!(err.to_string()))?;
    let r: i64 = args.value(2).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(n * n == r, "{n} squared is not {r}");
    Ok(())
}

#[rstest]
fn every_failing_case_is_collected(squares: TestMethod) -> Result<()> {
    let err = run_cases(&squares, square_matches).expect_err("two cases fail");
    let (total, failures) = match err {
        RunError::Cases { total, failures } => (total, failures),
        other @ RunError::Setup(_) => return Err(anyhow!("expected case failures, got {other}")),
    };
    ensure!(total == 3, "three cases ran");
    let names: Vec<&str> = failures.iter().map(|failure| failure.display_name()).collect();
    ensure!(names == ["three", "four"], "got {names:?}");
    ensure!(
        failures.iter().any(|failure| failure.message() == "3 squared is not 10"),
        "message kept"
    );
    Ok(())
}

#[rstest]
fn panics_count_as_case_failures(squares: TestMethod) -> Result<()> {
    let err = run_cases(&squares, |case| {
        assert_ne!(case.display_name(), "four", "four is rejected");
        Ok::<_, String>(())
    })
    .expect_err("one case panics");
    let failures = match err {
        RunError::Cases { failures, .. } => failures,
        other @ RunError::Setup(_) => return Err(anyhow!("expected case failures, got {other}")),
    };
    ensure!(failures.len() == 1, "one failure");
    let failure = failures.iter().next().ok_or_else(|| anyhow!("no failure"))?;
    ensure!(failure.message().contains("four is rejected"), "got {}", failure.message());
    Ok(())
}

#[rstest]
fn setup_failures_are_reported_separately() -> Result<()> {
    let method = TestMethod::new("orphan").with_parameter(ParameterSlot::named::<i64>("n"));
    let err = run_cases(&method, |_| Ok::<_, String>(())).expect_err("no source");
    ensure!(
        matches!(&err, RunError::Setup(source) if matches!(source.as_ref(), SourceError::NoSourceDirective { .. })),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
fn passing_runs_list_every_case() {
    let method = TestMethod::new("names")
        .with_scope(
            ScopeDeclaration::new("names")
                .with_source(SourceDirective::new().with_resource("a:\nb:\nc:\n")),
        )
        .with_parameter(ParameterSlot::of::<DisplayName>());
    let report = assert_cases(&method, |case| {
        ensure!(case.arguments().display_name() == Some(case.display_name()), "name bound");
        Ok(())
    });
    assert_eq!(report.passed(), ["a", "b", "c"]);
}

#[rstest]
#[should_panic(expected = "squares")]
fn assert_cases_panics_on_failure(squares: TestMethod) {
    assert_cases(&squares, square_matches);
}
