//! Aggregation of per-case failures collected by the case runner.

use std::{error::Error, fmt};

/// A single generated case that failed, labelled by its display name.
#[derive(Debug)]
pub struct CaseFailure {
    display_name: String,
    message: String,
}

impl CaseFailure {
    /// Record a failure for the case named `display_name`.
    #[must_use]
    pub fn new(display_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            message: message.into(),
        }
    }

    /// Display name of the failed case.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Failure message reported by the case body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.display_name, self.message)
    }
}

/// Collection of case failures produced by one run of a test method.
///
/// # Examples
///
/// ```
/// use yamaledt::{CaseFailure, CaseFailures};
/// let failures = CaseFailures::new(vec![
///     CaseFailure::new("adding zero", "expected 5, got 4"),
///     CaseFailure::new("adding one", "expected 6, got 4"),
/// ]);
/// assert_eq!(failures.len(), 2);
/// assert!(failures.to_string().starts_with("1: [adding zero]"));
/// ```
#[derive(Debug, Default)]
pub struct CaseFailures(Vec<CaseFailure>);

impl CaseFailures {
    /// Create a new aggregation from a vector of failures.
    #[must_use]
    pub const fn new(failures: Vec<CaseFailure>) -> Self {
        Self(failures)
    }

    /// Iterate over the contained failures.
    #[must_use = "iterators should be consumed to inspect failures"]
    pub fn iter(&self) -> impl Iterator<Item = &CaseFailure> {
        self.0.iter()
    }

    /// Number of failed cases.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no case failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CaseFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {failure}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for CaseFailures {}

impl<'a> IntoIterator for &'a CaseFailures {
    type Item = &'a CaseFailure;
    type IntoIter = std::slice::Iter<'a, CaseFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for CaseFailures {
    type Item = CaseFailure;
    type IntoIter = std::vec::IntoIter<CaseFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
