//! Path selection over a parsed value tree.
//!
//! An expression is a dot-separated list of mapping keys, each optionally
//! followed by list indices: `test`, `suite.cases`, `groups[1].cases`. A key
//! containing `.` or `[` is written in double quotes, as in `"v1.0".cases`.
//! Quoted keys cannot themselves contain a double quote.

use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

/// Why a selection expression could not be evaluated.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// A key between separators is empty.
    #[error("empty key")]
    EmptyKey,
    /// A `[` has no matching `]`.
    #[error("unclosed '['")]
    UnclosedBracket,
    /// A quoted key has no closing quote.
    #[error("unclosed '\"'")]
    UnclosedQuote,
    /// Text inside brackets is not a list index.
    #[error("'{0}' is not a list index")]
    BadIndex(String),
    /// Trailing text follows a key or index.
    #[error("unexpected '{0}'")]
    Unexpected(String),
    /// A mapping step found no such key.
    #[error("no key '{key}' under '{under}'")]
    MissingKey {
        /// Key looked up.
        key: String,
        /// Path walked so far.
        under: String,
    },
    /// A list step found no such index.
    #[error("no index {index} under '{under}'")]
    MissingIndex {
        /// Index looked up.
        index: usize,
        /// Path walked so far.
        under: String,
    },
}

/// Evaluate `expression` against `tree`.
///
/// # Errors
///
/// Returns a [`SelectionError`] when the expression is malformed or a step
/// does not resolve.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use yamaledt::loader::{SelectionError, select};
///
/// let tree = json!({"test": {"t1": {"a": 1}}, "v1.0": {"t2": {}}});
/// assert_eq!(select(&tree, "test.t1")?, &json!({"a": 1}));
/// assert_eq!(select(&tree, "\"v1.0\"")?, &json!({"t2": {}}));
/// assert!(matches!(select(&tree, "missing"), Err(SelectionError::MissingKey { .. })));
/// # Ok::<_, SelectionError>(())
/// ```
pub fn select<'v>(tree: &'v Value, expression: &str) -> Result<&'v Value, SelectionError> {
    let steps = parse(expression)?;
    let mut current = tree;
    let mut walked = String::new();
    for step in steps {
        let next = match step {
            Step::Key(key) => current.get(key),
            Step::Index(index) => current.get(index),
        };
        current = next.ok_or_else(|| match step {
            Step::Key(key) => SelectionError::MissingKey {
                key: key.to_owned(),
                under: root_label(&walked).to_owned(),
            },
            Step::Index(index) => SelectionError::MissingIndex {
                index,
                under: root_label(&walked).to_owned(),
            },
        })?;
        push_step(&mut walked, &step);
    }
    Ok(current)
}

fn root_label(walked: &str) -> &str {
    if walked.is_empty() { "<root>" } else { walked }
}

fn push_step(walked: &mut String, step: &Step<'_>) {
    match step {
        Step::Key(key) => {
            if !walked.is_empty() {
                walked.push('.');
            }
            if key.contains(['.', '[']) {
                walked.push('"');
                walked.push_str(key);
                walked.push('"');
            } else {
                walked.push_str(key);
            }
        }
        Step::Index(index) => {
            walked.push('[');
            walked.push_str(&index.to_string());
            walked.push(']');
        }
    }
}

fn parse(expression: &str) -> Result<Vec<Step<'_>>, SelectionError> {
    let mut steps = Vec::new();
    let mut rest = expression.trim();
    loop {
        let (key, mut tail) = split_key(rest)?;
        if key.is_empty() {
            return Err(SelectionError::EmptyKey);
        }
        steps.push(Step::Key(key));
        while let Some(inner) = tail.strip_prefix('[') {
            let (index, more) = inner
                .split_once(']')
                .ok_or(SelectionError::UnclosedBracket)?;
            let index = index
                .trim()
                .parse::<usize>()
                .map_err(|_| SelectionError::BadIndex(index.to_owned()))?;
            steps.push(Step::Index(index));
            tail = more;
        }
        if tail.is_empty() {
            return Ok(steps);
        }
        rest = tail
            .strip_prefix('.')
            .ok_or_else(|| SelectionError::Unexpected(tail.to_owned()))?;
    }
}

fn split_key(rest: &str) -> Result<(&str, &str), SelectionError> {
    if let Some(quoted) = rest.strip_prefix('"') {
        return quoted.split_once('"').ok_or(SelectionError::UnclosedQuote);
    }
    let end = rest.find(['.', '[']).unwrap_or(rest.len());
    Ok(rest.split_at(end))
}
