//! Macro preprocessing of resource text.
//!
//! The engine is a seam: anything implementing [`MacroEngine`] can expand a
//! resource before it is parsed. [`BuiltinMacros`] is the engine used by
//! default. The [`expand`] stage decides whether the engine runs at all and
//! writes the expanded text to the configured dump file.

mod builtin;
mod stage;

pub use builtin::BuiltinMacros;
pub use stage::expand;

use camino::Utf8Path;
use thiserror::Error;

/// Opening and closing macro delimiters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delimiters<'a> {
    /// Text that starts a macro.
    pub open: &'a str,
    /// Text that ends a macro.
    pub close: &'a str,
}

/// Syntax failure reported by a macro engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message} at line {line}")]
pub struct MacroError {
    message: String,
    line: usize,
}

impl MacroError {
    /// Create an error for the 1-based `line`.
    #[must_use]
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }

    /// Description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Line the failure was detected on.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}

/// Expands macro text into plain text.
///
/// Implementations must not keep state between calls: the same engine may be
/// shared by generators running on several threads.
pub trait MacroEngine {
    /// Expand `input` using `delimiters`.
    ///
    /// `origin` is the location of the text when it came from a file; engines
    /// resolve relative includes against its parent directory, or against the
    /// working directory when it is `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`MacroError`] when the text is not valid macro source.
    fn expand(
        &self,
        input: &str,
        delimiters: Delimiters<'_>,
        origin: Option<&Utf8Path>,
    ) -> Result<String, MacroError>;
}

impl<E: MacroEngine + ?Sized> MacroEngine for &E {
    fn expand(
        &self,
        input: &str,
        delimiters: Delimiters<'_>,
        origin: Option<&Utf8Path>,
    ) -> Result<String, MacroError> {
        (**self).expand(input, delimiters, origin)
    }
}
