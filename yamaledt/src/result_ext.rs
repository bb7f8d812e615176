//! Extensions for mapping errors to `SourceResult` concisely.
//!
//! - Use [`SourceResultExt::into_source`] for error types that implement
//!   `Into<SourceError>` (e.g., a boxed `figment::Error`).
//! - Use [`ResultIntoFigment::to_figment`] inside a `figment::Jail` closure,
//!   which expects Figment's own error type.
//!
//! # Examples
//!
//! ```
//! use yamaledt::{SourceResult, SourceResultExt};
//!
//! fn extract() -> SourceResult<u16> {
//!     let parsed: Result<u16, Box<figment::Error>> =
//!         Err(Box::new(figment::Error::from("no port")));
//!     parsed.into_source()
//! }
//! assert!(extract().is_err());
//! ```

use std::sync::Arc;

use crate::{SourceError, SourceResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<SourceError>` into a `SourceResult<T>`.
pub trait SourceResultExt<T, E> {
    /// Convert `Result<T, E>` into `SourceResult<T>` using `Into<SourceError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<SourceError>`.
    fn into_source(self) -> SourceResult<T>;
}

impl<T, E> SourceResultExt<T, E> for Result<T, E>
where
    E: Into<SourceError>,
{
    fn into_source(self) -> SourceResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension to convert `SourceResult<T>` into `Result<T, figment::Error>`.
#[allow(
    clippy::result_large_err,
    reason = "figment::Error is large; this helper is test-facing only"
)]
pub trait ResultIntoFigment<T> {
    /// Map the error into a `figment::Error` carrying the same message.
    ///
    /// # Errors
    ///
    /// Returns a `figment::Error` containing the original message.
    fn to_figment(self) -> Result<T, figment::Error>;
}

impl<T> ResultIntoFigment<T> for SourceResult<T> {
    fn to_figment(self) -> Result<T, figment::Error> {
        self.map_err(|e| figment::Error::from(e.to_string()))
    }
}
