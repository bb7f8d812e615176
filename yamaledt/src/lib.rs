//! Data-driven test cases generated from YAML sources.
//!
//! A test method is described by a [`generator::TestMethod`]: its name, the
//! chain of scopes it is declared in, and its formal parameters. The scope
//! chain decides where the test data comes from and how it is read. The
//! source is optionally run through a macro stage, parsed as YAML, narrowed
//! by a selection expression, and every named record becomes one
//! [`generator::TestCase`] whose arguments are bound to the parameters.
//!
//! ```
//! use yamaledt::binder::{DisplayName, ParameterSlot};
//! use yamaledt::generator::TestMethod;
//! use yamaledt::{MacroDirective, ScopeDeclaration, SourceDirective};
//!
//! let method = TestMethod::new("adds")
//!     .with_scope(ScopeDeclaration::new("suite").with_macros(MacroDirective::new()))
//!     .with_scope(ScopeDeclaration::new("adds").with_source(
//!         SourceDirective::new()
//!             .with_resource("{%@define five=5%}\nzero:\n  k: 0\n  r: {%five%}\n")
//!             .with_strict(true),
//!     ))
//!     .with_parameter(ParameterSlot::of::<DisplayName>())
//!     .with_parameter(ParameterSlot::named::<i64>("k"))
//!     .with_parameter(ParameterSlot::named::<i64>("r"));
//!
//! for case in yamaledt::generate(&method)? {
//!     let args = case.arguments();
//!     assert_eq!(5 + args.value::<i64>(1)?, args.value::<i64>(2)?);
//! }
//! # Ok::<_, std::sync::Arc<yamaledt::SourceError>>(())
//! ```

use std::sync::Arc;

pub mod binder;
pub mod directive;
mod error;
pub mod generator;
pub mod harness;
pub mod loader;
pub mod macros;
pub mod resource;
mod result_ext;

pub use directive::{
    EffectiveConfig, MacroDirective, ScopeDeclaration, ScopeDirective, SourceDirective,
    resolve_chain,
};
pub use error::{CaseFailure, CaseFailures, SourceError};
pub use generator::{CaseGenerator, TestCase, TestMethod, generate};
pub use resource::Resource;
pub use result_ext::{ResultIntoFigment, SourceResultExt};

/// Shared result type for test-case generation.
pub type SourceResult<T> = Result<T, Arc<SourceError>>;
