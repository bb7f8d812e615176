//! Scope directives and the merge that folds them into one configuration.
//!
//! A test method's scope chain is an explicit list of [`ScopeDeclaration`]
//! values ordered from the outermost enclosing scope down to the method.
//! Each declaration flattens into a [`ScopeDirective`], and the directives
//! are layered with Figment into an [`EffectiveConfig`].

mod declaration;
mod effective;
mod scope;

pub use declaration::{MacroDirective, ScopeDeclaration, SourceDirective};
pub use effective::{
    DEFAULT_MACRO_CLOSE, DEFAULT_MACRO_OPEN, EffectiveConfig, MACRO_EXTENSION, PLAIN_EXTENSION,
    default_resource_name,
};
pub use scope::ScopeDirective;

use std::sync::Arc;

use crate::{SourceError, SourceResult};

/// Resolve every declaration in `chain` and merge the result.
///
/// Conflicts are reported before anything else happens, so a misdeclared
/// scope fails without touching the resource.
///
/// # Errors
///
/// Returns [`SourceError::ConflictingDirectives`] for a scope that
/// configures macros twice, [`SourceError::NoSourceDirective`] when no scope
/// declares a source, and [`SourceError::Merge`] if the fold fails.
pub fn resolve_chain(method: &str, chain: &[ScopeDeclaration]) -> SourceResult<EffectiveConfig> {
    let mut directives = Vec::with_capacity(chain.len());
    for declaration in chain {
        if let Some(directive) = declaration.resolve()? {
            directives.push(directive);
        }
    }
    if !directives.iter().any(ScopeDirective::declares_source) {
        return Err(Arc::new(SourceError::NoSourceDirective {
            method: method.to_owned(),
        }));
    }
    EffectiveConfig::merge(method, &directives)
}
