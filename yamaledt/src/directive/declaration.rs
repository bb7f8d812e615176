//! Declarations attached to one scope of a test method's scope chain.
//!
//! A scope (an enclosing module, a nested group, or the test method itself)
//! may carry a [`SourceDirective`], a [`MacroDirective`] block, or both. The
//! pair is flattened into a single [`ScopeDirective`] before merging.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ScopeDirective;
use crate::{SourceError, SourceResult};

/// Macro preprocessing settings.
///
/// Empty strings mean "unset" and leave the value from an enclosing scope in
/// place. Expansion is enabled unless switched off explicitly.
///
/// # Examples
///
/// ```
/// use yamaledt::MacroDirective;
///
/// let block = MacroDirective::new()
///     .with_delimiters("{{", "}}")
///     .with_dump("expanded.yaml");
/// assert!(block.enabled());
/// assert_eq!(block.open(), "{{");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct MacroDirective {
    open: String,
    close: String,
    enabled: bool,
    dump: String,
}

impl Default for MacroDirective {
    fn default() -> Self {
        Self {
            open: String::new(),
            close: String::new(),
            enabled: true,
            dump: String::new(),
        }
    }
}

impl MacroDirective {
    /// Macro block with every field unset and expansion enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Macro block that switches expansion off.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default().with_enabled(false)
    }

    /// Set the opening and closing macro delimiters.
    #[must_use]
    pub fn with_delimiters(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.open = open.into();
        self.close = close.into();
        self
    }

    /// Switch expansion on or off.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Write the expanded text to `path`, relative to the resource.
    #[must_use]
    pub fn with_dump(mut self, path: impl Into<String>) -> Self {
        self.dump = path.into();
        self
    }

    /// Opening delimiter, empty when unset.
    #[must_use]
    pub fn open(&self) -> &str {
        &self.open
    }

    /// Closing delimiter, empty when unset.
    #[must_use]
    pub fn close(&self) -> &str {
        &self.close
    }

    /// Whether expansion is enabled.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Dump path, empty when unset.
    #[must_use]
    pub fn dump(&self) -> &str {
        &self.dump
    }
}

/// Where the test data comes from and how it is bound.
///
/// # Examples
///
/// ```
/// use yamaledt::SourceDirective;
///
/// let source = SourceDirective::new()
///     .with_resource("Shared.yaml")
///     .with_selection("test1")
///     .with_strict(true);
/// assert_eq!(source.resource(), "Shared.yaml");
/// assert!(source.macros().is_none());
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourceDirective {
    resource: String,
    selection: String,
    strict: bool,
    macros: Option<MacroDirective>,
}

impl SourceDirective {
    /// Source directive with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name a resource, or supply the document inline (any text with a line
    /// break is treated as inline data).
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Narrow the parsed tree with a selection expression.
    #[must_use]
    pub fn with_selection(mut self, expression: impl Into<String>) -> Self {
        self.selection = expression.into();
        self
    }

    /// Reject records whose fields do not match the parameters exactly.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Configure macro preprocessing inline with the source.
    #[must_use]
    pub fn with_macros(mut self, macros: MacroDirective) -> Self {
        self.macros = Some(macros);
        self
    }

    /// Resource name or inline text, empty when unset.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Selection expression, empty when unset.
    #[must_use]
    pub fn selection(&self) -> &str {
        &self.selection
    }

    /// Whether strict binding was requested.
    #[must_use]
    pub const fn strict(&self) -> bool {
        self.strict
    }

    /// Inline macro configuration, if one was given.
    #[must_use]
    pub const fn macros(&self) -> Option<&MacroDirective> {
        self.macros.as_ref()
    }
}

/// Everything declared at one level of the scope chain.
///
/// # Examples
///
/// ```
/// use yamaledt::{MacroDirective, ScopeDeclaration, SourceDirective};
///
/// let outer = ScopeDeclaration::new("TestInner")
///     .with_source(SourceDirective::new().with_resource("Shared.yaml"));
/// let inner = ScopeDeclaration::new("TestInnerInner").with_macros(MacroDirective::disabled());
/// assert!(outer.resolve()?.is_some());
/// assert!(!inner.resolve()?.expect("declared").macro_enabled());
/// # Ok::<_, std::sync::Arc<yamaledt::SourceError>>(())
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ScopeDeclaration {
    name: String,
    #[serde(default)]
    source: Option<SourceDirective>,
    #[serde(default)]
    macros: Option<MacroDirective>,
}

impl ScopeDeclaration {
    /// Empty declaration for the scope called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            macros: None,
        }
    }

    /// Attach a source directive.
    #[must_use]
    pub fn with_source(mut self, source: SourceDirective) -> Self {
        self.source = Some(source);
        self
    }

    /// Attach a separate macro block.
    #[must_use]
    pub fn with_macros(mut self, macros: MacroDirective) -> Self {
        self.macros = Some(macros);
        self
    }

    /// Scope name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared source directive.
    #[must_use]
    pub const fn source(&self) -> Option<&SourceDirective> {
        self.source.as_ref()
    }

    /// Declared macro block.
    #[must_use]
    pub const fn macros(&self) -> Option<&MacroDirective> {
        self.macros.as_ref()
    }

    /// Flatten the declaration into a [`ScopeDirective`].
    ///
    /// Returns `Ok(None)` for a scope that declares nothing; such scopes do not
    /// take part in the merge. Fields the declaration leaves out take their
    /// defaults, so the booleans of every declared scope are always concrete.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::ConflictingDirectives`] when the scope carries a
    /// macro block and its source directive also configures macros inline.
    pub fn resolve(&self) -> SourceResult<Option<ScopeDirective>> {
        let inline = self.source.as_ref().and_then(SourceDirective::macros);
        if inline.is_some() && self.macros.is_some() {
            return Err(Arc::new(SourceError::ConflictingDirectives {
                scope: self.name.clone(),
            }));
        }
        if self.source.is_none() && self.macros.is_none() {
            return Ok(None);
        }

        let macros = inline.or(self.macros.as_ref()).cloned().unwrap_or_default();
        let mut directive = ScopeDirective::new(self.name.clone())
            .with_macro_delimiters(macros.open, macros.close)
            .with_macro_enabled(macros.enabled)
            .with_dump_path(macros.dump);
        if let Some(source) = &self.source {
            directive = directive
                .with_resource(source.resource.clone())
                .with_selection(source.selection.clone())
                .with_strict(source.strict)
                .declaring_source();
        }
        Ok(Some(directive))
    }
}
