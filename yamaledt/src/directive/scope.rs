//! Flat per-scope directive folded by the merger.

use serde::Serialize;

/// Partial configuration contributed by one scope.
///
/// String fields use the empty string for "unset". Booleans have no unset
/// state: whatever a directive carries is applied when it is merged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeDirective {
    scope: String,
    resource: String,
    macro_open: String,
    macro_close: String,
    macro_enabled: bool,
    dump_path: String,
    selection_expr: String,
    strict: bool,
    declares_source: bool,
}

impl ScopeDirective {
    /// Directive for `scope` with every string unset, expansion enabled, and
    /// lenient binding.
    #[must_use]
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            resource: String::new(),
            macro_open: String::new(),
            macro_close: String::new(),
            macro_enabled: true,
            dump_path: String::new(),
            selection_expr: String::new(),
            strict: false,
            declares_source: false,
        }
    }

    /// Set the resource name or inline document.
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Set the macro delimiters.
    #[must_use]
    pub fn with_macro_delimiters(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.macro_open = open.into();
        self.macro_close = close.into();
        self
    }

    /// Switch macro expansion on or off.
    #[must_use]
    pub const fn with_macro_enabled(mut self, enabled: bool) -> Self {
        self.macro_enabled = enabled;
        self
    }

    /// Set the dump path.
    #[must_use]
    pub fn with_dump_path(mut self, path: impl Into<String>) -> Self {
        self.dump_path = path.into();
        self
    }

    /// Set the selection expression.
    #[must_use]
    pub fn with_selection(mut self, expression: impl Into<String>) -> Self {
        self.selection_expr = expression.into();
        self
    }

    /// Switch strict binding on or off.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Mark the directive as originating from a source declaration.
    #[must_use]
    pub const fn declaring_source(mut self) -> Self {
        self.declares_source = true;
        self
    }

    /// Name of the scope the directive belongs to.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Whether macro expansion is enabled at this scope.
    #[must_use]
    pub const fn macro_enabled(&self) -> bool {
        self.macro_enabled
    }

    /// Whether strict binding is requested at this scope.
    #[must_use]
    pub const fn strict(&self) -> bool {
        self.strict
    }

    /// Whether the scope declared a source directive.
    #[must_use]
    pub const fn declares_source(&self) -> bool {
        self.declares_source
    }

    pub(super) fn layer(&self) -> DirectiveLayer<'_> {
        DirectiveLayer {
            resource: &self.resource,
            macro_open: &self.macro_open,
            macro_close: &self.macro_close,
            macro_enabled: self.macro_enabled,
            dump_path: &self.dump_path,
            selection_expr: &self.selection_expr,
            strict: self.strict,
        }
    }
}

/// Serialised view of a directive used as one merge layer.
///
/// Unset strings are skipped so they never override an enclosing scope.
#[derive(Serialize)]
pub(super) struct DirectiveLayer<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    resource: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    macro_open: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    macro_close: &'a str,
    macro_enabled: bool,
    #[serde(skip_serializing_if = "str::is_empty")]
    dump_path: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    selection_expr: &'a str,
    strict: bool,
}
