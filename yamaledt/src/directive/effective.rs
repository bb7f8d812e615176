//! Merged configuration for one test invocation.

use camino::Utf8Path;
use figment::{Figment, providers::Serialized};
use serde::Deserialize;
use tracing::debug;

use super::ScopeDirective;
use crate::macros::Delimiters;
use crate::{SourceError, SourceResult, SourceResultExt};

/// Opening macro delimiter used when no scope sets one.
pub const DEFAULT_MACRO_OPEN: &str = "{%";
/// Closing macro delimiter used when no scope sets one.
pub const DEFAULT_MACRO_CLOSE: &str = "%}";
/// Extension of the default resource when macro expansion is enabled.
pub const MACRO_EXTENSION: &str = ".yaml.jam";
/// Extension of the default resource when macro expansion is disabled.
pub const PLAIN_EXTENSION: &str = ".yaml";

/// The single directive used for one test invocation.
///
/// # Examples
///
/// ```
/// use yamaledt::{EffectiveConfig, ScopeDirective};
///
/// let chain = [
///     ScopeDirective::new("outer").with_resource("Shared.yaml"),
///     ScopeDirective::new("adds").with_selection("test1"),
/// ];
/// let config = EffectiveConfig::merge("adds", &chain)?;
/// assert_eq!(config.resource(), "Shared.yaml");
/// assert_eq!(config.selection(), Some("test1"));
/// assert_eq!(config.delimiters().open, "{%");
/// # Ok::<_, std::sync::Arc<yamaledt::SourceError>>(())
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EffectiveConfig {
    resource: String,
    macro_open: String,
    macro_close: String,
    macro_enabled: bool,
    dump_path: String,
    selection_expr: String,
    strict: bool,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            resource: String::new(),
            macro_open: String::new(),
            macro_close: String::new(),
            macro_enabled: true,
            dump_path: String::new(),
            selection_expr: String::new(),
            strict: false,
        }
    }
}

impl EffectiveConfig {
    /// Fold `directives`, ordered outermost scope first, into one
    /// configuration for the test method called `method`.
    ///
    /// A string field takes the innermost non-empty value; an empty value
    /// never erases an outer one. A boolean field takes the value of the last
    /// directive, whether or not that scope meant to state it. Unset
    /// delimiters and resource names are then filled with their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SourceError::Merge`] if the folded layers cannot be
    /// extracted.
    pub fn merge(method: &str, directives: &[ScopeDirective]) -> SourceResult<Self> {
        let figment = directives
            .iter()
            .fold(Figment::new(), |figment, directive| {
                figment.merge(Serialized::defaults(directive.layer()))
            });
        let mut config: Self = figment
            .extract()
            .map_err(SourceError::merge)
            .into_source()?;
        config.apply_defaults(method);
        debug!(
            method,
            resource = %config.resource_label(),
            macro_enabled = config.macro_enabled,
            strict = config.strict,
            "merged {} scope directives",
            directives.len()
        );
        Ok(config)
    }

    fn apply_defaults(&mut self, method: &str) {
        if self.macro_open.is_empty() {
            DEFAULT_MACRO_OPEN.clone_into(&mut self.macro_open);
        }
        if self.macro_close.is_empty() {
            DEFAULT_MACRO_CLOSE.clone_into(&mut self.macro_close);
        }
        if self.resource.is_empty() {
            self.resource = default_resource_name(method, self.macro_enabled);
        }
    }

    /// Resource name or inline document.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Whether the resource is an inline document rather than a name.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.resource.contains('\n')
    }

    /// Short label for the resource, suitable for diagnostics.
    #[must_use]
    pub fn resource_label(&self) -> &str {
        if self.is_inline() {
            "<inline>"
        } else {
            &self.resource
        }
    }

    /// Macro delimiters after defaults are applied.
    #[must_use]
    pub fn delimiters(&self) -> Delimiters<'_> {
        Delimiters {
            open: &self.macro_open,
            close: &self.macro_close,
        }
    }

    /// Whether macro expansion runs.
    #[must_use]
    pub const fn macro_enabled(&self) -> bool {
        self.macro_enabled
    }

    /// Dump path, if one is configured.
    #[must_use]
    pub fn dump_path(&self) -> Option<&Utf8Path> {
        (!self.dump_path.is_empty()).then(|| Utf8Path::new(&self.dump_path))
    }

    /// Selection expression, if one is configured.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        (!self.selection_expr.is_empty()).then_some(self.selection_expr.as_str())
    }

    /// Whether strict binding applies.
    #[must_use]
    pub const fn strict(&self) -> bool {
        self.strict
    }
}

/// Resource name used when no scope names one.
///
/// # Examples
///
/// ```
/// use yamaledt::directive::default_resource_name;
///
/// assert_eq!(default_resource_name("adds", true), "adds.yaml.jam");
/// assert_eq!(default_resource_name("adds", false), "adds.yaml");
/// ```
#[must_use]
pub fn default_resource_name(method: &str, macro_enabled: bool) -> String {
    let extension = if macro_enabled {
        MACRO_EXTENSION
    } else {
        PLAIN_EXTENSION
    };
    format!("{method}{extension}")
}
