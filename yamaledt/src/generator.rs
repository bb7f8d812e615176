//! Test method descriptors and the pipeline that turns them into cases.
//!
//! Generation runs the stages in a fixed order: the parameter list is
//! validated, the scope chain is resolved and merged, the resource is read
//! and expanded, and every record is loaded and bound. The first failure
//! aborts the whole method; no partial case list is returned.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, debug_span};

use crate::binder::{BoundArguments, ParameterList, ParameterSlot, bind};
use crate::directive::{ScopeDeclaration, resolve_chain};
use crate::macros::{BuiltinMacros, MacroEngine};
use crate::resource::Resource;
use crate::{SourceResult, loader, macros};

/// Everything needed to generate the cases of one data-driven test method.
///
/// Scopes are listed from the outermost enclosing scope down to the method
/// itself; later scopes take precedence when directives are merged.
///
/// # Examples
///
/// ```
/// use yamaledt::binder::{DisplayName, ParameterSlot};
/// use yamaledt::generator::TestMethod;
/// use yamaledt::{ScopeDeclaration, SourceDirective};
///
/// let method = TestMethod::new("adds")
///     .with_scope(
///         ScopeDeclaration::new("adds")
///             .with_source(SourceDirective::new().with_resource("t1:\n  i: 5\n")),
///     )
///     .with_parameter(ParameterSlot::of::<DisplayName>())
///     .with_parameter(ParameterSlot::named::<i64>("i"));
/// let cases = yamaledt::generate(&method)?;
/// assert_eq!(cases.len(), 1);
/// assert_eq!(cases[0].display_name(), "t1");
/// assert_eq!(cases[0].arguments().value::<i64>(1)?, 5);
/// # Ok::<_, std::sync::Arc<yamaledt::SourceError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct TestMethod {
    name: String,
    resource_root: Utf8PathBuf,
    scopes: Vec<ScopeDeclaration>,
    parameters: Vec<ParameterSlot>,
}

impl TestMethod {
    /// Describe the method `name`, resolving resource names against the
    /// working directory.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_root: Utf8PathBuf::from("."),
            scopes: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Resolve resource names against `root` instead.
    #[must_use]
    pub fn with_resource_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.resource_root = root.into();
        self
    }

    /// Append `scope` as the new innermost scope.
    #[must_use]
    pub fn with_scope(mut self, scope: ScopeDeclaration) -> Self {
        self.scopes.push(scope);
        self
    }

    /// Append `scopes`, outermost first.
    #[must_use]
    pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = ScopeDeclaration>) -> Self {
        self.scopes.extend(scopes);
        self
    }

    /// Append the next formal parameter.
    #[must_use]
    pub fn with_parameter(mut self, slot: ParameterSlot) -> Self {
        self.parameters.push(slot);
        self
    }

    /// Append formal parameters in order.
    #[must_use]
    pub fn with_parameters(mut self, slots: impl IntoIterator<Item = ParameterSlot>) -> Self {
        self.parameters.extend(slots);
        self
    }

    /// Method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory resource names are resolved against.
    #[must_use]
    pub fn resource_root(&self) -> &Utf8Path {
        &self.resource_root
    }

    /// Scope chain, outermost first.
    #[must_use]
    pub fn scopes(&self) -> &[ScopeDeclaration] {
        &self.scopes
    }

    /// Formal parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterSlot] {
        &self.parameters
    }
}

/// One generated invocation: the record name and its bound arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct TestCase {
    display_name: String,
    arguments: BoundArguments,
}

impl TestCase {
    /// Name of the record this case was generated from.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Arguments in parameter order.
    #[must_use]
    pub const fn arguments(&self) -> &BoundArguments {
        &self.arguments
    }

    /// Take the arguments by value.
    #[must_use]
    pub fn into_arguments(self) -> BoundArguments {
        self.arguments
    }
}

/// Case generator parameterised by the macro engine it expands sources with.
///
/// Generation holds no mutable state, so one generator can serve many
/// methods from many threads at once.
#[derive(Clone, Debug, Default)]
pub struct CaseGenerator<E = BuiltinMacros> {
    engine: E,
}

impl CaseGenerator {
    /// Generator using the built-in macro engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: MacroEngine> CaseGenerator<E> {
    /// Generator expanding sources with `engine`.
    #[must_use]
    pub const fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// The macro engine in use.
    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Generate the cases of `method` in record order.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::SourceError`] raised by any stage. Scope
    /// conflicts and duplicate display-name slots are reported before the
    /// resource is touched.
    pub fn generate(&self, method: &TestMethod) -> SourceResult<Vec<TestCase>> {
        let span = debug_span!("generate", method = method.name());
        let _entered = span.enter();

        let parameters = ParameterList::new(method.name(), method.parameters().iter().cloned())?;
        let config = resolve_chain(method.name(), method.scopes())?;
        let resource = Resource::locate(method.resource_root(), config.resource());
        debug!(resource = resource.name(), "reading source");
        let raw = resource.read()?;
        let expanded = macros::expand(&self.engine, raw, &config, &resource)?;
        let set = loader::load(resource.name(), &expanded, config.selection())?;
        let cases = set
            .records()?
            .into_iter()
            .map(|record| {
                bind(method.name(), &parameters, record, config.strict()).map(|arguments| {
                    TestCase {
                        display_name: record.name().to_owned(),
                        arguments,
                    }
                })
            })
            .collect::<SourceResult<Vec<_>>>()?;
        debug!(cases = cases.len(), "generated cases");
        Ok(cases)
    }
}

/// Generate the cases of `method` with the built-in macro engine.
///
/// # Errors
///
/// See [`CaseGenerator::generate`].
pub fn generate(method: &TestMethod) -> SourceResult<Vec<TestCase>> {
    CaseGenerator::new().generate(method)
}
