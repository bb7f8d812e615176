//! The macro stage of the pipeline.

use tracing::{debug, trace};

use super::MacroEngine;
use crate::error::{dump_write, macro_syntax};
use crate::resource::{Resource, fs};
use crate::{EffectiveConfig, SourceResult};

/// Expand `raw` according to `config`.
///
/// Returns `raw` untouched when expansion is disabled. Otherwise the engine
/// runs with the configured delimiters and the resource location as position
/// hint, and the result is written to the dump file when one is configured.
///
/// # Errors
///
/// Returns [`crate::SourceError::MacroSyntax`] when the engine rejects the
/// text and [`crate::SourceError::DumpWrite`] when the dump cannot be written.
pub fn expand<E>(
    engine: &E,
    raw: String,
    config: &EffectiveConfig,
    resource: &Resource,
) -> SourceResult<String>
where
    E: MacroEngine + ?Sized,
{
    if !config.macro_enabled() {
        debug!(resource = resource.name(), "macro expansion disabled");
        return Ok(raw);
    }
    let expanded = engine
        .expand(&raw, config.delimiters(), resource.origin())
        .map_err(|err| macro_syntax(resource.name(), err))?;
    trace!(
        resource = resource.name(),
        before = raw.len(),
        after = expanded.len(),
        "expanded macros"
    );
    if let Some(dump) = config.dump_path() {
        let target = resource.dump_base().join(dump);
        fs::write_text(&target, &expanded).map_err(|err| dump_write(&target, err))?;
        debug!(%target, "dumped expanded source");
    }
    Ok(expanded)
}
