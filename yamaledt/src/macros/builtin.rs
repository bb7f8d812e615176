//! Small built-in macro engine.
//!
//! Supported forms, shown with the default `{%` `%}` delimiters:
//!
//! - `{%@define name=body%}` and `{%@define name(a,b)=body%}` record a macro;
//! - `{%name%}` and `{%name/x/y%}` use it, where the first character after
//!   the name separates the arguments;
//! - `{%@include path%}` expands another file in place;
//! - `{%@comment anything%}` expands to nothing.
//!
//! Macros nest. The body of a user macro is expanded before it is looked up,
//! while built-ins receive their text verbatim. Definitions live only for one
//! call to [`MacroEngine::expand`].

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::trace;

use super::{Delimiters, MacroEngine, MacroError};

const DEFAULT_MAX_DEPTH: usize = 32;

/// The default [`MacroEngine`].
///
/// # Examples
///
/// ```
/// use yamaledt::macros::{BuiltinMacros, Delimiters, MacroEngine};
///
/// let engine = BuiltinMacros::new();
/// let text = "{%@define five=5%}i: {%five%}\n";
/// let delimiters = Delimiters { open: "{%", close: "%}" };
/// assert_eq!(engine.expand(text, delimiters, None)?, "i: 5\n");
/// # Ok::<_, yamaledt::macros::MacroError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BuiltinMacros {
    max_depth: usize,
}

impl Default for BuiltinMacros {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BuiltinMacros {
    /// Engine with the default nesting limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit how deeply macro bodies and includes may nest.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl MacroEngine for BuiltinMacros {
    fn expand(
        &self,
        input: &str,
        delimiters: Delimiters<'_>,
        origin: Option<&Utf8Path>,
    ) -> Result<String, MacroError> {
        if delimiters.open.is_empty() || delimiters.close.is_empty() {
            return Err(MacroError::new("macro delimiters must not be empty", 1));
        }
        let mut expansion = Expansion {
            delimiters,
            definitions: HashMap::new(),
            depth: 0,
            max_depth: self.max_depth,
        };
        expansion.expand_text(input, origin, 1)
    }
}

#[derive(Debug)]
struct Definition {
    params: Vec<String>,
    body: String,
}

struct Expansion<'d> {
    delimiters: Delimiters<'d>,
    definitions: HashMap<String, Definition>,
    depth: usize,
    max_depth: usize,
}

impl Expansion<'_> {
    fn expand_text(
        &mut self,
        text: &str,
        origin: Option<&Utf8Path>,
        first_line: usize,
    ) -> Result<String, MacroError> {
        let Delimiters { open, close } = self.delimiters;
        let mut out = String::with_capacity(text.len());
        let mut offset = 0;
        while let Some(found) = text.get(offset..).and_then(|rest| rest.find(open)) {
            let start = offset + found;
            let line = line_at(text, start, first_line);
            out.push_str(text.get(offset..start).unwrap_or_default());
            let body_start = start + open.len();
            let body_len = text
                .get(body_start..)
                .and_then(|rest| find_close(rest, open, close))
                .ok_or_else(|| MacroError::new("macro is not closed", line))?;
            let body = text
                .get(body_start..body_start + body_len)
                .unwrap_or_default();
            let value = self.evaluate(body, origin, line)?;
            out.push_str(&value);
            offset = body_start + body_len + close.len();
        }
        out.push_str(text.get(offset..).unwrap_or_default());
        Ok(out)
    }

    fn evaluate(
        &mut self,
        body: &str,
        origin: Option<&Utf8Path>,
        line: usize,
    ) -> Result<String, MacroError> {
        if let Some(builtin) = body.trim_start().strip_prefix('@') {
            let (name, argument) = split_name(builtin);
            return match name {
                "define" => {
                    self.define(argument, line)?;
                    Ok(String::new())
                }
                "include" => self.include(argument.trim(), origin, line),
                "comment" => Ok(String::new()),
                other => Err(MacroError::new(
                    format!("unknown built-in macro '@{other}'"),
                    line,
                )),
            };
        }
        let expanded = self.expand_text(body, origin, line)?;
        self.invoke(expanded.trim(), origin, line)
    }

    fn define(&mut self, argument: &str, line: usize) -> Result<(), MacroError> {
        let (head, body) = argument
            .split_once('=')
            .ok_or_else(|| MacroError::new("'@define' needs '=' after the macro name", line))?;
        let head = head.trim();
        let (name, params) = match head.split_once('(') {
            Some((name, rest)) => {
                let list = rest.trim_end().strip_suffix(')').ok_or_else(|| {
                    MacroError::new(format!("unclosed parameter list in '{head}'"), line)
                })?;
                let params: Vec<String> = list
                    .split(',')
                    .map(str::trim)
                    .filter(|param| !param.is_empty())
                    .map(str::to_owned)
                    .collect();
                (name.trim(), params)
            }
            None => (head, Vec::new()),
        };
        if name.is_empty() || split_name(name).0 != name {
            return Err(MacroError::new(
                format!("'{name}' is not a valid macro name"),
                line,
            ));
        }
        trace!(name, params = params.len(), "defined macro");
        self.definitions.insert(
            name.to_owned(),
            Definition {
                params,
                body: body.trim().to_owned(),
            },
        );
        Ok(())
    }

    fn invoke(
        &mut self,
        text: &str,
        origin: Option<&Utf8Path>,
        line: usize,
    ) -> Result<String, MacroError> {
        let (name, rest) = split_name(text);
        let rest = rest.trim_start();
        let args: Vec<&str> = match rest.chars().next() {
            Some(separator) => rest
                .get(separator.len_utf8()..)
                .unwrap_or_default()
                .split(separator)
                .collect(),
            None => Vec::new(),
        };
        let definition = self
            .definitions
            .get(name)
            .ok_or_else(|| MacroError::new(format!("macro '{name}' is not defined"), line))?;
        if definition.params.len() != args.len() {
            return Err(MacroError::new(
                format!(
                    "macro '{name}' expects {} argument(s) but got {}",
                    definition.params.len(),
                    args.len()
                ),
                line,
            ));
        }
        let substituted = substitute(&definition.body, &definition.params, &args);
        self.nested(line, |expansion| {
            expansion.expand_text(&substituted, origin, line)
        })
    }

    fn include(
        &mut self,
        target: &str,
        origin: Option<&Utf8Path>,
        line: usize,
    ) -> Result<String, MacroError> {
        if target.is_empty() {
            return Err(MacroError::new("'@include' needs a file name", line));
        }
        let base = origin
            .and_then(Utf8Path::parent)
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let path: Utf8PathBuf = base.join(target);
        let text = std::fs::read_to_string(&path).map_err(|err| {
            MacroError::new(format!("cannot include '{path}': {err}"), line)
        })?;
        trace!(%path, "including file");
        self.nested(line, |expansion| {
            expansion.expand_text(&text, Some(&path), 1)
        })
    }

    fn nested<F>(&mut self, line: usize, f: F) -> Result<String, MacroError>
    where
        F: FnOnce(&mut Self) -> Result<String, MacroError>,
    {
        if self.depth >= self.max_depth {
            return Err(MacroError::new(
                format!("macro nesting exceeds {} levels", self.max_depth),
                line,
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

/// Split a leading macro name off `text`.
fn split_name(text: &str) -> (&str, &str) {
    let end = text
        .char_indices()
        .find(|(_, ch)| !(ch.is_alphanumeric() || matches!(ch, '_' | '.' | ':' | '$')))
        .map_or(text.len(), |(index, _)| index);
    text.split_at(end)
}

/// Length of the body up to the matching `close`, honouring nested `open`s.
fn find_close(text: &str, open: &str, close: &str) -> Option<usize> {
    let mut depth = 1_usize;
    let mut index = 0;
    while let Some(rest) = text.get(index..).filter(|rest| !rest.is_empty()) {
        if rest.starts_with(close) {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
            index += close.len();
        } else if rest.starts_with(open) {
            depth += 1;
            index += open.len();
        } else {
            index += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    None
}

fn line_at(text: &str, offset: usize, first_line: usize) -> usize {
    first_line
        + text
            .get(..offset)
            .map_or(0, |prefix| prefix.matches('\n').count())
}

/// Replace parameter names in `body`, trying longer names first so that a
/// parameter never clobbers another whose name it prefixes.
fn substitute(body: &str, params: &[String], args: &[&str]) -> String {
    if params.is_empty() {
        return body.to_owned();
    }
    let mut ordered: Vec<(&str, &str)> = params
        .iter()
        .map(String::as_str)
        .zip(args.iter().copied())
        .collect();
    ordered.sort_by_key(|(param, _)| std::cmp::Reverse(param.len()));

    let mut out = String::with_capacity(body.len());
    let mut index = 0;
    while let Some(rest) = body.get(index..).filter(|rest| !rest.is_empty()) {
        if let Some((param, arg)) = ordered.iter().find(|(param, _)| rest.starts_with(param)) {
            out.push_str(arg);
            index += param.len();
        } else if let Some(ch) = rest.chars().next() {
            out.push(ch);
            index += ch.len_utf8();
        }
    }
    out
}
