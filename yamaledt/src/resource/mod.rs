//! Locating and reading the data resource of a test method.

pub(crate) mod fs;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::SourceResult;
use crate::error::unreadable;

/// Label used in diagnostics for inline documents.
pub const INLINE_LABEL: &str = "<inline>";

/// A resolved data resource.
///
/// A resource identifier containing a line break is an inline document;
/// anything else names a file relative to the test's resource root.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use yamaledt::Resource;
///
/// let root = Utf8Path::new("tests/resources");
/// let file = Resource::locate(root, "Shared.yaml");
/// assert_eq!(file.name(), "Shared.yaml");
/// assert_eq!(file.origin(), Some(Utf8Path::new("tests/resources/Shared.yaml")));
///
/// let inline = Resource::locate(root, "t1:\nt2:\n");
/// assert!(inline.origin().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resource {
    /// Document supplied verbatim in the directive.
    Inline(String),
    /// Document stored in a file.
    File {
        /// Name as declared or defaulted.
        name: String,
        /// Name joined onto the resource root.
        path: Utf8PathBuf,
    },
}

impl Resource {
    /// Resolve `resource` against `root`.
    #[must_use]
    pub fn locate(root: &Utf8Path, resource: &str) -> Self {
        if resource.contains('\n') {
            Self::Inline(resource.to_owned())
        } else {
            Self::File {
                name: resource.to_owned(),
                path: root.join(resource),
            }
        }
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Inline(_) => INLINE_LABEL,
            Self::File { name, .. } => name,
        }
    }

    /// File location handed to the macro engine as its position hint.
    #[must_use]
    pub fn origin(&self) -> Option<&Utf8Path> {
        match self {
            Self::Inline(_) => None,
            Self::File { path, .. } => Some(path),
        }
    }

    /// Directory that relative dump paths resolve against: the resource's own
    /// directory, or the working directory for inline documents.
    #[must_use]
    pub fn dump_base(&self) -> &Utf8Path {
        self.origin()
            .map_or_else(|| Utf8Path::new("."), fs::parent_or_dot)
    }

    /// Read the resource text.
    ///
    /// Inline documents are returned verbatim. Files are decoded as UTF-8 and
    /// each line is terminated with `\n`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SourceError::ResourceUnreadable`] when the file cannot
    /// be opened or is not valid UTF-8.
    pub fn read(&self) -> SourceResult<String> {
        match self {
            Self::Inline(text) => Ok(text.clone()),
            Self::File { name, path } => {
                debug!(%path, "reading resource");
                fs::read_lines(path).map_err(|err| unreadable(name, err))
            }
        }
    }
}

#[cfg(test)]
mod tests;
