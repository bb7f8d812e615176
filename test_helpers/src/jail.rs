//! Running test bodies inside a `figment::Jail`.
//!
//! The jail changes into a fresh scratch directory for the duration of the
//! closure, which keeps resource files, includes, and dump output of one
//! test away from every other test. Jails are serialised by Figment, so
//! working-directory changes never race.

use anyhow::{Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure returns a
/// [`figment::error::Error`].
///
/// # Examples
///
/// ```
/// use yamaledt_test_helpers::jail::{figment_error, with_jail};
///
/// let text = with_jail(|jail| {
///     jail.create_file("cases.yaml", "t1:\n")?;
///     std::fs::read_to_string("cases.yaml").map_err(figment_error)
/// })?;
/// assert_eq!(text, "t1:\n");
/// # Ok::<_, anyhow::Error>(())
/// ```
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// The jail's scratch directory as a UTF-8 path.
///
/// # Errors
///
/// Returns an error when the directory is not valid UTF-8.
pub fn root(jail: &figment::Jail) -> figment::error::Result<Utf8PathBuf> {
    Utf8Path::from_path(jail.directory())
        .map(Utf8Path::to_path_buf)
        .ok_or_else(|| figment::Error::from("jail directory is not valid UTF-8"))
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a `map_err` adaptor, which hands over the error by value"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
