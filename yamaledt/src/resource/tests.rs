//! Resource resolution and reading.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    clippy::panic_in_result_fn,
    reason = "tests panic to surface configuration mistakes"
)]

use anyhow::{Result, anyhow, ensure};
use camino::Utf8Path;
use rstest::rstest;
use test_helpers::jail::{figment_error, with_jail};

use super::{INLINE_LABEL, Resource, fs};
use crate::ResultIntoFigment;

#[rstest]
#[case("data.yaml", false)]
#[case("t1:\nt2:\n", true)]
#[case("a single line: with colon", false)]
fn line_break_marks_inline_documents(#[case] resource: &str, #[case] inline: bool) {
    let located = Resource::locate(Utf8Path::new("root"), resource);
    assert_eq!(matches!(located, Resource::Inline(_)), inline);
}

#[rstest]
fn inline_documents_use_the_working_directory() {
    let inline = Resource::locate(Utf8Path::new("root"), "t1:\n");
    assert_eq!(inline.name(), INLINE_LABEL);
    assert_eq!(inline.dump_base(), Utf8Path::new("."));
}

#[rstest]
#[case("root", "data.yaml", "root")]
#[case("root", "nested/data.yaml", "root/nested")]
#[case("", "data.yaml", ".")]
fn file_dumps_go_beside_the_resource(
    #[case] root: &str,
    #[case] name: &str,
    #[case] expected: &str,
) {
    let located = Resource::locate(Utf8Path::new(root), name);
    assert_eq!(located.dump_base(), Utf8Path::new(expected));
}

#[rstest]
fn files_are_read_with_normalised_line_endings() -> Result<()> {
    with_jail(|jail| {
        jail.create_file("crlf.yaml", "t1:\r\n  a: 1\r\nt2:\r\n  a: 2")?;
        let text = Resource::locate(Utf8Path::new("."), "crlf.yaml")
            .read()
            .to_figment()?;
        assert_eq!(text, "t1:\n  a: 1\nt2:\n  a: 2\n");
        Ok(())
    })
}

#[rstest]
fn inline_text_is_returned_verbatim() -> Result<()> {
    let text = "t1:\r\n  a: 1";
    let read = Resource::Inline(text.to_owned())
        .read()
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(read == text, "inline text must not be normalised");
    Ok(())
}

#[rstest]
fn missing_files_are_unreadable() -> Result<()> {
    with_jail(|_| {
        let err = Resource::locate(Utf8Path::new("."), "absent.yaml")
            .read()
            .expect_err("missing file should fail");
        assert!(matches!(
            err.as_ref(),
            crate::SourceError::ResourceUnreadable { resource, .. } if resource == "absent.yaml"
        ));
        Ok(())
    })
}

#[rstest]
fn write_text_replaces_existing_files() -> Result<()> {
    with_jail(|jail| {
        jail.create_file("dump.yaml", "old")?;
        fs::write_text(Utf8Path::new("dump.yaml"), "new")
            .map_err(figment_error)?;
        let written = std::fs::read_to_string(jail.directory().join("dump.yaml"))
            .map_err(figment_error)?;
        assert_eq!(written, "new");
        Ok(())
    })
}
