//! # Loader Tests

use anyhow::Result;
use lextract::{
    load_text_from_source,
    loader::{DocumentConverter, NoConverter},
    LoadError, LoaderOptions,
};
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// A converter that upper-cases `.doc` files and counts its calls.
#[derive(Default)]
struct ShoutingConverter {
    calls: Cell<usize>,
}

impl DocumentConverter for ShoutingConverter {
    fn name(&self) -> &str {
        "shout"
    }

    fn supports(&self, extension: &str) -> bool {
        extension == "doc"
    }

    fn convert(&self, path: &Path) -> Result<String, LoadError> {
        self.calls.set(self.calls.get() + 1);
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(raw.to_uppercase())
    }
}

fn options(root: &Path, md_out_dir: Option<&str>) -> LoaderOptions {
    LoaderOptions {
        in_dir: root.join("in"),
        md_out_dir: md_out_dir.map(|d| root.join(d)),
    }
}

#[test]
fn test_missing_source_is_not_found() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("in"))?;

    for name in ["missing.txt", "missing.pdf", ""] {
        let err = load_text_from_source(name, &options(dir.path(), None), &NoConverter)
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)), "{name}: {err:?}");
        assert!(err.to_string().starts_with("Source file not found:"));
    }
    Ok(())
}

#[test]
fn test_missing_input_directory_is_not_found() {
    let err = load_text_from_source(
        "romeo.txt",
        &LoaderOptions {
            in_dir: "definitely/not/here".into(),
            md_out_dir: None,
        },
        &NoConverter,
    )
    .unwrap_err();

    assert!(matches!(err, LoadError::NotFound(ref p) if p.ends_with("romeo.txt")));
}

#[test]
fn test_plain_text_is_returned_byte_for_byte() -> Result<()> {
    let dir = tempdir()?;
    let in_dir = dir.path().join("in");
    fs::create_dir_all(&in_dir)?;
    let content = "ROMEO. But soft!\r\n\tWhat light — through yonder window?\n\n";
    fs::write(in_dir.join("romeo.txt"), content)?;

    let text = load_text_from_source("romeo.txt", &options(dir.path(), Some("out")), &NoConverter)?;

    assert_eq!(text.as_bytes(), content.as_bytes());
    assert!(!dir.path().join("out").exists());
    Ok(())
}

#[test]
fn test_invalid_utf8_is_an_io_error() -> Result<()> {
    let dir = tempdir()?;
    let in_dir = dir.path().join("in");
    fs::create_dir_all(&in_dir)?;
    fs::write(in_dir.join("latin1.txt"), [0x52, 0xe9, 0x73, 0x75, 0x6d, 0xe9])?;

    let err =
        load_text_from_source("latin1.txt", &options(dir.path(), None), &NoConverter).unwrap_err();

    assert!(matches!(err, LoadError::Io { .. }), "{err:?}");
    Ok(())
}

#[test]
fn test_convertible_file_is_converted_once_and_cached() -> Result<()> {
    let dir = tempdir()?;
    let in_dir = dir.path().join("in");
    fs::create_dir_all(&in_dir)?;
    fs::write(in_dir.join("Notes.DOC"), "juliet is the sun")?;
    let converter = ShoutingConverter::default();

    let text = load_text_from_source(
        "Notes.DOC",
        &options(dir.path(), Some("out/cache")),
        &converter,
    )?;

    assert_eq!(text, "JULIET IS THE SUN");
    assert_eq!(converter.calls.get(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("out/cache/Notes.md"))?,
        "JULIET IS THE SUN"
    );
    Ok(())
}

#[test]
fn test_conversion_without_cache_dir_creates_no_file() -> Result<()> {
    let dir = tempdir()?;
    let in_dir = dir.path().join("in");
    fs::create_dir_all(&in_dir)?;
    fs::write(in_dir.join("notes.doc"), "quiet")?;
    let converter = ShoutingConverter::default();

    for _ in 0..2 {
        let text = load_text_from_source("notes.doc", &options(dir.path(), None), &converter)?;
        assert_eq!(text, "QUIET");
    }

    assert_eq!(converter.calls.get(), 2);
    assert_eq!(fs::read_dir(&in_dir)?.count(), 1);
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn test_conversion_errors_propagate_unchanged() -> Result<()> {
    let dir = tempdir()?;
    let in_dir = dir.path().join("in");
    fs::create_dir_all(&in_dir)?;
    fs::write(in_dir.join("x.doc"), "")?;

    struct Failing;
    impl DocumentConverter for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        fn supports(&self, _extension: &str) -> bool {
            true
        }
        fn convert(&self, path: &Path) -> Result<String, LoadError> {
            Err(LoadError::Conversion {
                converter: "failing".to_string(),
                path: path.to_path_buf(),
                message: "corrupt xref table".to_string(),
            })
        }
    }

    let err = load_text_from_source("x.doc", &options(dir.path(), Some("out")), &Failing)
        .unwrap_err();

    assert!(err.to_string().contains("corrupt xref table"));
    assert!(!dir.path().join("out").exists());
    Ok(())
}
