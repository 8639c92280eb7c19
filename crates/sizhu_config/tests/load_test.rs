//! File-based configuration loading.

use std::io::Write;
use std::path::PathBuf;

use sizhu_config::{ConfigError, EngineConfig};

/// A full file loads, with the relative data path resolved next to it.
#[test]
fn load_full_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sizhu.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(
        f,
        "[data]\nuse_bundled = false\nprecise_path = \"terms.csv\"\n\n\
         [calculation]\ntrace = true\n\n\
         [validation]\nmin_year = 1900\nmax_year = 2050"
    )
    .unwrap();
    drop(f);

    let c = EngineConfig::load(&path).unwrap();
    assert!(!c.data.use_bundled);
    assert_eq!(c.data.precise_path, Some(dir.path().join("terms.csv")));
    assert_eq!(c.data.coarse_path, None::<PathBuf>);
    assert!(c.calculation.trace);
    assert_eq!(c.validation.min_year, 1900);
    assert_eq!(c.validation.max_year, 2050);
}

/// A missing file names its path in the error.
#[test]
fn load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    match EngineConfig::load(&path) {
        Err(ConfigError::Io { path: p, .. }) => assert!(p.ends_with("absent.toml")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

/// Malformed TOML is a parse error, not a panic.
#[test]
fn load_malformed_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "[validation\nmin_year = ").unwrap();
    assert!(matches!(
        EngineConfig::load(f.path()),
        Err(ConfigError::Parse(_))
    ));
}
