use std::fs;

use gitmig::config::{prepare_destination, validate_paths};
use gitmig::{Config, GitMigError};
use tempfile::tempdir;

#[test]
fn missing_source_is_rejected() {
    let td = tempdir().unwrap();
    let err = validate_paths(&td.path().join("nope"), &td.path().join("dest")).unwrap_err();
    assert!(matches!(err, GitMigError::SourceNotDirectory(_)));
    assert_eq!(err.code(), 1);
}

#[test]
fn file_as_destination_is_rejected() {
    let td = tempdir().unwrap();
    let dest = td.path().join("dest.txt");
    fs::write(&dest, "x").unwrap();
    let err = validate_paths(td.path(), &dest).unwrap_err();
    assert!(matches!(err, GitMigError::DestinationNotDirectory(_)));
}

#[test]
fn destination_inside_source_is_rejected() {
    let td = tempdir().unwrap();
    let src = td.path().join("projects");
    fs::create_dir_all(&src).unwrap();

    let err = validate_paths(&src, &src.join("backup").join("2024")).unwrap_err();
    assert!(matches!(err, GitMigError::DestinationInsideSource { .. }));

    let same = validate_paths(&src, &src).unwrap_err();
    assert!(matches!(same, GitMigError::DestinationInsideSource { .. }));
}

#[test]
fn dotted_destination_inside_source_is_caught() {
    let td = tempdir().unwrap();
    let src = td.path().join("projects");
    fs::create_dir_all(src.join("sub")).unwrap();
    let sneaky = src.join("sub").join("..").join("backup");
    assert!(matches!(
        validate_paths(&src, &sneaky),
        Err(GitMigError::DestinationInsideSource { .. })
    ));
}

#[cfg(unix)]
#[test]
fn symlinked_destination_into_source_is_caught() {
    let td = tempdir().unwrap();
    let src = td.path().join("projects");
    fs::create_dir_all(src.join("inner")).unwrap();
    let link = td.path().join("elsewhere");
    std::os::unix::fs::symlink(src.join("inner"), &link).unwrap();

    assert!(matches!(
        validate_paths(&src, &link.join("backup")),
        Err(GitMigError::DestinationInsideSource { .. })
    ));
}

#[test]
fn validate_makes_paths_absolute_without_creating_dest() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    fs::create_dir_all(&src).unwrap();
    let dest = td.path().join("a").join("b");

    let mut cfg = Config::new(&src, &dest);
    cfg.validate().unwrap();
    assert!(cfg.source_dir.is_absolute());
    assert!(cfg.dest_dir.is_absolute());
    assert!(!dest.exists());
}

#[test]
fn prepare_destination_honours_dry_run() {
    let td = tempdir().unwrap();
    let dest = td.path().join("x").join("y");

    prepare_destination(&dest, true).unwrap();
    assert!(!dest.exists());

    prepare_destination(&dest, false).unwrap();
    assert!(dest.is_dir());
}
