// Own test binary: the shutdown flag is process-wide and never resets.
use std::fs;

use gitmig::output::Console;
use gitmig::{shutdown, Config, Engine, GitMigError};
use tempfile::tempdir;

#[test]
fn pending_interrupt_stops_before_copying() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let repo = src.join("r");
    fs::create_dir_all(repo.join(".git")).unwrap();
    fs::write(repo.join("a.txt"), "a").unwrap();
    let dest = td.path().join("dest");

    assert!(!shutdown::request());
    assert!(shutdown::request(), "second request reports the pending one");

    let mut engine = Engine::new(Config::new(&src, &dest)).with_console(Console::capture(false, false));
    let err = engine.run().unwrap_err();
    assert!(matches!(err, GitMigError::Interrupted));
    assert_eq!(err.code(), 130);
    assert!(!dest.join("r").join("a.txt").exists());
}
