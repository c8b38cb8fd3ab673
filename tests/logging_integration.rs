use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use gitmig::discover::find_repos;
use gitmig::fs_ops::{copy_repo, ExistingPolicy};
use gitmig::output::Console;
use gitmig::{CandidateFile, RunStats};
use tempfile::tempdir;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tsfmt, registry};

/// A simple writer that appends written bytes into an in-memory Vec<u8>.
#[derive(Clone)]
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.0.lock().unwrap();
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a scoped subscriber at `level` and return what it logged.
fn capture_logs(level: &str, f: impl FnOnce()) -> String {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufferWriter(buf.clone())
    };
    let layer = tsfmt::layer()
        .with_writer(make_writer)
        .with_target(false)
        .with_ansi(false)
        .compact();
    let subscriber = registry().with(EnvFilter::new(level)).with(layer);

    // Scoped so other tests keep their own (or no) global subscriber.
    let dispatch = tracing::Dispatch::new(subscriber);
    tracing::dispatcher::with_default(&dispatch, f);

    let guard = buf.lock().unwrap();
    String::from_utf8_lossy(&guard[..]).to_string()
}

#[test]
fn vanished_file_is_logged_and_counted() {
    let td = tempdir().unwrap();
    let src = td.path().join("repo");
    std::fs::create_dir_all(&src).unwrap();
    std::fs::write(src.join("kept.txt"), "ok").unwrap();
    let files = vec![
        CandidateFile {
            rel_path: PathBuf::from("gone.txt"),
            size: 3,
        },
        CandidateFile {
            rel_path: PathBuf::from("kept.txt"),
            size: 2,
        },
    ];
    let mut stats = RunStats::default();
    let console = Console::capture(false, false);

    let logs = capture_logs("warn", || {
        let bytes = copy_repo(
            &src,
            &td.path().join("out"),
            &files,
            ExistingPolicy::default(),
            &mut stats,
            &console,
        )
        .unwrap();
        assert_eq!(bytes, 2);
    });

    assert_eq!(stats.failed, 1);
    assert_eq!(stats.files_transferred, 1);
    assert!(
        logs.contains("Could not copy file") && logs.contains("gone.txt"),
        "logged output did not mention the failure; contents={}",
        logs
    );
}

#[test]
fn unknown_allow_list_entry_warns() {
    let td = tempdir().unwrap();
    std::fs::create_dir_all(td.path().join("api").join(".git")).unwrap();
    let only = vec!["ghost".to_string()];

    let logs = capture_logs("warn", || {
        assert!(find_repos(td.path(), Some(&only)).is_empty());
    });
    assert!(logs.contains("requested repository not found"), "contents={}", logs);

    let silent = capture_logs("error", || {
        find_repos(td.path(), Some(&only));
    });
    assert!(silent.is_empty(), "warn must be filtered at error level; contents={}", silent);
}

#[test]
fn unsafe_archive_entry_is_logged() {
    use gitmig::fs_ops::archive_repo;

    let td = tempdir().unwrap();
    let repo = td.path().join("r");
    std::fs::create_dir_all(&repo).unwrap();
    std::fs::write(repo.join("ok.txt"), "ok").unwrap();
    let files = vec![
        CandidateFile {
            rel_path: PathBuf::from("../escape.txt"),
            size: 1,
        },
        CandidateFile {
            rel_path: PathBuf::from("ok.txt"),
            size: 2,
        },
    ];
    let mut stats = RunStats::default();
    let console = Console::capture(false, false);

    let logs = capture_logs("error", || {
        archive_repo(
            &repo,
            td.path(),
            "r",
            &files,
            ExistingPolicy::default(),
            &mut stats,
            &console,
        )
        .unwrap();
    });

    assert!(
        logs.contains("Skipping unsafe path") && logs.contains("escape.txt"),
        "contents={}",
        logs
    );
    assert_eq!(stats.files_transferred, 1);
}
