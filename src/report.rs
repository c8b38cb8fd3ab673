//! Console report: per-repository lines and the end-of-run summary.

use std::time::Duration;

use crate::config::{Config, TransferMode};
use crate::output::{Console, Tone};
use crate::scan::ScanResult;
use crate::stats::RunStats;

/// Skipped directories listed per repository.
pub const SKIPPED_DIRS_SHOWN: usize = 5;
/// Preserved files listed in the summary.
pub const PRESERVED_SHOWN: usize = 10;
/// Rows in the file-type table unless --stats-all.
pub const EXTENSIONS_SHOWN: usize = 15;

const RULE: &str = "──────────────────────────────────────────────────";

/// `1234567` -> `1,234,567`
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Sizes in the file-type table: KB up to 1024 KB, MB above.
pub fn format_table_size(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    if kb > 1024.0 {
        format!("{:.1} MB", kb / 1024.0)
    } else {
        format!("{kb:.1} KB")
    }
}

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

pub fn repo_header(console: &Console, idx: usize, total: usize, name: &str) {
    console.line(format!(
        "[{idx}/{total}] {}",
        console.paint(&format!("{name}/"), Tone::Blue)
    ));
}

/// "→ Copying: N files" plus the largest skipped directories.
pub fn repo_plan(console: &Console, mode: TransferMode, scan: &ScanResult) {
    let label = match mode {
        TransferMode::Copy => "Copying",
        TransferMode::Archive => "Zipping",
    };
    console.line(format!(
        "      → {label}: {} files",
        console.paint(&scan.files.len().to_string(), Tone::Green)
    ));

    let top = scan.top_skipped(SKIPPED_DIRS_SHOWN);
    if !top.is_empty() {
        let parts: Vec<String> = top
            .iter()
            .map(|(name, count)| format!("{name}/ ({})", format_count(*count)))
            .collect();
        console.line(format!(
            "      → Skipping: {}",
            console.paint(&parts.join(", "), Tone::Grey)
        ));
    }
}

pub fn print_summary(console: &Console, cfg: &Config, stats: &RunStats, elapsed: Duration) {
    console.line(RULE);

    let transferred = console.paint(&format_count(stats.files_transferred), Tone::Green);
    let skipped = console.paint(&format_count(stats.files_skipped), Tone::Grey);
    if cfg.dry_run {
        console.line(format!(
            "{} (no files copied)",
            console.paint("DRY RUN COMPLETE", Tone::Yellow)
        ));
        console.line(format!(
            "Would copy: {transferred} files across {} repos",
            stats.repos
        ));
        console.line(format!("Would skip: ~{skipped} dependency/cache files"));
    } else {
        let mode = match cfg.mode {
            TransferMode::Copy => "COPIED",
            TransferMode::Archive => "ZIPPED",
        };
        console.line(console.paint(&format!("MIGRATION COMPLETE ({mode})"), Tone::Green));
        console.line(format!("Copied: {transferred} files across {} repos", stats.repos));
        console.line(format!("Skipped: ~{skipped} dependency/cache files"));
    }

    if stats.bytes > 0 {
        console.line(format!(
            "Total size: {}",
            console.paint(&format!("{:.2} MB", megabytes(stats.bytes)), Tone::Cyan)
        ));
    }
    if !cfg.dry_run {
        console.line(format!(
            "\nDestination: {}",
            console.paint(&cfg.dest_dir.display().to_string(), Tone::Blue)
        ));
    }

    if !stats.preserved.is_empty() {
        console.line(format!(
            "\nPreserved configs: {} files (.env, etc.)",
            console.paint(&stats.preserved.len().to_string(), Tone::Green)
        ));
        for path in stats.preserved.iter().take(PRESERVED_SHOWN) {
            console.line(format!("  • {path}"));
        }
        if stats.preserved.len() > PRESERVED_SHOWN {
            console.line(format!(
                "  ... and {} more",
                stats.preserved.len() - PRESERVED_SHOWN
            ));
        }
    }

    let counters = [
        ("Symlinks skipped", stats.symlinks_skipped, Tone::Grey),
        ("Large files skipped", stats.oversized_skipped, Tone::Grey),
        ("Files overwritten", stats.overwritten, Tone::Yellow),
        ("Files skipped (existing)", stats.skipped_existing, Tone::Grey),
        ("Files failed", stats.failed, Tone::Red),
    ];
    for (label, value, tone) in counters {
        if value > 0 {
            console.line(format!("{label}: {}", console.paint(&format_count(value), tone)));
        }
    }

    console.line(format!(
        "\nCompleted in {}",
        console.paint(&format!("{:.2}s", elapsed.as_secs_f64()), Tone::Cyan)
    ));

    if cfg.show_stats && !stats.extensions.is_empty() {
        print_extension_table(console, stats, cfg.stats_all);
    }
    console.line("");
}

fn print_extension_table(console: &Console, stats: &RunStats, all: bool) {
    console.line("");
    console.line(console.paint(RULE, Tone::White));
    console.line(console.paint("FILE TYPE BREAKDOWN", Tone::Cyan));
    console.line(console.paint(RULE, Tone::White));
    console.line(format!("{:<15} {:>10} {:>12}", "Extension", "Files", "Size"));
    console.line("-".repeat(40));

    let limit = if all { None } else { Some(EXTENSIONS_SHOWN) };
    for (ext, stat) in stats.top_extensions(limit) {
        console.line(format!(
            "{ext:<15} {:>10} {:>12}",
            format_count(stat.count),
            format_table_size(stat.bytes)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn table_sizes_switch_to_mb() {
        assert_eq!(format_table_size(512), "0.5 KB");
        assert_eq!(format_table_size(1024 * 1024), "1024.0 KB");
        assert_eq!(format_table_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn dry_run_summary_is_labelled() {
        let console = Console::capture(false, false);
        let cfg = Config {
            dry_run: true,
            dest_dir: PathBuf::from("/backup"),
            ..Config::default()
        };
        let stats = RunStats {
            repos: 2,
            files_transferred: 1500,
            files_skipped: 42,
            ..RunStats::default()
        };
        print_summary(&console, &cfg, &stats, Duration::from_millis(1500));
        let lines = console.captured();
        assert!(lines.iter().any(|l| l == "DRY RUN COMPLETE (no files copied)"));
        assert!(lines.iter().any(|l| l == "Would copy: 1,500 files across 2 repos"));
        assert!(lines.iter().any(|l| l == "Would skip: ~42 dependency/cache files"));
        assert!(!lines.iter().any(|l| l.contains("Destination")));
        assert!(lines.iter().any(|l| l.contains("Completed in 1.50s")));
    }

    #[test]
    fn preserved_list_is_capped() {
        let console = Console::capture(false, false);
        let cfg = Config::default();
        let stats = RunStats {
            preserved: (0..12).map(|i| format!("repo/{i}/.env")).collect(),
            ..RunStats::default()
        };
        print_summary(&console, &cfg, &stats, Duration::ZERO);
        let lines = console.captured();
        assert_eq!(lines.iter().filter(|l| l.starts_with("  • ")).count(), PRESERVED_SHOWN);
        assert!(lines.iter().any(|l| l == "  ... and 2 more"));
    }

    #[test]
    fn extension_table_respects_cap() {
        let mut stats = RunStats::default();
        for i in 0..20 {
            stats.record_extension(&format!("f.e{i:02}"), 1);
        }
        let capped = Console::capture(false, false);
        print_extension_table(&capped, &stats, false);
        let all = Console::capture(false, false);
        print_extension_table(&all, &stats, true);
        // 6 header lines
        assert_eq!(capped.captured().len(), 6 + EXTENSIONS_SHOWN);
        assert_eq!(all.captured().len(), 6 + 20);
    }
}
