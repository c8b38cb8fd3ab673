use owo_colors::OwoColorize;
use std::cell::RefCell;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Palette used for run output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Grey,
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
    White,
}

/// Run-scoped console: applies quiet/verbose policy to every line the engine
/// prints. Errors do not go through here; they are tracing events on stderr.
///
/// In capture mode lines are kept in memory instead of being written, which
/// lets tests assert on the report without touching stdout.
#[derive(Debug)]
pub struct Console {
    quiet: bool,
    verbose: bool,
    color: bool,
    captured: Option<RefCell<Vec<String>>>,
}

impl Console {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            color: is_tty(),
            captured: None,
        }
    }

    /// Console that records lines (uncolored) rather than printing them.
    pub fn capture(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            color: false,
            captured: Some(RefCell::new(Vec::new())),
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Regular output; suppressed in quiet mode.
    pub fn line(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            self.emit(msg.as_ref());
        }
    }

    /// Per-file chatter; only shown with --verbose.
    pub fn detail(&self, msg: impl AsRef<str>) {
        if self.verbose && !self.quiet {
            self.emit(msg.as_ref());
        }
    }

    /// Color `text` when writing to a terminal.
    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Grey => text.bright_black().to_string(),
            Tone::Red => text.bright_red().to_string(),
            Tone::Green => text.bright_green().to_string(),
            Tone::Yellow => text.bright_yellow().to_string(),
            Tone::Blue => text.bright_blue().to_string(),
            Tone::Cyan => text.bright_cyan().to_string(),
            Tone::White => text.bright_white().to_string(),
        }
    }

    /// Lines recorded so far (empty unless built with [`Console::capture`]).
    pub fn captured(&self) -> Vec<String> {
        self.captured
            .as_ref()
            .map(|c| c.borrow().clone())
            .unwrap_or_default()
    }

    fn emit(&self, text: &str) {
        match &self.captured {
            Some(buf) => buf.borrow_mut().push(text.to_string()),
            None => println!("{text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_console_prints_nothing() {
        let c = Console::capture(true, true);
        c.line("hello");
        c.detail("file.txt");
        assert!(c.captured().is_empty());
    }

    #[test]
    fn details_need_verbose() {
        let c = Console::capture(false, false);
        c.line("summary");
        c.detail("file.txt");
        assert_eq!(c.captured(), vec!["summary".to_string()]);

        let v = Console::capture(false, true);
        v.detail("file.txt");
        assert_eq!(v.captured(), vec!["file.txt".to_string()]);
    }

    #[test]
    fn capture_mode_never_colors() {
        let c = Console::capture(false, false);
        assert_eq!(c.paint("x", Tone::Green), "x");
    }
}
