//! Styled status lines. Results and progress go to stdout; warnings and
//! errors go to stderr so `--json` output on stdout stays parseable.

use console::{style, StyledObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    fn marker(self) -> StyledObject<&'static str> {
        match self {
            Level::Success => style("✓").green(),
            Level::Info => style("ℹ").blue(),
            Level::Warning => style("⚠").yellow(),
            Level::Error => style("✗").red(),
        }
        .bold()
    }

    fn on_stderr(self) -> bool {
        matches!(self, Level::Warning | Level::Error)
    }
}

fn status_line(level: Level, msg: &str) -> String {
    format!("{} {msg}", level.marker())
}

fn emit(level: Level, msg: &str) {
    let line = status_line(level, msg);
    if level.on_stderr() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn success(msg: &str) {
    emit(Level::Success, msg);
}

pub fn info(msg: &str) {
    emit(Level::Info, msg);
}

pub fn warning(msg: &str) {
    emit(Level::Warning, msg);
}

pub fn error(msg: &str) {
    emit(Level::Error, msg);
}

fn step_line(index: usize, total: usize, name: &str) -> String {
    format!("{} {}", style(format!("[{index}/{total}]")).dim(), style(name).bold())
}

/// Pipeline step heading, e.g. `[2/5] sitemap`.
pub fn step(index: usize, total: usize, name: &str) {
    println!("{}", step_line(index, total, name));
}
