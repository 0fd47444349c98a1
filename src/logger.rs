//! Leveled diagnostic sink.
//!
//! The supervision pipe swallows Slack's own output, so the wrapper re-emits
//! every line it sees through this logger, one call per child output line.
//! Emission is a threshold check and a single unbuffered write to stderr.

use std::io::Write;

use chrono::Local;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Message severity, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Notset = 0,
    Debug = 10,
    Info = 20,
    Warning = 30,
    Error = 40,
    Critical = 50,
}

impl Level {
    fn name(self) -> &'static str {
        match self {
            Level::Critical => "CRITICAL",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Notset => "NOTSET",
        }
    }
}

/// Leveled stderr logger.
///
/// Constructed once in `main` and shared behind an `Arc`; the threshold is
/// settled before sharing, so no interior mutability is needed. The
/// threshold is a raw `i32` rather than a `Level`: repeated `--verbose`
/// flags subtract 10 per occurrence with no floor.
#[derive(Debug)]
pub struct Logger {
    name: String,
    threshold: i32,
}

impl Logger {
    /// New logger with the default WARNING threshold. `name` is the process
    /// name stamped on every line.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threshold: Level::Warning as i32,
        }
    }

    /// Current emission threshold.
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Lower the threshold by 10 per verbosity step. The caller owns sane
    /// bounds.
    pub fn lower_threshold(&mut self, steps: u8) {
        self.threshold -= 10 * i32::from(steps);
    }

    fn enabled(&self, level: Level) -> bool {
        level as i32 >= self.threshold
    }

    fn format_line(&self, level: Level, msg: &str) -> String {
        let ts = Local::now().format(TIMESTAMP_FORMAT);
        format!("{ts} {}: [{}] {msg}", level.name(), self.name)
    }

    /// Emit `msg` to stderr iff `level` clears the threshold.
    pub fn log(&self, level: Level, msg: &str) {
        if !self.enabled(level) {
            return;
        }
        let line = self.format_line(level, msg);
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "{line}");
    }

    pub fn critical(&self, msg: &str) {
        self.log(Level::Critical, msg);
    }

    pub fn error(&self, msg: &str) {
        self.log(Level::Error, msg);
    }

    pub fn warning(&self, msg: &str) {
        self.log(Level::Warning, msg);
    }

    pub fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }

    pub fn debug(&self, msg: &str) {
        self.log(Level::Debug, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_warning() {
        let logger = Logger::new("test");
        assert_eq!(logger.threshold(), Level::Warning as i32);
        assert!(logger.enabled(Level::Warning));
        assert!(logger.enabled(Level::Error));
        assert!(!logger.enabled(Level::Info));
    }

    #[test]
    fn each_verbosity_step_lowers_threshold_by_ten() {
        let mut logger = Logger::new("test");
        logger.lower_threshold(1);
        assert_eq!(logger.threshold(), Level::Info as i32);
        assert!(logger.enabled(Level::Info));
        assert!(!logger.enabled(Level::Debug));

        logger.lower_threshold(1);
        assert!(logger.enabled(Level::Debug));
    }

    #[test]
    fn threshold_has_no_floor() {
        let mut logger = Logger::new("test");
        logger.lower_threshold(5);
        assert_eq!(logger.threshold(), -20);
        assert!(logger.enabled(Level::Notset));
    }

    #[test]
    fn level_ordering_matches_values() {
        assert!(Level::Critical > Level::Error);
        assert!(Level::Error > Level::Warning);
        assert!(Level::Warning > Level::Info);
        assert!(Level::Info > Level::Debug);
        assert!(Level::Debug > Level::Notset);
    }

    #[test]
    fn line_format_is_timestamp_level_name_message() {
        let logger = Logger::new("slackfix");
        let line = logger.format_line(Level::Error, "it broke");

        // 2023-04-01 12:34:56 ERROR: [slackfix] it broke
        let (ts, rest) = line.split_at(19);
        assert_eq!(rest, " ERROR: [slackfix] it broke");
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
        assert_eq!(&ts[13..14], ":");
        assert!(ts[..4].chars().all(|c| c.is_ascii_digit()));
    }
}
