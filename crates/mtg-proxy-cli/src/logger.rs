use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Metadata, Record};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub message: String,
}

/// Timestamped stderr logger that also remembers recent entries.
#[derive(Clone)]
pub struct ConsoleLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    max_entries: usize,
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter, max_entries: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            max_entries,
            level,
        }
    }

    /// Level from `-v` / `-q` counts. Warnings are shown by default.
    pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
        if quiet {
            return LevelFilter::Error;
        }
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of remembered entries at `level` or more severe.
    pub fn count_at_least(&self, level: Level) -> usize {
        self.entries()
            .iter()
            .filter(|entry| entry.level <= level)
            .count()
    }

    fn remember(&self, entry: LogEntry) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push(entry);

        // Keep only the most recent entries
        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            entries.drain(0..excess);
        }
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry {
            timestamp: Local::now(),
            level: record.level(),
            message: format!("{}", record.args()),
        };

        eprintln!(
            "{} {:<5} {}",
            entry.timestamp.format("%H:%M:%S%.3f"),
            entry.level,
            entry.message
        );

        self.remember(entry);
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    fn record(logger: &ConsoleLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn test_history_is_bounded() {
        let logger = ConsoleLogger::new(LevelFilter::Info, 2);
        record(&logger, Level::Info, "one");
        record(&logger, Level::Warn, "two");
        record(&logger, Level::Info, "three");

        let messages: Vec<_> = logger.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_filtered_entries_not_kept() {
        let logger = ConsoleLogger::new(LevelFilter::Warn, 10);
        record(&logger, Level::Info, "hidden");
        record(&logger, Level::Warn, "shown");

        assert_eq!(logger.entries().len(), 1);
        assert_eq!(logger.count_at_least(Level::Warn), 1);
    }

    #[test]
    fn test_level_for_flags() {
        assert_eq!(ConsoleLogger::level_for(0, false), LevelFilter::Warn);
        assert_eq!(ConsoleLogger::level_for(1, false), LevelFilter::Info);
        assert_eq!(ConsoleLogger::level_for(3, false), LevelFilter::Debug);
        assert_eq!(ConsoleLogger::level_for(2, true), LevelFilter::Error);
    }
}
