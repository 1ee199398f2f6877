//! Injected logging capability.
//!
//! Components that report progress take a [`SharedLogger`] instead of reaching
//! for a process-wide singleton. The default [`TracingLogger`] forwards every
//! record to the `tracing` macros, so filtering and formatting are whatever the
//! installed subscriber decides. [`MemoryLogger`] keeps records in memory, which
//! gives each test its own isolated log.
//!
//! # Example
//!
//! ```
//! use buildify::{LogLevel, Logger, MemoryLogger, Scene};
//! use std::rc::Rc;
//!
//! let logger = Rc::new(MemoryLogger::new());
//! let _scene = Scene::with_logger("Main", logger.clone());
//!
//! assert!(logger.contains(LogLevel::Debug, "Scene created: Main"));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Severity of a log record, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sink for log records.
pub trait Logger {
    fn log(&self, level: LogLevel, message: &str);

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Logger handle shared between a component and whoever injected it.
pub type SharedLogger = Rc<dyn Logger>;

/// Forwards records to `tracing`.
///
/// `tracing` has no critical level, so [`LogLevel::Critical`] is emitted as an
/// error with a `critical = true` field.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Trace => tracing::trace!("{}", message),
            LogLevel::Debug => tracing::debug!("{}", message),
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warning => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
            LogLevel::Critical => tracing::error!(critical = true, "{}", message),
        }
    }
}

/// The logger components use when none is injected.
pub fn default_logger() -> SharedLogger {
    Rc::new(TracingLogger)
}

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: RefCell<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record logged so far, oldest first.
    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.records.borrow().clone()
    }

    /// True if a record with exactly this level and message was logged.
    pub fn contains(&self, level: LogLevel, message: &str) -> bool {
        self.records
            .borrow()
            .iter()
            .any(|(l, m)| *l == level && m == message)
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.records.borrow_mut().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Critical);
        assert_eq!(LogLevel::Warning.to_string(), "WARN");
    }

    #[test]
    fn memory_logger_keeps_records_in_order() {
        let logger = MemoryLogger::new();
        logger.info("first");
        logger.warn("second");

        assert_eq!(
            logger.records(),
            vec![
                (LogLevel::Info, "first".to_string()),
                (LogLevel::Warning, "second".to_string()),
            ]
        );
        assert!(logger.contains(LogLevel::Warning, "second"));
        assert!(!logger.contains(LogLevel::Info, "second"));

        logger.clear();
        assert!(logger.records().is_empty());
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn tracing_logger_maps_levels_onto_tracing() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let logger = TracingLogger;
            logger.log(LogLevel::Trace, "trace message");
            logger.info("info message");
            logger.warn("warning message");
            logger.log(LogLevel::Critical, "critical message");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("TRACE") && lines[0].contains("trace message"));
        assert!(lines[1].contains("INFO") && lines[1].contains("info message"));
        assert!(lines[2].contains("WARN") && lines[2].contains("warning message"));
        assert!(lines[3].contains("ERROR"));
        assert!(lines[3].contains("critical=true"));
        assert!(lines[3].contains("critical message"));
    }
}
