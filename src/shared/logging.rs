use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const LOG_FILE_PREFIX: &str = "reportform";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub event: String,
    pub message: String,
    pub cause: Option<String>,
}

impl LogRecord {
    pub fn new(level: LogLevel, event: &str, message: &str) -> Self {
        Self {
            level,
            event: event.to_string(),
            message: message.to_string(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: &dyn std::error::Error) -> Self {
        self.cause = Some(super::errors::error_chain(cause));
        self
    }
}

pub trait LogSink: Send + Sync {
    fn record(&self, record: LogRecord);

    fn info(&self, event: &str, message: &str) {
        self.record(LogRecord::new(LogLevel::Info, event, message));
    }

    fn warn(&self, event: &str, message: &str) {
        self.record(LogRecord::new(LogLevel::Warn, event, message));
    }

    fn error(&self, event: &str, message: &str, cause: &dyn std::error::Error) {
        self.record(LogRecord::new(LogLevel::Error, event, message).with_cause(cause));
    }
}

#[derive(Debug, Clone)]
pub struct JsonLineLog {
    dir: PathBuf,
}

impl JsonLineLog {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!(
            "{LOG_FILE_PREFIX}_{}.log",
            date.format("%Y%m%d")
        ))
    }

    pub fn current_path(&self) -> PathBuf {
        self.path_for(Local::now().date_naive())
    }
}

impl LogSink for JsonLineLog {
    fn record(&self, record: LogRecord) {
        let now = Local::now();
        let payload = serde_json::json!({
            "timestamp": now.to_rfc3339(),
            "level": record.level,
            "event": record.event,
            "message": record.message,
            "cause": record.cause,
        });

        let Ok(line) = serde_json::to_string(&payload) else {
            return;
        };

        if fs::create_dir_all(&self.dir).is_err() {
            return;
        }
        let path = self.path_for(now.date_naive());
        let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
            return;
        };
        let _ = writeln!(file, "{line}");
    }
}

#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn has_event(&self, event: &str) -> bool {
        self.records().iter().any(|record| record.event == event)
    }
}

impl LogSink for MemoryLog {
    fn record(&self, record: LogRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }
}
