use serde::Serialize;
use std::{cmp::Ordering, rc::Rc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
                LogLevel::Error => 3,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

pub trait LogSink {
    fn write(&self, level: LogLevel, line: &str);
}

#[derive(Serialize)]
struct LogRecord<'a> {
    ts: u64,
    level: &'static str,
    event: &'a str,
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

/// Structured, level-filtered event log. One JSON object per line.
#[derive(Clone)]
pub struct EventLog {
    min_level: LogLevel,
    sink: Rc<dyn LogSink>,
    clock: fn() -> u64,
}

impl EventLog {
    pub fn new(min_level: LogLevel, sink: Rc<dyn LogSink>, clock: fn() -> u64) -> Self {
        Self {
            min_level,
            sink,
            clock,
        }
    }

    pub fn event(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        if level < self.min_level {
            return;
        }

        let fields = match fields {
            serde_json::Value::Object(extra) => extra,
            serde_json::Value::Null => serde_json::Map::new(),
            other => {
                let mut map = serde_json::Map::new();
                map.insert("detail".to_string(), other);
                map
            }
        };

        let record = LogRecord {
            ts: (self.clock)(),
            level: level.as_str(),
            event,
            fields,
        };

        if let Ok(line) = serde_json::to_string(&record) {
            self.sink.write(level, &line);
        }
    }

    pub fn debug(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Debug, event, fields);
    }

    pub fn info(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Info, event, fields);
    }

    pub fn warn(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Warn, event, fields);
    }

    pub fn error(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Error, event, fields);
    }
}
