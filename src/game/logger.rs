//! Per-module logger
//!
//! Every line is tagged with the module's id (`[Insane Talk #3] ...`). Output
//! can go to stdout, to an in-memory buffer for inspection, or both.

use crate::game::VerbosityLevel;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

/// Guard type that provides read-only access to log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    /// Iterate over captured entries
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    /// Number of captured entries
    pub fn len(&self) -> usize {
        self.guard.len()
    }

    /// Check if nothing was captured
    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    module: u32,
    level: VerbosityLevel,
    message: &'a str,
}

/// Logger owned by one puzzle module
pub struct ModuleLogger {
    module_id: u32,
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl ModuleLogger {
    /// Create a logger at the default verbosity
    pub fn new(module_id: u32) -> Self {
        ModuleLogger::with_verbosity(module_id, VerbosityLevel::default())
    }

    /// Create a logger with a specific verbosity level
    pub fn with_verbosity(module_id: u32, verbosity: VerbosityLevel) -> Self {
        ModuleLogger {
            module_id,
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Get the id used in the line prefix
    pub fn module_id(&self) -> u32 {
        self.module_id
    }

    /// Set output mode
    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    /// Get current output mode
    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only, suppressing stdout
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    /// Write to stdout only, stopping capture
    pub fn disable_capture(&mut self) {
        self.output_mode = OutputMode::Stdout;
    }

    /// Check if entries are being captured
    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    /// Set output format
    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    /// Get current output format
    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Get current verbosity level
    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    /// Set verbosity level
    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Access captured entries without copying them
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    /// Drop all captured entries
    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    /// Print buffered entries the verbosity allows, then clear the buffer
    pub fn flush_buffer(&mut self) {
        for entry in self.log_buffer.borrow().iter() {
            if entry.level <= self.verbosity {
                self.write_line(entry.level, &entry.message);
            }
        }
        self.clear_logs();
    }

    /// Render a message as a single output line in the current format
    pub fn format_line(&self, level: VerbosityLevel, message: &str) -> Result<String> {
        match self.output_format {
            OutputFormat::Text => Ok(format!("[Insane Talk #{}] {}", self.module_id, message)),
            OutputFormat::Json => {
                let line = JsonLine {
                    module: self.module_id,
                    level,
                    message,
                };
                Ok(serde_json::to_string(&line)?)
            }
        }
    }

    fn write_line(&self, level: VerbosityLevel, message: &str) {
        match self.format_line(level, message) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("[Insane Talk #{}] log encoding failed: {e}", self.module_id),
        }
    }

    fn log(&self, level: VerbosityLevel, message: &str) {
        let should_capture = self.is_capturing();
        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both);

        if level > self.verbosity && !should_capture {
            return;
        }

        if should_capture {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
            });
        }

        if should_output && level <= self.verbosity {
            self.write_line(level, message);
        }
    }

    /// Log at Minimal level
    #[inline]
    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, message);
    }

    /// Log at Normal level
    #[inline]
    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, message);
    }

    /// Log at Verbose level
    #[inline]
    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, message);
    }
}

impl std::fmt::Debug for ModuleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleLogger")
            .field("module_id", &self.module_id)
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}
