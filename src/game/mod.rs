//! Module lifecycle, round state and host integration

pub mod bindings;
pub mod config;
pub mod host;
pub mod logger;
pub mod module;
pub mod registry;
pub mod round;
pub mod timer;

pub use bindings::ButtonBindings;
pub use config::{ModuleConfig, RuleVariant, VerbosityLevel, DEFAULT_STRIKE_DELAY};
pub use host::{ModuleEvent, ModuleHost, RecordingHost};
pub use logger::{LogEntry, ModuleLogger, OutputFormat, OutputMode};
pub use module::{ModuleId, Phase, PressOutcome, PuzzleModule};
pub use registry::ModuleRegistry;
pub use round::Round;
pub use timer::StrikeTimer;
