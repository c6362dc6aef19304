//! Logging for shader_kit
//!
//! Compiler and linker diagnostics, shader loading progress and fatal errors
//! all flow through a single swappable [`Logger`]. The default logger prints
//! colored lines to stdout; tests and host applications install their own via
//! [`Engine::set_logger`](crate::shaderkit::Engine::set_logger).

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// # Example
///
/// ```no_run
/// use shader_kit::shaderkit::log::{Logger, LogEntry};
///
/// struct ConsoleBuffer {
///     lines: std::sync::Mutex<Vec<String>>,
/// }
///
/// impl Logger for ConsoleBuffer {
///     fn log(&self, entry: &LogEntry) {
///         self.lines.lock().unwrap().push(entry.message.clone());
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "shaderkit::ShaderRegistry")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose tracing (redundant-call elimination, etc.)
    Trace,

    /// Developer messages (compile progress, program info logs)
    Debug,

    /// Regular messages (shader paths, shader info logs)
    Info,

    /// Soft failures (missing file, compile or link failure)
    Warn,

    /// Fatal failures, reported with file:line
    Error,
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp,
                severity_str,
                source,
                entry.message,
                file,
                line
            );
        } else {
            println!(
                "[{}] [{}] [{}] {}",
                timestamp,
                severity_str,
                source,
                entry.message
            );
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::shaderkit::Engine::log(
            $crate::shaderkit::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
///
/// # Example
///
/// ```no_run
/// shader_kit::engine_debug!("shaderkit::ShaderRegistry", "Compiling GLSL vertex shader '{}'...", "interaction");
/// ```
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::shaderkit::Engine::log(
            $crate::shaderkit::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::shaderkit::Engine::log(
            $crate::shaderkit::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::shaderkit::Engine::log(
            $crate::shaderkit::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::shaderkit::Engine::log_detailed(
            $crate::shaderkit::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR message and build an `Error::BackendError` from it
///
/// # Example
///
/// ```no_run
/// use shader_kit::engine_err;
///
/// let err = engine_err!("shaderkit::glow", "glCreateProgram failed: {}", "out of memory");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::shaderkit::Error::BackendError(message)
    }};
}

/// Log an ERROR message and return `Err(Error::BackendError)` from the current function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

/// Log a typed error and return it from the current function
///
/// # Example
///
/// ```no_run
/// use shader_kit::engine_bail_with;
/// use shader_kit::shaderkit::{Error, Result};
///
/// fn reserve(len: usize, capacity: usize) -> Result<()> {
///     if len >= capacity {
///         engine_bail_with!("shaderkit::ShaderRegistry",
///             Error::CapacityExceeded { resource: "shaders".to_string(), capacity });
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! engine_bail_with {
    ($source:expr, $error:expr) => {{
        let error = $error;
        $crate::engine_error!($source, "{}", error);
        return Err(error);
    }};
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
