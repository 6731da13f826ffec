//! Global logging module for the G2 errors generator
//!
//! Provides thread-safe global logging with per-thread backend context so the
//! parallel backend runs stay distinguishable in the output.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static TARGET_CONTEXT: RefCell<Option<String>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    for code in codes::all_codes() {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for code: {}", code));
        }
    }

    let event = LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    );
    logging_service.log_event(event);

    Ok(())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// TARGET CONTEXT MANAGEMENT
// ============================================================================

/// Execute function with the backend name attached to every event it logs
pub fn with_target_context<F, R>(target: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = TARGET_CONTEXT.with(|ctx| ctx.replace(Some(target.to_string())));
    let result = f();
    TARGET_CONTEXT.with(|ctx| ctx.replace(previous));
    result
}

/// Get current target context (used by macros)
pub fn get_current_target_context() -> Option<String> {
    TARGET_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn decorate(mut event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if let Some(target) = get_current_target_context() {
        event = event.with_context("target", &target);
    }

    event
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let event = decorate(LogEvent::error(code, message), context);

    match try_get_global_logger() {
        Some(logger) => logger.log_event(event),
        None => eprintln!("{}", event.format()),
    }
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let event = decorate(LogEvent::success(code, message), context);

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Log a prepared info/warning/debug event (used by the level macros)
pub fn log_with_level(event: LogEvent, context: Vec<(&str, &str)>) {
    let event = decorate(event, context);

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}
