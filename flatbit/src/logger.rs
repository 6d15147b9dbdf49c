use chrono::Local;
use std::fmt;

// Log lines go to stderr, stdout belongs to the console prompts.
fn log(level: &str, args: fmt::Arguments) {
    let now = Local::now();
    eprintln!("[{}] {} {}", now.format("%Y-%m-%d %H:%M:%S"), level, args);
}

pub fn debug_enabled() -> bool {
    std::env::var_os("FLATBIT_DEBUG").is_some()
}

pub fn debug(args: fmt::Arguments) {
    if debug_enabled() {
        log("DEBUG", args);
    }
}

pub fn info(args: fmt::Arguments) {
    log("INFO", args);
}

pub fn warn(args: fmt::Arguments) {
    log("WARN", args);
}

pub fn error(args: fmt::Arguments) {
    log("ERROR", args);
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::logger::debug(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::logger::info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::logger::warn(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::logger::error(format_args!($($arg)*))
    };
}
