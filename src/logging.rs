//! `log` backend for the browser console.
//!
//! Records are prefixed with the crate name and routed to the console method
//! matching their level, so warnings show up as warnings in devtools.

use log::{Level, LevelFilter, Log, Metadata, Record};

const PREFIX: &str = "lesson-progress";

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the console logger. Later calls only adjust the level.
pub fn init(level: LevelFilter) {
    // Bootstrap calls this twice: once before the page config is read, once
    // with its level. Only the first call can install the logger.
    if log::set_logger(&LOGGER).is_err() {
        log::trace!("console logger already installed");
    }
    log::set_max_level(level);
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        emit(record.level(), &format_line(record.level(), &record.args().to_string()));
    }

    fn flush(&self) {}
}

fn format_line(level: Level, message: &str) -> String {
    match level {
        Level::Error | Level::Warn | Level::Info => format!("{PREFIX}: {message}"),
        Level::Debug | Level::Trace => format!("{PREFIX} [{level}]: {message}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&line),
        Level::Warn => web_sys::console::warn_1(&line),
        Level::Info => web_sys::console::info_1(&line),
        Level::Debug | Level::Trace => web_sys::console::log_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}
