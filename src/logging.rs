//! Console Logger
//!
//! Routes `log` records (from this crate and bom-core) to the browser
//! console, one console method per level.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record.level(), record.target(), &record.args().to_string());
        let line = wasm_bindgen::JsValue::from(line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Messages already tagged `[AREA]` keep their tag; others get the module
fn format_record(level: Level, target: &str, message: &str) -> String {
    if message.starts_with('[') {
        format!("{:<5} {}", level, message)
    } else {
        format!("{:<5} [{}] {}", level, target, message)
    }
}

/// Install once at startup; later calls only adjust the level
pub fn init(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record() {
        assert_eq!(
            format_record(Level::Warn, "bom_core::session", "dropping stale response"),
            "WARN  [bom_core::session] dropping stale response"
        );
        assert_eq!(format_record(Level::Info, "x", "[CATALOG] 12 parts"), "INFO  [CATALOG] 12 parts");
    }
}
