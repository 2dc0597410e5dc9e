use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

pub struct PantryLogger {
    level: Level,
}

pub static PANTRY_LOGGER: PantryLogger = PantryLogger { level: Level::Info };

#[cfg(not(target_family = "wasm"))]
fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(target_family = "wasm")]
fn timestamp() -> String {
    // chrono has no clock on wasm32-unknown-unknown
    let ms = js_sys::Date::now() as i64;
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
}

pub fn format_line(stamp: &str, level: Level, target: &str, message: &str) -> String {
    format!("[{}] {} {} - {}", stamp, level, target, message)
}

impl log::Log for PantryLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            &timestamp(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );
        #[cfg(target_family = "wasm")]
        match record.level() {
            Level::Error => gloo_console::error!(line),
            Level::Warn => gloo_console::warn!(line),
            _ => gloo_console::log!(line),
        }
        #[cfg(not(target_family = "wasm"))]
        println!("{}", line);
    }

    fn flush(&self) {}
}

/// Install the logger. Fails if another logger is already installed.
pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&PANTRY_LOGGER)?;
    log::set_max_level(LevelFilter::Info);
    Ok(())
}
