use std::{fs, path::Path, sync::OnceLock};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub mod formatter;
pub mod writer;

pub use formatter::*;
pub use writer::*;

use crate::configs::Config;

pub(crate) static LOG_FILE: OnceLock<LineCappedFile> = OnceLock::new();

/// Prints to stdout and mirrors the line into the log file, if one is open.
///
/// Used for output produced before (or outside of) the tracing subscriber,
/// such as the banner and configuration discovery.
#[macro_export]
macro_rules! log_println {
    () => {{
        std::println!();
        $crate::common::logger::mirror_to_file("\n");
    }};
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        std::println!("{}", msg);
        $crate::common::logger::mirror_to_file(&format!("{}\n", msg));
    }};
}

pub fn mirror_to_file(msg: &str) {
    if let Some(mut file) = LOG_FILE.get().cloned() {
        use std::io::Write;
        let _ = file.write_all(strip_ansi_escapes(msg).as_bytes());
    }
}

/// Builds the filter directive from `[logging]`, e.g. `info,tower_http=debug`.
pub fn filter_directive(config: &Config) -> String {
    let logging = config.logging.as_ref();
    let level = logging.and_then(|l| l.level.as_deref()).unwrap_or("info");
    match logging.and_then(|l| l.filters.as_deref()) {
        Some(filters) if !filters.trim().is_empty() => format!("{},{}", level, filters.trim()),
        _ => level.to_string(),
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the config.
pub fn init(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let stdout_layer = fmt::layer()
        .event_format(PartyFormatter::new(true))
        .with_ansi(true);

    let file_layer = config
        .logging
        .as_ref()
        .and_then(|logging| logging.file.as_ref())
        .map(|file_config| {
            if let Some(parent) = Path::new(&file_config.path).parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    eprintln!("Failed to create log directory: {}", e);
                }
            }

            let file = LineCappedFile::new(file_config.path.clone(), file_config.max_lines);
            let _ = LOG_FILE.set(file.clone());
            fmt::layer()
                .with_writer(file)
                .event_format(PartyFormatter::new(false))
                .with_ansi(false)
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::LoggingConfig;

    #[test]
    fn directive_defaults_to_info() {
        assert_eq!(filter_directive(&Config::default()), "info");
    }

    #[test]
    fn directive_appends_filters() {
        let config = Config {
            logging: Some(LoggingConfig {
                level: Some("debug".into()),
                filters: Some("tower_http=warn".into()),
                file: None,
            }),
            ..Config::default()
        };
        assert_eq!(filter_directive(&config), "debug,tower_http=warn");
    }
}
