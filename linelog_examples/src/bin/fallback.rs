// example_fallback — файл лога не открылся, продолжаем только с консолью

use linelog::{LogConfig, OpenFailurePolicy, OutputFlags};

const DEFAULT_LOG_FILE: &str = "/root/forbidden/fallback.log";

fn main() {
    let log_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_owned());

    let config = LogConfig::new()
        .with_outputs(OutputFlags::FILE | OutputFlags::CONSOLE)
        .with_file(&log_file)
        .with_open_failure(OpenFailurePolicy::ConsoleOnly);
    let logger = match linelog::init(config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[FATAL] {}", e);
            std::process::exit(1);
        }
    };

    linelog::warn!(logger, "file output disabled: {}", !logger.is_file_open());
    linelog::info!(logger, "Application finished successfully");
}
