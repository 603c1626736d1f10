// example_removed_file — файл лога удаляют во время работы, логгер продолжает в консоль

use linelog::{ContentFlags, LogConfig, OutputFlags};

const DEFAULT_LOG_FILE: &str = "logs/removed.log";

fn main() {
    let log_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_owned());
    if let Some(parent) = std::path::Path::new(&log_file).parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let config = LogConfig::new()
        .with_outputs(OutputFlags::FILE | OutputFlags::CONSOLE)
        .with_file(&log_file)
        .with_content(ContentFlags::LINE);
    let logger = match linelog::init(config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[FATAL] {}", e);
            std::process::exit(1);
        }
    };

    linelog::info!(logger, "written to file and console");

    // Имитируем внешнее удаление файла
    if let Err(e) = std::fs::remove_file(&log_file) {
        linelog::error!(logger, "cannot remove {}: {}", log_file, e);
        std::process::exit(2);
    }

    for i in 0..3 {
        linelog::info!(logger, "console only #{}", i);
    }
    linelog::shutdown();
}
