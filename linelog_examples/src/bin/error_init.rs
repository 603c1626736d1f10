// example_error_init — файл лога не открывается, процесс завершается с кодом 1

use linelog::{LogConfig, OutputFlags};

const DEFAULT_LOG_FILE: &str = "/root/forbidden/error.log"; // Недоступная директория

fn main() {
    let log_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_owned());

    let config = LogConfig::new()
        .with_outputs(OutputFlags::FILE | OutputFlags::CONSOLE)
        .with_file(&log_file);

    // При ошибке открытия init печатает путь и рабочий каталог и завершает процесс
    let logger = match linelog::init(config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[FATAL] {}", e);
            std::process::exit(1);
        }
    };

    linelog::debug!(logger, "This will not be logged");
}
