// example_threads — явная инициализация и запись из нескольких потоков

use linelog::{ContentFlags, LogConfig, OutputFlags};
use std::thread;
use std::time::Duration;

const APP_NAME: &str = "example_threads";
const APP_VERSION: &str = "1.0.0";
const WORKERS: u64 = 4;

fn main() {
    // 1. Инициализация
    let _ = std::fs::create_dir_all("logs");
    let config = LogConfig::new()
        .with_prefix(APP_NAME)
        .with_outputs(OutputFlags::FILE | OutputFlags::CONSOLE)
        .with_file("logs/threads.log")
        .with_content(ContentFlags::DEFAULT | ContentFlags::FUNCTION)
        .with_system_log(APP_NAME);
    let logger = match linelog::init(config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[FATAL] {}", e);
            std::process::exit(1);
        }
    };

    linelog::info!(logger, "Starting {} v{}", APP_NAME, APP_VERSION);

    // 2. Основной код — многопоточность
    let handles: Vec<_> = (0..WORKERS)
        .map(|i| {
            thread::spawn(move || {
                linelog::gdebug!("Worker thread {} started", i);
                thread::sleep(Duration::from_millis(20 * (i + 1)));

                if i == 1 {
                    linelog::gwarn!("Worker {} detected high latency", i);
                }

                linelog::gdebug!("Worker {} finished", i);
            })
        })
        .collect();

    for h in handles {
        let _ = h.join();
    }

    linelog::error!(logger, "Finalizing with one last error log");

    // 3. Финальная часть
    linelog::shutdown();
}
