// example_simple — настройка через глобальные сеттеры и логи в консоль и файл

use linelog::{ContentFlags, OutputFlags};

const LOG_FILE: &str = "logs/simple.log";

fn main() {
    // 1. Настройки — до первого вызова логгера
    let _ = std::fs::create_dir_all("logs");
    linelog::set_prefix("[GIN]");
    linelog::set_content_flags(
        ContentFlags::DATE | ContentFlags::TIME | ContentFlags::FILE_NAME | ContentFlags::LINE,
    );
    linelog::set_output_flags(OutputFlags::FILE | OutputFlags::CONSOLE);
    linelog::set_output_file(LOG_FILE);

    // 2. Основной код: логгер создаётся на первом вызове
    let i = 124;
    linelog::gdebug!("hello{}", i);
    linelog::ginfo!("hellossd{},{}", i + 32, "fdaasf");
    linelog::gwarn!("fdsafsa{}", 323);
    linelog::gerror!("mytest:{}", i * i);
    linelog::gfatal!("safa:{}", i + 23 + i);

    // 3. Финальная часть
    linelog::shutdown();
}
