use chrono::{DateTime, Local};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::{ColorMode, ContentFlags, LogConfig, OpenFailurePolicy, OutputFlags};
use crate::system::SystemLog;
use crate::{InitError, Level, Site};

const NOTICE_COLOR: &str = "\x1b[0;40;31m";
const COLOR_RESET: &str = "\x1b[0m";

type SharedWriter = Mutex<Box<dyn Write + Send>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ===== Файловый приёмник =====

struct FileSink {
    // путь, по которому открывали, — по нему проверяем, не удалили ли файл
    path: PathBuf,
    file: File,
}

impl FileSink {
    fn open(path: &Path) -> Result<Self, InitError> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(|file| FileSink {
                path: path.to_path_buf(),
                file,
            })
            .map_err(|source| InitError::OpenLogFile {
                path: path.to_path_buf(),
                cwd: current_dir_display(),
                source,
            })
    }
}

fn current_dir_display() -> String {
    std::env::current_dir()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|_| "<unknown>".to_owned())
}

// ===== Канал диагностики (stderr + системный журнал) =====

struct Diagnostics {
    writer: SharedWriter,
    color: bool,
    system_log: Option<SystemLog>,
}

impl Diagnostics {
    fn new(writer: Box<dyn Write + Send>, color: bool, app_name: Option<&str>) -> Self {
        Diagnostics {
            writer: Mutex::new(writer),
            color,
            system_log: app_name.and_then(SystemLog::connect),
        }
    }

    fn stderr(app_name: Option<&str>) -> Self {
        Self::new(Box::new(io::stderr()), io::stderr().is_terminal(), app_name)
    }

    fn report(&self, msg: &str) {
        {
            let mut writer = lock(&self.writer);
            let _ = if self.color {
                writeln!(writer, "{NOTICE_COLOR}{msg}{COLOR_RESET}")
            } else {
                writeln!(writer, "{msg}")
            };
            let _ = writer.flush();
        }
        if let Some(ref system_log) = self.system_log {
            system_log.error(msg);
        }
    }
}

// ===== Формирование строки =====

/// Собирает одну строку лога вместе с завершающим `\r\n`.
pub fn format_line(
    prefix: Option<&str>,
    content: ContentFlags,
    label: &str,
    site: &Site,
    now: &DateTime<Local>,
    message: fmt::Arguments<'_>,
) -> String {
    use std::fmt::Write as _;

    let mut line = String::with_capacity(128);
    if let Some(prefix) = prefix {
        let _ = write!(line, "{} ", prefix);
    }
    if content.contains(ContentFlags::DATE) {
        let _ = write!(line, "[{}] ", now.format("%Y-%m-%d"));
    }
    if content.contains(ContentFlags::TIME) {
        let _ = write!(line, "[{}] ", now.format("%H:%M:%S"));
    }
    let _ = write!(line, "{} ", label);
    match (
        content.contains(ContentFlags::FILE_NAME),
        content.contains(ContentFlags::LINE),
    ) {
        (true, true) => {
            let _ = write!(line, "[{}:{}] ", site.file, site.line);
        }
        (true, false) => {
            let _ = write!(line, "[{}] ", site.file);
        }
        (false, true) => {
            let _ = write!(line, "[:{}] ", site.line);
        }
        (false, false) => {}
    }
    if content.contains(ContentFlags::FUNCTION) {
        let _ = write!(line, "[{}] ", site.function);
    }
    let _ = line.write_fmt(message);
    line.push_str("\r\n");
    line
}

// ===== Основной логгер =====

/// Логгер с консольным и файловым выводом.
///
/// Настройки фиксируются при создании. Каждый приёмник защищён своим мьютексом,
/// поэтому строки из разных потоков не перемешиваются.
pub struct Logger {
    prefix: Option<String>,
    content: ContentFlags,
    outputs: OutputFlags,
    console_color: bool,
    // мьютекс состояния файла: проверка, запись и закрытие идут под ним целиком
    file: Mutex<Option<FileSink>>,
    console: SharedWriter,
    diagnostics: Diagnostics,
}

impl Logger {
    /// Логгер со stdout в качестве консоли и stderr для диагностики.
    ///
    /// При политике `Exit` ошибка открытия файла возвращается как
    /// `InitError::OpenLogFile`; при `ConsoleOnly` она выводится в stderr,
    /// а логгер продолжает работу без файла.
    pub fn new(config: LogConfig) -> Result<Self, InitError> {
        let console_color = match config.color {
            ColorMode::Auto => io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        };
        let diagnostics = Diagnostics::stderr(config.system_log.as_deref());
        Self::build(config, Box::new(io::stdout()), console_color, diagnostics)
    }

    /// Логгер, пишущий консольный вывод и диагностику в переданные writer'ы.
    /// В режиме `ColorMode::Auto` цвет выключен.
    pub fn with_writers<C, D>(
        config: LogConfig,
        console: C,
        diagnostics: D,
    ) -> Result<Self, InitError>
    where
        C: Write + Send + 'static,
        D: Write + Send + 'static,
    {
        let console_color = config.color == ColorMode::Always;
        let diagnostics =
            Diagnostics::new(Box::new(diagnostics), false, config.system_log.as_deref());
        Self::build(config, Box::new(console), console_color, diagnostics)
    }

    /// Как `new`, но при ошибке открытия файла печатает путь и рабочий
    /// каталог в stderr и завершает процесс с кодом 1.
    pub fn start(config: LogConfig) -> Self {
        let app_name = config.system_log.clone();
        match Self::new(config) {
            Ok(logger) => logger,
            Err(e) => {
                Diagnostics::stderr(app_name.as_deref()).report(&e.to_string());
                process::exit(1);
            }
        }
    }

    fn build(
        config: LogConfig,
        console: Box<dyn Write + Send>,
        console_color: bool,
        diagnostics: Diagnostics,
    ) -> Result<Self, InitError> {
        let file = match config.active_file_path() {
            Some(path) => match FileSink::open(path) {
                Ok(sink) => Some(sink),
                Err(e) => match config.on_open_failure {
                    OpenFailurePolicy::Exit => return Err(e),
                    OpenFailurePolicy::ConsoleOnly => {
                        diagnostics.report(&e.to_string());
                        None
                    }
                },
            },
            None => None,
        };

        Ok(Logger {
            prefix: config.prefix,
            content: config.content,
            outputs: config.outputs,
            console_color,
            file: Mutex::new(file),
            console: Mutex::new(console),
            diagnostics,
        })
    }

    pub fn is_file_open(&self) -> bool {
        lock(&self.file).is_some()
    }

    pub fn outputs(&self) -> OutputFlags {
        self.outputs
    }

    pub fn content(&self) -> ContentFlags {
        self.content
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Закрывает файл лога. Повторный вызов ничего не делает.
    pub fn close(&self) {
        let sink = lock(&self.file).take();
        drop(sink);
    }

    pub fn log(&self, level: Level, site: Site, args: fmt::Arguments<'_>) {
        let now = Local::now();
        if self.outputs.contains(OutputFlags::FILE) {
            self.write_file(level, &site, &now, args);
        }
        if self.outputs.contains(OutputFlags::CONSOLE) {
            self.write_console(level, &site, &now, args);
        }
    }

    pub fn log_debug(&self, site: Site, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, site, args);
    }

    pub fn log_info(&self, site: Site, args: fmt::Arguments<'_>) {
        self.log(Level::Info, site, args);
    }

    pub fn log_warn(&self, site: Site, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, site, args);
    }

    pub fn log_error(&self, site: Site, args: fmt::Arguments<'_>) {
        self.log(Level::Error, site, args);
    }

    pub fn log_fatal(&self, site: Site, args: fmt::Arguments<'_>) {
        self.log(Level::Fatal, site, args);
    }

    fn render(
        &self,
        level: Level,
        colored: bool,
        site: &Site,
        now: &DateTime<Local>,
        args: fmt::Arguments<'_>,
    ) -> String {
        format_line(
            self.prefix.as_deref(),
            self.content,
            level.label(colored),
            site,
            now,
            args,
        )
    }

    fn write_file(
        &self,
        level: Level,
        site: &Site,
        now: &DateTime<Local>,
        args: fmt::Arguments<'_>,
    ) {
        // Строку собираем до захвата мьютекса: Display аргумента может сам писать в лог.
        // В файл — всегда без цвета.
        let line = self.render(level, false, site, now, args);
        let mut state = lock(&self.file);
        let Some(sink) = state.as_mut() else {
            return;
        };

        if sink.path.exists() {
            let _ = sink.file.write_all(line.as_bytes());
            let _ = sink.file.flush();
            return;
        }

        // Файл удалили снаружи: закрываем и больше не открываем
        let removed = state.take();
        drop(state);
        if let Some(sink) = removed {
            self.diagnostics.report(&format!(
                "log file has been removed: {}",
                sink.path.display()
            ));
        }
    }

    fn write_console(
        &self,
        level: Level,
        site: &Site,
        now: &DateTime<Local>,
        args: fmt::Arguments<'_>,
    ) {
        let line = self.render(level, self.console_color, site, now, args);
        let mut console = lock(&self.console);
        let _ = console.write_all(line.as_bytes());
        let _ = console.flush();
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}
