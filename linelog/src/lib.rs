use once_cell::sync::{Lazy, OnceCell};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

mod config;
mod logger;
mod system;

pub use config::{ColorMode, ContentFlags, LogConfig, OpenFailurePolicy, OutputFlags};
pub use logger::{format_line, Logger};

// ===== Уровни логгирования =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    // цветные варианты — только для терминала, в файл не попадают
    fn colored_str(&self) -> &'static str {
        match self {
            Level::Debug => "\x1b[0m\x1b[40;36mDEBUG\x1b[0m",
            Level::Info => "\x1b[0m\x1b[40;32mINFO\x1b[0m",
            Level::Warn => "\x1b[0m\x1b[40;33mWARN\x1b[0m",
            Level::Error => "\x1b[0m\x1b[40;31mERROR\x1b[0m",
            Level::Fatal => "\x1b[0m\x1b[40;35mFATAL\x1b[0m",
        }
    }

    pub fn label(&self, colored: bool) -> &'static str {
        if colored {
            self.colored_str()
        } else {
            self.as_str()
        }
    }
}

// ===== Место вызова =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl Site {
    pub fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Site {
            file,
            line,
            function,
        }
    }
}

// ===== Ошибки =====

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("open log file failed: {}, log execute at: {cwd} ({source})", .path.display())]
    OpenLogFile {
        path: PathBuf,
        cwd: String,
        #[source]
        source: std::io::Error,
    },
    #[error("global logger is already initialized")]
    AlreadyInitialized,
}

// ===== Макросы =====

#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = name.strip_suffix("::f").unwrap_or(name);
        name.trim_end_matches("::{{closure}}")
    }};
}

#[macro_export]
macro_rules! site {
    () => {
        $crate::Site::new(file!(), line!(), $crate::__function_name!())
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)*) => {{
        $logger.log_debug($crate::site!(), ::std::format_args!($($arg)*));
    }};
}
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)*) => {{
        $logger.log_info($crate::site!(), ::std::format_args!($($arg)*));
    }};
}
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)*) => {{
        $logger.log_warn($crate::site!(), ::std::format_args!($($arg)*));
    }};
}
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)*) => {{
        $logger.log_error($crate::site!(), ::std::format_args!($($arg)*));
    }};
}
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)*) => {{
        $logger.log_fatal($crate::site!(), ::std::format_args!($($arg)*));
    }};
}

// ===== Глобальные макросы =====

#[macro_export]
macro_rules! gdebug {
    ($($arg:tt)*) => {{
        $crate::logger().log_debug($crate::site!(), ::std::format_args!($($arg)*));
    }};
}
#[macro_export]
macro_rules! ginfo {
    ($($arg:tt)*) => {{
        $crate::logger().log_info($crate::site!(), ::std::format_args!($($arg)*));
    }};
}
#[macro_export]
macro_rules! gwarn {
    ($($arg:tt)*) => {{
        $crate::logger().log_warn($crate::site!(), ::std::format_args!($($arg)*));
    }};
}
#[macro_export]
macro_rules! gerror {
    ($($arg:tt)*) => {{
        $crate::logger().log_error($crate::site!(), ::std::format_args!($($arg)*));
    }};
}
#[macro_export]
macro_rules! gfatal {
    ($($arg:tt)*) => {{
        $crate::logger().log_fatal($crate::site!(), ::std::format_args!($($arg)*));
    }};
}

// ===== Глобальный логгер =====

// Настройки, которые подхватит глобальный логгер при создании.
static PENDING_CONFIG: Lazy<Mutex<LogConfig>> = Lazy::new(|| Mutex::new(LogConfig::default()));

static GLOBAL_LOGGER: OnceCell<Logger> = OnceCell::new();

fn pending() -> MutexGuard<'static, LogConfig> {
    PENDING_CONFIG.lock().unwrap_or_else(PoisonError::into_inner)
}

// true — значение будет учтено; false — логгер уже создан и его не увидит
fn update_pending(apply: impl FnOnce(&mut LogConfig)) -> bool {
    apply(&mut pending());
    !is_initialized()
}

pub fn set_prefix(prefix: &str) -> bool {
    update_pending(|config| config.prefix = Some(prefix.to_owned()))
}

pub fn set_content_flags(content: ContentFlags) -> bool {
    update_pending(|config| config.content = content)
}

pub fn set_output_flags(outputs: OutputFlags) -> bool {
    update_pending(|config| config.outputs = outputs)
}

pub fn set_output_file<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref().to_path_buf();
    update_pending(|config| config.file_path = Some(path))
}

/// Явно создаёт глобальный логгер из `config`.
///
/// Если файл лога не открылся и политика `Exit`, процесс завершается с кодом 1.
pub fn init(config: LogConfig) -> Result<&'static Logger, InitError> {
    let mut created = false;
    let logger = GLOBAL_LOGGER.get_or_init(|| {
        created = true;
        Logger::start(config)
    });
    if created {
        Ok(logger)
    } else {
        Err(InitError::AlreadyInitialized)
    }
}

/// Глобальный логгер; при первом обращении создаётся из накопленных настроек.
pub fn logger() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(|| Logger::start(pending().clone()))
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Закрывает файл глобального логгера. Статики не дропаются при выходе,
/// поэтому вызывать перед завершением процесса.
pub fn shutdown() {
    if let Some(logger) = GLOBAL_LOGGER.get() {
        logger.close();
    }
}
