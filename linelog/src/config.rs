use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::path::{Path, PathBuf};

// ===== Флаги вывода: куда пишем =====

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OutputFlags(u8);

impl OutputFlags {
    pub const FILE: OutputFlags = OutputFlags(1 << 0);
    pub const CONSOLE: OutputFlags = OutputFlags(1 << 1);
    pub const ALL: OutputFlags = OutputFlags(Self::FILE.0 | Self::CONSOLE.0);

    pub fn contains(self, other: OutputFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for OutputFlags {
    type Output = OutputFlags;

    fn bitor(self, rhs: OutputFlags) -> OutputFlags {
        OutputFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for OutputFlags {
    fn bitor_assign(&mut self, rhs: OutputFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for OutputFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Self::FILE) {
            names.push("FILE");
        }
        if self.contains(Self::CONSOLE) {
            names.push("CONSOLE");
        }
        write!(f, "OutputFlags({})", names.join(" | "))
    }
}

// ===== Флаги содержимого: какие поля попадают в строку =====

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContentFlags(u8);

impl ContentFlags {
    pub const NONE: ContentFlags = ContentFlags(0);
    pub const DATE: ContentFlags = ContentFlags(1 << 0);
    pub const TIME: ContentFlags = ContentFlags(1 << 1);
    pub const FILE_NAME: ContentFlags = ContentFlags(1 << 2);
    pub const LINE: ContentFlags = ContentFlags(1 << 3);
    pub const FUNCTION: ContentFlags = ContentFlags(1 << 4);
    /// Набор по умолчанию: дата, время, файл и строка.
    pub const DEFAULT: ContentFlags =
        ContentFlags(Self::DATE.0 | Self::TIME.0 | Self::FILE_NAME.0 | Self::LINE.0);

    pub fn contains(self, other: ContentFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ContentFlags {
    type Output = ContentFlags;

    fn bitor(self, rhs: ContentFlags) -> ContentFlags {
        ContentFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ContentFlags {
    fn bitor_assign(&mut self, rhs: ContentFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for ContentFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = [
            (Self::DATE, "DATE"),
            (Self::TIME, "TIME"),
            (Self::FILE_NAME, "FILE_NAME"),
            (Self::LINE, "LINE"),
            (Self::FUNCTION, "FUNCTION"),
        ];
        let names: Vec<&str> = table
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "ContentFlags({})", names.join(" | "))
    }
}

// ===== Прочие настройки =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Цвет только если консоль — терминал.
    #[default]
    Auto,
    Always,
    Never,
}

/// Что делать, если файл лога не открылся при старте.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenFailurePolicy {
    /// Сообщить в stderr и завершить процесс с кодом 1.
    #[default]
    Exit,
    /// Сообщить в stderr и продолжить только с консолью.
    ConsoleOnly,
}

// ===== Конфигурация логгера =====

/// Снимок настроек, который передаётся логгеру один раз при создании.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub outputs: OutputFlags,
    pub content: ContentFlags,
    pub file_path: Option<PathBuf>,
    pub prefix: Option<String>,
    pub color: ColorMode,
    pub on_open_failure: OpenFailurePolicy,
    pub system_log: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            outputs: OutputFlags::CONSOLE,
            content: ContentFlags::DEFAULT,
            file_path: None,
            prefix: None,
            color: ColorMode::Auto,
            on_open_failure: OpenFailurePolicy::Exit,
            system_log: None,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outputs(mut self, outputs: OutputFlags) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_content(mut self, content: ContentFlags) -> Self {
        self.content = content;
        self
    }

    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_owned());
        self
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn with_open_failure(mut self, policy: OpenFailurePolicy) -> Self {
        self.on_open_failure = policy;
        self
    }

    /// Дублировать собственные ошибки логгера в системный журнал.
    pub fn with_system_log(mut self, app_name: &str) -> Self {
        self.system_log = Some(app_name.to_owned());
        self
    }

    /// Путь к файлу, если файловый вывод включён и путь задан.
    pub(crate) fn active_file_path(&self) -> Option<&Path> {
        if self.outputs.contains(OutputFlags::FILE) {
            self.file_path.as_deref()
        } else {
            None
        }
    }
}
