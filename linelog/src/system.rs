// ===== Системный журнал для собственных ошибок логгера =====
//
// На Linux — syslog (LOG_USER). На остальных платформах журнал не подключается,
// диагностика остаётся только в stderr.

#[cfg(target_os = "linux")]
mod imp {
    use std::sync::{Mutex, PoisonError};
    use syslog::{Facility, Formatter3164, LoggerBackend};

    pub(crate) struct SystemLog {
        inner: Mutex<syslog::Logger<LoggerBackend, Formatter3164>>,
    }

    impl SystemLog {
        pub(crate) fn connect(app_name: &str) -> Option<Self> {
            let formatter = Formatter3164 {
                facility: Facility::LOG_USER,
                hostname: None,
                process: app_name.to_owned(),
                pid: std::process::id(),
            };
            // Нет сокета syslog — работаем без него
            syslog::unix(formatter).ok().map(|logger| SystemLog {
                inner: Mutex::new(logger),
            })
        }

        pub(crate) fn error(&self, msg: &str) {
            let mut logger = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = logger.err(msg);
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod imp {
    pub(crate) struct SystemLog;

    impl SystemLog {
        pub(crate) fn connect(_app_name: &str) -> Option<Self> {
            None
        }

        pub(crate) fn error(&self, _msg: &str) {}
    }
}

pub(crate) use imp::SystemLog;
