use linelog::{ContentFlags, InitError, LogConfig, OutputFlags};
use std::fs;

#[test]
fn explicit_init_ignores_pending_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("init.log");
    fs::write(&path, "previous run\r\n").unwrap();

    linelog::set_prefix("[PENDING]");
    let config = LogConfig::new()
        .with_outputs(OutputFlags::FILE)
        .with_file(&path)
        .with_content(ContentFlags::NONE);
    let logger = linelog::init(config).unwrap();
    assert!(logger.is_file_open());
    assert_eq!(logger.prefix(), None);

    linelog::gdebug!("debug {}", 1);
    linelog::gfatal!("fatal {}", 2);

    let second = linelog::init(LogConfig::default());
    assert!(matches!(second, Err(InitError::AlreadyInitialized)));

    linelog::shutdown();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "previous run\r\nDEBUG debug 1\r\nFATAL fatal 2\r\n"
    );
}
