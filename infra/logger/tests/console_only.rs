use entitle_logger::{LevelFilter, Logger, parse_level};

#[test]
fn init_console_only_has_no_guard() {
    let level = parse_level("debug").expect("level should parse");
    assert_eq!(level, LevelFilter::DEBUG);

    let logger = Logger::builder()
        .name("entitle-console-only")
        .console(true)
        .level(level)
        .init()
        .expect("logger should initialize");

    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");
}
