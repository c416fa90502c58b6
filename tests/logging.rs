extern crate chrono;
#[macro_use]
extern crate slog;
extern crate tempfile;
extern crate treedep;

use std::env;
use std::fs::{self, File};
use std::io::Read;

use chrono::Local;
use treedep::logging::{self, Config, Level, LoggerBuilder, Stream};

#[test]
fn test_file_logger() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        level: Level::Debug,
        verbosity: Level::Off,
        logdir: dir.path().to_str().unwrap().to_string(),
        filename: "treedep.log".to_string(),
        filemode: 'w',
        ..Config::default()
    };
    {
        let logger = logging::create_logger(config).unwrap();
        info!(logger, "extracted"; "dependencies" => 6);
        debug!(logger, "details");
        trace!(logger, "hidden");
    }
    let mut content = String::new();
    File::open(dir.path().join("treedep.log"))
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert!(content.contains("extracted"), "{}", content);
    assert!(content.contains("dependencies: 6"), "{}", content);
    assert!(content.contains("details"));
    assert!(!content.contains("hidden"));
}

#[test]
fn test_invalid_options() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        level: Level::Info,
        logdir: dir.path().to_str().unwrap().to_string(),
        filemode: 'x',
        ..Config::default()
    };
    match logging::create_logger(config) {
        Err(logging::Error::InvalidOption(_)) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }

    let config = Config {
        level: Level::Info,
        logdir: dir.path().join("missing").to_str().unwrap().to_string(),
        ..Config::default()
    };
    match logging::create_logger(config) {
        Err(logging::Error::Io(_)) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_numbered_filepath() {
    let dir = tempfile::tempdir().unwrap();
    File::create(dir.path().join("run-0.log")).unwrap();
    let path = logging::resolve_filepath(
        dir.path(),
        "run.log",
        None,
        None,
        Local::now(),
        false,
        true,
    ).unwrap();
    assert_eq!(path, dir.path().join("run-1.log"));

    let nested = dir.path().join("logs");
    let path = logging::resolve_filepath(
        &nested,
        "run.log",
        Some("pre-"),
        Some("-post"),
        Local::now(),
        true,
        false,
    ).unwrap();
    assert!(fs::metadata(&nested).unwrap().is_dir());
    assert_eq!(path, nested.join("pre-run-post.log"));
}

#[test]
fn test_null_builder() {
    let logger = LoggerBuilder::new(Stream::Null).build(o!()).unwrap();
    info!(logger, "discarded");
    let logger = LoggerBuilder::new(Stream::StdErr)
        .level(Level::Off)
        .build(o!("component" => "test"))
        .unwrap();
    info!(logger, "discarded");
}

#[test]
fn test_config_from_env() {
    env::set_var(logging::ENV_LOG_LEVEL, "DEBUG");
    env::remove_var(logging::ENV_LOG_FILE_LEVEL);
    env::set_var(logging::ENV_LOG_DIR, "/tmp");
    let config = Config::from_env().unwrap();
    assert_eq!(config.verbosity, Level::Debug);
    assert_eq!(config.level, Level::Off);
    assert_eq!(config.logdir, "/tmp");

    env::set_var(logging::ENV_LOG_FILE_LEVEL, "loud");
    assert!(Config::from_env().is_err());
    env::remove_var(logging::ENV_LOG_LEVEL);
    env::remove_var(logging::ENV_LOG_FILE_LEVEL);
    env::remove_var(logging::ENV_LOG_DIR);
}
