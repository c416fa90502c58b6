use std::error;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io as std_io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use chrono::prelude::*;
pub use slog::FilterLevel as Level;
use slog::{Discard, Drain, Duplicate, Fuse, Level as LogLevel, LevelFilter, Logger, OwnedKV,
           SendSyncRefUnwindSafeKV};
use slog_async::Async;
use slog_term::{CompactFormat, Decorator, FullFormat, PlainDecorator, TermDecorator};

use utils;

pub static ENV_LOG_LEVEL: &'static str = "TREEDEP_LOG_LEVEL";
pub static ENV_LOG_FILE_LEVEL: &'static str = "TREEDEP_LOG_FILE_LEVEL";
pub static ENV_LOG_DIR: &'static str = "TREEDEP_LOG_DIR";

#[derive(Debug)]
pub enum Stream {
    StdOut,
    StdErr,
    File(File),
    Null,
}

impl Stream {
    pub fn is_null(&self) -> bool {
        match *self {
            Stream::Null => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Full,
    Compact,
}

#[derive(Debug)]
pub struct LoggerBuilder {
    stream: Stream,
    level: Level,
    format: Format,
}

impl LoggerBuilder {
    pub fn new(stream: Stream) -> Self {
        LoggerBuilder {
            stream: stream,
            level: Level::Info,
            format: Format::Full,
        }
    }

    pub fn level(mut self, l: Level) -> Self {
        self.level = l;
        self
    }

    pub fn format(mut self, f: Format) -> Self {
        self.format = f;
        self
    }

    pub fn build<T>(self, values: OwnedKV<T>) -> Result<Logger, Error>
    where
        T: SendSyncRefUnwindSafeKV + 'static,
    {
        let logger = match self.build_drain()? {
            Some(drain) => Logger::root(drain.fuse(), values),
            None => Logger::root(Discard, values),
        };
        Ok(logger)
    }

    /// Logger writing to both streams, e.g. terminal and file.
    pub fn build_with<T>(self, other: LoggerBuilder, values: OwnedKV<T>) -> Result<Logger, Error>
    where
        T: SendSyncRefUnwindSafeKV + 'static,
    {
        let logger = match (self.build_drain()?, other.build_drain()?) {
            (Some(d1), Some(d2)) => Logger::root(Duplicate::new(d1, d2).fuse(), values),
            (Some(d), None) | (None, Some(d)) => Logger::root(d.fuse(), values),
            (None, None) => Logger::root(Discard, values),
        };
        Ok(logger)
    }

    fn build_drain(&self) -> Result<Option<LevelFilter<Fuse<Async>>>, Error> {
        let level = match log_level(self.level) {
            Some(level) => level,
            None => return Ok(None),
        };
        let drain = match self.stream {
            Stream::StdOut => {
                Some(self.build_drain_from_decorator(TermDecorator::new().stdout().build(), level))
            }
            Stream::StdErr => {
                Some(self.build_drain_from_decorator(TermDecorator::new().stderr().build(), level))
            }
            Stream::File(ref f) => {
                let file = f.try_clone().map_err(Error::Io)?;
                Some(self.build_drain_from_decorator(PlainDecorator::new(file), level))
            }
            Stream::Null => None,
        };
        Ok(drain)
    }

    fn build_drain_from_decorator<D: Decorator + Send + 'static>(
        &self,
        decorator: D,
        level: LogLevel,
    ) -> LevelFilter<Fuse<Async>> {
        let drain = match self.format {
            Format::Compact => {
                let drain = CompactFormat::new(decorator).use_local_timestamp().build();
                Async::new(drain.fuse()).build()
            }
            Format::Full => {
                let drain = FullFormat::new(decorator).use_local_timestamp().build();
                Async::new(drain.fuse()).build()
            }
        };
        LevelFilter::new(drain.fuse(), level)
    }
}

fn log_level(level: Level) -> Option<LogLevel> {
    match level {
        Level::Off => None,
        Level::Critical => Some(LogLevel::Critical),
        Level::Error => Some(LogLevel::Error),
        Level::Warning => Some(LogLevel::Warning),
        Level::Info => Some(LogLevel::Info),
        Level::Debug => Some(LogLevel::Debug),
        Level::Trace => Some(LogLevel::Trace),
    }
}

#[derive(Debug)]
pub enum Error {
    InvalidOption(String),
    Io(std_io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidOption(ref msg) => write!(f, "invalid option: {}", msg),
            Error::Io(ref err) => err.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::InvalidOption(..) => None,
            Error::Io(ref e) => Some(e),
        }
    }
}

impl From<std_io::Error> for Error {
    fn from(e: std_io::Error) -> Self {
        Error::Io(e)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// File log level; `Off` disables the log file.
    pub level: Level,
    /// Terminal log level.
    pub verbosity: Level,
    pub logdir: String,
    pub mkdir: bool,
    /// `chrono` format string for the file name.
    pub filename: String,
    /// `w` truncates, `a` appends, `n` picks the first unused numbered name.
    pub filemode: char,
    pub fileprefix: Option<String>,
    pub filesuffix: Option<String>,
    pub format: Format,
    pub use_stderr: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            level: Level::Off,
            verbosity: Level::Info,
            logdir: "./".to_string(),
            mkdir: false,
            filename: "%Y%m%d.log".to_string(),
            filemode: 'a',
            fileprefix: None,
            filesuffix: None,
            format: Format::Full,
            use_stderr: true,
        }
    }
}

impl Config {
    /// Defaults overridden by `TREEDEP_LOG_LEVEL`, `TREEDEP_LOG_FILE_LEVEL`
    /// and `TREEDEP_LOG_DIR`.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Config::default();
        if let Some(level) = env_level(ENV_LOG_LEVEL)? {
            config.verbosity = level;
        }
        if let Some(level) = env_level(ENV_LOG_FILE_LEVEL)? {
            config.level = level;
        }
        if let Some(dir) = env_string(ENV_LOG_DIR)? {
            config.logdir = dir;
        }
        Ok(config)
    }
}

fn env_string(key: &str) -> Result<Option<String>, Error> {
    utils::env::var_opt::<_, String>(key)
        .map_err(|e| Error::InvalidOption(format!("{}: {}", key, e)))
}

fn env_level(key: &str) -> Result<Option<Level>, Error> {
    match env_string(key)? {
        Some(s) => s.parse::<Level>()
            .map(Some)
            .map_err(|_| Error::InvalidOption(format!("{}: unknown level `{}`", key, s))),
        None => Ok(None),
    }
}

pub fn create_logger<C: Into<Config>>(config: C) -> Result<Logger, Error> {
    create_logger_with_kv_and_time(config, o!(), Local::now())
}

pub fn create_logger_with_kv<C: Into<Config>, T>(
    config: C,
    values: OwnedKV<T>,
) -> Result<Logger, Error>
where
    T: SendSyncRefUnwindSafeKV + 'static,
{
    create_logger_with_kv_and_time(config, values, Local::now())
}

pub fn create_logger_with_kv_and_time<C: Into<Config>, T, Tz: TimeZone>(
    config: C,
    values: OwnedKV<T>,
    datetime: DateTime<Tz>,
) -> Result<Logger, Error>
where
    T: SendSyncRefUnwindSafeKV + 'static,
    Tz::Offset: fmt::Display,
{
    let c = config.into();
    let fstream = match c.level {
        Level::Off => Stream::Null,
        _ => {
            let mut options = OpenOptions::new();
            options.create(true).write(true);
            let mut enable_numbering = false;
            match c.filemode {
                'w' => {
                    options.truncate(true);
                }
                'a' => {
                    options.append(true);
                }
                'n' => {
                    options.truncate(true);
                    enable_numbering = true;
                }
                mode => {
                    return Err(Error::InvalidOption(format!("unknown file mode `{}`", mode)));
                }
            }
            let path = resolve_filepath(
                &c.logdir,
                &c.filename,
                c.fileprefix.as_ref().map(|s| s.as_str()),
                c.filesuffix.as_ref().map(|s| s.as_str()),
                datetime,
                c.mkdir,
                enable_numbering,
            )?;
            Stream::File(options.open(path)?)
        }
    };

    let vstream = if c.use_stderr {
        Stream::StdErr
    } else {
        Stream::StdOut
    };
    LoggerBuilder::new(vstream)
        .level(c.verbosity)
        .format(c.format)
        .build_with(
            LoggerBuilder::new(fstream).level(c.level).format(c.format),
            values,
        )
}

/// Path of the log file: `dir/{prefix}{time-formatted stem}{suffix}[-N].ext`.
pub fn resolve_filepath<P1: AsRef<Path>, P2: AsRef<Path>, Tz: TimeZone>(
    dir: P1,
    filename: P2,
    prefix: Option<&str>,
    suffix: Option<&str>,
    time: DateTime<Tz>,
    mkdir: bool,
    numbering: bool,
) -> Result<PathBuf, std_io::Error>
where
    Tz::Offset: fmt::Display,
{
    let dir = utils::path::expandtilde(dir);
    if dir.is_dir() {
        // pass
    } else if mkdir {
        fs::create_dir_all(&dir)?;
    } else {
        return Err(std_io::Error::new(
            std_io::ErrorKind::NotFound,
            format!("file `{}` is not a directory", dir.display()),
        ));
    }

    let filename = filename.as_ref();
    if filename.to_string_lossy().contains(MAIN_SEPARATOR) {
        return Err(std_io::Error::new(
            std_io::ErrorKind::InvalidInput,
            "filename must not contain the separator",
        ));
    }

    let stem = filename
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| std_io::Error::new(std_io::ErrorKind::InvalidInput, "invalid filename"))?;
    let stem = format!(
        "{}{}{}",
        prefix.unwrap_or(""),
        time.format(stem),
        suffix.unwrap_or("")
    );
    let ext = filename
        .extension()
        .map(|s| format!(".{}", s.to_string_lossy()))
        .unwrap_or_default();

    if numbering {
        let mut number = 0;
        loop {
            let path = dir.join(format!("{}-{}{}", stem, number, ext));
            if !path.exists() {
                return Ok(path);
            }
            number += 1;
        }
    } else {
        Ok(dir.join(format!("{}{}", stem, ext)))
    }
}
