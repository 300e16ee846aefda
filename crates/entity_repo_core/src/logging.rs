//! Logging bootstrap for processes embedding the repository core.
//!
//! # Responsibility
//! - Validate logging configuration before touching the filesystem.
//! - Start size-rotated file logging exactly once per process.
//!
//! # Invariants
//! - Initialization is idempotent for an identical configuration.
//! - A second initialization with a different level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "entity_repo";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE_CONFIG: OnceCell<ActiveLogging> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct ActiveLogging {
    config: LoggingConfig,
    _handle: LoggerHandle,
}

/// Logging configuration errors and backend failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnsupportedLevel(String),
    EmptyDirectory,
    RelativeDirectory(String),
    CreateDirectory { path: PathBuf, message: String },
    Backend(String),
    Conflict {
        active: LoggingConfig,
        requested: LoggingConfig,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyDirectory => write!(f, "log directory cannot be empty"),
            Self::RelativeDirectory(dir) => {
                write!(f, "log directory must be an absolute path, got `{dir}`")
            }
            Self::CreateDirectory { path, message } => write!(
                f,
                "failed to create log directory `{}`: {message}",
                path.display()
            ),
            Self::Backend(message) => write!(f, "failed to start logger: {message}"),
            Self::Conflict { active, requested } => write!(
                f,
                "logging already initialized with {active}; refusing to switch to {requested}"
            ),
        }
    }
}

impl Error for LoggingError {}

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    level: &'static str,
    log_dir: PathBuf,
}

impl LoggingConfig {
    /// Normalizes `level` and checks that `log_dir` is absolute.
    ///
    /// Accepted levels: `trace`, `debug`, `info`, `warn` (or `warning`),
    /// `error`, in any letter case and with surrounding whitespace.
    pub fn new(level: &str, log_dir: impl AsRef<Path>) -> Result<Self, LoggingError> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: normalize_log_dir(log_dir.as_ref())?,
        })
    }

    /// Uses `default_log_level()` for the level.
    pub fn with_default_level(log_dir: impl AsRef<Path>) -> Result<Self, LoggingError> {
        Self::new(default_log_level(), log_dir)
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

impl Display for LoggingConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "level `{}` at `{}`",
            self.level,
            self.log_dir.display()
        )
    }
}

/// Starts file logging for this process.
///
/// # Errors
/// - `CreateDirectory` when the log directory cannot be created.
/// - `Backend` when the logger cannot start.
/// - `Conflict` when logging is already active with another configuration.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let active = ACTIVE_CONFIG.get_or_try_init(|| start_logger(config))?;
    if active.config != *config {
        return Err(LoggingError::Conflict {
            active: active.config.clone(),
            requested: config.clone(),
        });
    }
    Ok(())
}

/// Returns the active configuration, or `None` before `init_logging`.
pub fn logging_status() -> Option<LoggingConfig> {
    ACTIVE_CONFIG.get().map(|active| active.config.clone())
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(config: &LoggingConfig) -> Result<ActiveLogging, LoggingError> {
    std::fs::create_dir_all(&config.log_dir).map_err(|err| LoggingError::CreateDirectory {
        path: config.log_dir.clone(),
        message: err.to_string(),
    })?;

    let handle = Logger::try_with_str(config.level)
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook_once();

    info!(
        "event=logging_init module=core status=ok level={} log_dir={} version={}",
        config.level,
        config.log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogging {
        config: config.clone(),
        _handle: handle,
    })
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    // Non-UTF-8 paths are kept byte-for-byte; only UTF-8 input is trimmed.
    let path = match log_dir.to_str() {
        Some(text) => PathBuf::from(text.trim()),
        None => log_dir.to_path_buf(),
    };
    if path.as_os_str().is_empty() {
        return Err(LoggingError::EmptyDirectory);
    }
    if !path.is_absolute() {
        return Err(LoggingError::RelativeDirectory(
            path.to_string_lossy().into_owned(),
        ));
    }
    Ok(path)
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_payload_summary(panic_info);
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location, payload
        );
        previous_hook(panic_info);
    }));
}

fn panic_payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    single_line_truncated(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

fn single_line_truncated(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    let mut truncated = flattened.chars().take(max_chars).collect::<String>();
    if flattened.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

#[cfg(test)]
mod tests {
    use super::{
        init_logging, logging_status, normalize_log_dir, single_line_truncated, LoggingConfig,
        LoggingError,
    };
    use std::path::{Path, PathBuf};

    #[test]
    fn config_normalizes_level() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = LoggingConfig::new(" WARNING ", dir.path()).expect("valid config");
        assert_eq!(config.level(), "warn");
        assert_eq!(config.log_dir(), dir.path());
    }

    #[test]
    fn config_rejects_unknown_level_and_relative_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert_eq!(
            LoggingConfig::new("verbose", dir.path()).unwrap_err(),
            LoggingError::UnsupportedLevel("verbose".to_string())
        );
        assert_eq!(
            LoggingConfig::new("info", "logs/dev").unwrap_err(),
            LoggingError::RelativeDirectory("logs/dev".to_string())
        );
        assert_eq!(
            LoggingConfig::new("info", "   ").unwrap_err(),
            LoggingError::EmptyDirectory
        );
    }

    #[test]
    fn log_dir_trims_utf8_input_only_at_the_ends() {
        assert_eq!(
            normalize_log_dir(Path::new("  /var/log/entity repo  ")).unwrap(),
            PathBuf::from("/var/log/entity repo")
        );
    }

    #[cfg(unix)]
    #[test]
    fn log_dir_keeps_non_utf8_paths_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = Path::new(OsStr::from_bytes(b"/tmp/logs-\xff "));
        assert_eq!(normalize_log_dir(raw).unwrap(), raw.to_path_buf());

        let relative = Path::new(OsStr::from_bytes(b"logs-\xff"));
        assert!(matches!(
            normalize_log_dir(relative),
            Err(LoggingError::RelativeDirectory(_))
        ));
    }

    #[test]
    fn truncation_flattens_newlines() {
        let flattened = single_line_truncated("line1\nline2\rline3", 8);
        assert!(!flattened.contains('\n'));
        assert!(!flattened.contains('\r'));
        assert!(flattened.ends_with("..."));
    }

    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        let dir = tempfile::tempdir().expect("temp dir");
        let other_dir = tempfile::tempdir().expect("temp dir");
        let config = LoggingConfig::new("info", dir.path()).expect("valid config");

        init_logging(&config).expect("first init");
        init_logging(&config).expect("same config is idempotent");

        let level_conflict = LoggingConfig::new("debug", dir.path()).expect("valid config");
        assert!(matches!(
            init_logging(&level_conflict),
            Err(LoggingError::Conflict { .. })
        ));

        let dir_conflict = LoggingConfig::new("info", other_dir.path()).expect("valid config");
        let err = init_logging(&dir_conflict).unwrap_err();
        assert!(err.to_string().contains("refusing to switch"));

        assert_eq!(logging_status(), Some(config));
    }
}
