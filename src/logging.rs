use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::{env_or, env_or_bool};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            enable_file_logs: false,
            log_dir: "./logs".to_string(),
        }
    }
}

impl LogConfig {
    /// 只读取日志相关变量，且不会输出日志，可在订阅器安装前调用
    pub fn from_env() -> Self {
        Self {
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to create log file appender in '{dir}': {reason}")]
    Appender { dir: String, reason: String },
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Installs the global subscriber. Human-readable lines go to stderr so that
/// stdout stays free when frames are piped through the process; optional
/// daily-rolled JSON files go to `log_dir`.
///
/// Calling it again after a subscriber is set is a no-op.
pub fn init_tracing(config: &LogConfig) -> Result<(), LogError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let registry = Registry::default().with(env_filter).with(stderr_layer);

    let installed = if config.enable_file_logs {
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("camera-watch")
            .filename_suffix("log")
            .max_log_files(30)
            .build(&config.log_dir)
            .map_err(|e| LogError::Appender {
                dir: config.log_dir.clone(),
                reason: e.to_string(),
            })?;
        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .json();
        registry.with(file_layer).try_init()
    } else {
        registry.try_init()
    };

    match installed {
        Ok(()) => Ok(()),
        // 测试中多次初始化属于正常情况
        Err(e) if e.to_string().contains("already been set") => Ok(()),
        Err(e) => Err(LogError::Install(e.to_string())),
    }
}
