use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    fs,
    path::Path,
    str::FromStr,
};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid module config '{}', expected <module>=<level>", _0)]
    InvalidModuleConfig(String),
    #[error("Logs path must end with a '/': {}", _0)]
    InvalidLogsPath(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    SetLogger(#[from] log::SetLoggerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, EnumString, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

// Per module level override, written `module=level`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub module: String,
    pub level: LogLevel,
}

impl FromStr for ModuleConfig {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LoggerError::InvalidModuleConfig(s.to_owned());
        let (module, level) = s.split_once('=').ok_or_else(invalid)?;
        let module = module.trim();
        if module.is_empty() {
            return Err(invalid());
        }

        let level = LogLevel::from_str(level.trim()).map_err(|_| invalid())?;
        Ok(Self {
            module: module.to_owned(),
            level,
        })
    }
}

impl Display for ModuleConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.module, self.level)
    }
}

pub fn default_logs_datetime_format() -> String {
    "[%Y-%m-%d] (%H:%M:%S%.3f)".to_owned()
}

pub struct LoggerOptions<'a> {
    pub level: LogLevel,
    // Same as `level` when unset
    pub file_level: Option<LogLevel>,
    pub disable_file_logging: bool,
    pub disable_file_log_date_based: bool,
    pub disable_colors: bool,
    pub filename_log: &'a str,
    pub logs_path: &'a str,
    pub modules: &'a [ModuleConfig],
    pub datetime_format: &'a str,
}

fn colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Cyan)
        .trace(Color::BrightBlack)
}

fn with_modules(mut dispatch: fern::Dispatch, modules: &[ModuleConfig]) -> fern::Dispatch {
    for module in modules {
        dispatch = dispatch.level_for(module.module.clone(), module.level.into());
    }
    dispatch
}

// Install the global logger: stdout, plus a (daily rotated) file unless disabled
pub fn setup_logger(options: LoggerOptions) -> Result<(), LoggerError> {
    let colors = colors();
    let stdout_format = options.datetime_format.to_owned();
    let disable_colors = options.disable_colors;

    let stdout = fern::Dispatch::new()
        .format(move |out, message, record| {
            let now = chrono::Local::now().format(&stdout_format);
            if disable_colors {
                out.finish(format_args!("{} {} [{}] {}", now, record.level(), record.target(), message))
            } else {
                out.finish(format_args!("{} {} [{}] {}", now, colors.color(record.level()), record.target(), message))
            }
        })
        .level(options.level.into())
        .chain(std::io::stdout());

    let mut base = fern::Dispatch::new().chain(with_modules(stdout, options.modules));

    if !options.disable_file_logging {
        if !options.logs_path.ends_with('/') {
            return Err(LoggerError::InvalidLogsPath(options.logs_path.to_owned()));
        }

        let logs_path = Path::new(options.logs_path);
        if !logs_path.exists() {
            fs::create_dir_all(logs_path)?;
        }

        let file_format = options.datetime_format.to_owned();
        let file = fern::Dispatch::new()
            .format(move |out, message, record| {
                let now = chrono::Local::now().format(&file_format);
                out.finish(format_args!("{} {} [{}] {}", now, record.level(), record.target(), message))
            })
            .level(options.file_level.unwrap_or(options.level).into());
        let file = with_modules(file, options.modules);

        let file = if options.disable_file_log_date_based {
            file.chain(fern::log_file(logs_path.join(options.filename_log))?)
        } else {
            file.chain(fern::DateBased::new(
                options.logs_path,
                format!("%Y-%m-%d.{}", options.filename_log),
            ))
        };

        base = base.chain(file);
    }

    base.apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::from_str("debug").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
        assert_eq!(LogLevel::default().to_string(), "info");
    }

    #[test]
    fn test_module_config() {
        let config = ModuleConfig::from_str("gpmf_admin::wallet_api=trace").unwrap();
        assert_eq!(config.module, "gpmf_admin::wallet_api");
        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.to_string(), "gpmf_admin::wallet_api=trace");

        assert!(ModuleConfig::from_str("reqwest").is_err());
        assert!(ModuleConfig::from_str("=info").is_err());
        assert!(ModuleConfig::from_str("reqwest=loud").is_err());
    }
}
