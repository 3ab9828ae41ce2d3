use clap::Parser;
use gpmf_common::{
    address::Address,
    config::{DEFAULT_MAX_AMOUNT, DEFAULT_MIN_AMOUNT, VERSION},
    i18n::Locale,
    logger::{default_logs_datetime_format, LogLevel, ModuleConfig},
};
use serde::{Deserialize, Serialize};

// Interval between two receipt lookups of a pending transaction
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 1000;

fn default_receipt_poll_interval_ms() -> u64 {
    DEFAULT_RECEIPT_POLL_INTERVAL_MS
}

fn default_log_filename() -> String {
    String::from("gpmf-admin.log")
}

fn default_logs_path() -> String {
    String::from("logs/")
}

fn default_min_amount() -> u64 {
    DEFAULT_MIN_AMOUNT
}

fn default_max_amount() -> u64 {
    DEFAULT_MAX_AMOUNT
}

#[derive(Debug, Clone, clap::Args, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint of the wallet provider
    ///
    /// When unset, the panel starts without a wallet and only reports it as missing.
    #[clap(long)]
    pub provider_url: Option<String>,
    /// Deployed GPMF token contract address
    #[clap(long)]
    pub contract_address: Option<Address>,
    /// Milliseconds between two receipt lookups while waiting for a transaction
    #[clap(long, default_value_t = DEFAULT_RECEIPT_POLL_INTERVAL_MS)]
    #[serde(default = "default_receipt_poll_interval_ms")]
    pub receipt_poll_interval_ms: u64,
    /// Timeout in seconds of a single provider request
    #[clap(long)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, clap::Args, Serialize, Deserialize)]
pub struct LogConfig {
    /// Set log level
    #[clap(long, value_enum, default_value_t)]
    #[serde(default)]
    pub log_level: LogLevel,
    /// Set file log level
    /// By default, it will be the same as log level
    #[clap(long, value_enum)]
    pub file_log_level: Option<LogLevel>,
    /// Disable the log file
    #[clap(long)]
    #[serde(default)]
    pub disable_file_logging: bool,
    /// Disable the log filename date based
    /// If disabled, the log file will be named gpmf-admin.log instead of YYYY-MM-DD.gpmf-admin.log
    #[clap(long)]
    #[serde(default)]
    pub disable_file_log_date_based: bool,
    /// Disable the usage of colors in log
    #[clap(long)]
    #[serde(default)]
    pub disable_log_color: bool,
    /// Log filename
    ///
    /// File will be stored in logs directory, this is only the filename, not the full path.
    #[clap(long, default_value_t = default_log_filename())]
    #[serde(default = "default_log_filename")]
    pub filename_log: String,
    /// Logs directory
    ///
    /// It must end with a / to be a valid folder.
    #[clap(long, default_value_t = default_logs_path())]
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    /// Module configuration for logs, written module=level
    #[clap(long)]
    #[serde(default)]
    pub logs_modules: Vec<ModuleConfig>,
    /// Change the datetime format used by the logger
    #[clap(long, default_value_t = default_logs_datetime_format())]
    #[serde(default = "default_logs_datetime_format")]
    pub datetime_format: String,
}

#[derive(Debug, Clone, clap::Args, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Language of the messages shown to the user
    #[clap(long, value_enum, default_value_t)]
    #[serde(default)]
    pub locale: Locale,
    /// Smallest amount accepted by amount inputs, in GPMF
    #[clap(long, default_value_t = DEFAULT_MIN_AMOUNT)]
    #[serde(default = "default_min_amount")]
    pub min_amount: u64,
    /// Largest amount accepted by amount inputs, in GPMF
    #[clap(long, default_value_t = DEFAULT_MAX_AMOUNT)]
    #[serde(default = "default_max_amount")]
    pub max_amount: u64,
    /// Allow submitting an action again while the same action is still pending
    #[clap(long)]
    #[serde(default)]
    pub allow_concurrent_actions: bool,
}

impl PanelConfig {
    // Refuse an action while the same one is pending
    pub fn is_in_flight_guard_enabled(&self) -> bool {
        !self.allow_concurrent_actions
    }
}

#[derive(Parser, Serialize, Deserialize, Clone)]
#[clap(
    version = VERSION,
    about = "GPMF Admin - Administer the GPMF token contract from the command line"
)]
#[command(styles = gpmf_common::get_cli_styles())]
pub struct Config {
    /// Network configuration
    #[clap(flatten)]
    pub network: NetworkConfig,
    /// Log configuration
    #[clap(flatten)]
    pub log: LogConfig,
    /// Panel configuration
    #[clap(flatten)]
    pub panel: PanelConfig,
    /// JSON File to load the configuration from
    #[clap(long)]
    #[serde(skip)]
    #[serde(default)]
    pub config_file: Option<String>,
    /// Generate the template at the `config_file` path
    #[clap(long)]
    #[serde(skip)]
    #[serde(default)]
    pub generate_config_template: bool,
    /// Execute commands and exit, separated by ';'
    ///
    /// Example: --exec "connect; check_balance 0x...; exit"
    #[clap(long)]
    #[serde(skip)]
    #[serde(default)]
    pub exec: Option<String>,
}

impl Config {
    pub fn get_exec_command(&self) -> Option<&String> {
        self.exec.as_ref()
    }
}
