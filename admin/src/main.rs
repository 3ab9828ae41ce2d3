use std::{
    fs::File,
    io::Write,
    path::Path,
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use gpmf_admin::{
    command::{CommandError, CommandManager},
    config::Config,
    console::ConsolePresenter,
    dispatcher::ActionDispatcher,
    network::NetworkManager,
    panel::AdminPanel,
    panel_commands::register_panel_commands,
    provider::{HttpProvider, SharedProvider},
};
use gpmf_common::{
    logger::{setup_logger, LoggerOptions},
    validation::AmountBounds,
};
use log::{error, info, warn};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    let mut config: Config = Config::parse();
    if let Some(path) = config.config_file.as_ref() {
        if config.generate_config_template {
            if Path::new(path).exists() {
                eprintln!("Config file already exists at {}", path);
                return Ok(());
            }

            let mut file = File::create(path).context("Error while creating config file")?;
            let json = serde_json::to_string_pretty(&config).context("Error while serializing config file")?;
            file.write_all(json.as_bytes()).context("Error while writing config file")?;
            println!("Config file template generated at {}", path);
            return Ok(());
        }

        let exec = config.exec.take();
        let file = File::open(path).context("Error while opening config file")?;
        config = serde_json::from_reader(file).context("Error while reading config file")?;
        config.exec = exec;
    } else if config.generate_config_template {
        eprintln!("Provided config file path is required to generate the template with --config-file");
        return Ok(());
    }

    let log_config = &config.log;
    setup_logger(LoggerOptions {
        level: log_config.log_level,
        file_level: log_config.file_log_level,
        disable_file_logging: log_config.disable_file_logging,
        disable_file_log_date_based: log_config.disable_file_log_date_based,
        disable_colors: log_config.disable_log_color,
        filename_log: &log_config.filename_log,
        logs_path: &log_config.logs_path,
        modules: &log_config.logs_modules,
        datetime_format: &log_config.datetime_format,
    })
    .context("Error while setting up the logger")?;

    let Some(contract_address) = config.network.contract_address else {
        error!("No contract address configured, use --contract-address");
        return Ok(());
    };

    let provider: Option<SharedProvider> = match config.network.provider_url.as_deref() {
        Some(url) => {
            let timeout = config.network.request_timeout_secs.map(Duration::from_secs);
            let provider = HttpProvider::new(url, timeout).context("Error while creating the wallet provider")?;
            if log::log_enabled!(log::Level::Info) {
                info!("Using wallet provider at {}", provider.url());
            }
            Some(Arc::new(provider))
        }
        None => {
            warn!("No wallet provider configured, use --provider-url to connect a wallet");
            None
        }
    };

    let manager = NetworkManager::new(
        provider,
        contract_address,
        Duration::from_millis(config.network.receipt_poll_interval_ms),
    );
    let dispatcher = ActionDispatcher::new(
        AmountBounds::new(config.panel.min_amount, config.panel.max_amount),
        config.panel.is_in_flight_guard_enabled(),
    );
    let console = Arc::new(ConsolePresenter::new());
    let panel = Arc::new(AdminPanel::new(manager, dispatcher, console.clone(), config.panel.locale));
    panel.init().await;

    let command_manager = CommandManager::new(panel, console);
    command_manager.register_default_commands()?;
    register_panel_commands(&command_manager)?;

    // a failed command ends the script with a non-zero exit status
    if let Some(script) = config.get_exec_command() {
        return match command_manager.handle_script(script).await {
            Ok(()) | Err(CommandError::Exit) => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Error while executing '{}'", script)),
        };
    }

    info!("GPMF Admin {} ready, type 'help' to list commands", gpmf_common::config::VERSION);
    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Error while reading command")? {
        if line.trim().is_empty() {
            continue;
        }

        match command_manager.handle_command(line).await {
            Ok(()) => {}
            Err(CommandError::Exit) => break,
            Err(e) => command_manager.error(format!("Error while executing command: {}", e)),
        }
    }

    Ok(())
}
