use crate::{
    async_handler,
    command::{Arg, ArgType, ArgumentManager, Command, CommandError, CommandHandler, CommandManager},
};
use gpmf_common::chain::Network;
use strum::IntoEnumIterator;

// Register every panel command: connection, owner and holder actions, queries
pub fn register_panel_commands(manager: &CommandManager) -> Result<(), CommandError> {
    manager.add_command(Command::new("connect", "Connect the wallet on the target network, or refresh it", CommandHandler::Async(async_handler!(connect))))?;
    manager.add_command(Command::new("refresh", "Reload the wallet balances, role and contract state", CommandHandler::Async(async_handler!(refresh))))?;
    manager.add_command(Command::new("disconnect", "Forget the connected wallet", CommandHandler::Async(async_handler!(disconnect))))?;
    manager.add_command(Command::with_optional_arguments("network", "Show supported networks or select one by chain id", vec![Arg::new("chain_id", ArgType::Number)], CommandHandler::Async(async_handler!(network))))?;
    manager.add_command(Command::new("status", "Show the network, the wallet and the contract state", CommandHandler::Async(async_handler!(status))))?;
    manager.add_command(Command::new("links", "Show the block explorer links of the contract", CommandHandler::Async(async_handler!(links))))?;
    manager.add_command(Command::new("controls", "Show which controls are available", CommandHandler::Sync(controls)))?;

    // Owner actions
    manager.add_command(Command::new("pause", "Pause all token transfers", CommandHandler::Async(async_handler!(pause))))?;
    manager.add_command(Command::new("unpause", "Resume token transfers", CommandHandler::Async(async_handler!(unpause))))?;
    manager.add_command(Command::with_required_arguments("set_lockup", "Lock an amount of an account for a number of minutes", vec![
        Arg::new("address", ArgType::String),
        Arg::new("minutes", ArgType::String),
        Arg::new("amount", ArgType::String),
    ], CommandHandler::Async(async_handler!(set_lockup))))?;
    manager.add_command(Command::with_required_arguments("extend_lockup", "Extend the lock-up of an account by a number of minutes", vec![
        Arg::new("address", ArgType::String),
        Arg::new("minutes", ArgType::String),
    ], CommandHandler::Async(async_handler!(extend_lockup))))?;
    manager.add_command(Command::with_required_arguments("decrease_lock_amount", "Replace the locked amount of an account", vec![
        Arg::new("address", ArgType::String),
        Arg::new("amount", ArgType::String),
    ], CommandHandler::Async(async_handler!(decrease_lock_amount))))?;
    manager.add_command(Command::with_required_arguments("release_lockup", "Release part of the locked amount of an account", vec![
        Arg::new("address", ArgType::String),
        Arg::new("amount", ArgType::String),
    ], CommandHandler::Async(async_handler!(release_lockup))))?;
    manager.add_command(Command::with_required_arguments("clear_expired_lockup", "Clear the expired lock-up of an account", vec![
        Arg::new("address", ArgType::String),
    ], CommandHandler::Async(async_handler!(clear_expired_lockup))))?;

    // Holder actions
    manager.add_command(Command::with_required_arguments("transfer", "Transfer GPMF to an address", vec![
        Arg::new("address", ArgType::String),
        Arg::new("amount", ArgType::String),
    ], CommandHandler::Async(async_handler!(transfer))))?;
    manager.add_command(Command::with_required_arguments("burn", "Burn GPMF from the connected wallet", vec![
        Arg::new("amount", ArgType::String),
    ], CommandHandler::Async(async_handler!(burn))))?;

    // Queries
    manager.add_command(Command::with_required_arguments("check_lockup", "Show the lock-up of an account", vec![Arg::new("address", ArgType::String)], CommandHandler::Async(async_handler!(check_lockup))))?;
    manager.add_command(Command::with_required_arguments("check_unlocked", "Show the total, locked and available balance of an account", vec![Arg::new("address", ArgType::String)], CommandHandler::Async(async_handler!(check_unlocked))))?;
    manager.add_command(Command::with_required_arguments("check_balance", "Show the GPMF balance of an account", vec![Arg::new("address", ArgType::String)], CommandHandler::Async(async_handler!(check_balance))))?;

    Ok(())
}

// The panel already told the operator why, the error only stops a script
fn outcome(name: &'static str, done: bool) -> Result<(), CommandError> {
    if done {
        Ok(())
    } else {
        Err(CommandError::Failed(name))
    }
}

fn string_arg(arguments: &mut ArgumentManager, name: &str) -> Result<String, CommandError> {
    Ok(arguments.get_value(name)?.to_string_value()?)
}

async fn connect(manager: &CommandManager, _: ArgumentManager) -> Result<(), CommandError> {
    outcome("connect", manager.get_panel().connect().await)
}

async fn refresh(manager: &CommandManager, _: ArgumentManager) -> Result<(), CommandError> {
    outcome("refresh", manager.get_panel().refresh().await)
}

async fn disconnect(manager: &CommandManager, _: ArgumentManager) -> Result<(), CommandError> {
    manager.get_panel().disconnect().await;
    manager.message("Wallet disconnected");
    Ok(())
}

async fn network(manager: &CommandManager, mut arguments: ArgumentManager) -> Result<(), CommandError> {
    if !arguments.has_argument("chain_id") {
        let current = manager.get_panel().status().await.network;
        manager.message("Supported networks:");
        for network in Network::iter() {
            let marker = if network == current { "*" } else { " " };
            manager.message(format!("{} {} ({})", marker, network, network.chain_id()));
        }
        return Ok(());
    }

    let chain_id = arguments.get_value("chain_id")?.to_number()?;
    outcome("network", manager.get_panel().on_network_selection_changed(chain_id).await)
}

async fn status(manager: &CommandManager, _: ArgumentManager) -> Result<(), CommandError> {
    let status = manager.get_panel().status().await;
    manager.message(format!("Network: {} ({})", status.network, status.network.chain_id()));
    if status.session.is_none() {
        manager.message("Wallet: not connected");
    }

    for line in manager.get_console().render_fields() {
        manager.message(line);
    }
    Ok(())
}

async fn links(manager: &CommandManager, _: ArgumentManager) -> Result<(), CommandError> {
    let Some(links) = manager.get_panel().links().await else {
        return Err(CommandError::Failed("links"));
    };

    manager.message(format!("Contract: {}", links.contract));
    manager.message(format!("Token tracker: {}", links.token_tracker));
    manager.message(format!("Holders: {}", links.holders));
    Ok(())
}

fn controls(manager: &CommandManager, _: ArgumentManager) -> Result<(), CommandError> {
    for line in manager.get_console().render_controls() {
        manager.message(line);
    }
    Ok(())
}

async fn pause(manager: &CommandManager, _: ArgumentManager) -> Result<(), CommandError> {
    outcome("pause", manager.get_panel().pause().await)
}

async fn unpause(manager: &CommandManager, _: ArgumentManager) -> Result<(), CommandError> {
    outcome("unpause", manager.get_panel().unpause().await)
}

async fn set_lockup(manager: &CommandManager, mut arguments: ArgumentManager) -> Result<(), CommandError> {
    let address = string_arg(&mut arguments, "address")?;
    let minutes = string_arg(&mut arguments, "minutes")?;
    let amount = string_arg(&mut arguments, "amount")?;
    outcome("set_lockup", manager.get_panel().set_lockup(&address, &minutes, &amount).await)
}

async fn extend_lockup(manager: &CommandManager, mut arguments: ArgumentManager) -> Result<(), CommandError> {
    let address = string_arg(&mut arguments, "address")?;
    let minutes = string_arg(&mut arguments, "minutes")?;
    outcome("extend_lockup", manager.get_panel().extend_lockup(&address, &minutes).await)
}

async fn decrease_lock_amount(manager: &CommandManager, mut arguments: ArgumentManager) -> Result<(), CommandError> {
    let address = string_arg(&mut arguments, "address")?;
    let amount = string_arg(&mut arguments, "amount")?;
    outcome("decrease_lock_amount", manager.get_panel().decrease_lock_amount(&address, &amount).await)
}

async fn release_lockup(manager: &CommandManager, mut arguments: ArgumentManager) -> Result<(), CommandError> {
    let address = string_arg(&mut arguments, "address")?;
    let amount = string_arg(&mut arguments, "amount")?;
    outcome("release_lockup", manager.get_panel().release_lockup(&address, &amount).await)
}

async fn clear_expired_lockup(manager: &CommandManager, mut arguments: ArgumentManager) -> Result<(), CommandError> {
    let address = string_arg(&mut arguments, "address")?;
    outcome("clear_expired_lockup", manager.get_panel().clear_expired_lockup(&address).await)
}

async fn transfer(manager: &CommandManager, mut arguments: ArgumentManager) -> Result<(), CommandError> {
    let address = string_arg(&mut arguments, "address")?;
    let amount = string_arg(&mut arguments, "amount")?;
    outcome("transfer", manager.get_panel().transfer(&address, &amount).await)
}

async fn burn(manager: &CommandManager, mut arguments: ArgumentManager) -> Result<(), CommandError> {
    let amount = string_arg(&mut arguments, "amount")?;
    outcome("burn", manager.get_panel().burn(&amount).await)
}

async fn check_lockup(manager: &CommandManager, mut arguments: ArgumentManager) -> Result<(), CommandError> {
    let address = string_arg(&mut arguments, "address")?;
    outcome("check_lockup", manager.get_panel().check_lockup(&address).await)
}

async fn check_unlocked(manager: &CommandManager, mut arguments: ArgumentManager) -> Result<(), CommandError> {
    let address = string_arg(&mut arguments, "address")?;
    outcome("check_unlocked", manager.get_panel().check_unlocked_balance(&address).await)
}

async fn check_balance(manager: &CommandManager, mut arguments: ArgumentManager) -> Result<(), CommandError> {
    let address = string_arg(&mut arguments, "address")?;
    outcome("check_balance", manager.get_panel().check_balance(&address).await)
}
