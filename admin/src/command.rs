use crate::{console::ConsolePresenter, panel::AdminPanel};
use gpmf_common::{config::VERSION, logger::LogLevel};
use log::{error, info};
use std::{
    collections::HashMap,
    fmt::Display,
    future::Future,
    pin::Pin,
    str::FromStr,
    sync::{Arc, Mutex, PoisonError},
};
use thiserror::Error;

// Turn an async fn into a boxed command callback
#[macro_export]
macro_rules! async_handler {
    ($func: expr) => {
        move |a, b| Box::pin($func(a, b))
    };
}

#[derive(Error, Debug)]
pub enum ArgError {
    #[error("Invalid value for this argument type")]
    InvalidType,
    #[error("Argument '{}' not found", _0)]
    NotFound(String),
}

pub enum ArgValue {
    Number(u64),
    String(String),
}

impl ArgValue {
    pub fn to_number(self) -> Result<u64, ArgError> {
        match self {
            ArgValue::Number(n) => Ok(n),
            _ => Err(ArgError::InvalidType),
        }
    }

    pub fn to_string_value(self) -> Result<String, ArgError> {
        match self {
            ArgValue::String(s) => Ok(s),
            _ => Err(ArgError::InvalidType),
        }
    }
}

pub enum ArgType {
    Number,
    String,
}

impl ArgType {
    pub fn to_value(&self, value: &str) -> Result<ArgValue, ArgError> {
        Ok(match self {
            ArgType::Number => ArgValue::Number(value.parse().map_err(|_| ArgError::InvalidType)?),
            ArgType::String => ArgValue::String(value.to_owned()),
        })
    }
}

pub struct Arg {
    name: String,
    arg_type: ArgType,
}

impl Arg {
    pub fn new(name: &str, arg_type: ArgType) -> Self {
        Self {
            name: name.to_owned(),
            arg_type,
        }
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }

    pub fn get_type(&self) -> &ArgType {
        &self.arg_type
    }
}

pub struct ArgumentManager {
    arguments: HashMap<String, ArgValue>,
}

impl ArgumentManager {
    pub fn new(arguments: HashMap<String, ArgValue>) -> Self {
        Self { arguments }
    }

    pub fn get_value(&mut self, name: &str) -> Result<ArgValue, ArgError> {
        self.arguments
            .remove(name)
            .ok_or_else(|| ArgError::NotFound(name.to_owned()))
    }

    pub fn has_argument(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
    }
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Expected a command name")]
    ExpectedCommandName,
    #[error("Command was not found")]
    CommandNotFound,
    #[error("Expected required argument {}", _0)]
    ExpectedRequiredArg(String), // arg name
    #[error("Too many arguments")]
    TooManyArguments,
    #[error(transparent)]
    ArgError(#[from] ArgError),
    #[error("Invalid argument: {}", _0)]
    InvalidArgument(String),
    #[error("Exit command was called")]
    Exit,
    #[error("Command '{}' failed", _0)]
    Failed(&'static str),
    #[error("Poison Error: {}", _0)]
    PoisonError(String),
}

impl<T> From<PoisonError<T>> for CommandError {
    fn from(err: PoisonError<T>) -> Self {
        Self::PoisonError(format!("{}", err))
    }
}

pub type SyncCommandCallback = fn(&CommandManager, ArgumentManager) -> Result<(), CommandError>;
pub type AsyncCommandCallback =
    fn(&'_ CommandManager, ArgumentManager) -> Pin<Box<dyn Future<Output = Result<(), CommandError>> + '_>>;

pub enum CommandHandler {
    Sync(SyncCommandCallback),
    Async(AsyncCommandCallback),
}

pub struct Command {
    name: String,
    description: String,
    required_args: Vec<Arg>,
    optional_args: Vec<Arg>,
    callback: CommandHandler,
}

impl Command {
    pub fn new(name: &str, description: &str, callback: CommandHandler) -> Self {
        Self::with_arguments(name, description, Vec::new(), Vec::new(), callback)
    }

    pub fn with_optional_arguments(name: &str, description: &str, optional_args: Vec<Arg>, callback: CommandHandler) -> Self {
        Self::with_arguments(name, description, Vec::new(), optional_args, callback)
    }

    pub fn with_required_arguments(name: &str, description: &str, required_args: Vec<Arg>, callback: CommandHandler) -> Self {
        Self::with_arguments(name, description, required_args, Vec::new(), callback)
    }

    pub fn with_arguments(
        name: &str,
        description: &str,
        required_args: Vec<Arg>,
        optional_args: Vec<Arg>,
        callback: CommandHandler,
    ) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            required_args,
            optional_args,
            callback,
        }
    }

    pub async fn execute(&self, manager: &CommandManager, values: ArgumentManager) -> Result<(), CommandError> {
        match &self.callback {
            CommandHandler::Sync(handler) => handler(manager, values),
            CommandHandler::Async(handler) => handler(manager, values).await,
        }
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }

    pub fn get_description(&self) -> &String {
        &self.description
    }

    pub fn get_required_args(&self) -> &Vec<Arg> {
        &self.required_args
    }

    pub fn get_optional_args(&self) -> &Vec<Arg> {
        &self.optional_args
    }

    pub fn get_usage(&self) -> String {
        let mut parts = vec![self.get_name().clone()];
        parts.extend(self.get_required_args().iter().map(|arg| format!("<{}>", arg.get_name())));
        parts.extend(self.get_optional_args().iter().map(|arg| format!("[{}]", arg.get_name())));
        parts.join(" ")
    }
}

// Parses command lines and runs them against the panel
pub struct CommandManager {
    commands: Mutex<Vec<Arc<Command>>>,
    panel: Arc<AdminPanel>,
    console: Arc<ConsolePresenter>,
}

impl CommandManager {
    pub fn new(panel: Arc<AdminPanel>, console: Arc<ConsolePresenter>) -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            panel,
            console,
        }
    }

    pub fn get_panel(&self) -> &Arc<AdminPanel> {
        &self.panel
    }

    // The presenter the panel writes to, for rendering its fields and controls
    pub fn get_console(&self) -> &Arc<ConsolePresenter> {
        &self.console
    }

    // Register default commands:
    // - help
    // - version
    // - exit
    // - set_log_level
    pub fn register_default_commands(&self) -> Result<(), CommandError> {
        self.add_command(Command::with_optional_arguments(
            "help",
            "Show this help",
            vec![Arg::new("command", ArgType::String)],
            CommandHandler::Sync(help),
        ))?;
        self.add_command(Command::new("version", "Show the current version", CommandHandler::Sync(version)))?;
        self.add_command(Command::new("exit", "Shutdown the application", CommandHandler::Sync(exit)))?;
        self.add_command(Command::with_required_arguments(
            "set_log_level",
            "Set the log level",
            vec![Arg::new("level", ArgType::String)],
            CommandHandler::Sync(set_log_level),
        ))?;

        Ok(())
    }

    pub fn add_command(&self, command: Command) -> Result<(), CommandError> {
        let mut commands = self.commands.lock()?;
        commands.push(Arc::new(command));
        Ok(())
    }

    fn find_command(&self, name: &str) -> Result<Arc<Command>, CommandError> {
        let commands = self.commands.lock()?;
        commands
            .iter()
            .find(|command| *command.get_name() == *name)
            .cloned()
            .ok_or(CommandError::CommandNotFound)
    }

    pub async fn handle_command(&self, value: String) -> Result<(), CommandError> {
        let mut command_split = value.split_whitespace();
        let command_name = command_split.next().ok_or(CommandError::ExpectedCommandName)?;
        let command = self.find_command(command_name)?;

        let mut arguments: HashMap<String, ArgValue> = HashMap::new();
        for arg in command.get_required_args() {
            let arg_value = command_split
                .next()
                .ok_or_else(|| CommandError::ExpectedRequiredArg(arg.get_name().to_owned()))?;
            arguments.insert(arg.get_name().clone(), arg.get_type().to_value(arg_value)?);
        }

        // include all options args available
        for optional_arg in command.get_optional_args() {
            if let Some(arg_value) = command_split.next() {
                arguments.insert(optional_arg.get_name().clone(), optional_arg.get_type().to_value(arg_value)?);
            } else {
                break;
            }
        }

        if command_split.next().is_some() {
            return Err(CommandError::TooManyArguments);
        }

        command.execute(self, ArgumentManager::new(arguments)).await
    }

    // Run `a; b; c` in order, stopping at the first error or at `exit`
    pub async fn handle_script(&self, script: &str) -> Result<(), CommandError> {
        for line in script.split(';').map(str::trim).filter(|line| !line.is_empty()) {
            if log::log_enabled!(log::Level::Info) {
                info!("> {}", line);
            }
            self.handle_command(line.to_owned()).await?;
        }
        Ok(())
    }

    pub fn display_commands(&self) -> Result<(), CommandError> {
        let commands = self.commands.lock()?;
        self.message("Available commands:");
        for cmd in commands.iter() {
            self.message(format!("- {}: {}", cmd.get_name(), cmd.get_description()));
        }
        Ok(())
    }

    pub fn message<D: Display>(&self, message: D) {
        info!("{}", message);
    }

    pub fn error<D: Display>(&self, message: D) {
        error!("{}", message);
    }
}

fn help(manager: &CommandManager, mut args: ArgumentManager) -> Result<(), CommandError> {
    if args.has_argument("command") {
        let arg_value = args.get_value("command")?.to_string_value()?;
        let cmd = manager.find_command(&arg_value)?;
        manager.message(format!("Usage: {}", cmd.get_usage()));
    } else {
        manager.display_commands()?;
        manager.message("See how to use a command using help <command>");
    }
    Ok(())
}

fn exit(manager: &CommandManager, _: ArgumentManager) -> Result<(), CommandError> {
    manager.message("Stopping...");
    Err(CommandError::Exit)
}

fn version(manager: &CommandManager, _: ArgumentManager) -> Result<(), CommandError> {
    manager.message(format!("Version: {}", VERSION));
    Ok(())
}

fn set_log_level(manager: &CommandManager, mut args: ArgumentManager) -> Result<(), CommandError> {
    let arg_value = args.get_value("level")?.to_string_value()?;
    let level = LogLevel::from_str(&arg_value).map_err(|e| CommandError::InvalidArgument(e.to_string()))?;
    log::set_max_level(level.into());
    manager.message(format!("Log level set to {}", level));

    Ok(())
}
