pub mod command;
pub mod config;
pub mod console;
pub mod contract;
pub mod dispatcher;
pub mod error;
pub mod network;
pub mod panel;
pub mod panel_commands;
pub mod provider;
pub mod reader;
pub mod session;
pub mod ui;
pub mod wallet_api;
