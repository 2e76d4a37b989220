//! SANCdpd recordkeeping CLI.
//!
//! Library half of the binary, exposed so the menu engine can be driven
//! from integration tests.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod database;
pub mod defaults;
pub mod dispatch;
pub mod logger;
pub mod menu;
pub mod ui;
