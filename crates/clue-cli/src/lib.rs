pub mod command;
pub mod config;
pub mod logging;
pub mod session;
