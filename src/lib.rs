pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod copy;
pub mod keybindings;
pub mod notification;
pub mod page;
pub mod ui;
pub mod utils;
