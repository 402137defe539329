pub mod app;
pub mod app_dirs;
pub mod config;
pub mod keymap;
pub mod logging;
pub mod practice;
pub mod runtime;
pub mod session;
pub mod ui;
