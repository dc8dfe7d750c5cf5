pub mod actions;
pub mod alerts;
pub mod cli;
pub mod clipboard;
pub mod connect;
pub mod dashboard;
pub mod hotkey;
pub mod logging;
pub mod notes;
pub mod palette;
pub mod progress;
pub mod settings;
pub mod sync;
pub mod toast;
pub mod toast_log;
