pub mod autostart;
pub mod config;
pub mod task;
pub mod transfer;
pub mod watch;
