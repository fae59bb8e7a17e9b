pub mod app;
pub mod config;
pub mod effects;
pub mod forms;
pub mod input;
pub mod logging;
pub mod returns;
pub mod ui;
