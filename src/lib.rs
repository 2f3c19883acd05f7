pub mod app;
pub mod config;
pub mod embedding;
pub mod forms;
pub mod metadata;
pub mod picker;
pub mod report;
pub mod routing;
pub mod shared;
pub mod store;
pub mod ui;
