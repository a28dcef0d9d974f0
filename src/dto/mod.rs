pub mod analytics;
pub mod config;
pub mod menu;
pub mod orders;
pub mod tables;
