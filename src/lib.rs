pub mod client;
pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod models;
pub mod notify;
pub mod realtime;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod workflow;
