// src/config.rs
mod app;
mod gateway;

pub use app::{AppConfig, Config, ConfigError};
pub use gateway::GatewayConfig;
