// src/api/handlers/mod.rs
pub mod system_handler;
pub mod translation_handler;
