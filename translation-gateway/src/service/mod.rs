// src/service/mod.rs
pub mod translation_service;
