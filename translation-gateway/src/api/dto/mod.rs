// src/api/dto/mod.rs
pub mod translation_dto;
