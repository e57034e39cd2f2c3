// src/domain/mod.rs
pub mod subscription_tier;
pub mod user_model;
pub mod user_role;
