//! Data models for bills and configuration.

pub mod bill;
pub mod config;
