//! Data models for purchase-order extraction.

pub mod config;
pub mod record;
pub mod summary;
