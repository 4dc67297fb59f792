// src/config/mod.rs
pub mod feeds;
pub mod models;

pub use feeds::{load_feeds_default, load_feeds_from, FeedsConfig};
pub use models::{Backend, ModelsConfig};
