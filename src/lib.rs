pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileTokenStore, LocalStorage, MemoryTokenStore};
pub use config::ClientConfig;
pub use crate::core::{ApiClient, ApiResponse, RequestOptions};
pub use domain::Session;
pub use utils::error::{ApiError, Result};
