//! Fashion try-on API proxy library
//!
//! Modules:
//! - `api`: Axum HTTP handlers and router setup used by the binary.
//! - `catalog`: Stock model photo catalog, selector and downloader.
//! - `prompt`: Descriptor tables and the prompt template.
//! - `replicate`: Thin client for Replicate predictions.
//! - `tryon`: The request-scoped generation pipeline.
//! - `utils`: Data URI encoding and temp-file staging.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `ReplicateClient`,
//! `StockModelCatalog`, and `TryOnService`.
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod prompt;
pub mod replicate;
pub mod tryon;
pub mod utils;

pub use catalog::StockModelCatalog;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use replicate::ReplicateClient;
pub use tryon::TryOnService;
