//! Replicate predictions client and output handling.
pub mod client;
pub mod output;

pub use client::{InferenceProvider, ReplicateClient};
pub use output::extract_image_url;
