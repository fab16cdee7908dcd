//! The `/generate` pipeline: prompt, stock model, staging, inference.
pub mod pipeline;

pub use pipeline::{GenerationParameters, GenerationRequest, GenerationResult, TryOnService};
