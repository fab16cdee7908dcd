//! Prompt construction from the descriptor tables.
pub mod constructor;
pub mod descriptors;
