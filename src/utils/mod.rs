pub mod encoding;
pub mod staging;
