//! CLI command implementations.

pub mod decode;
