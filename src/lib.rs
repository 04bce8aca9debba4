pub mod config;
pub mod diagnostics;

pub use config::{ConfigError, ResolvedConfig, resolve};

#[cfg(test)]
mod config_tests;
