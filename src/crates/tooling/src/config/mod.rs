//! Configuration management utilities
//!
//! - `ConfigBuilder` trait for environment overrides and validation
//! - Environment variable loading with proper error handling
//! - Home-directory expansion for configured paths

mod builder;
mod env;

pub use builder::ConfigBuilder;
pub use env::{expand_home, get_env, get_env_nonempty, get_env_parse};
