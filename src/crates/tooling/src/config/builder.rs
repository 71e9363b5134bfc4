//! Configuration builder trait
//!
//! Configuration structures are assembled in layers: compiled-in defaults,
//! then whatever files the application reads, then environment overrides.
//! This trait covers the last two steps so every configuration type applies
//! overrides and validates itself the same way.

use crate::Result;

/// Trait for configuration structures that accept environment overrides
///
/// # Example
///
/// ```rust,ignore
/// use tooling::config::{get_env_parse, ConfigBuilder};
///
/// #[derive(Clone, Default)]
/// struct LoopConfig {
///     pub max_rounds: usize,
/// }
///
/// impl ConfigBuilder for LoopConfig {
///     fn validate(&self) -> tooling::Result<()> {
///         if self.max_rounds == 0 {
///             return Err(tooling::ToolingError::General(
///                 "max_rounds must be non-zero".into()
///             ));
///         }
///         Ok(())
///     }
///
///     fn apply_env(&mut self, prefix: &str) -> tooling::Result<()> {
///         if let Some(rounds) = get_env_parse(&format!("{}MAX_ROUNDS", prefix))? {
///             self.max_rounds = rounds;
///         }
///         Ok(())
///     }
/// }
///
/// let config = LoopConfig { max_rounds: 10 }.finalize("APP_")?;
/// ```
pub trait ConfigBuilder: Default + Clone {
    /// Validate the configuration
    ///
    /// Returns an error if a value is out of range or a required field is unset.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Overwrite fields from `{PREFIX}{FIELD_NAME}` environment variables
    ///
    /// Variables that are not set leave the field untouched.
    fn apply_env(&mut self, prefix: &str) -> Result<()>;

    /// Apply environment overrides, then validate
    fn finalize(mut self, prefix: &str) -> Result<Self> {
        self.apply_env(prefix)?;
        self.validate()?;
        Ok(self)
    }
}
