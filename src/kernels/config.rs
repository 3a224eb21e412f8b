//! Kernel enumeration parameters.

use crate::error::{OutrankingError, Result};

/// Configuration for prekernel and choice enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KernelConfig {
    /// Search good and bad choices on the codual (strict outranking)
    /// instead of the relation itself.
    pub use_codual: bool,

    /// Stop after this many maximal independent sets. `None` = all.
    pub max_sets: Option<usize>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            use_codual: true,
            max_sets: None,
        }
    }
}

impl KernelConfig {
    pub fn with_codual(mut self, use_codual: bool) -> Self {
        self.use_codual = use_codual;
        self
    }

    pub fn with_max_sets(mut self, max: usize) -> Self {
        self.max_sets = Some(max);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_sets == Some(0) {
            return Err(OutrankingError::InvalidConfig(
                "max_sets must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KernelConfig::default();
        assert!(config.use_codual);
        assert!(config.max_sets.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_max_sets() {
        assert!(KernelConfig::default().with_max_sets(0).validate().is_err());
    }
}
