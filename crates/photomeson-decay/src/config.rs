//! Decay-chain processor configuration.

/// Parameters of the decay-chain processor.
#[derive(Clone, Debug, PartialEq)]
pub struct DecayConfig {
    /// Accept/reject attempts for one decay before the event is abandoned.
    /// Default: 800.
    pub max_attempts: u32,
    /// Weight decays by their matrix elements. With `false` every channel
    /// is generated by pure phase space. Default: true.
    pub matrix_elements: bool,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            max_attempts: 800,
            matrix_elements: true,
        }
    }
}

impl DecayConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".into());
        }
        Ok(())
    }
}
