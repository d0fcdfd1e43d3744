//! # Runtime Configuration
//!
//! Coroutine runtime settings read from the environment.
//!
//! ### `CWEB_STACK_SIZE`
//!
//! Stack size for request coroutines, decimal (`16384`) or hex (`0x4000`).
//! Default: `0x4000` (16 KB). Handlers rendering large templates or holding
//! big buffers on the stack may need `0x8000` or more.
//!
//! ```rust
//! use cweb::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! assert!(config.stack_size > 0);
//! ```

use std::env;
use tracing::info;

pub const DEFAULT_STACK_SIZE: usize = 0x4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Coroutine stack size in bytes
    pub stack_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    match val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables; unparsable values fall
    /// back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let stack_size = env::var("CWEB_STACK_SIZE")
            .ok()
            .and_then(|v| parse_size(&v))
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_STACK_SIZE);
        RuntimeConfig { stack_size }
    }

    /// Configure the `may` scheduler with these settings.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
        info!(stack_size = self.stack_size, "Coroutine runtime configured");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("16384"), Some(16384));
        assert_eq!(parse_size("0x8000"), Some(0x8000));
        assert_eq!(parse_size(" 0X10 "), Some(16));
        assert_eq!(parse_size("lots"), None);
        assert_eq!(parse_size("0xzz"), None);
    }

    #[test]
    fn test_default() {
        assert_eq!(RuntimeConfig::default().stack_size, 0x4000);
    }
}
