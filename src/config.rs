//! ISA configuration: which standard extensions the decoder accepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Extensions enabled on top of RV32I.
///
/// Zicsr and Zifencei are part of every configuration. `d` implies `f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsaConfig {
    /// Integer multiply/divide.
    pub m: bool,
    /// Single-precision floating point.
    pub f: bool,
    /// Double-precision floating point.
    pub d: bool,
}

impl IsaConfig {
    /// The full RV32G configuration (IMFD + Zicsr + Zifencei).
    #[must_use]
    pub const fn rv32g() -> Self {
        Self {
            m: true,
            f: true,
            d: true,
        }
    }

    /// Base integer ISA only.
    #[must_use]
    pub const fn rv32i() -> Self {
        Self {
            m: false,
            f: false,
            d: false,
        }
    }
}

impl Default for IsaConfig {
    fn default() -> Self {
        Self::rv32g()
    }
}

impl fmt::Display for IsaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::rv32g() {
            return write!(f, "rv32g");
        }
        write!(f, "rv32i")?;
        if self.m {
            write!(f, "m")?;
        }
        if self.f {
            write!(f, "f")?;
        }
        if self.d {
            write!(f, "d")?;
        }
        Ok(())
    }
}

impl FromStr for IsaConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let mut parts = lower.split('_');
        let base = parts.next().unwrap_or_default();

        for ext in parts {
            if ext != "zicsr" && ext != "zifencei" {
                return Err(ConfigError {
                    reason: format!("unsupported extension `{ext}`"),
                });
            }
        }

        let Some(letters) = base.strip_prefix("rv32") else {
            return Err(ConfigError {
                reason: format!("`{s}` does not start with rv32"),
            });
        };

        if letters == "g" {
            return Ok(Self::rv32g());
        }

        let Some(rest) = letters.strip_prefix('i') else {
            return Err(ConfigError {
                reason: format!("`{s}` must start with rv32i or be rv32g"),
            });
        };

        let mut config = Self::rv32i();
        // Letters must appear in canonical order: m, f, d.
        let mut last = 0usize;
        for c in rest.chars() {
            let rank = match c {
                'm' => 1,
                'f' => 2,
                'd' => 3,
                other => {
                    return Err(ConfigError {
                        reason: format!("unsupported extension `{other}`"),
                    });
                }
            };
            if rank <= last {
                return Err(ConfigError {
                    reason: format!("extension `{c}` repeated or out of order"),
                });
            }
            last = rank;
            match c {
                'm' => config.m = true,
                'f' => config.f = true,
                _ => config.d = true,
            }
        }

        if config.d && !config.f {
            return Err(ConfigError {
                reason: "D requires F".to_string(),
            });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_rv32g() {
        assert_eq!(IsaConfig::default(), IsaConfig::rv32g());
    }

    #[test]
    fn test_parse_rv32g() {
        assert_eq!("rv32g".parse::<IsaConfig>().unwrap(), IsaConfig::rv32g());
        assert_eq!("RV32G".parse::<IsaConfig>().unwrap(), IsaConfig::rv32g());
        assert_eq!(
            "rv32imfd_zicsr_zifencei".parse::<IsaConfig>().unwrap(),
            IsaConfig::rv32g()
        );
    }

    #[test]
    fn test_parse_subsets() {
        assert_eq!("rv32i".parse::<IsaConfig>().unwrap(), IsaConfig::rv32i());
        let imf = "rv32imf".parse::<IsaConfig>().unwrap();
        assert!(imf.m && imf.f && !imf.d);
        let im = "rv32im".parse::<IsaConfig>().unwrap();
        assert!(im.m && !im.f && !im.d);
    }

    #[test]
    fn test_parse_rejects_bad_strings() {
        assert!("rv64g".parse::<IsaConfig>().is_err());
        assert!("rv32id".parse::<IsaConfig>().is_err());
        assert!("rv32ima".parse::<IsaConfig>().is_err());
        assert!("rv32ifm".parse::<IsaConfig>().is_err());
        assert!("rv32imm".parse::<IsaConfig>().is_err());
        assert!("rv32m".parse::<IsaConfig>().is_err());
        assert!("rv32i_zba".parse::<IsaConfig>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for s in ["rv32g", "rv32i", "rv32im", "rv32if", "rv32imf", "rv32ifd"] {
            let config: IsaConfig = s.parse().unwrap();
            assert_eq!(config.to_string(), s);
        }
    }
}
