//! Error types for the decode stage.

use std::fmt;

use serde::Serialize;

/// Standard extension an encoding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Extension {
    /// Integer multiply/divide.
    M,
    /// Single-precision floating point.
    F,
    /// Double-precision floating point.
    D,
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extension::M => write!(f, "M"),
            Extension::F => write!(f, "F"),
            Extension::D => write!(f, "D"),
        }
    }
}

/// Reasons an instruction word is illegal.
///
/// The decoder never fails outward: [`crate::decode`] folds every variant into
/// `illegal = true`. The reason is kept for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Opcode is not part of RV32G.
    UnknownOpcode {
        /// The 7-bit opcode.
        opcode: u8,
    },
    /// funct3/funct7 (or an rs2/fmt sub-selector) is not defined for the opcode.
    UndefinedFunctSelector {
        /// The 7-bit opcode.
        opcode: u8,
        /// The 3-bit funct3 field.
        funct3: u8,
        /// The 7-bit funct7 field.
        funct7: u8,
    },
    /// The encoding is valid RV32G but its extension is turned off.
    ExtensionDisabled {
        /// The disabled extension.
        extension: Extension,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnknownOpcode { opcode } => {
                write!(f, "unknown opcode {opcode:#09b}")
            }
            DecodeError::UndefinedFunctSelector {
                opcode,
                funct3,
                funct7,
            } => write!(
                f,
                "undefined selector funct3={funct3:#05b} funct7={funct7:#09b} for opcode {opcode:#09b}"
            ),
            DecodeError::ExtensionDisabled { extension } => {
                write!(f, "{extension} extension is disabled")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Error for malformed ISA strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Description of the error.
    pub reason: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid ISA string: {}", self.reason)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unknown_opcode() {
        let err = DecodeError::UnknownOpcode { opcode: 0x7F };
        assert_eq!(err.to_string(), "unknown opcode 0b1111111");
    }

    #[test]
    fn test_display_selector() {
        let err = DecodeError::UndefinedFunctSelector {
            opcode: 0b011_0011,
            funct3: 0,
            funct7: 0b000_0010,
        };
        let text = err.to_string();
        assert!(text.contains("funct3=0b000"));
        assert!(text.contains("funct7=0b0000010"));
        assert!(text.contains("opcode 0b0110011"));
    }

    #[test]
    fn test_display_extension() {
        let err = DecodeError::ExtensionDisabled {
            extension: Extension::D,
        };
        assert_eq!(err.to_string(), "D extension is disabled");
    }
}
