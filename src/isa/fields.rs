//! Fixed bit-range extraction from a 32-bit instruction word.

/// Raw fields of an instruction word.
///
/// Every 32-bit pattern extracts; whether the fields mean anything is decided
/// by the classifier and legality checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fields {
    /// bits[6:0]
    pub opcode: u8,
    /// bits[11:7]
    pub rd: u8,
    /// bits[14:12]
    pub funct3: u8,
    /// bits[19:15]
    pub rs1: u8,
    /// bits[24:20]
    pub rs2: u8,
    /// bits[31:25]
    pub funct7: u8,
    /// bits[31:27], third source of fused multiply-add.
    pub rs3: u8,
}

impl Fields {
    /// Split `word` into its fixed fields.
    #[allow(clippy::cast_possible_truncation)] // every field is masked first
    #[must_use]
    pub const fn extract(word: u32) -> Self {
        Self {
            opcode: (word & 0x7F) as u8,
            rd: ((word >> 7) & 0x1F) as u8,
            funct3: ((word >> 12) & 0x07) as u8,
            rs1: ((word >> 15) & 0x1F) as u8,
            rs2: ((word >> 20) & 0x1F) as u8,
            funct7: ((word >> 25) & 0x7F) as u8,
            rs3: ((word >> 27) & 0x1F) as u8,
        }
    }

    /// F/D format selector, bits[26:25] (low two bits of funct7).
    #[must_use]
    pub const fn fmt(self) -> u8 {
        self.funct7 & 0b11
    }

    /// FP operation selector, bits[31:27] (high five bits of funct7).
    #[must_use]
    pub const fn funct5(self) -> u8 {
        self.funct7 >> 2
    }
}
