//! Code extraction from RISC-V ELF files.

use goblin::elf::Elf;
use goblin::elf::section_header::{SHF_EXECINSTR, SHT_NOBITS};

/// `e_flags` bit marking objects that contain compressed instructions.
const EF_RISCV_RVC: u32 = 0x1;

/// Error type for ELF loading.
#[derive(Debug, Clone)]
pub struct ElfError {
    /// Description of the error.
    pub reason: String,
}

impl std::fmt::Display for ElfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ELF load error: {}", self.reason)
    }
}

impl std::error::Error for ElfError {}

/// One 32-bit word of code and its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeWord {
    /// Virtual address.
    pub addr: u32,
    /// Instruction word.
    pub word: u32,
}

/// Executable content of an ELF.
#[derive(Debug, Clone)]
pub struct CodeImage {
    /// Entry point.
    pub entry: u32,
    /// The object was built with compressed instructions; 32-bit slicing
    /// will misalign around them.
    pub rvc: bool,
    /// Words of every executable section, in section order.
    pub words: Vec<CodeWord>,
}

/// Collect the 32-bit words of every executable section.
///
/// # Errors
///
/// Returns an error if the ELF is invalid, not little-endian 32-bit RISC-V,
/// or a section lies outside the file.
pub fn load_code(elf_bytes: &[u8]) -> Result<CodeImage, ElfError> {
    let elf = Elf::parse(elf_bytes).map_err(|e| ElfError {
        reason: format!("Failed to parse ELF: {e}"),
    })?;

    validate_elf_header(&elf)?;

    let entry = u32::try_from(elf.entry).map_err(|_| ElfError {
        reason: format!("Entry point {:#x} doesn't fit in u32", elf.entry),
    })?;

    let rvc = elf.header.e_flags & EF_RISCV_RVC != 0;
    if rvc {
        log::warn!(
            "ELF is flagged RVC; compressed instructions must be expanded before decode"
        );
    }

    let mut words = Vec::new();
    for shdr in &elf.section_headers {
        if shdr.sh_flags & u64::from(SHF_EXECINSTR) == 0 || shdr.sh_type == SHT_NOBITS {
            continue;
        }
        let name = elf.shdr_strtab.get_at(shdr.sh_name).unwrap_or("?");
        let data = section_bytes(elf_bytes, shdr)?;
        let base = u32::try_from(shdr.sh_addr).map_err(|_| ElfError {
            reason: format!(
                "Section {name} address {:#x} doesn't fit in u32",
                shdr.sh_addr
            ),
        })?;

        if data.len() % 4 != 0 {
            log::warn!(
                "section {name} length {} is not a multiple of 4",
                data.len()
            );
        }

        log::debug!("section {name}: {} bytes at {base:#010x}", data.len());
        for (offset, chunk) in (0u32..).step_by(4).zip(data.chunks_exact(4)) {
            words.push(CodeWord {
                addr: base.wrapping_add(offset),
                word: u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
            });
        }
    }

    if words.is_empty() {
        return Err(ElfError {
            reason: "No executable sections".to_string(),
        });
    }

    Ok(CodeImage { entry, rvc, words })
}

/// Validate the ELF header for RISC-V 32-bit.
fn validate_elf_header(elf: &Elf) -> Result<(), ElfError> {
    // Check machine type (RISC-V = 243)
    if elf.header.e_machine != goblin::elf::header::EM_RISCV {
        return Err(ElfError {
            reason: format!(
                "Expected RISC-V ELF (machine {}), got machine type {}",
                goblin::elf::header::EM_RISCV,
                elf.header.e_machine
            ),
        });
    }

    if elf.is_64 {
        return Err(ElfError {
            reason: "Expected 32-bit ELF, got 64-bit".to_string(),
        });
    }

    if !elf.little_endian {
        return Err(ElfError {
            reason: "Expected little-endian ELF".to_string(),
        });
    }

    Ok(())
}

fn section_bytes<'a>(
    elf_bytes: &'a [u8],
    shdr: &goblin::elf::SectionHeader,
) -> Result<&'a [u8], ElfError> {
    let offset = usize::try_from(shdr.sh_offset).map_err(|_| ElfError {
        reason: format!("Section offset {} too large", shdr.sh_offset),
    })?;
    let size = usize::try_from(shdr.sh_size).map_err(|_| ElfError {
        reason: format!("Section size {} too large", shdr.sh_size),
    })?;

    offset
        .checked_add(size)
        .and_then(|end| elf_bytes.get(offset..end))
        .ok_or_else(|| ElfError {
            reason: format!(
                "Section data at offset {offset} size {size} exceeds ELF size {}",
                elf_bytes.len()
            ),
        })
}

/// Minimal little-endian ELF32 image with a single `.text` section.
#[cfg(test)]
pub(crate) fn build_test_elf(machine: u16, e_flags: u32, text_addr: u32, code: &[u32]) -> Vec<u8> {
    const EHDR: u32 = 52;
    const SHENT: u32 = 40;
    let shstrtab: &[u8] = b"\0.text\0.shstrtab\0";

    let text_len = u32::try_from(code.len() * 4).unwrap_or(u32::MAX);
    let strtab_off = EHDR + text_len;
    let strtab_len = u32::try_from(shstrtab.len()).unwrap_or(0);
    let shoff = (strtab_off + strtab_len + 3) & !3;

    let mut out = Vec::new();
    out.extend_from_slice(&[0x7F, b'E', b'L', b'F', 1, 1, 1, 0]);
    out.extend_from_slice(&[0; 8]);
    out.extend_from_slice(&2u16.to_le_bytes()); // ET_EXEC
    out.extend_from_slice(&machine.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&text_addr.to_le_bytes()); // entry
    out.extend_from_slice(&0u32.to_le_bytes()); // phoff
    out.extend_from_slice(&shoff.to_le_bytes());
    out.extend_from_slice(&e_flags.to_le_bytes());
    out.extend_from_slice(&52u16.to_le_bytes());
    out.extend_from_slice(&32u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // phnum
    out.extend_from_slice(&40u16.to_le_bytes());
    out.extend_from_slice(&3u16.to_le_bytes()); // shnum
    out.extend_from_slice(&2u16.to_le_bytes()); // shstrndx

    for word in code {
        out.extend_from_slice(&word.to_le_bytes());
    }
    out.extend_from_slice(shstrtab);
    out.resize(shoff as usize, 0);

    let mut section = |name: u32, kind: u32, flags: u32, addr: u32, offset: u32, size: u32| {
        for field in [name, kind, flags, addr, offset, size, 0, 0, 4, 0] {
            out.extend_from_slice(&field.to_le_bytes());
        }
    };
    section(0, 0, 0, 0, 0, 0);
    // PROGBITS, ALLOC | EXECINSTR
    section(1, 1, 0x6, text_addr, EHDR, text_len);
    // STRTAB
    section(7, 3, 0, 0, strtab_off, strtab_len);

    debug_assert_eq!(out.len(), (shoff + 3 * SHENT) as usize);
    out
}
