//! Instruction set: one variant per supported opcode byte.
//!
//! Operands follow the opcode. Immediates are one byte; absolute addresses are
//! two bytes, high byte first.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// LDA #imm
    Lda,
    /// LDX #imm
    Ldx,
    /// LDY #imm
    Ldy,
    /// STA addr
    Sta,
    /// STX addr
    Stx,
    /// STY addr
    Sty,
    /// JMP addr
    Jmp,
    Nop,
}

impl Opcode {
    /// Map a fetched byte to an instruction; `None` for anything unsupported.
    pub fn decode(byte: u8) -> Option<Self> {
        match byte {
            0xA9 => Some(Self::Lda),
            0xA2 => Some(Self::Ldx),
            0xA0 => Some(Self::Ldy),
            0x8D => Some(Self::Sta),
            0x8E => Some(Self::Stx),
            0x8C => Some(Self::Sty),
            0x4C => Some(Self::Jmp),
            0xEA => Some(Self::Nop),
            _ => None,
        }
    }

    pub fn byte(self) -> u8 {
        match self {
            Self::Lda => 0xA9,
            Self::Ldx => 0xA2,
            Self::Ldy => 0xA0,
            Self::Sta => 0x8D,
            Self::Stx => 0x8E,
            Self::Sty => 0x8C,
            Self::Jmp => 0x4C,
            Self::Nop => 0xEA,
        }
    }

    /// Operand bytes following the opcode.
    pub fn operand_len(self) -> u16 {
        match self {
            Self::Lda | Self::Ldx | Self::Ldy => 1,
            Self::Sta | Self::Stx | Self::Sty | Self::Jmp => 2,
            Self::Nop => 0,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Jmp => "JMP",
            Self::Nop => "NOP",
        }
    }

    /// Assembly text for this opcode with an already-fetched operand.
    pub fn disassemble(self, operand: u16) -> String {
        match self.operand_len() {
            0 => self.mnemonic().to_string(),
            1 => format!("{} #${:02X}", self.mnemonic(), operand),
            _ => format!("{} ${:04X}", self.mnemonic(), operand),
        }
    }
}
