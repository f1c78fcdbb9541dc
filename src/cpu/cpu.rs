use crate::{
    bus::Bus,
    config::{RESET_PC, RESET_SP},
    cpu::opcode::Opcode,
    error::EmuError,
};

pub struct CPU<B: Bus> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u16,
    pub pc: u16,
    pub status: u8,
    /// Instructions executed since construction or the last reset.
    pub steps: u64,
    pub bus: B,
}

impl<B: Bus> CPU<B> {
    pub fn new(bus: B) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_SP,
            pc: RESET_PC,
            status: 0,
            steps: 0,
            bus,
        }
    }

    /// Restore the power-on register values. Memory is left alone.
    pub fn reset(&mut self) {
        self.pc = RESET_PC;
        self.sp = RESET_SP;
        self.status = 0;

        self.a = 0;
        self.x = 0;
        self.y = 0;

        self.steps = 0;
    }

    /// Fetch, decode and execute one instruction.
    ///
    /// On error `pc` is put back on the opcode and nothing else has changed.
    pub fn step(&mut self) -> Result<(), EmuError> {
        let pc = self.pc;
        let byte = self.bus.read(u32::from(pc))?;
        let opcode = Opcode::decode(byte).ok_or(EmuError::IllegalOpcode { opcode: byte, pc })?;
        self.pc = pc.wrapping_add(1);

        if let Err(err) = self.execute_opcode(pc, opcode) {
            self.pc = pc;
            return Err(err);
        }
        self.steps += 1;
        Ok(())
    }

    fn fetch_byte(&mut self) -> Result<u8, EmuError> {
        let byte = self.bus.read(u32::from(self.pc))?;
        self.pc = self.pc.wrapping_add(1);
        Ok(byte)
    }

    // Absolute operands are stored high byte first.
    fn fetch_word(&mut self) -> Result<u16, EmuError> {
        let hi = self.fetch_byte()? as u16;
        let lo = self.fetch_byte()? as u16;
        Ok((hi << 8) | lo)
    }

    fn fetch_operand(&mut self, opcode: Opcode) -> Result<u16, EmuError> {
        match opcode.operand_len() {
            0 => Ok(0),
            1 => Ok(self.fetch_byte()? as u16),
            _ => self.fetch_word(),
        }
    }

    fn trace(&self, pc: u16, opcode: Opcode, operand: u16) -> String {
        let bytes = match opcode.operand_len() {
            0 => format!("{:02X}", opcode.byte()),
            1 => format!("{:02X} {:02X}", opcode.byte(), operand),
            _ => format!(
                "{:02X} {:02X} {:02X}",
                opcode.byte(),
                operand >> 8,
                operand & 0xFF
            ),
        };
        format!(
            "{:04X}  {:<8}  {:<10}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:04X}",
            pc,
            bytes,
            opcode.disassemble(operand),
            self.a,
            self.x,
            self.y,
            self.status,
            self.sp
        )
    }

    fn execute_opcode(&mut self, pc: u16, opcode: Opcode) -> Result<(), EmuError> {
        let operand = self.fetch_operand(opcode)?;
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{}", self.trace(pc, opcode, operand));
        }

        match opcode {
            Opcode::Lda => self.a = operand as u8,
            Opcode::Ldx => self.x = operand as u8,
            Opcode::Ldy => self.y = operand as u8,
            Opcode::Sta => self.store_absolute(operand, self.a)?,
            Opcode::Stx => self.store_absolute(operand, self.x)?,
            Opcode::Sty => self.store_absolute(operand, self.y)?,
            Opcode::Jmp => self.pc = operand,
            Opcode::Nop => {}
        }
        Ok(())
    }

    fn store_absolute(&mut self, addr: u16, value: u8) -> Result<(), EmuError> {
        self.bus.write(u32::from(addr), value)
    }
}
