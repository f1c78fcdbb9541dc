use crate::{
    bus::{Bus, MemoryBus},
    cpu::cpu::CPU,
    error::EmuError,
};

struct TestBus {
    mem: [u8; 65536],
    reads: usize,
}

impl TestBus {
    fn new() -> Self {
        Self {
            mem: [0; 65536],
            reads: 0,
        }
    }
}

impl Bus for TestBus {
    fn read(&mut self, addr: u32) -> Result<u8, EmuError> {
        self.reads += 1;
        self.mem
            .get(addr as usize)
            .copied()
            .ok_or(EmuError::AddressRange {
                addr,
                len: 1,
                size: 65536,
            })
    }

    fn write(&mut self, addr: u32, data: u8) -> Result<(), EmuError> {
        match self.mem.get_mut(addr as usize) {
            Some(slot) => {
                *slot = data;
                Ok(())
            }
            None => Err(EmuError::AddressRange {
                addr,
                len: 1,
                size: 65536,
            }),
        }
    }

    fn size(&self) -> usize {
        self.mem.len()
    }
}

/// Bus whose writes always fail, for checking that a store is all-or-nothing.
struct ReadOnlyBus(TestBus);

impl Bus for ReadOnlyBus {
    fn read(&mut self, addr: u32) -> Result<u8, EmuError> {
        self.0.read(addr)
    }

    fn write(&mut self, addr: u32, _data: u8) -> Result<(), EmuError> {
        Err(EmuError::AddressRange {
            addr,
            len: 1,
            size: 0,
        })
    }

    fn size(&self) -> usize {
        self.0.size()
    }
}

fn cpu_with_program(program: &[u8]) -> CPU<TestBus> {
    let mut bus = TestBus::new();
    bus.mem[0x8000..0x8000 + program.len()].copy_from_slice(program);
    CPU::new(bus)
}

#[test]
fn power_on_registers() {
    let cpu = CPU::new(TestBus::new());
    assert_eq!(cpu.pc, 0x8000);
    assert_eq!(cpu.sp, 0x0100);
    assert_eq!((cpu.a, cpu.x, cpu.y, cpu.status), (0, 0, 0, 0));
}

#[test]
fn lda_immediate_loads_value() {
    let mut cpu = cpu_with_program(&[0xA9, 0x42]); // LDA #$42

    cpu.step().unwrap();

    assert_eq!(cpu.a, 0x42);
    assert_eq!(cpu.pc, 0x8002);
}

#[test]
fn lda_leaves_status_alone() {
    let mut cpu = cpu_with_program(&[0xA9, 0x00, 0xA9, 0x80]);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.status, 0);
}

#[test]
fn sta_writes_to_memory() {
    let mut cpu = cpu_with_program(&[
        0xA9, 0x05, // LDA #$05
        0x8D, 0x02, 0x00, // STA $0200
    ]);

    cpu.step().unwrap(); // LDA
    cpu.step().unwrap(); // STA

    assert_eq!(cpu.bus.read(0x0200).unwrap(), 5);
    assert_eq!(cpu.pc, 0x8005);
}

#[test]
fn sta_on_memory_bus() {
    let mut bus = MemoryBus::new();
    bus.load_block(0x8000, &[0xA9, 0x05, 0x8D, 0x02, 0x00]).unwrap();
    let mut cpu = CPU::new(bus);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.bus.read(0x0200).unwrap(), 5);
}

#[test]
fn sta_operand_00_02_stores_to_0002() {
    // high byte first: $00 $02 is address $0002, not $0200
    let mut cpu = cpu_with_program(&[0xA9, 0x05, 0x8D, 0x00, 0x02]);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.bus.mem[0x0002], 5);
    assert_eq!(cpu.bus.mem[0x0200], 0);
    assert_eq!(cpu.pc, 0x8005);
}

#[test]
fn absolute_operands_are_high_byte_first() {
    let mut cpu = cpu_with_program(&[
        0xA9, 0x77, // LDA #$77
        0x8D, 0x12, 0x34, // STA $1234
    ]);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.bus.mem[0x1234], 0x77);
    assert_eq!(cpu.bus.mem[0x3412], 0x00);
}

#[test]
fn jmp_changes_program_counter() {
    let mut cpu = cpu_with_program(&[0x4C, 0x90, 0x00]); // JMP $9000
    cpu.bus.mem[0x9000] = 0xA9; // LDA #$55
    cpu.bus.mem[0x9001] = 0x55;

    cpu.step().unwrap(); // JMP
    assert_eq!(cpu.pc, 0x9000);
    cpu.step().unwrap(); // LDA

    assert_eq!(cpu.a, 0x55);
}

#[test]
fn jmp_to_self_loops_forever() {
    let mut cpu = cpu_with_program(&[0x4C, 0x80, 0x00]); // JMP $8000

    cpu.step().unwrap();
    assert_eq!(cpu.pc, 0x8000);

    for _ in 0..1000 {
        cpu.step().unwrap();
    }
    assert_eq!(cpu.pc, 0x8000);
    assert_eq!((cpu.a, cpu.x, cpu.y, cpu.sp, cpu.status), (0, 0, 0, 0x0100, 0));
    assert_eq!(cpu.steps, 1001);
}

#[test]
fn index_register_loads_and_stores() {
    let mut cpu = cpu_with_program(&[
        0xA2, 0x11, // LDX #$11
        0xA0, 0x22, // LDY #$22
        0x8E, 0x03, 0x00, // STX $0300
        0x8C, 0x03, 0x01, // STY $0301
        0xEA, // NOP
    ]);

    for _ in 0..5 {
        cpu.step().unwrap();
    }

    assert_eq!((cpu.x, cpu.y), (0x11, 0x22));
    assert_eq!(&cpu.bus.mem[0x0300..0x0302], &[0x11, 0x22]);
    assert_eq!(cpu.pc, 0x800B);
}

#[test]
fn illegal_opcode_is_reported_without_side_effects() {
    let mut cpu = cpu_with_program(&[0xFF]);
    cpu.a = 0x12;

    let err = cpu.step().unwrap_err();

    assert!(matches!(
        err,
        EmuError::IllegalOpcode {
            opcode: 0xFF,
            pc: 0x8000
        }
    ));
    assert_eq!(cpu.pc, 0x8000);
    assert_eq!((cpu.a, cpu.x, cpu.y, cpu.sp, cpu.status), (0x12, 0, 0, 0x0100, 0));
    assert_eq!(cpu.steps, 0);
    assert!(cpu.bus.mem[..0x8000].iter().all(|&b| b == 0));
}

#[test]
fn illegal_opcode_after_valid_code_reports_its_own_pc() {
    let mut cpu = cpu_with_program(&[0xA9, 0x01, 0x02]);

    cpu.step().unwrap();
    let err = cpu.step().unwrap_err();

    assert!(matches!(
        err,
        EmuError::IllegalOpcode {
            opcode: 0x02,
            pc: 0x8002
        }
    ));
}

#[test]
fn failed_store_restores_pc() {
    let mut bus = TestBus::new();
    bus.mem[0x8000..0x8003].copy_from_slice(&[0x8D, 0x00, 0x02]);
    let mut cpu = CPU::new(ReadOnlyBus(bus));

    assert!(cpu.step().is_err());
    assert_eq!(cpu.pc, 0x8000);
    assert_eq!(cpu.steps, 0);
}

#[test]
fn reset_restores_registers_but_not_memory() {
    let mut cpu = cpu_with_program(&[0xA9, 0x05, 0x8D, 0x02, 0x00]);
    cpu.step().unwrap();
    cpu.step().unwrap();

    cpu.reset();

    assert_eq!(cpu.pc, 0x8000);
    assert_eq!(cpu.a, 0);
    assert_eq!(cpu.steps, 0);
    assert_eq!(cpu.bus.mem[0x0200], 5);
}

#[test]
fn execution_is_deterministic() {
    let program = [
        0xA9, 0x05, 0x8D, 0x00, 0x02, 0xA2, 0x07, 0x8E, 0x01, 0x02, 0x4C, 0x80, 0x00,
    ];
    let mut first = cpu_with_program(&program);
    let mut second = cpu_with_program(&program);

    for _ in 0..250 {
        first.step().unwrap();
        second.step().unwrap();
        assert_eq!(first.pc, second.pc);
    }

    assert_eq!(
        (first.a, first.x, first.y, first.sp, first.status, first.steps),
        (second.a, second.x, second.y, second.sp, second.status, second.steps)
    );
    assert_eq!(first.bus.mem[..], second.bus.mem[..]);
}

#[test]
fn every_step_fetches_opcode_and_operands() {
    let mut cpu = cpu_with_program(&[0xA9, 0x01, 0xEA, 0x4C, 0x80, 0x00]);

    cpu.step().unwrap(); // 2 reads
    cpu.step().unwrap(); // 1 read
    cpu.step().unwrap(); // 3 reads

    assert_eq!(cpu.bus.reads, 6);
}
