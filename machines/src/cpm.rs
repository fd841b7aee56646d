//! Minimal CP/M environment for running `.COM` programs.
//!
//! Only what CPU exerciser programs need: the program is loaded at the start
//! of the TPA, BDOS console calls are serviced by the host, and a jump to
//! warm boot (address 0) halts the machine.
//!
//! Page zero:
//!
//! | Addr   | Contents                          |
//! |--------|-----------------------------------|
//! | 0x0000 | HLT (warm boot ends the run)      |
//! | 0x0005 | RET (BDOS entry, trapped first)   |
//! | 0x0006 | top of TPA, little-endian         |

use altair_core::core::{Machine, Memory};
use altair_core::cpu::{Cpu, CpuStateTrait, I8080, I8080State, StepResult};
use altair_core::device::{IoBindings, PortDispatcher};
use tracing::debug;

use crate::altair8800::AltairBus;
use crate::config::MachineConfig;
use crate::error::MachineError;
use crate::image::{load_into, read_image};
use crate::registry::MachineEntry;

/// Start of the transient program area.
pub const TPA_START: u16 = 0x0100;
/// BDOS call vector.
pub const BDOS_ENTRY: u16 = 0x0005;
/// First byte above the TPA; the stack grows down from here.
pub const TPA_TOP: u16 = 0xFE00;

const HLT: u8 = 0x76;
const RET: u8 = 0xC9;

/// BDOS function numbers (register C).
const C_WRITE: u8 = 2;
const C_WRITESTR: u8 = 9;

pub struct CpmSystem {
    pub cpu: I8080,
    pub bus: AltairBus,
}

impl CpmSystem {
    /// A 64K CP/M machine whose console is the terminal in `io`.
    pub fn new(io: IoBindings) -> Self {
        let mut sys = Self {
            cpu: I8080::new(),
            bus: AltairBus {
                memory: Memory::new(),
                ports: PortDispatcher::altair(io),
            },
        };
        sys.reset();
        sys
    }

    /// Load a `.COM` image into the TPA.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), MachineError> {
        if TPA_START as usize + program.len() > TPA_TOP as usize {
            return Err(MachineError::ImageTooLarge {
                name: "program".to_string(),
                len: program.len(),
                address: TPA_START,
                memory_size: TPA_TOP as usize,
            });
        }
        load_into(&mut self.bus.memory, "program", TPA_START, program)
    }

    pub fn memory(&self) -> &Memory {
        &self.bus.memory
    }

    fn install_page_zero(&mut self) {
        let memory = &mut self.bus.memory;
        memory.write8(0x0000, HLT);
        memory.write8(BDOS_ENTRY, RET);
        memory.write16(BDOS_ENTRY + 1, TPA_TOP);
    }

    /// Service the BDOS call the CPU is about to make. The RET at the entry
    /// point then returns to the caller.
    fn bdos(&mut self) {
        let function = self.cpu.regs.bc.low();
        match function {
            C_WRITE => {
                let ch = self.cpu.regs.de.low();
                self.bus.ports.terminal_mut().byte_out(ch);
            }
            C_WRITESTR => {
                let mut addr = self.cpu.regs.de.get();
                // Bounded by the address space in case the '$' is missing.
                for _ in 0..=u16::MAX {
                    let ch = self.bus.memory.read8(addr);
                    if ch == b'$' {
                        break;
                    }
                    self.bus.ports.terminal_mut().byte_out(ch);
                    addr = addr.wrapping_add(1);
                }
            }
            _ => debug!("bdos: unsupported function {function}"),
        }
    }
}

impl Machine for CpmSystem {
    fn name(&self) -> &'static str {
        "cpm"
    }

    /// Restart the loaded program from the TPA with an empty stack whose
    /// return address is warm boot.
    fn reset(&mut self) {
        self.cpu.reset();
        self.bus.ports.disk_mut().reset();
        self.install_page_zero();
        self.bus.memory.write16(TPA_TOP - 2, 0x0000);
        self.cpu.regs.sp = TPA_TOP - 2;
        self.cpu.examine(&mut self.bus, TPA_START);
    }

    fn step(&mut self) -> StepResult {
        if self.cpu.regs.pc == BDOS_ENTRY && !self.cpu.halted {
            self.bdos();
        }
        self.cpu.step(&mut self.bus)
    }

    fn load(&mut self, addr: u16, data: &[u8]) {
        self.bus.memory.load(addr, data);
    }

    fn examine(&mut self, addr: u16) {
        self.cpu.examine(&mut self.bus, addr);
    }

    fn cpu_state(&self) -> I8080State {
        self.cpu.snapshot()
    }
}

fn create_machine(
    config: &MachineConfig,
    io: IoBindings,
) -> Result<Box<dyn Machine>, MachineError> {
    let path = config.program.as_ref().ok_or(MachineError::MissingProgram("cpm"))?;
    let program = read_image(path)?;
    let mut sys = CpmSystem::new(io);
    sys.load_program(&program)?;
    Ok(Box::new(sys))
}

inventory::submit! {
    MachineEntry::new(
        "cpm",
        "CP/M .COM runner with host BDOS console calls (CPU exercisers)",
        create_machine,
    )
}
