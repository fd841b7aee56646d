//! MITS Altair 8800: 8080 CPU, up to 64K of RAM, 88-2SIO serial console,
//! 88-DCDD floppy controller and the front panel.

use altair_core::core::{Bus, Machine, Memory};
use altair_core::cpu::{Cpu, CpuStateTrait, I8080, I8080State, StepResult};
use altair_core::device::{DiskImage, IoBindings, PortDispatcher};

use crate::config::MachineConfig;
use crate::error::MachineError;
use crate::image::{FileDisk, load_into, read_image};
use crate::registry::MachineEntry;

/// Memory plus I/O, as seen by the CPU.
pub struct AltairBus {
    pub memory: Memory,
    pub ports: PortDispatcher,
}

impl Bus for AltairBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.memory.read8(addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.memory.write8(addr, data);
    }

    fn io_read(&mut self, port: u8) -> u8 {
        self.ports.read(port)
    }

    fn io_write(&mut self, port: u8, data: u8) {
        self.ports.write(port, data);
    }
}

pub struct Altair8800System {
    pub cpu: I8080,
    pub bus: AltairBus,
    start_address: u16,
}

impl Altair8800System {
    /// A machine with `memory_size` bytes of RAM and the standard port map.
    pub fn new(memory_size: usize, io: IoBindings) -> Self {
        Self {
            cpu: I8080::new(),
            bus: AltairBus {
                memory: Memory::with_size(memory_size),
                ports: PortDispatcher::altair(io),
            },
            start_address: 0,
        }
    }

    /// Build a machine from `config`: load ROM images, mount disks and
    /// EXAMINE the start address. See [`MachineConfig::io_bindings`] for
    /// collaborators matching the config.
    pub fn from_config(config: &MachineConfig, io: IoBindings) -> Result<Self, MachineError> {
        config.validate()?;
        let mut sys = Self::new(config.memory_size, io);

        for rom in &config.rom {
            let data = read_image(&rom.path)?;
            let name = rom.path.display().to_string();
            load_into(&mut sys.bus.memory, &name, rom.address, &data)?;
        }
        for disk in &config.disk {
            sys.mount_disk(disk.drive, Box::new(FileDisk::open(&disk.path)?))?;
        }

        sys.start_address = config.start_address;
        sys.examine(config.start_address);
        Ok(sys)
    }

    /// Power-on reset binding a fresh set of I/O collaborators.
    pub fn reset_with(&mut self, io: IoBindings) {
        self.bus.ports.bind(io);
        self.reset();
    }

    pub fn start_address(&self) -> u16 {
        self.start_address
    }

    pub fn memory(&self) -> &Memory {
        &self.bus.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.bus.memory
    }

    pub fn ports_mut(&mut self) -> &mut PortDispatcher {
        &mut self.bus.ports
    }

    pub fn mount_disk(&mut self, drive: usize, image: Box<dyn DiskImage>) -> Result<(), MachineError> {
        let disk = self.bus.ports.disk_mut();
        let count = disk.drive_count();
        disk.mount(drive, image)
            .map_err(|_| MachineError::DriveOutOfRange { drive, count })
    }

    // --- Front panel ---

    pub fn deposit(&mut self, data: u8) {
        self.cpu.deposit(&mut self.bus, data);
    }

    pub fn deposit_next(&mut self, data: u8) {
        self.cpu.deposit_next(&mut self.bus, data);
    }

    pub fn examine_next(&mut self) {
        self.cpu.examine_next(&mut self.bus);
    }

    /// Address and data bus lights.
    pub fn panel_lights(&self) -> (u16, u8) {
        (self.cpu.address_bus, self.cpu.data_bus)
    }
}

impl Machine for Altair8800System {
    fn name(&self) -> &'static str {
        "altair8800"
    }

    fn reset(&mut self) {
        self.cpu.reset();
        self.bus.ports.disk_mut().reset();
    }

    fn step(&mut self) -> StepResult {
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
    Ok(Box::new(Altair8800System::from_config(config, io)?))
}

inventory::submit! {
    MachineEntry::new(
        "altair8800",
        "MITS Altair 8800 with 88-2SIO console and 88-DCDD floppy",
        create_machine,
    )
}
