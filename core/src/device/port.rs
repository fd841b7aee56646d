use crate::device::dcdd::Dcdd88;
use crate::device::disk::DiskImage;
use crate::device::switches::SwitchBank;
use crate::device::terminal::BufferedTerminal;

/// Serial console as seen by the CPU.
///
/// Calls never block: with nothing pending `byte_in` returns 0.
pub trait Terminal {
    /// Next received byte, or 0 when none is pending.
    fn byte_in(&mut self) -> u8;

    /// Transmit one byte.
    fn byte_out(&mut self, value: u8);

    /// True when `byte_in` has a real byte to hand out.
    fn input_ready(&mut self) -> bool {
        false
    }
}

/// The front panel's sense switch bank (upper eight address switches).
pub trait SenseSwitches {
    fn switches_in(&mut self) -> u8;
}

/// Floppy controller port interface: three ports, each with a read and a
/// write function, plus host-side media handling.
pub trait DiskController {
    /// OUT: select (or deselect) a drive.
    fn select(&mut self, value: u8);
    /// IN: drive status.
    fn status(&mut self) -> u8;
    /// OUT: head/step/write-enable command.
    fn function(&mut self, value: u8);
    /// IN: sector position.
    fn sector(&mut self) -> u8;
    /// OUT: next byte of the sector being written.
    fn write_data(&mut self, value: u8);
    /// IN: next byte of the sector being read.
    fn read_data(&mut self) -> u8;

    /// Number of drives attached to the controller.
    fn drive_count(&self) -> usize;

    /// Insert media into `drive`, replacing whatever was there. A drive that
    /// does not exist hands the image back as the error.
    fn mount(
        &mut self,
        drive: usize,
        image: Box<dyn DiskImage>,
    ) -> Result<(), Box<dyn DiskImage>>;

    /// Remove media from `drive`, returning it.
    fn eject(&mut self, drive: usize) -> Option<Box<dyn DiskImage>>;

    /// Deselect everything. Mounted media stays.
    fn reset(&mut self) {}
}

/// The four I/O collaborators bound at reset.
pub struct IoBindings {
    pub terminal: Box<dyn Terminal>,
    pub switches: Box<dyn SenseSwitches>,
    pub disk: Box<dyn DiskController>,
}

impl IoBindings {
    pub fn new(
        terminal: Box<dyn Terminal>,
        switches: Box<dyn SenseSwitches>,
        disk: Box<dyn DiskController>,
    ) -> Self {
        Self {
            terminal,
            switches,
            disk,
        }
    }
}

impl Default for IoBindings {
    /// Detached terminal, switches all off, two empty drives.
    fn default() -> Self {
        Self::new(
            Box::new(BufferedTerminal::new()),
            Box::new(SwitchBank::new(0)),
            Box::new(Dcdd88::new(Dcdd88::DEFAULT_DRIVES)),
        )
    }
}

/// What a port number is wired to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortHandler {
    /// 88-2SIO status (IN) / control (OUT, ignored).
    TerminalStatus,
    /// 88-2SIO data.
    TerminalData,
    /// Front panel sense switches (IN). OUT is ignored.
    SenseSwitches,
    /// 88-DCDD drive select (OUT) / status (IN).
    DiskSelectStatus,
    /// 88-DCDD function (OUT) / sector position (IN).
    DiskFunctionSector,
    /// 88-DCDD write data (OUT) / read data (IN).
    DiskData,
}

/// 2SIO status bits.
const SIO_RX_READY: u8 = 0x01;
const SIO_TX_READY: u8 = 0x02;

/// Routes IN/OUT by exact port number through a 256-entry handler table.
///
/// # Default Altair map
///
/// | Port | IN             | OUT            |
/// |------|----------------|----------------|
/// | 0x08 | disk status    | disk select    |
/// | 0x09 | disk sector    | disk function  |
/// | 0x0A | disk read data | disk write data|
/// | 0x10 | 2SIO status    | 2SIO control   |
/// | 0x11 | 2SIO data in   | 2SIO data out  |
/// | 0xFF | sense switches | (ignored)      |
pub struct PortDispatcher {
    handlers: [Option<PortHandler>; 256],
    io: IoBindings,
}

impl PortDispatcher {
    pub const DISK_SELECT_STATUS: u8 = 0x08;
    pub const DISK_FUNCTION_SECTOR: u8 = 0x09;
    pub const DISK_DATA: u8 = 0x0A;
    pub const TERMINAL_STATUS: u8 = 0x10;
    pub const TERMINAL_DATA: u8 = 0x11;
    pub const SENSE_SWITCHES: u8 = 0xFF;

    /// Dispatcher with no ports wired.
    pub fn new(io: IoBindings) -> Self {
        Self {
            handlers: [None; 256],
            io,
        }
    }

    /// Dispatcher wired with the standard Altair port map.
    pub fn altair(io: IoBindings) -> Self {
        let mut ports = Self::new(io);
        ports.register(Self::DISK_SELECT_STATUS, PortHandler::DiskSelectStatus);
        ports.register(Self::DISK_FUNCTION_SECTOR, PortHandler::DiskFunctionSector);
        ports.register(Self::DISK_DATA, PortHandler::DiskData);
        ports.register(Self::TERMINAL_STATUS, PortHandler::TerminalStatus);
        ports.register(Self::TERMINAL_DATA, PortHandler::TerminalData);
        ports.register(Self::SENSE_SWITCHES, PortHandler::SenseSwitches);
        ports
    }

    /// Wire `port` to `handler`, returning what it was wired to before.
    pub fn register(&mut self, port: u8, handler: PortHandler) -> Option<PortHandler> {
        self.handlers[port as usize].replace(handler)
    }

    pub fn unregister(&mut self, port: u8) -> Option<PortHandler> {
        self.handlers[port as usize].take()
    }

    pub fn handler(&self, port: u8) -> Option<PortHandler> {
        self.handlers[port as usize]
    }

    /// Replace all bound collaborators; the port table is kept.
    pub fn bind(&mut self, io: IoBindings) -> IoBindings {
        std::mem::replace(&mut self.io, io)
    }

    pub fn terminal_mut(&mut self) -> &mut dyn Terminal {
        self.io.terminal.as_mut()
    }

    pub fn switches_mut(&mut self) -> &mut dyn SenseSwitches {
        self.io.switches.as_mut()
    }

    pub fn disk_mut(&mut self) -> &mut dyn DiskController {
        self.io.disk.as_mut()
    }

    /// IN. Unwired ports read 0.
    pub fn read(&mut self, port: u8) -> u8 {
        let Some(handler) = self.handlers[port as usize] else {
            return 0;
        };
        match handler {
            PortHandler::TerminalStatus => {
                let rx = if self.io.terminal.input_ready() { SIO_RX_READY } else { 0 };
                SIO_TX_READY | rx
            }
            PortHandler::TerminalData => self.io.terminal.byte_in(),
            PortHandler::SenseSwitches => self.io.switches.switches_in(),
            PortHandler::DiskSelectStatus => self.io.disk.status(),
            PortHandler::DiskFunctionSector => self.io.disk.sector(),
            PortHandler::DiskData => self.io.disk.read_data(),
        }
    }

    /// OUT. Unwired ports ignore the write.
    pub fn write(&mut self, port: u8, data: u8) {
        let Some(handler) = self.handlers[port as usize] else {
            return;
        };
        match handler {
            PortHandler::TerminalStatus | PortHandler::SenseSwitches => {}
            PortHandler::TerminalData => self.io.terminal.byte_out(data),
            PortHandler::DiskSelectStatus => self.io.disk.select(data),
            PortHandler::DiskFunctionSector => self.io.disk.function(data),
            PortHandler::DiskData => self.io.disk.write_data(data),
        }
    }
}
