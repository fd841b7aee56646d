//! MITS 88-DCDD floppy disk controller
//!
//! Up to 16 drives of 8" hard-sectored media (77 tracks x 32 sectors x 137
//! bytes). The CPU sees three ports:
//!
//! | Port | IN                      | OUT                  |
//! |------|-------------------------|----------------------|
//! | 0x08 | drive status            | drive select         |
//! | 0x09 | sector position         | function (head/step) |
//! | 0x0A | read data               | write data           |
//!
//! Status bits are active-low: a cleared bit means the condition is true.
//! With no drive selected, or no media in the selected drive, status reads
//! 0xFF.
//!
//! A transfer follows the sector query: with the head loaded, IN 0x09 reports
//! the sector now under the head and arms the byte cursor, after which 137
//! reads (or, with write enabled, 137 writes) move the whole sector. With the
//! head unloaded the query only reports position. Stepping the head cancels
//! any transfer in progress.
use tracing::debug;

use crate::device::disk::{DiskImage, SECTOR_SIZE, SECTORS_PER_TRACK, TRACKS, sector_offset};
use crate::device::port::DiskController;

/// Active-low status bits (port 0x08 IN).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    /// Enter new write data.
    WriteReady = 0x01,
    /// Head movement allowed.
    MoveHead = 0x02,
    /// Head loaded.
    Head = 0x04,
    /// Interrupts enabled.
    InterruptsEnabled = 0x20,
    /// Head at track 0.
    Track0 = 0x40,
    /// New read data available.
    ReadReady = 0x80,
}

/// Function bits (port 0x09 OUT).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Function {
    StepIn = 0x01,
    StepOut = 0x02,
    HeadLoad = 0x04,
    HeadUnload = 0x08,
    InterruptEnable = 0x10,
    InterruptDisable = 0x20,
    HeadCurrentSwitch = 0x40,
    WriteEnable = 0x80,
}

/// Controller sequencing state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiskState {
    /// No drive selected.
    Idle,
    /// Drive selected, no sector positioned.
    Selected,
    /// Head moved; waiting for a sector query.
    Seeking,
    /// Sector positioned; data transfer in progress.
    ReadyForIo,
}

/// Status byte for a selected, empty-head drive at track 0.
pub const STATUS_READY: u8 = 0xBD;
/// Status byte with nothing selected or no media.
pub const STATUS_NO_MEDIA: u8 = 0xFF;

const DESELECT: u8 = 0x80;
const DRIVE_MASK: u8 = 0x0F;
const MAX_DRIVES: usize = 16;

/// Sector-position byte framing: bit 0 low means "sector true", bits 1-5
/// carry the sector number, bits 6-7 read high.
const SECTOR_FRAMING: u8 = 0xC0;

#[derive(Default)]
struct Drive {
    media: Option<Box<dyn DiskImage>>,
    track: usize,
    /// Next sector to pass under the head.
    sector: usize,
    head_loaded: bool,
}

impl Drive {
    fn rewind(&mut self) {
        self.track = 0;
        self.sector = 0;
        self.head_loaded = false;
    }
}

pub struct Dcdd88 {
    drives: Vec<Drive>,
    selected: Option<usize>,
    state: DiskState,
    /// Linear offset of the sector being transferred.
    sector_base: usize,
    /// Byte cursor within that sector, 0..=SECTOR_SIZE.
    cursor: usize,
    write_enabled: bool,
    interrupts_enabled: bool,
}

impl Dcdd88 {
    pub const DEFAULT_DRIVES: usize = 2;

    /// Controller with `drive_count` empty drives (clamped to 1..=16).
    pub fn new(drive_count: usize) -> Self {
        let count = drive_count.clamp(1, MAX_DRIVES);
        Self {
            drives: (0..count).map(|_| Drive::default()).collect(),
            selected: None,
            state: DiskState::Idle,
            sector_base: 0,
            cursor: 0,
            write_enabled: false,
            interrupts_enabled: false,
        }
    }

    pub fn state(&self) -> DiskState {
        self.state
    }

    pub fn selected_drive(&self) -> Option<usize> {
        self.selected
    }

    /// Head position of `drive`, if it exists.
    pub fn track(&self, drive: usize) -> Option<usize> {
        self.drives.get(drive).map(|d| d.track)
    }

    pub fn has_media(&self, drive: usize) -> bool {
        self.drives.get(drive).is_some_and(|d| d.media.is_some())
    }

    /// Selected drive, only if it holds media.
    fn loaded_drive(&mut self) -> Option<&mut Drive> {
        let index = self.selected?;
        self.drives.get_mut(index).filter(|d| d.media.is_some())
    }

    /// Positioned on a sector with the head down.
    fn transfer_armed(&mut self) -> bool {
        self.state == DiskState::ReadyForIo
            && self.loaded_drive().is_some_and(|d| d.head_loaded)
    }

    fn abort_transfer(&mut self) {
        self.cursor = 0;
        self.write_enabled = false;
    }

    fn finish_sector(&mut self) {
        self.abort_transfer();
        self.state = DiskState::Selected;
    }
}

impl Default for Dcdd88 {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DRIVES)
    }
}

impl DiskController for Dcdd88 {
    fn select(&mut self, value: u8) {
        self.abort_transfer();
        let drive = (value & DRIVE_MASK) as usize;
        if value & DESELECT != 0 || drive >= self.drives.len() {
            debug!("dcdd: deselect ({value:#04X})");
            self.selected = None;
            self.state = DiskState::Idle;
            return;
        }
        debug!("dcdd: select drive {drive}");
        self.selected = Some(drive);
        self.state = DiskState::Selected;
    }

    fn status(&mut self) -> u8 {
        if self.state == DiskState::Idle {
            return STATUS_NO_MEDIA;
        }
        let write_enabled = self.write_enabled;
        let interrupts_enabled = self.interrupts_enabled;
        let Some(drive) = self.loaded_drive() else {
            return STATUS_NO_MEDIA;
        };

        let mut status = STATUS_NO_MEDIA & !(Status::MoveHead as u8);
        if drive.track == 0 {
            status &= !(Status::Track0 as u8);
        }
        if drive.head_loaded {
            status &= !(Status::Head as u8 | Status::ReadReady as u8);
        }
        if write_enabled {
            status &= !(Status::WriteReady as u8);
        }
        if interrupts_enabled {
            status &= !(Status::InterruptsEnabled as u8);
        }
        status
    }

    fn function(&mut self, value: u8) {
        let Some(drive) = self.loaded_drive() else {
            return;
        };
        let mut moved = false;

        if value & Function::StepIn as u8 != 0 && drive.track < TRACKS - 1 {
            drive.track += 1;
            moved = true;
        }
        if value & Function::StepOut as u8 != 0 && drive.track > 0 {
            drive.track -= 1;
            moved = true;
        }
        if value & Function::HeadLoad as u8 != 0 {
            drive.head_loaded = true;
        }
        if value & Function::HeadUnload as u8 != 0 {
            drive.head_loaded = false;
        }
        let track = drive.track;

        if value & Function::InterruptEnable as u8 != 0 {
            self.interrupts_enabled = true;
        }
        if value & Function::InterruptDisable as u8 != 0 {
            self.interrupts_enabled = false;
        }

        if moved {
            debug!("dcdd: head at track {track}");
            self.abort_transfer();
            self.state = DiskState::Seeking;
        } else if value & Function::HeadLoad as u8 != 0 && self.state == DiskState::Selected {
            self.state = DiskState::Seeking;
        } else if value & Function::HeadUnload as u8 != 0 {
            self.finish_sector();
        }

        if value & Function::WriteEnable as u8 != 0 {
            self.cursor = 0;
            self.write_enabled = true;
        }
    }

    fn sector(&mut self) -> u8 {
        let Some(drive) = self.loaded_drive() else {
            return STATUS_NO_MEDIA;
        };
        let current = drive.sector;
        drive.sector = (current + 1) % SECTORS_PER_TRACK;
        let framing = SECTOR_FRAMING | ((current as u8) << 1);
        // The disk turns regardless; a transfer is only armed under a
        // loaded head.
        if !drive.head_loaded {
            return framing;
        }
        let base = sector_offset(drive.track, current);

        self.sector_base = base;
        self.abort_transfer();
        self.state = DiskState::ReadyForIo;
        framing
    }

    fn write_data(&mut self, value: u8) {
        if !self.transfer_armed() || !self.write_enabled {
            return;
        }
        let offset = self.sector_base + self.cursor;
        let base = self.sector_base;
        let Some(media) = self.loaded_drive().and_then(|d| d.media.as_mut()) else {
            return;
        };
        media.write(offset, value);
        self.cursor += 1;
        if self.cursor == SECTOR_SIZE {
            if let Some(media) = self.loaded_drive().and_then(|d| d.media.as_mut()) {
                media.commit(base..base + SECTOR_SIZE);
            }
            debug!("dcdd: sector written at offset {base}");
            self.finish_sector();
        }
    }

    fn read_data(&mut self) -> u8 {
        if !self.transfer_armed() || self.write_enabled {
            return 0;
        }
        let offset = self.sector_base + self.cursor;
        let Some(media) = self.loaded_drive().and_then(|d| d.media.as_mut()) else {
            return 0;
        };
        let value = media.read(offset).unwrap_or(0);
        self.cursor += 1;
        if self.cursor == SECTOR_SIZE {
            self.finish_sector();
        }
        value
    }

    fn drive_count(&self) -> usize {
        self.drives.len()
    }

    fn mount(
        &mut self,
        drive: usize,
        image: Box<dyn DiskImage>,
    ) -> Result<(), Box<dyn DiskImage>> {
        let Some(slot) = self.drives.get_mut(drive) else {
            return Err(image);
        };
        debug!("dcdd: mount drive {drive} ({} bytes)", image.len());
        slot.media = Some(image);
        slot.rewind();
        if self.selected == Some(drive) {
            self.finish_sector();
        }
        Ok(())
    }

    fn eject(&mut self, drive: usize) -> Option<Box<dyn DiskImage>> {
        let slot = self.drives.get_mut(drive)?;
        let media = slot.media.take();
        slot.rewind();
        if media.is_some() {
            debug!("dcdd: eject drive {drive}");
        }
        if self.selected == Some(drive) {
            self.finish_sector();
        }
        media
    }

    fn reset(&mut self) {
        self.abort_transfer();
        self.selected = None;
        self.state = DiskState::Idle;
        self.interrupts_enabled = false;
        for drive in &mut self.drives {
            drive.head_loaded = false;
        }
    }
}
