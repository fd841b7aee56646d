use std::path::PathBuf;

use altair_machines::MachineConfig;
use altair_machines::config::{DiskConfig, RomConfig};
use clap::Parser;

/// Intel 8080 / MITS Altair 8800 emulator.
///
/// The machine's console is this process's stdin/stdout; logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "altair", version)]
pub struct Args {
    /// Machine to run (see --list)
    #[arg(default_value = "altair8800")]
    pub machine: String,

    /// Machine config file (TOML). Defaults to <config dir>/altair/config.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Load an image into memory, e.g. dbl.bin@0xFF00
    #[arg(long = "rom", value_name = "FILE@ADDR", value_parser = parse_rom)]
    pub roms: Vec<RomConfig>,

    /// Mount a disk image, e.g. 0=cpm22.dsk
    #[arg(long = "disk", value_name = "DRIVE=FILE", value_parser = parse_disk)]
    pub disks: Vec<DiskConfig>,

    /// CP/M .COM program (cpm machine)
    #[arg(long, value_name = "FILE")]
    pub program: Option<PathBuf>,

    /// Address to EXAMINE before running
    #[arg(long, value_name = "ADDR", value_parser = parse_address)]
    pub start: Option<u16>,

    /// Sense switch positions
    #[arg(long, value_name = "BYTE", value_parser = parse_byte)]
    pub switches: Option<u8>,

    /// Stop after this many instructions
    #[arg(long, value_name = "N")]
    pub max_steps: Option<u64>,

    /// Log level for the emulator crates (overrides RUST_LOG)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// List available machines and exit
    #[arg(long)]
    pub list: bool,
}

impl Args {
    /// Fold command-line settings over `config`. Disks given here replace
    /// config disks in the same drive.
    pub fn apply(&self, config: &mut MachineConfig) {
        config.rom.extend(self.roms.iter().cloned());
        for disk in &self.disks {
            config.disk.retain(|d| d.drive != disk.drive);
            config.disk.push(disk.clone());
        }
        if let Some(program) = &self.program {
            config.program = Some(program.clone());
        }
        if let Some(start) = self.start {
            config.start_address = start;
        }
        if let Some(switches) = self.switches {
            config.sense_switches = switches;
        }
    }
}

/// Number in hex (`0xFF00`, `FF00h`) or decimal.
fn parse_number(text: &str) -> Result<u32, String> {
    let text = text.trim();
    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else if let Some(hex) = text.strip_suffix('h').or_else(|| text.strip_suffix('H')) {
        u32::from_str_radix(hex, 16)
    } else {
        text.parse()
    };
    parsed.map_err(|e| format!("invalid number {text:?}: {e}"))
}

pub fn parse_address(text: &str) -> Result<u16, String> {
    let value = parse_number(text)?;
    u16::try_from(value).map_err(|_| format!("address {text} is above 0xFFFF"))
}

pub fn parse_byte(text: &str) -> Result<u8, String> {
    let value = parse_number(text)?;
    u8::try_from(value).map_err(|_| format!("{text} does not fit in a byte"))
}

pub fn parse_rom(text: &str) -> Result<RomConfig, String> {
    let (path, address) = text
        .rsplit_once('@')
        .ok_or_else(|| format!("expected FILE@ADDR, got {text:?}"))?;
    if path.is_empty() {
        return Err(format!("missing file in {text:?}"));
    }
    Ok(RomConfig {
        path: PathBuf::from(path),
        address: parse_address(address)?,
    })
}

pub fn parse_disk(text: &str) -> Result<DiskConfig, String> {
    let (drive, path) = text
        .split_once('=')
        .ok_or_else(|| format!("expected DRIVE=FILE, got {text:?}"))?;
    let drive = drive
        .trim()
        .parse()
        .map_err(|e| format!("invalid drive {drive:?}: {e}"))?;
    if path.is_empty() {
        return Err(format!("missing file in {text:?}"));
    }
    Ok(DiskConfig {
        drive,
        path: PathBuf::from(path),
    })
}
