use std::path::PathBuf;

use altair_machines::{MachineConfig, registry};
use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod console;
mod emulator;

use cli::Args;
use console::StdioTerminal;

/// Crates whose events are shown by default.
const LOG_TARGETS: [&str; 3] = ["altair_core", "altair_machines", "altair_frontend"];

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref())?;

    if args.list {
        for entry in registry::all() {
            println!("{:<12} {}", entry.name, entry.description);
        }
        return Ok(());
    }

    let Some(entry) = registry::find(&args.machine) else {
        let names: Vec<_> = registry::all().iter().map(|e| e.name).collect();
        bail!(
            "unknown machine {:?} (available: {})",
            args.machine,
            names.join(", ")
        );
    };

    let mut config = load_config(args.config.as_ref())?;
    args.apply(&mut config);
    debug!("config: {config:?}");

    let terminal = StdioTerminal::spawn().context("failed to start console reader")?;
    let io = config.io_bindings(Box::new(terminal));
    let mut machine = (entry.create)(&config, io)
        .with_context(|| format!("failed to build {}", entry.name))?;

    info!(
        "{} running from {:#06X}",
        machine.name(),
        machine.cpu_state().pc
    );
    let (outcome, steps) = emulator::run(machine.as_mut(), args.max_steps);
    debug!("stopped: {outcome:?} after {steps} instructions");
    debug!("cpu: {:?}", machine.cpu_state());
    Ok(())
}

/// `RUST_LOG` if set, otherwise `info` for the emulator crates.
/// `--log-level` overrides both.
fn init_logging(level: Option<&str>) -> Result<()> {
    let directives = |level: &str| {
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    };
    let filter = match level {
        Some(level) => EnvFilter::try_new(directives(level))
            .with_context(|| format!("invalid log level {level:?}"))?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(directives("info")))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Explicit `--config`, else the per-user default file if present, else
/// built-in defaults.
fn load_config(explicit: Option<&PathBuf>) -> Result<MachineConfig> {
    if let Some(path) = explicit {
        return MachineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }
    match default_config_path() {
        Some(path) if path.is_file() => {
            info!("using config {}", path.display());
            MachineConfig::load(&path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        _ => Ok(MachineConfig::default()),
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("altair").join("config.toml"))
}
