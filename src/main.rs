//! slotvault - slot-based inventory console
//!
//! Runs inventory commands from a script and/or the command line against a
//! fixed-size inventory, then prints the resulting slot listing.

mod command_script;
mod commands;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use command_script::CommandScript;
use commands::Session;
use config::InventoryConfig;
use slotvault_core::{catalog_from_file, ItemCatalog};
use slotvault_inventory::{Inventory, InventoryChange, InventorySnapshot, Slot};
use slotvault_pickup::PickupAgent;
use std::{fs, path::Path, path::PathBuf};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Slot-based inventory console", long_about = None)]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Item catalog (JSON); overrides the configured catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Command script (JSON) run before any trailing commands
    #[arg(long)]
    script: Option<PathBuf>,

    /// Inventory snapshot to start from
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write the final inventory snapshot here
    #[arg(long)]
    save: Option<PathBuf>,

    /// Write the effective configuration back to the --config path
    #[arg(long)]
    write_config: bool,

    /// Commands to run, separated by `;` (e.g. `-- add stone 70 ; show`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    commands: Vec<String>,
}

fn main() -> Result<()> {
    // WARN by default; RUST_LOG overrides
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting slotvault v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let mut config = InventoryConfig::load_from_path(&args.config);
    if args.write_config {
        if let Some(path) = &args.catalog {
            config.catalog_path = Some(path.clone());
        }
        config.save_to_path(&args.config)?;
        info!(path = %args.config.display(), "wrote configuration");
    }

    let catalog = match args.catalog.as_ref().or(config.catalog_path.as_ref()) {
        Some(path) => catalog_from_file(path)
            .with_context(|| format!("failed to load item catalog {}", path.display()))?,
        None => ItemCatalog::builtin(),
    };
    info!(items = catalog.len(), "item catalog ready");

    let mut inventory = initial_inventory(&args, &config, &catalog)?;
    inventory.subscribe(|change: &InventoryChange, slots: &[Slot]| {
        let occupied = slots.iter().filter(|slot| !slot.is_empty()).count();
        debug!(
            kind = ?change.kind,
            item = ?change.item.as_ref().map(ToString::to_string),
            amount = change.amount,
            touched = ?change.touched,
            occupied,
            "inventory changed"
        );
    });

    let mut session = Session::new(catalog, inventory, PickupAgent::new(config.pickup_distance));

    let mut lines = Vec::new();
    if let Some(path) = &args.script {
        lines.extend(CommandScript::from_path(path)?.steps().iter().cloned());
    }
    lines.extend(split_trailing_commands(&args.commands));

    for line in &lines {
        println!("> {line}");
        for out in session.run_line(line).lines {
            println!("{out}");
        }
    }

    println!("Slots ({}):", session.inventory.len());
    for line in commands::slot_lines(&session.inventory) {
        println!("{line}");
    }

    if let Some(path) = args.save.as_ref().or(config.snapshot_path.as_ref()) {
        save_snapshot(path, &session.inventory.snapshot())?;
        info!(path = %path.display(), "saved inventory snapshot");
    }

    Ok(())
}

fn initial_inventory(
    args: &Args,
    config: &InventoryConfig,
    catalog: &ItemCatalog,
) -> Result<Inventory> {
    // An explicit --load must exist; the configured snapshot is optional.
    let snapshot_path = match (&args.load, &config.snapshot_path) {
        (Some(path), _) => Some(path.as_path()),
        (None, Some(path)) if path.exists() => Some(path.as_path()),
        _ => None,
    };

    let Some(path) = snapshot_path else {
        return Inventory::new(config.slot_count).context("invalid slot_count");
    };

    let snapshot = load_snapshot(path)?;
    if snapshot.slots.len() != config.slot_count {
        warn!(
            configured = config.slot_count,
            snapshot = snapshot.slots.len(),
            "snapshot slot count differs from configuration; using the snapshot"
        );
    }
    Inventory::from_snapshot(&snapshot, catalog)
        .with_context(|| format!("failed to restore inventory from {}", path.display()))
}

fn load_snapshot(path: &Path) -> Result<InventorySnapshot> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))
}

fn save_snapshot(path: &Path, snapshot: &InventorySnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("failed to write snapshot {}", path.display()))
}

/// Join trailing arguments into command lines, split on standalone or trailing `;`.
fn split_trailing_commands(args: &[String]) -> Vec<String> {
    let joined = args.join(" ");
    joined
        .split(';')
        .map(str::trim)
        .filter(|cmd| !cmd.is_empty())
        .map(str::to_string)
        .collect()
}
