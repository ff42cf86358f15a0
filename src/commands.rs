use std::fmt;

use glam::Vec3;
use slotvault_core::{ItemCatalog, ItemHandle};
use slotvault_inventory::Inventory;
use slotvault_pickup::{PickupAgent, PickupResult};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

#[derive(Debug, Clone)]
pub enum InventoryCommand {
    Help,
    Add { item: ItemHandle, count: u32 },
    Remove { item: ItemHandle, count: u32 },
    Has { item: ItemHandle, count: u32 },
    Space { item: ItemHandle },
    Count { item: ItemHandle },
    Show,
    Clear,
    Items,
    Spawn { item: ItemHandle, count: u32, at: Vec3 },
    Pickup { id: Option<u64> },
    Tp { to: Vec3 },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
}

/// Everything a command can act on.
#[derive(Debug)]
pub struct Session {
    pub catalog: ItemCatalog,
    pub inventory: Inventory,
    pub pickups: PickupAgent,
    pub player: Vec3,
}

impl Session {
    pub fn new(catalog: ItemCatalog, inventory: Inventory, pickups: PickupAgent) -> Self {
        Self {
            catalog,
            inventory,
            pickups,
            player: Vec3::ZERO,
        }
    }

    /// Parse and execute one command line; parse errors become output lines.
    pub fn run_line(&mut self, line: &str) -> CommandOutput {
        match parse_command(line, &self.catalog) {
            Ok(cmd) => execute_command(self, cmd),
            Err(err) => CommandOutput {
                lines: vec![format!("Error: {err}")],
            },
        }
    }
}

pub fn execute_command(session: &mut Session, cmd: InventoryCommand) -> CommandOutput {
    let mut out = CommandOutput::default();
    match cmd {
        InventoryCommand::Help => {
            out.lines.extend(help_lines());
        }
        InventoryCommand::Add { item, count } => {
            let outcome = session.inventory.add_item(&item, count);
            if outcome.placed > 0 {
                out.lines.push(format!("Added {}× {}", outcome.placed, item.key()));
            }
            if outcome.remainder() > 0 {
                out.lines.push(format!(
                    "Inventory full; {}× {} not added",
                    outcome.remainder(),
                    item.key()
                ));
            }
        }
        InventoryCommand::Remove { item, count } => {
            let outcome = session.inventory.remove_item(&item, count);
            if outcome.is_success() {
                out.lines.push(format!("Removed {}× {}", outcome.removed, item.key()));
            } else {
                let held = session.inventory.count_item(&item);
                out.lines.push(format!(
                    "Not enough {}: have {held}, need {count}",
                    item.key()
                ));
            }
        }
        InventoryCommand::Has { item, count } => {
            let answer = if session.inventory.has_item(&item, count) {
                "yes"
            } else {
                "no"
            };
            out.lines.push(format!("has {count}× {}: {answer}", item.key()));
        }
        InventoryCommand::Space { item } => {
            let space = session.inventory.remaining_space(&item);
            out.lines.push(format!("Room for {space}× {}", item.key()));
        }
        InventoryCommand::Count { item } => {
            let held = session.inventory.count_item(&item);
            out.lines.push(format!("Holding {held}× {}", item.key()));
        }
        InventoryCommand::Show => {
            out.lines.extend(slot_lines(&session.inventory));
        }
        InventoryCommand::Clear => {
            session.inventory.clear();
            out.lines.push("Inventory cleared".to_string());
        }
        InventoryCommand::Items => {
            for item in session.catalog.iter() {
                out.lines.push(format!(
                    "{} \"{}\" stack {}",
                    item.key(),
                    item.name(),
                    item.max_stack_size()
                ));
            }
        }
        InventoryCommand::Spawn { item, count, at } => {
            let key = item.key().clone();
            match session.pickups.spawn(item, count, at) {
                Some(id) => out.lines.push(format!(
                    "Spawned pickup #{id}: {count}× {key} at {:.2} {:.2} {:.2}",
                    at.x, at.y, at.z
                )),
                None => out.lines.push(format!("Nothing to spawn: 0× {key}")),
            }
        }
        InventoryCommand::Pickup { id } => {
            let results = match id {
                Some(id) => vec![(
                    id,
                    session
                        .pickups
                        .try_pickup(id, &session.player, &mut session.inventory),
                )],
                None => session
                    .pickups
                    .collect_in_range(&session.player, &mut session.inventory),
            };
            if results.is_empty() {
                out.lines.push("Nothing in reach".to_string());
            }
            for (id, result) in results {
                out.lines.push(describe_pickup(id, result));
            }
        }
        InventoryCommand::Tp { to } => {
            session.player = to;
            out.lines.push(format!("Teleported to {:.2} {:.2} {:.2}", to.x, to.y, to.z));
        }
    }
    out
}

fn describe_pickup(id: u64, result: PickupResult) -> String {
    match result {
        PickupResult::Collected { placed, remainder: 0 } => {
            format!("Picked up #{id} ({placed}×)")
        }
        PickupResult::Collected { placed, remainder } => {
            format!("Picked up #{id} ({placed}×, {remainder}× lost)")
        }
        PickupResult::OutOfRange { distance } => {
            format!("Pickup #{id} is out of reach ({distance:.2})")
        }
        PickupResult::InventoryFull => format!("Inventory full; pickup #{id} left in place"),
        PickupResult::NotFound => format!("No pickup #{id}"),
    }
}

/// One line per occupied slot, in slot order.
pub fn slot_lines(inventory: &Inventory) -> Vec<String> {
    let mut lines: Vec<String> = inventory
        .slots()
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| {
            slot.item()
                .map(|item| format!("#{index:<2} {} ×{}", item.key(), slot.count()))
        })
        .collect();
    if lines.is_empty() {
        lines.push("(empty)".to_string());
    }
    lines
}

pub fn parse_command(input: &str, catalog: &ItemCatalog) -> Result<InventoryCommand, CommandError> {
    let input = input.trim();
    let input = input.strip_prefix('/').unwrap_or(input).trim();
    if input.is_empty() {
        return Ok(InventoryCommand::Help);
    }

    let mut parts = input.split_whitespace();
    let cmd = parts
        .next()
        .ok_or_else(|| CommandError::new("Missing command"))?
        .to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    match cmd.as_str() {
        "help" | "?" => Ok(InventoryCommand::Help),
        "add" | "give" => {
            let (item, count) = parse_item_and_count(&args, catalog, "Usage: add <item> [count]")?;
            Ok(InventoryCommand::Add { item, count })
        }
        "remove" | "take" => {
            let (item, count) =
                parse_item_and_count(&args, catalog, "Usage: remove <item> [count]")?;
            Ok(InventoryCommand::Remove { item, count })
        }
        "has" => {
            let (item, count) = parse_item_and_count(&args, catalog, "Usage: has <item> [count]")?;
            Ok(InventoryCommand::Has { item, count })
        }
        "space" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: space <item>"));
            }
            Ok(InventoryCommand::Space {
                item: parse_item(args[0], catalog)?,
            })
        }
        "count" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: count <item>"));
            }
            Ok(InventoryCommand::Count {
                item: parse_item(args[0], catalog)?,
            })
        }
        "show" | "ls" => Ok(InventoryCommand::Show),
        "clear" => Ok(InventoryCommand::Clear),
        "items" => Ok(InventoryCommand::Items),
        "spawn" | "drop" => parse_spawn_command(&args, catalog),
        "pickup" => match args.as_slice() {
            [] => Ok(InventoryCommand::Pickup { id: None }),
            [id] => {
                let id = id
                    .trim_start_matches('#')
                    .parse::<u64>()
                    .map_err(|_| CommandError::new("Invalid pickup id"))?;
                Ok(InventoryCommand::Pickup { id: Some(id) })
            }
            _ => Err(CommandError::new("Usage: pickup [id]")),
        },
        "tp" | "teleport" => {
            if args.len() != 3 {
                return Err(CommandError::new("Usage: tp <x> <y> <z>"));
            }
            Ok(InventoryCommand::Tp {
                to: parse_position(&args)?,
            })
        }
        _ => Err(CommandError::new(format!("Unknown command: {cmd}. Try help"))),
    }
}

fn parse_item_and_count(
    args: &[&str],
    catalog: &ItemCatalog,
    usage: &str,
) -> Result<(ItemHandle, u32), CommandError> {
    if !(1..=2).contains(&args.len()) {
        return Err(CommandError::new(usage));
    }
    let item = parse_item(args[0], catalog)?;
    let count = match args.get(1) {
        Some(raw) => parse_positive_u32(raw).map_err(|_| CommandError::new("Invalid count"))?,
        None => 1,
    };
    Ok((item, count))
}

fn parse_spawn_command(
    args: &[&str],
    catalog: &ItemCatalog,
) -> Result<InventoryCommand, CommandError> {
    const USAGE: &str = "Usage: spawn <item> [count] [x y z]";
    let (item_args, at) = match args.len() {
        1 | 2 => (args, Vec3::ZERO),
        4 | 5 => {
            let split = args.len() - 3;
            (&args[..split], parse_position(&args[split..])?)
        }
        _ => return Err(CommandError::new(USAGE)),
    };
    let (item, count) = parse_item_and_count(item_args, catalog, USAGE)?;
    Ok(InventoryCommand::Spawn { item, count, at })
}

fn parse_positive_u32(s: &str) -> Result<u32, ()> {
    let value = s.parse::<u32>().map_err(|_| ())?;
    if value == 0 {
        return Err(());
    }
    Ok(value)
}

fn parse_position(args: &[&str]) -> Result<Vec3, CommandError> {
    let mut coords = [0.0f32; 3];
    for (coord, raw) in coords.iter_mut().zip(args) {
        *coord = raw
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CommandError::new(format!("Invalid coordinate: {raw}")))?;
    }
    Ok(Vec3::from_array(coords))
}

fn parse_item(token: &str, catalog: &ItemCatalog) -> Result<ItemHandle, CommandError> {
    catalog.resolve(token).map_err(|err| {
        warn!("rejected item {token:?}: {err}");
        CommandError::new(err.to_string())
    })
}

fn help_lines() -> Vec<String> {
    [
        "Commands:",
        "  add <item> [count]           place items (stacks first, then empty slots)",
        "  remove <item> [count]        remove exactly count items, or nothing",
        "  has <item> [count]           check whether count items are held",
        "  count <item>                 total held",
        "  space <item>                 how many more would fit",
        "  show                         list occupied slots",
        "  clear                        empty every slot",
        "  items                        list the item catalog",
        "  spawn <item> [count] [x y z] drop a pickup into the world",
        "  pickup [id]                  collect one pickup, or all within reach",
        "  tp <x> <y> <z>               move the player",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
