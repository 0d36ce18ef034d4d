use widget_tree::{actions, outline, persistence, registry};

use anyhow::{bail, Context, Result};
use clap::Parser;
use persistence::{FileBlobStore, Persistence};
use registry::PropertyType;
use serde_json::Value;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use widget_tree::config::{load_config, CliArgs, Command, Config};
use widget_tree::model::{Kind, PropertyPatch, Widget};
use widget_tree::{DesignerStore, NodeId};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = CliArgs::parse();

    // Load configuration
    let config = load_config(&args)?;

    if args.debug_config {
        println!("Configuration:");
        println!("{:#?}", config);
        return Ok(());
    }

    init_logging(&config)?;

    let command = args.command.unwrap_or(Command::Show { json: false });
    run(&config, command)
}

/// Runs one command against the configured store. Read-only commands never
/// write the blob.
fn run(config: &Config, command: Command) -> Result<()> {
    if command == Command::Kinds {
        print_kinds();
        return Ok(());
    }

    let mut store = open_store(config);
    if config.seed_canvas && command.edits_tree() {
        store.seed_canvas();
    }
    run_command(&mut store, command)?;

    if store.is_dirty() {
        bail!(
            "changes were applied but could not be saved to {}",
            config.storage_dir.display()
        );
    }
    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    TermLogger::init(
        config.level_filter(),
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logging")
}

fn open_store(config: &Config) -> DesignerStore {
    let persistence = Persistence::new(
        FileBlobStore::new(&config.storage_dir),
        config.storage_key.clone(),
    )
    .with_pretty(config.pretty_json);
    DesignerStore::open(persistence)
}

fn run_command(store: &mut DesignerStore, command: Command) -> Result<()> {
    match command {
        Command::Show { json } => {
            if json {
                let blob = persistence::serialize_tree(store.tree(), true)?;
                println!("{}", blob);
            } else {
                print!("{}", outline::render(store.tree(), true));
            }
        }
        Command::Kinds => print_kinds(),
        Command::Add { kind, into } => {
            let id = match into {
                Some(container) => actions::insert_into(store, &container, Widget::default_for(kind)),
                None => {
                    let node = registry::new_node(kind);
                    let id = node.id;
                    actions::insert_root(store, node).then_some(id)
                }
            };
            match id {
                Some(id) => println!("{}", id),
                None => bail!("cannot add a {} there", kind),
            }
        }
        Command::Set { id, assignments } => {
            let patch = parse_assignments(&assignments)?;
            if !actions::update_properties(store, &id, &patch) {
                bail!("nothing changed on {}", id);
            }
        }
        Command::Remove { id } => ensure(actions::remove(store, &id), "remove", &id)?,
        Command::MoveUp { id } => ensure(actions::move_up(store, &id), "move up", &id)?,
        Command::MoveDown { id } => ensure(actions::move_down(store, &id), "move down", &id)?,
        Command::Reorder {
            from,
            to,
            container,
        } => {
            let moved = match container {
                Some(container) => actions::reorder_children(store, &container, from, to),
                None => actions::reorder_roots(store, from, to),
            };
            if !moved {
                bail!("cannot move position {} to {}", from, to);
            }
        }
        Command::Group { ids } => match actions::group(store, &ids) {
            Some(id) => println!("{}", id),
            None => bail!("components must exist and share one parent to be grouped"),
        },
        Command::Ungroup { id } => ensure(actions::ungroup(store, &id), "ungroup", &id)?,
        Command::Duplicate { id, into } => {
            let entry = actions::copy(store, &id).with_context(|| format!("no component {}", id))?;
            let pasted = actions::paste(store, into.as_ref(), &entry);
            actions::discard_clipboard_entry(store, &entry);
            match pasted {
                Some(id) => println!("{}", id),
                None => bail!("cannot paste into that target"),
            }
        }
    }
    Ok(())
}

fn ensure(changed: bool, verb: &str, id: &NodeId) -> Result<()> {
    if !changed {
        bail!("cannot {} {}", verb, id);
    }
    Ok(())
}

/// `key=value` pairs; values that parse as JSON keep their type, the rest are strings.
fn parse_assignments(assignments: &[String]) -> Result<PropertyPatch> {
    let mut patch = PropertyPatch::new();
    for assignment in assignments {
        let Some((key, raw)) = assignment.split_once('=') else {
            bail!("expected key=value, got '{}'", assignment);
        };
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        patch.insert(key.trim().to_string(), value);
    }
    Ok(patch)
}

fn print_kinds() {
    for kind in Kind::ALL {
        println!("{} ({})", kind.as_str(), kind.label());
        for spec in registry::schema(kind) {
            let ty = match spec.ty {
                PropertyType::String => "string".to_string(),
                PropertyType::Boolean => "boolean".to_string(),
                PropertyType::Select(options) => format!("select: {}", options.join(" | ")),
            };
            println!("\t{} - {} [{}]", spec.name, spec.label, ty);
        }
    }
}
