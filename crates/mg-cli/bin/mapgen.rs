//! Map generator command line
//!
//! Generates a map from a resource map JSON file, prints a preview and
//! optionally stores the result in a save slot.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use mg_cli::{load_resource, role_counts, summary};
use mg_core::{MapRng, generate_map};
use mg_save::MapStore;

/// Procedural tile map generator
#[derive(Parser, Debug)]
#[command(name = "mapgen")]
#[command(author, version, about = "Generate a tile map from a resource map", long_about = None)]
struct Args {
    /// Resource map JSON file
    #[arg(short = 'r', long = "resource")]
    resource: PathBuf,

    /// Seed, overriding the resource map's own
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Save slot to store the generated map in
    #[arg(long = "slot")]
    slot: Option<u32>,

    /// Map id used for the stored file name
    #[arg(long = "map-id", default_value_t = 1)]
    map_id: u32,

    /// Save root directory (defaults to the local data directory)
    #[arg(long = "root")]
    root: Option<PathBuf>,

    /// Print the role grid
    #[arg(short = 'a', long = "ascii")]
    ascii: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let resource = load_resource(&args.resource)?;

    let mut rng = match args.seed.or(resource.meta.seed) {
        Some(seed) => MapRng::new(seed),
        None => MapRng::from_entropy(),
    };
    let map = generate_map(&resource, &mut rng)?;
    tracing::info!("{}", summary(&map));
    for (role, count) in role_counts(&map) {
        tracing::debug!("{:>8} {}", count, role);
    }

    if args.ascii {
        print!("{}", map.ascii());
    }

    if let Some(slot) = args.slot {
        let store = match args.root {
            Some(root) => MapStore::new(root, slot),
            None => MapStore::in_default_root(slot),
        };
        let path = store.save_map(args.map_id, &map)?;
        tracing::info!("Stored map {} at {}", args.map_id, path.display());
    }
    Ok(())
}
