//! Command-line frontend: loads a region file, builds a [ZoneManager], and
//! prints what came out of it (the zone table, the overlaps the resolver had
//! to carve, tree statistics, the tree itself), plus an optional probe query.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use zonemap_engine::descriptor::RegionFile;
use zonemap_engine::geom::point::Point;
use zonemap_engine::manager::{ZoneManager, ZoneManagerOptions};

const RULE_WIDTH: usize = 120;

/// Builds a zone index from a region file and shows what came out of it
#[derive(Parser, Debug)]
#[command(name = "zonemap", version, about)]
struct Args {
    /// Region file with a `locationBounds` array of zone descriptors
    region: PathBuf,

    /// Order axes are carved in, e.g. `0,2,1` (default: axis order as given)
    #[arg(long, value_delimiter = ',')]
    axis_order: Option<Vec<usize>>,

    /// Per-zone fragment count above which defragmentation goes greedy
    #[arg(long)]
    defrag_cap: Option<usize>,

    /// Probe position to look up, e.g. "-1441 2 -1441"
    #[arg(long, allow_hyphen_values = true)]
    query: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // ===== Tracing =====

    // Warnings (e.g. totally eclipsed zones) always show; everything else is
    // opt-in through the environment variable
    let log_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::metadata::LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter)
        .init();

    // ===== Build =====

    let args = Args::parse();

    let text = std::fs::read_to_string(&args.region)
        .with_context(|| format!("reading {}", args.region.display()))?;
    let region: RegionFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", args.region.display()))?;

    let options = ZoneManagerOptions {
        axis_order: args.axis_order.clone(),
        defrag_cap: args.defrag_cap,
    };
    let manager = ZoneManager::with_options(&region.location_bounds, options)
        .context("building the zone index")?;
    debug!(zones = manager.len(), dims = manager.dims(), "manager built");

    // ===== Report =====

    print_zone_table(&manager);
    print_overlaps(&manager);
    print_tree(&manager);

    if let Some(query) = &args.query {
        let pos: Point = query
            .parse()
            .with_context(|| format!("invalid probe position {query:?}"))?;
        println!("{}", "-".repeat(RULE_WIDTH));
        match manager.zone_of(&pos) {
            Some(zone) => println!("{pos} is in {zone}"),
            None => println!("{pos} is in no zone"),
        }
    }

    Ok(())
}

fn print_zone_table(manager: &ZoneManager) {
    println!("{}", "-".repeat(RULE_WIDTH));
    for (i, zone) in manager.zones().iter().enumerate() {
        println!(
            "{:>3} {:>25} {:>3} {:>14} {:<20} {:<20}",
            i,
            zone.name(),
            zone.original_id(),
            zone.kind(),
            zone.pos1().to_string(),
            zone.pos2().to_string(),
        );
    }
    println!("{}", "-".repeat(RULE_WIDTH));

    if let Some(bounds) = manager.bounds() {
        println!("World bounds: {bounds}");
    }
}

fn print_overlaps(manager: &ZoneManager) {
    for overlap in manager.overlapping_zones() {
        println!(
            "{:>55} {:>14} {:<20} {:<20}",
            overlap.name(),
            overlap.kind(),
            overlap.aabb().min().to_string(),
            overlap.aabb().max_incl().to_string(),
        );
    }
    println!("{}", "=".repeat(RULE_WIDTH));
}

fn print_tree(manager: &ZoneManager) {
    let tree = manager.tree();
    println!("Ave depth:  {:04.2}", tree.average_depth());
    println!("Max depth:  {}", tree.max_depth());
    println!("Leaf nodes: {}", tree.leaf_count());

    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Look out for that tree!");
    print!("{tree}");
}
