//! Loads a prefab WAD and prints what a level generator would see.
//!
//! Usage:
//!   id-prefab-dump room.wad
//!   id-prefab-dump room.wad --json --user-dir ~/prefabs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use id_prefab::{
    LineInfo, PolygonLoop, PrefabSession, SearchPaths, SectorInfo, SideInfo, ThingInfo,
};

#[derive(Parser)]
#[command(name = "id-prefab-dump")]
#[command(about = "Dump the polygons and entities of a prefab WAD")]
struct Cli {
    /// File name, looked up under <root>/x_doom/ in the user then install root
    name: String,

    /// Overrides ID_PREFAB_USER_DIR
    #[arg(long)]
    user_dir: Option<PathBuf>,

    /// Overrides ID_PREFAB_INSTALL_DIR
    #[arg(long)]
    install_dir: Option<PathBuf>,

    /// Print everything as one JSON document
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Dump {
    map: String,
    polygons: Vec<PolygonLoop>,
    sectors: Vec<SectorInfo>,
    sides: Vec<SideInfo>,
    lines: Vec<LineInfo>,
    things: Vec<ThingInfo>,
}

/// Collects `get(0), get(1), ...` up to the first miss.
fn collect_all<T>(get: impl Fn(i32) -> Option<T>) -> Vec<T> {
    (0..).map_while(get).collect()
}

fn dump(session: &PrefabSession) -> Option<Dump> {
    let map = session.map()?;

    Some(Dump {
        map: map.map_name().to_string(),
        polygons: collect_all(|i| session.get_polygon(i)),
        sectors: collect_all(|i| session.get_sector(i)),
        sides: collect_all(|i| session.get_side(i)),
        lines: collect_all(|i| session.get_line(i)),
        things: collect_all(|i| session.get_thing(i)),
    })
}

fn print_summary(dump: &Dump) {
    println!("map {}", dump.map);

    for (i, polygon) in dump.polygons.iter().enumerate() {
        if polygon.is_void() {
            println!("polygon {}: void, {} edges", i, polygon.edges.len());
        } else {
            println!(
                "polygon {}: sector {}, {} edges",
                i,
                polygon.sector,
                polygon.edges.len()
            );
        }
    }

    for (i, sector) in dump.sectors.iter().enumerate() {
        println!(
            "sector {}: floor {} {}, ceiling {} {}, light {}",
            i, sector.floor_h, sector.floor_tex, sector.ceil_h, sector.ceil_tex, sector.light
        );
    }

    println!("{} sidedefs, {} linedefs", dump.sides.len(), dump.lines.len());

    for thing in &dump.things {
        println!(
            "thing {} at ({}, {}, {}) angle {}",
            thing.id, thing.x, thing.y, thing.z, thing.angle
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut paths = SearchPaths::from_env();
    if let Some(user_dir) = cli.user_dir {
        paths.user_dir = user_dir;
    }
    if let Some(install_dir) = cli.install_dir {
        paths.install_dir = install_dir;
    }
    log::debug!("search paths: {:?}", paths);

    let mut session = PrefabSession::new(paths);
    session
        .load(&cli.name)
        .with_context(|| format!("Failed to load prefab {}", cli.name))?;

    let dump = dump(&session).context("Session has no polygonated map")?;
    session.free();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&dump)?);
    } else {
        print_summary(&dump);
    }

    Ok(())
}
