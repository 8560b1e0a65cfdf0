use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use map_core::{Archetype, Coordinate, GeneratedMap, MapConfig, MapGenerator, Vec2, seeded_rng};
use serde::Serialize;

mod logging;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML map configuration; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Print the whole graph as JSON instead of a per-floor summary
    #[arg(long)]
    json: bool,
    /// Fail if the generated graph has crossing roads or one-sided edges
    #[arg(long)]
    check: bool,
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Serialize)]
struct MapDump<'a> {
    seed: u64,
    fingerprint: String,
    map_length: i32,
    width: i32,
    nodes: Vec<NodeDump<'a>>,
    roads: Vec<RoadDump<'a>>,
}

#[derive(Serialize)]
struct NodeDump<'a> {
    coordinate: Coordinate,
    position: Vec2,
    roads_in: Vec<Coordinate>,
    roads_out: Vec<Coordinate>,
    archetype: Option<&'a Archetype>,
}

#[derive(Serialize)]
struct RoadDump<'a> {
    index: usize,
    hue: f32,
    points: &'a [Coordinate],
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_level.as_deref());

    let config = match &args.config {
        Some(path) => MapConfig::load(path)
            .with_context(|| format!("Failed to load map config: {}", path.display()))?,
        None => {
            info!("no --config given, using built-in defaults");
            MapConfig::default()
        }
    };

    let generator = MapGenerator::new(config).context("Map config rejected")?;
    let map = generator
        .generate(&mut seeded_rng(args.seed))
        .with_context(|| format!("Map generation failed for seed {}", args.seed))?;

    if args.check {
        audit(&map)?;
    }

    if args.json {
        let dump = dump_map(&map, args.seed);
        println!("{}", serde_json::to_string_pretty(&dump).context("Failed to encode map")?);
    } else {
        print_summary(&map, args.seed);
    }

    Ok(())
}

fn audit(map: &GeneratedMap) -> Result<()> {
    if let Some((left, right)) = map.segments().find_crossing() {
        bail!("roads cross between {left:?} and {right:?}");
    }
    if !map.adjacency_is_symmetric() {
        bail!("node adjacency is not symmetric");
    }
    info!("audit passed for {} nodes", map.nodes.len());
    Ok(())
}

fn dump_map(map: &GeneratedMap, seed: u64) -> MapDump<'_> {
    MapDump {
        seed,
        fingerprint: format!("{:016x}", map.fingerprint()),
        map_length: map.map_length,
        width: map.width,
        nodes: map
            .nodes
            .values()
            .map(|node| NodeDump {
                coordinate: node.coordinate,
                position: node.position,
                roads_in: node.roads_in.iter().copied().collect(),
                roads_out: node.roads_out.iter().copied().collect(),
                archetype: node.archetype.as_ref(),
            })
            .collect(),
        roads: map
            .roads
            .iter()
            .map(|road| RoadDump { index: road.index, hue: road.hue(), points: &road.points })
            .collect(),
    }
}

fn print_summary(map: &GeneratedMap, seed: u64) {
    println!("Map generated.");
    println!("Seed: {seed}");
    println!("Floors: {}  Lanes: {}  Roads: {}", map.map_length, map.width, map.roads.len());
    println!("Nodes: {}", map.nodes.len());
    println!("Fingerprint: {:016x}", map.fingerprint());

    for floor in (0..map.map_length).rev() {
        let row: Vec<String> = map
            .nodes_on_floor(floor)
            .map(|node| {
                let archetype = node.archetype.as_ref().map_or("?", Archetype::as_str);
                format!("[{}] {archetype}", node.coordinate.lane)
            })
            .collect();
        println!("floor {floor:>3}: {}", row.join("  "));
    }
}

#[cfg(test)]
mod tests {
    use map_core::{Road, generate_map};

    use super::*;

    fn sample_map() -> GeneratedMap {
        let config = MapConfig { width: 4, path_amount: 3, ..MapConfig::default() };
        generate_map(&config, 17).expect("generation succeeds")
    }

    #[test]
    fn audit_accepts_a_generated_map() {
        assert!(audit(&sample_map()).is_ok());
    }

    #[test]
    fn audit_rejects_crossing_roads() {
        let mut map = sample_map();
        let index = map.roads.len();
        map.roads.push(Road {
            index,
            points: vec![Coordinate::new(0, 0), Coordinate::new(1, 1)],
        });
        map.roads.push(Road {
            index: index + 1,
            points: vec![Coordinate::new(1, 0), Coordinate::new(0, 1)],
        });

        let error = audit(&map).expect_err("crossing must fail the audit");
        assert!(error.to_string().contains("roads cross"), "{error}");
    }

    #[test]
    fn audit_rejects_one_sided_edges() {
        let mut map = sample_map();
        let node = map
            .nodes
            .values_mut()
            .find(|node| !node.roads_in.is_empty())
            .expect("some node has an inbound edge");
        node.roads_in.clear();

        let error = audit(&map).expect_err("asymmetry must fail the audit");
        assert!(error.to_string().contains("not symmetric"), "{error}");
    }

    #[test]
    fn dump_mirrors_the_generated_map() {
        let map = sample_map();
        let dump = serde_json::to_value(dump_map(&map, 17)).expect("dump encodes");

        assert_eq!(dump["seed"], 17);
        assert_eq!(dump["fingerprint"], format!("{:016x}", map.fingerprint()));
        assert_eq!(dump["map_length"], map.map_length);
        assert_eq!(dump["nodes"].as_array().map(Vec::len), Some(map.nodes.len()));
        assert_eq!(dump["roads"].as_array().map(Vec::len), Some(3));

        let first = map.nodes.values().next().expect("map has nodes");
        assert_eq!(dump["nodes"][0]["coordinate"]["floor"], first.coordinate.floor);
        let out_degree = dump["nodes"][0]["roads_out"].as_array().map(Vec::len);
        assert_eq!(out_degree, Some(first.roads_out.len()));
        assert!(dump["nodes"][0]["archetype"].is_string());
        let road_length = dump["roads"][1]["points"].as_array().map(Vec::len);
        assert_eq!(road_length, Some(map.map_length as usize));
    }
}
