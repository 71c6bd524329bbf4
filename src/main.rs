use std::path::Path;

use clap::{Parser, Subcommand};

use mapedit_core::action::{Action, Reverse, ReverseOptions};
use mapedit_core::cli_error::EditorCliError;
use mapedit_core::config::EditorConfiguration;
use mapedit_core::model::Entity;
use mapedit_core::validate::validate_entity;
use mapedit_core::{EntityId, Graph};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct MapEditApp {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// reads a JSON entity dump and reports how many of each kind it holds.
    Ingest {
        #[arg(long, help = "path to a JSON array of entity records")]
        input_file: String,
    },
    /// reads a JSON entity dump and prints every validator issue found.
    Validate {
        #[arg(long, help = "path to a JSON array of entity records")]
        input_file: String,
        #[arg(long, help = "path to an editor configuration file (TOML/JSON)")]
        configuration_file: Option<String>,
    },
    /// reverses one way's node order and direction-bearing tags.
    Reverse {
        #[arg(long, help = "path to a JSON array of entity records")]
        input_file: String,
        #[arg(long, help = "id of the way to reverse, e.g. w42")]
        way_id: String,
    },
}

fn load_graph(input_file: &str) -> Result<Graph, EditorCliError> {
    let s = std::fs::read_to_string(Path::new(input_file))?;
    let entities: Vec<Entity> = serde_json::from_str(&s)?;
    let mut graph = Graph::new();
    for entity in entities {
        graph = graph.replace(entity)?;
    }
    Ok(graph)
}

fn load_configuration(configuration_file: &Option<String>) -> Result<EditorConfiguration, EditorCliError> {
    match configuration_file {
        None => Ok(EditorConfiguration::default()),
        Some(f) => {
            log::info!("reading editor configuration from {f}");
            EditorConfiguration::try_from(f.as_str())
        }
    }
}

pub fn run(app: &App) -> Result<(), EditorCliError> {
    match app {
        App::Ingest { input_file } => {
            let graph = load_graph(input_file)?;
            let (mut nodes, mut ways, mut relations) = (0, 0, 0);
            for (id, slot) in graph.local_entries() {
                if slot.is_none() {
                    continue;
                }
                match id.entity_type {
                    mapedit_core::EntityType::Node => nodes += 1,
                    mapedit_core::EntityType::Way => ways += 1,
                    mapedit_core::EntityType::Relation => relations += 1,
                }
            }
            println!("ingested {nodes} nodes, {ways} ways, {relations} relations");
            Ok(())
        }
        App::Validate { input_file, configuration_file } => {
            let graph = load_graph(input_file)?;
            let config = load_configuration(configuration_file)?;
            let mut issue_count = 0;
            for (id, slot) in graph.local_entries() {
                let Some(entity) = slot else { continue };
                for issue in validate_entity(entity, &graph, &config) {
                    issue_count += 1;
                    let subtype = issue.subtype.as_deref().unwrap_or("-");
                    println!(
                        "{:?} {}/{} entities={:?} hash={:x}",
                        issue.severity, issue.issue_type, subtype, issue.entity_ids, issue.hash
                    );
                }
                let _ = id;
            }
            println!("{issue_count} issue(s) found");
            Ok(())
        }
        App::Reverse { input_file, way_id } => {
            let graph = load_graph(input_file)?;
            let way_id: EntityId = way_id.parse().map_err(|_| EditorCliError::UnknownEntityId(way_id.clone()))?;
            let action = Reverse { entity_id: way_id, options: ReverseOptions::default() };
            let graph = action.apply(graph)?;
            let way = graph.entity(way_id)?.as_way().ok_or(EditorCliError::UnknownEntityId(way_id.to_string()))?;
            println!("reversed {way_id}: nodes={:?}", way.nodes);
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();
    let args = MapEditApp::parse();
    if let Err(e) = run(&args.app) {
        log::error!("mapedit failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
