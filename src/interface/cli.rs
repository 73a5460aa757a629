use crate::domain::graph::Graph;
use crate::infrastructure::event_ndjson::spawn_ndjson_printer;
use crate::infrastructure::scc_kosaraju::KosarajuSccDetector;
use crate::infrastructure::serde_json_adapter::read_graph_file;
use crate::interface::edge_list::{max_endpoint, parse_edge_list};
use crate::usecase::event::AppEvent;
use crate::usecase::explore::explore_components;
use crate::usecase::stats::ExploreStats;
use anyhow::{anyhow, Context, Result};
use std::env;
use tokio::sync::mpsc;

pub const DEFAULT_MAX_VERTEX: i64 = 8;
pub const DEFAULT_EDGES: [(i64, i64); 11] = [
    (0, 1),
    (1, 2),
    (2, 0),
    (2, 3),
    (3, 4),
    (4, 7),
    (4, 5),
    (5, 6),
    (6, 4),
    (4, 7),
    (6, 7),
];

pub async fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    run_with_args(&args).await.map(|_| ())
}

pub async fn run_with_args(args: &[String]) -> Result<ExploreStats> {
    let cmd = Cli::parse(args)?;

    match cmd {
        Cli::Scc {
            edges,
            input,
            max_vertex,
            emit_events,
        } => {
            let graph = load_graph(edges.as_deref(), input.as_deref(), max_vertex).await?;
            log::debug!(
                "graph loaded: vertices={} edges={}",
                graph.node_count(),
                graph.edge_count()
            );

            let (tx, rx) = mpsc::channel::<AppEvent>(1024);
            let printer = if emit_events {
                Some(spawn_ndjson_printer(rx))
            } else {
                drop(rx);
                None
            };

            let scc = KosarajuSccDetector;
            let sink = if emit_events { Some(tx) } else { None };
            let stats = explore_components(&graph, &scc, sink, None).await?;

            if let Some(handle) = printer {
                handle.await.ok();
            }

            eprintln!(
                "summary: vertices={} edges={} components={} cyclic_components={}",
                stats.vertices, stats.edges, stats.components, stats.cyclic_components
            );

            Ok(stats)
        }
    }
}

async fn load_graph(
    edges: Option<&str>,
    input: Option<&str>,
    max_vertex: Option<i64>,
) -> Result<Graph> {
    let (bound, edges) = match (edges, input) {
        (Some(raw), None) => {
            let edges = parse_edge_list(raw).context("parsing --edges")?;
            let bound = max_vertex
                .or_else(|| max_endpoint(&edges))
                .ok_or_else(|| anyhow!("edges: empty edge list requires --max-vertex"))?;
            (bound, edges)
        }
        (None, Some(path)) => {
            let mut dto = read_graph_file(path)
                .await
                .with_context(|| format!("reading graph JSON: {path}"))?;
            if max_vertex.is_some() {
                dto.max_vertex = max_vertex;
            }
            let bound = dto.resolve_max_vertex()?;
            (bound, dto.edges)
        }
        (None, None) => (
            max_vertex.unwrap_or(DEFAULT_MAX_VERTEX),
            DEFAULT_EDGES.to_vec(),
        ),
        (Some(_), Some(_)) => return Err(anyhow!("--edges and --in are mutually exclusive")),
    };

    Graph::build(bound, &edges).context("building graph")
}

#[derive(Debug)]
enum Cli {
    Scc {
        edges: Option<String>,
        input: Option<String>,
        max_vertex: Option<i64>,
        emit_events: bool,
    },
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        // Expected:
        // <bin> scc [--edges "<[(u, v), ...]>"] [--in/--input <graph.json>] [--max-vertex <n>] [--emit-events]
        if args.len() < 2 {
            return Err(anyhow!(usage()));
        }

        match args[1].as_str() {
            "scc" => Self::parse_scc(args),
            "-h" | "--help" => Err(anyhow!(usage())),
            _ => Err(anyhow!(usage())),
        }
    }

    fn parse_scc(args: &[String]) -> Result<Self> {
        let mut edges: Option<String> = None;
        let mut input: Option<String> = None;
        let mut max_vertex: Option<i64> = None;
        let mut emit_events = false;

        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--edges" => {
                    i += 1;
                    edges = Some(
                        args.get(i)
                            .cloned()
                            .ok_or_else(|| anyhow!(format!("missing value for --edges\n\n{}", usage())))?,
                    );
                }
                "--in" | "--input" => {
                    i += 1;
                    input = Some(
                        args.get(i)
                            .cloned()
                            .ok_or_else(|| anyhow!(format!("missing value for --in/--input\n\n{}", usage())))?,
                    );
                }
                "--max-vertex" => {
                    i += 1;
                    let raw = args
                        .get(i)
                        .ok_or_else(|| anyhow!(format!("missing value for --max-vertex\n\n{}", usage())))?;
                    max_vertex = Some(
                        raw.parse::<i64>()
                            .with_context(|| format!("--max-vertex must be an integer: {raw}"))?,
                    );
                }
                "--emit-events" => {
                    emit_events = true;
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        if edges.is_some() && input.is_some() {
            return Err(anyhow!(format!(
                "--edges and --in are mutually exclusive\n\n{}",
                usage()
            )));
        }

        Ok(Cli::Scc {
            edges,
            input,
            max_vertex,
            emit_events,
        })
    }
}

fn usage() -> &'static str {
    "Usage:\n  scc [--edges \"[(u, v), ...]\"] [--in/--input <graph.json>] [--max-vertex <n>] [--emit-events]\n\nInput:\n  Without --edges or --in the built-in 9-vertex demo graph is used.\n  The vertex bound defaults to the largest edge endpoint.\n\nEvents:\n  If --emit-events is set, NDJSON events are written to stdout; summary goes to stderr."
}
