//! memhash CLI - structural digests for graph description files
//!
//! Hashes every vertex of a JSON graph description, decodes trace
//! digests back into GraphViz graphs, and runs a built-in sample.

use clap::{Parser, Subcommand};
use memhash::ops::{dissect, to_dot, EdgeSet};
use memhash::{Digest, Graph, HashOrder, HashSession, VertexId};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "memhash")]
#[command(about = "Structural digests for directed graphs with cycles")]
#[command(version)]
struct Cli {
    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OrderArg {
    Forward,
    Reverse,
    /// Hash in both orders and check that they agree
    Both,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash every vertex of a JSON graph description
    Hash {
        /// Path to the graph description
        file: PathBuf,
        /// Order in which vertices are hashed
        #[arg(short, long, default_value = "forward")]
        order: OrderArg,
    },

    /// Decode trace digests into a GraphViz graph
    Dissect {
        /// One or more trace digests of the same graph
        #[arg(required = true)]
        digests: Vec<String>,
        /// Suffix appended to every vertex name
        #[arg(short, long, default_value = "")]
        suffix: String,
    },

    /// Hash the built-in sample graph (a -> b -> a; d -> c)
    Demo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Hash { file, order } => {
            let graph = Graph::load(&file)?;
            info!(path = %file.display(), vertices = graph.len(), "loaded graph");

            let orders: &[HashOrder] = match order {
                OrderArg::Forward => &[HashOrder::Forward],
                OrderArg::Reverse => &[HashOrder::Reverse],
                OrderArg::Both => &[HashOrder::Forward, HashOrder::Reverse],
            };
            let passes: Vec<_> = orders.iter().map(|&o| run_pass(&graph, o)).collect();
            let consistent = passes.windows(2).all(|w| w[0].digests == w[1].digests);

            output(
                &cli.format,
                &serde_json::json!({
                    "vertices": graph.len(),
                    "passes": passes.iter().map(|p| p.to_json(&graph)).collect::<Vec<_>>(),
                    "consistent": consistent
                }),
            )?;
            if !consistent {
                anyhow::bail!("digests differ between forward and reverse passes");
            }
        }

        Commands::Dissect { digests, suffix } => {
            let mut edges = EdgeSet::new();
            for digest in &digests {
                dissect(digest, &mut edges)?;
            }
            let dot = to_dot(&edges, &suffix);
            match cli.format {
                OutputFormat::Json => output(
                    &cli.format,
                    &serde_json::json!({
                        "count": edges.len(),
                        "edges": edges
                            .iter()
                            .map(|(from, to)| serde_json::json!({ "from": from, "to": to }))
                            .collect::<Vec<_>>(),
                        "dot": dot
                    }),
                )?,
                OutputFormat::Text => print!("{}", dot),
            }
        }

        Commands::Demo => {
            let graph = demo_graph()?;
            let pass = run_pass(&graph, HashOrder::Forward);
            output(&cli.format, &pass.to_json(&graph))?;
        }
    }

    Ok(())
}

/// Digests from one session over the graph, sorted by vertex id
struct Pass {
    order: HashOrder,
    digests: Vec<(VertexId, Digest)>,
    memoized: Vec<bool>,
    total_bytes: u64,
}

impl Pass {
    fn to_json(&self, graph: &Graph) -> serde_json::Value {
        let items: Vec<_> = self
            .digests
            .iter()
            .zip(&self.memoized)
            .map(|((id, digest), memoized)| {
                serde_json::json!({
                    "index": id.index(),
                    "label": graph.label(*id),
                    "digest": digest.to_string(),
                    "memoized": memoized
                })
            })
            .collect();
        serde_json::json!({
            "order": match self.order {
                HashOrder::Forward => "forward",
                HashOrder::Reverse => "reverse",
            },
            "digests": items,
            "memoized": self.memoized.iter().filter(|m| **m).count(),
            "total_bytes": self.total_bytes
        })
    }
}

fn run_pass(graph: &Graph, order: HashOrder) -> Pass {
    let mut session: HashSession = HashSession::new(graph);
    let mut digests = session.hash_all(order);
    digests.sort_by_key(|(id, _)| *id);
    let memoized = digests
        .iter()
        .map(|(id, _)| session.memo().contains(*id))
        .collect();

    Pass {
        order,
        digests,
        memoized,
        total_bytes: session.total_bytes_processed(),
    }
}

fn demo_graph() -> memhash::Result<Graph> {
    let mut graph = Graph::new();
    let a = graph.add_vertex("a");
    let b = graph.add_vertex("b");
    let c = graph.add_vertex("c");
    let d = graph.add_vertex("d");
    graph.add_edge(a, b)?;
    graph.add_edge(b, a)?;
    graph.add_edge(d, c)?;
    Ok(graph)
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "memhash=warn",
        1 => "memhash=debug",
        _ => "memhash=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn output(format: &OutputFormat, value: &serde_json::Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Text => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
