use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use predicate_lineage::export::{OutputFormat, view_to_value};
use predicate_lineage::lineage::load_graph;
use predicate_lineage::search::{organizations, search};
use predicate_lineage::stats::{GraphStats, company_metrics, company_network, most_cited, roots};
use predicate_lineage::{
    Config, GraphIndex, HighlightMode, View, cycle_groups, depths, extract,
    extract_by_organization, highlight, project,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "data/graph.json")]
    graph: PathBuf,
    /// TOML file with a `[limits]` table of query defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Native)]
    format: OutputFormat,
    #[arg(long)]
    pretty: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Bounded neighbourhood of one device.
    Focus {
        id: String,
        #[arg(long)]
        ancestors: Option<usize>,
        #[arg(long)]
        descendants: Option<usize>,
        #[arg(long)]
        max_nodes: Option<usize>,
        #[arg(long)]
        timeline: bool,
        #[arg(long, value_enum)]
        highlight: Option<HighlightMode>,
    },
    /// Most recent devices of one applicant plus their predecessors.
    Company {
        name: String,
        #[arg(long)]
        max_devices: Option<usize>,
        #[arg(long)]
        ancestors: Option<usize>,
        #[arg(long)]
        timeline: bool,
    },
    /// Fuzzy search over device ids, names and applicants.
    Search {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        companies: bool,
    },
    /// Whole-graph structural summary.
    Stats {
        #[arg(long, default_value_t = 20)]
        top: usize,
        #[arg(long, default_value_t = 1000)]
        roots: usize,
        #[arg(long, default_value_t = 50)]
        companies: usize,
        /// Smallest device-link count reported between two applicants.
        #[arg(long, default_value_t = 5)]
        min_company_edges: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    let limits = &config.limits;

    let graph = load_graph(&args.graph)
        .with_context(|| format!("failed to load lineage graph from {}", args.graph.display()))?;
    let index = GraphIndex::from_graph(graph);
    if index.orphan_edges() > 0 {
        log::info!(
            "{} edges reference unknown devices and will not be traversed",
            index.orphan_edges()
        );
    }

    let output = match args.command {
        Command::Focus {
            id,
            ancestors,
            descendants,
            max_nodes,
            timeline,
            highlight: highlight_mode,
        } => {
            let max_nodes = max_nodes.unwrap_or(limits.max_nodes);
            if max_nodes == 0 {
                bail!("--max-nodes must be greater than 0");
            }

            let view = extract(
                &index,
                &id,
                ancestors.unwrap_or(limits.ancestor_depth),
                descendants.unwrap_or(limits.descendant_depth),
                max_nodes,
            );
            if view.is_empty() {
                log::warn!("device {id} not found");
            }

            let mut output = render_view(&index, &view, args.format, timeline)?;
            if let Some(mode) = highlight_mode {
                output["highlight"] = serde_json::to_value(highlight(&view, &id, mode))?;
            }
            output
        }
        Command::Company {
            name,
            max_devices,
            ancestors,
            timeline,
        } => {
            let max_devices = max_devices.unwrap_or(limits.max_devices);
            if max_devices == 0 {
                bail!("--max-devices must be greater than 0");
            }

            let view = extract_by_organization(
                &index,
                &name,
                max_devices,
                ancestors.unwrap_or(limits.company_ancestor_depth),
            );
            if view.is_empty() {
                log::warn!("no devices found for applicant {name:?}");
            }

            render_view(&index, &view, args.format, timeline)?
        }
        Command::Search {
            query,
            limit,
            companies,
        } => {
            let limit = limit.unwrap_or(limits.search_limit);
            if companies {
                serde_json::to_value(organizations(&index, &query, limit))?
            } else {
                serde_json::to_value(search(&index, &query, limit))?
            }
        }
        Command::Stats {
            top,
            roots: root_limit,
            companies,
            min_company_edges,
        } => json!({
            "stats": GraphStats::compute(&index),
            "most_cited": most_cited(&index, top),
            "root_nodes": roots(&index, root_limit),
            "top_companies": company_metrics(&index, companies),
            "company_network": company_network(&index, min_company_edges),
            "cycles": cycle_groups(&index),
        }),
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("failed to serialize output")?;
    println!("{rendered}");

    Ok(())
}

fn render_view(
    index: &GraphIndex,
    view: &View,
    format: OutputFormat,
    timeline: bool,
) -> Result<Value> {
    let mut output = view_to_value(view, format).context("failed to serialize view")?;
    if timeline {
        // Depth is measured against the whole graph, not just the view.
        let projection = project(&view.nodes, &depths(index));
        output["layout"] = serde_json::to_value(projection)?;
    }
    Ok(output)
}
