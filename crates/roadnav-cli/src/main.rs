use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadnav_cli::commands::nearest::{handle_nearest_command, NearestCommandArgs};
use roadnav_cli::commands::node::handle_node_command;
use roadnav_cli::commands::route::{handle_route_command, RouteCommandArgs};
use roadnav_cli::output::OutputFormat;
use roadnav_lib::NodeId;

#[derive(Parser, Debug)]
#[command(author, version, about = "Restriction-aware road routing")]
struct Cli {
    /// Road network dataset (JSON). Defaults to $ROADNAV_DATASET.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two intersections.
    Route(RouteCommandArgs),
    /// Describe an intersection.
    Node {
        /// Intersection id.
        #[arg(long)]
        id: NodeId,
    },
    /// Find the intersection closest to a coordinate.
    Nearest(NearestCommandArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let dataset = cli.dataset.as_deref();

    match &cli.command {
        Command::Route(args) => handle_route_command(dataset, cli.format, args),
        Command::Node { id } => handle_node_command(dataset, cli.format, *id),
        Command::Nearest(args) => handle_nearest_command(dataset, cli.format, args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
