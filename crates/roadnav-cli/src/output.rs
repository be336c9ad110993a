//! Output formatting for command results.
//!
//! Text output goes through the library's [`RouteSummary`] renderer so the
//! CLI never re-implements itinerary wording; JSON output serialises the same
//! structures.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use roadnav_lib::{NodeId, RouteRenderMode, RouteSummary};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain itinerary text.
    #[default]
    Text,
    /// Markdown-flavoured itinerary.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    fn render_mode(self) -> RouteRenderMode {
        match self {
            OutputFormat::Rich => RouteRenderMode::RichText,
            OutputFormat::Text | OutputFormat::Json => RouteRenderMode::PlainText,
        }
    }
}

#[derive(Serialize)]
struct RouteDocument<'a> {
    #[serde(flatten)]
    summary: &'a RouteSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    explored_nodes: Option<&'a [NodeId]>,
}

/// Print a route summary, optionally followed by the explored intersections.
pub fn print_route(
    summary: &RouteSummary,
    explored: Option<&[NodeId]>,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&RouteDocument {
            summary,
            explored_nodes: explored,
        });
    }

    let mut text = summary.render(format.render_mode());
    if let Some(explored) = explored {
        text.push_str(&explored_text(explored));
    }
    print_text(&text)
}

fn explored_text(explored: &[NodeId]) -> String {
    let ids: Vec<String> = explored.iter().map(ToString::to_string).collect();
    format!("Explored {} intersections: {}\n", explored.len(), ids.join(", "))
}

/// Write `value` as pretty JSON followed by a newline.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    print_text(&format!("{json}\n"))
}

/// Write pre-rendered text to stdout.
pub fn print_text(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .context("failed to write to stdout")?;
    stdout.flush().context("failed to flush stdout")
}
