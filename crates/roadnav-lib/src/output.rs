use std::fmt::Write;

use serde::Serialize;

use crate::cost::CostMode;
use crate::graph::{Graph, NodeId};
use crate::routing::{RouteLeg, RouteOutcome};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Endpoint of a journey.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RouteEndpoint {
    fn new(graph: &Graph, id: NodeId) -> Self {
        Self {
            id,
            label: graph.node_label(id),
        }
    }

    fn display_name(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.id.to_string())
    }
}

/// Structured, serialisable view of a [`RouteOutcome`] for front ends.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub mode: CostMode,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub found: bool,
    pub legs: Vec<RouteLeg>,
    pub total_cost: Option<f64>,
    pub total_distance_km: Option<f64>,
    pub explored: usize,
}

impl RouteSummary {
    pub fn from_outcome(graph: &Graph, mode: CostMode, outcome: &RouteOutcome) -> Self {
        match outcome {
            RouteOutcome::Found(route) => Self {
                mode: route.mode,
                start: RouteEndpoint::new(graph, route.start),
                goal: RouteEndpoint::new(graph, route.goal),
                found: true,
                legs: route.legs.clone(),
                total_cost: Some(route.total_cost),
                total_distance_km: Some(route.total_distance_km),
                explored: route.explored.len(),
            },
            RouteOutcome::NoPath {
                start,
                goal,
                explored,
            } => Self {
                mode,
                start: RouteEndpoint::new(graph, *start),
                goal: RouteEndpoint::new(graph, *goal),
                found: false,
                legs: Vec::new(),
                total_cost: None,
                total_distance_km: None,
                explored: explored.len(),
            },
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Journey from {} to {}:",
            self.start.display_name(),
            self.goal.display_name()
        );

        if !self.found {
            let _ = writeln!(buffer, "No path found.");
            return buffer;
        }

        for leg in &self.legs {
            let _ = writeln!(buffer, " - {}", self.leg_text(leg));
        }
        let _ = writeln!(buffer, "{}", self.total_text());
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Journey** _{} → {}_ (by {})",
            self.start.display_name(),
            self.goal.display_name(),
            self.mode
        );

        if !self.found {
            let _ = writeln!(buffer, "_No path found._");
            return buffer;
        }

        for (index, leg) in self.legs.iter().enumerate() {
            let _ = writeln!(buffer, "{:>2}. {}", index + 1, self.leg_text(leg));
        }
        let _ = writeln!(buffer, "**{}**", self.total_text());
        buffer
    }

    fn leg_text(&self, leg: &RouteLeg) -> String {
        match self.mode {
            CostMode::Distance => format!("{}: {:.3} km", leg.road.name, leg.distance_km),
            CostMode::Time => format!(
                "{}: {:.3} km, {}",
                leg.road.name,
                leg.distance_km,
                format_hours(leg.cost)
            ),
        }
    }

    fn total_text(&self) -> String {
        let total = self.total_cost.unwrap_or_default();
        match self.mode {
            CostMode::Distance => format!("Total distance: {total:.3} km"),
            CostMode::Time => format!("Total time: {}", format_hours(total)),
        }
    }
}

/// Format a duration in hours as `"12.500 minutes"`, `"1 hour 0.000 minutes"`
/// or `"2 hours 5.000 minutes"`.
///
/// Minutes are rounded to the printed precision before whole hours are split
/// off, so values just under an hour carry into the hour count.
pub fn format_hours(hours: f64) -> String {
    const MILLIMINUTES_PER_HOUR: u64 = 60_000;

    let total = (hours.max(0.0) * MILLIMINUTES_PER_HOUR as f64).round() as u64;
    let whole = total / MILLIMINUTES_PER_HOUR;
    let minutes = (total % MILLIMINUTES_PER_HOUR) as f64 / 1000.0;
    match whole {
        0 => format!("{minutes:.3} minutes"),
        1 => format!("1 hour {minutes:.3} minutes"),
        _ => format!("{whole} hours {minutes:.3} minutes"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Position, Road};
    use crate::routing::{Route, RoadSummary};

    fn graph() -> Graph {
        let mut builder = Graph::builder();
        builder.add_node(1, Position::new(0.0, 0.0)).unwrap();
        builder.add_node(2, Position::new(1.0, 0.0)).unwrap();
        builder
            .add_road(Road {
                id: 7,
                name: "Kent Terrace".to_string(),
                city: "Wellington".to_string(),
                one_way: false,
                speed_class: 3,
                road_class: 3,
            })
            .unwrap();
        builder.add_segment(7, 1, 2, 1.25).unwrap();
        builder.build()
    }

    fn found(mode: CostMode, cost: f64) -> RouteOutcome {
        RouteOutcome::Found(Route {
            mode,
            start: 1,
            goal: 2,
            legs: vec![RouteLeg {
                road: RoadSummary {
                    id: 7,
                    name: "Kent Terrace".to_string(),
                    city: "Wellington".to_string(),
                },
                cost,
                distance_km: 1.25,
                segments: vec![0],
            }],
            total_cost: cost,
            total_distance_km: 1.25,
            nodes: vec![1, 2],
            explored: vec![1, 2],
        })
    }

    #[test]
    fn plain_distance_rendering() {
        let graph = graph();
        let outcome = found(CostMode::Distance, 1.25);
        let summary = RouteSummary::from_outcome(&graph, CostMode::Distance, &outcome);
        let text = summary.render(RouteRenderMode::PlainText);

        assert!(text.starts_with("Journey from 1 (Kent Terrace) to 2 (Kent Terrace):"));
        assert!(text.contains(" - Kent Terrace: 1.250 km"));
        assert!(text.contains("Total distance: 1.250 km"));
    }

    #[test]
    fn plain_time_rendering() {
        let graph = graph();
        let outcome = found(CostMode::Time, 0.25);
        let summary = RouteSummary::from_outcome(&graph, CostMode::Time, &outcome);
        let text = summary.render(RouteRenderMode::PlainText);

        assert!(text.contains("Kent Terrace: 1.250 km, 15.000 minutes"));
        assert!(text.contains("Total time: 15.000 minutes"));
    }

    #[test]
    fn no_path_rendering() {
        let graph = graph();
        let outcome = RouteOutcome::NoPath {
            start: 1,
            goal: 2,
            explored: vec![1],
        };
        let summary = RouteSummary::from_outcome(&graph, CostMode::Distance, &outcome);

        assert!(!summary.found);
        assert_eq!(summary.explored, 1);
        assert!(summary
            .render(RouteRenderMode::RichText)
            .contains("_No path found._"));
    }

    #[test]
    fn hours_format_splits_minutes() {
        assert_eq!(format_hours(0.5), "30.000 minutes");
        assert_eq!(format_hours(2.25), "2 hours 15.000 minutes");
    }

    #[test]
    fn hours_format_carries_rounded_minutes() {
        assert_eq!(format_hours(0.999_999_99), "1 hour 0.000 minutes");
        assert_eq!(format_hours(1.0), "1 hour 0.000 minutes");
        assert_eq!(format_hours(1.5), "1 hour 30.000 minutes");
        assert_eq!(format_hours(1.999_999_9), "2 hours 0.000 minutes");
        assert_eq!(format_hours(0.0), "0.000 minutes");
    }
}
