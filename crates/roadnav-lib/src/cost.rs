//! Cost models used to weigh segment traversals.
//!
//! The search engine is parameterised by a [`CostModel`]. Two models ship with
//! the crate:
//! - [`DistanceCost`] - cost is segment length in kilometres.
//! - [`TimeCost`] - cost is travel time in hours, with minor road classes
//!   penalised while searching but not when reporting.
//!
//! [`select_cost_model`] picks one from a [`CostMode`] and [`CostConfig`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Position, Road, Segment};

/// Speed assumed for roads without a limit, and the fastest any road can be.
pub const MAX_SPEED_KMH: f64 = 110.0;

/// Highest road class; roads of this class are never penalised.
pub const MAX_ROAD_CLASS: u8 = 4;

/// Default per-class penalty applied by [`TimeCost`].
pub const DEFAULT_ROAD_CLASS_WEIGHT: f64 = 0.06;

/// Quantity a route is optimised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CostMode {
    /// Shortest distance (kilometres).
    #[default]
    Distance,
    /// Fastest travel time (hours).
    Time,
}

impl fmt::Display for CostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            CostMode::Distance => "distance",
            CostMode::Time => "time",
        };
        f.write_str(value)
    }
}

/// Tunables for the time-based cost model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Fraction of speed lost per road class below [`MAX_ROAD_CLASS`].
    pub road_class_weight: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            road_class_weight: DEFAULT_ROAD_CLASS_WEIGHT,
        }
    }
}

impl CostConfig {
    /// Speed multiplier for a road class: `1 - weight * (4 - class)`.
    ///
    /// Classes above [`MAX_ROAD_CLASS`] are treated as the maximum.
    pub fn handicap(&self, road_class: u8) -> f64 {
        let below_max = MAX_ROAD_CLASS - road_class.min(MAX_ROAD_CLASS);
        1.0 - self.road_class_weight * f64::from(below_max)
    }

    /// Reject weights that give any class a non-positive multiplier, or a
    /// multiplier above one (which would let the time heuristic overestimate).
    pub fn validate(&self) -> Result<()> {
        let weight = self.road_class_weight;
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidCostConfig {
                message: format!("road class weight must be a non-negative number, got {weight}"),
            });
        }

        let worst = self.handicap(0);
        if worst <= 0.0 {
            return Err(Error::InvalidCostConfig {
                message: format!(
                    "road class weight {weight} yields non-positive speed multiplier {worst:.3} for class 0"
                ),
            });
        }
        Ok(())
    }
}

/// Base speed for a road's speed class, in km/h.
pub fn speed_limit_kmh(speed_class: u8) -> f64 {
    match speed_class {
        0 => 5.0,
        1 => 20.0,
        2 => 40.0,
        3 => 60.0,
        4 => 80.0,
        5 => 100.0,
        _ => MAX_SPEED_KMH,
    }
}

/// Strategy for weighing traversals during search and reporting.
pub trait CostModel: Send + Sync {
    /// Mode this model implements.
    fn mode(&self) -> CostMode;

    /// Cost of traversing `segment` while searching.
    fn search_cost(&self, segment: &Segment, road: &Road) -> f64;

    /// Real-world cost of traversing `segment`, used when summarising a route.
    fn report_cost(&self, segment: &Segment, road: &Road) -> f64;

    /// Admissible estimate of the remaining cost from `from` to `goal`.
    fn heuristic(&self, from: &Position, goal: &Position) -> f64;
}

/// Optimise for distance travelled.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceCost;

impl CostModel for DistanceCost {
    fn mode(&self) -> CostMode {
        CostMode::Distance
    }

    fn search_cost(&self, segment: &Segment, _road: &Road) -> f64 {
        segment.length
    }

    fn report_cost(&self, segment: &Segment, _road: &Road) -> f64 {
        segment.length
    }

    fn heuristic(&self, from: &Position, goal: &Position) -> f64 {
        from.distance_to(goal)
    }
}

/// Optimise for travel time.
#[derive(Debug, Clone, Copy)]
pub struct TimeCost {
    config: CostConfig,
}

impl TimeCost {
    pub fn new(config: CostConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> CostConfig {
        self.config
    }
}

impl CostModel for TimeCost {
    fn mode(&self) -> CostMode {
        CostMode::Time
    }

    fn search_cost(&self, segment: &Segment, road: &Road) -> f64 {
        let speed = speed_limit_kmh(road.speed_class) * self.config.handicap(road.road_class);
        segment.length / speed
    }

    fn report_cost(&self, segment: &Segment, road: &Road) -> f64 {
        segment.length / speed_limit_kmh(road.speed_class)
    }

    fn heuristic(&self, from: &Position, goal: &Position) -> f64 {
        from.distance_to(goal) / MAX_SPEED_KMH
    }
}

/// Build the cost model for `mode`.
pub fn select_cost_model(mode: CostMode, config: CostConfig) -> Result<Box<dyn CostModel>> {
    match mode {
        CostMode::Distance => Ok(Box::new(DistanceCost)),
        CostMode::Time => Ok(Box::new(TimeCost::new(config)?)),
    }
}
