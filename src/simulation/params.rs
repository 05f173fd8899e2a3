use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::ConfigError;
use super::vector::Vector2;

/// Largest accepted population.
pub const MAX_POPULATION: usize = 10_000;
/// Largest accepted number of kept generation summaries.
pub const MAX_HISTORY_LEN: usize = 100_000;
/// Largest accepted obstacle window.
pub const MAX_OBSTACLES: usize = 1_000;

/// Simulation parameters, read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Width of the visible course.
    pub world_width: f32,
    /// Height of the visible course.
    pub world_height: f32,
    /// Target number of ticks per second.
    pub tick_rate: u32,
    /// Number of agents per generation.
    pub population_size: usize,
    /// Horizontal distance between consecutive obstacles.
    pub obstacle_spacing: f32,
    /// Horizontal spawn position of every agent.
    pub spawn_x: f32,
    /// Agent bounding box width.
    pub agent_width: f32,
    /// Agent bounding box height.
    pub agent_height: f32,
    /// Obstacle body width.
    pub obstacle_width: f32,
    /// Vertical size of the opening in each obstacle.
    pub obstacle_gap: f32,
    /// Leftward distance an obstacle travels per tick.
    pub obstacle_speed: f32,
    /// Downward acceleration applied each tick.
    pub gravity: f32,
    /// Upward velocity a jump produces on the next tick.
    pub jump_impulse: f32,
    /// Per-weight probability of a mutation.
    pub mutation_rate: f32,
    /// Half-width of the uniform mutation perturbation.
    pub mutation_strength: f32,
    /// Fraction of the height kept free above and below obstacle gaps.
    pub margin_fraction: f32,
    /// Number of generation summaries to keep.
    pub history_len: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            world_width: 1000.0,
            world_height: 720.0,
            tick_rate: 60,
            population_size: 100,
            obstacle_spacing: 400.0,
            spawn_x: 100.0,
            agent_width: 30.0,
            agent_height: 30.0,
            obstacle_width: 50.0,
            obstacle_gap: 250.0,
            obstacle_speed: 4.0,
            gravity: 0.5,
            jump_impulse: 10.0,
            mutation_rate: 0.1,
            mutation_strength: 0.5,
            margin_fraction: 0.1,
            history_len: 500,
        }
    }
}

impl Params {
    /// Parses parameters from JSON. Missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Loads and validates parameters from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Saves the parameters as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Checks that the parameters describe a playable course.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("obstacle_spacing", self.obstacle_spacing)?;
        positive("agent_width", self.agent_width)?;
        positive("agent_height", self.agent_height)?;
        positive("obstacle_width", self.obstacle_width)?;
        positive("obstacle_gap", self.obstacle_gap)?;
        positive("obstacle_speed", self.obstacle_speed)?;

        if !(1..=MAX_POPULATION).contains(&self.population_size) {
            return Err(invalid(
                "population_size",
                format!("must lie in 1..={MAX_POPULATION}"),
            ));
        }
        if self.history_len > MAX_HISTORY_LEN {
            return Err(invalid(
                "history_len",
                format!("must be at most {MAX_HISTORY_LEN}"),
            ));
        }
        let spans = (self.world_width / self.obstacle_spacing).ceil();
        if !spans.is_finite() || spans >= MAX_OBSTACLES as f32 {
            return Err(invalid(
                "obstacle_spacing",
                format!(
                    "width {} over spacing {} needs more than {MAX_OBSTACLES} obstacles",
                    self.world_width, self.obstacle_spacing
                ),
            ));
        }
        if self.tick_rate == 0 {
            return Err(invalid("tick_rate", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate", "must lie in [0, 1]"));
        }
        if !(0.0..0.5).contains(&self.margin_fraction) {
            return Err(invalid("margin_fraction", "must lie in [0, 0.5)"));
        }
        if !self.mutation_strength.is_finite() || self.mutation_strength < 0.0 {
            return Err(invalid("mutation_strength", "must be finite and non-negative"));
        }

        let (low, high) = self.gap_center_range();
        if low >= high {
            return Err(invalid(
                "obstacle_gap",
                format!(
                    "gap {} does not fit in the free band of height {}",
                    self.obstacle_gap,
                    self.world_height * (1.0 - 2.0 * self.margin_fraction)
                ),
            ));
        }

        Ok(())
    }

    /// Number of obstacles kept in the window.
    ///
    /// Saturates instead of overflowing for parameters that fail [`Params::validate`].
    pub fn obstacle_count(&self) -> usize {
        let spans = (self.world_width / self.obstacle_spacing).ceil();
        if !spans.is_finite() {
            return usize::MAX;
        }
        // float to int casts saturate
        (spans as usize).saturating_add(1)
    }

    /// Where new agents appear.
    pub fn spawn_point(&self) -> Vector2 {
        Vector2::new(self.spawn_x, self.world_height / 2.0)
    }

    /// Range of valid gap centres `[low, high)`.
    pub fn gap_center_range(&self) -> (f32, f32) {
        let margin = self.world_height * self.margin_fraction;
        let half_gap = self.obstacle_gap / 2.0;
        (margin + half_gap, self.world_height - margin - half_gap)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
