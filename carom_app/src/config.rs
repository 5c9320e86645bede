//! Simulation configuration
//!
//! Loaded from a RON file through `flat_engine::core::config`; every field
//! falls back to a playable default, so a partial or missing file works.

use serde::Deserialize;

/// Top level configuration for the carom simulation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CaromConfig {
    /// Playfield dimensions and walls
    pub arena: ArenaConfig,
    /// Puck population
    pub pucks: PuckConfig,
    /// Run length and draw options
    pub simulation: SimulationConfig,
}

/// Rectangular playfield enclosed by four walls
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Playfield width in world units
    pub width: f64,
    /// Playfield height in world units
    pub height: f64,
    /// Wall panel thickness
    pub wall_thickness: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 50.0,
            wall_thickness: 1.0,
        }
    }
}

/// Puck population parameters
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PuckConfig {
    /// Number of pucks on the table
    pub count: u32,
    /// Puck radius
    pub radius: f64,
    /// Upper bound for the initial pace
    pub max_speed: f64,
    /// Puck contacts before a puck retires from the table
    pub max_caroms: u32,
}

impl Default for PuckConfig {
    fn default() -> Self {
        Self {
            count: 6,
            radius: 2.0,
            max_speed: 1.5,
            max_caroms: 3,
        }
    }
}

/// Run length and draw options
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of fixed update steps to run
    pub frames: u64,
    /// Draw outlines instead of filled shapes
    pub border_only: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            border_only: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_playable() {
        let config = CaromConfig::default();
        let margin = config.pucks.radius + config.arena.wall_thickness;
        assert!(config.arena.width > 2.0 * margin);
        assert!(config.arena.height > 2.0 * margin);
        assert!(config.pucks.count > 0);
        assert!(config.simulation.frames > 0);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: CaromConfig =
            ron::from_str("(pucks: (count: 2), simulation: (border_only: true))")
                .expect("partial config parses");
        assert_eq!(config.pucks.count, 2);
        assert!(config.simulation.border_only);
        assert_eq!(config.pucks.max_caroms, PuckConfig::default().max_caroms);
        assert_eq!(config.arena.width, ArenaConfig::default().width);
    }
}
