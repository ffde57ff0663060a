//! Simulation Settings
//!
//! Budgets shared by every emitter instance. Settings deserialize from JSON
//! with missing fields taking their defaults:
//!
//! ```rust,ignore
//! let settings = SimulationSettings::from_json(r#"{ "max_particles": 512 }"#)?;
//! assert_eq!(settings.max_spawn_per_frame, 256);
//! ```

use serde::{Deserialize, Serialize};

use ember_core::errors::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Live particle cap per emitter instance.
    pub max_particles: usize,
    /// Emissions an emitter may perform in a single frame.
    pub max_spawn_per_frame: u32,
    /// Cap on owed emissions carried across frames.
    pub max_backlog: f32,
    /// Longest frame delta fed to the simulation, in seconds.
    pub max_frame_time: f32,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            max_particles: 4096,
            max_spawn_per_frame: 256,
            max_backlog: 64.0,
            max_frame_time: 0.25,
            seed: None,
        }
    }
}

impl SimulationSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
