//! TOML settings.
//!
//! ```toml
//! [sim]
//! total_ticks    = 48000
//! ticks_per_day  = 24000
//! daylight_ticks = 12000
//! seed           = 7
//!
//! [travel]
//! arrive_distance_sq = 2.25
//! stall_limit        = 5
//! speed              = 0.5
//! ```
//!
//! Every key is optional; missing keys and tables keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use cl_core::SimConfig;
use cl_task::TravelTuning;

use crate::{SimError, SimResult};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sim:    SimConfig,
    pub travel: TravelTuning,
}

impl Settings {
    pub fn from_toml_str(text: &str) -> SimResult<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> SimResult<()> {
        if self.sim.ticks_per_day == 0 {
            return Err(SimError::Config("sim.ticks_per_day must be at least 1".into()));
        }
        if self.travel.speed < 0.0 || !self.travel.speed.is_finite() {
            return Err(SimError::Config(format!("travel.speed {} is not a valid speed", self.travel.speed)));
        }
        Ok(())
    }
}
