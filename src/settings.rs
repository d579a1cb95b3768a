//! Client settings and debug options
//!
//! Read from `MUSICDODGE_*` environment variables at startup, or from a JSON
//! document. These only affect logging and the renderer-side particle
//! budget; attack decoding and geometry ignore them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allowed range for `particle_scale`
pub const PARTICLE_SCALE_RANGE: (f32, f32) = (0.1, 5.0);
/// Allowed range for `max_particles_per_tick`
pub const MAX_PARTICLES_RANGE: (usize, usize) = (100, 10_000);

/// Environment variable names
pub mod env {
    pub const DEBUG: &str = "MUSICDODGE_DEBUG";
    pub const DEBUG_PARTICLES: &str = "MUSICDODGE_DEBUG_PARTICLES";
    pub const DEBUG_NETWORK: &str = "MUSICDODGE_DEBUG_NETWORK";
    pub const PARTICLE_SCALE: &str = "MUSICDODGE_PARTICLE_SCALE";
    pub const PARTICLE_MAX: &str = "MUSICDODGE_PARTICLE_MAX";
    pub const PARTICLE_NOOPT: &str = "MUSICDODGE_PARTICLE_NOOPT";
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    // === Debug ===
    /// General debug logging
    pub debug_mode: bool,
    /// Log the particle count after every tick
    pub show_particle_count: bool,
    /// Log raw payloads as they arrive
    pub log_network_data: bool,

    // === Rendering ===
    /// Particle intensity multiplier (0.1 - 5.0)
    pub particle_scale: f32,
    /// Enforce `max_particles_per_tick` in the renderer
    pub particle_budget: bool,
    /// Particle cap per tick when the budget is on (100 - 10000)
    pub max_particles_per_tick: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            show_particle_count: false,
            log_network_data: false,

            particle_scale: 1.0,
            particle_budget: true,
            max_particles_per_tick: 1000,
        }
    }
}

fn flag(value: Option<String>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

impl ClientSettings {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup; unparsable values keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self {
            debug_mode: flag(lookup(env::DEBUG)),
            show_particle_count: flag(lookup(env::DEBUG_PARTICLES)),
            log_network_data: flag(lookup(env::DEBUG_NETWORK)),
            particle_budget: !flag(lookup(env::PARTICLE_NOOPT)),
            ..Self::default()
        };

        if let Some(raw) = lookup(env::PARTICLE_SCALE) {
            match raw.trim().parse::<f32>() {
                Ok(scale) => settings.set_particle_scale(scale),
                Err(_) => log::warn!("Ignoring invalid {}={:?}", env::PARTICLE_SCALE, raw),
            }
        }
        if let Some(raw) = lookup(env::PARTICLE_MAX) {
            match raw.trim().parse::<usize>() {
                Ok(max) => settings.set_max_particles_per_tick(max),
                Err(_) => log::warn!("Ignoring invalid {}={:?}", env::PARTICLE_MAX, raw),
            }
        }

        settings
    }

    /// Parse from JSON; missing fields take defaults, ranges are clamped
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.set_particle_scale(settings.particle_scale);
        settings.set_max_particles_per_tick(settings.max_particles_per_tick);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Re-read the environment, replacing all values
    pub fn reload_from_env(&mut self) {
        *self = Self::from_env();
        log::info!("Settings reloaded");
    }

    pub fn set_particle_scale(&mut self, scale: f32) {
        let (min, max) = PARTICLE_SCALE_RANGE;
        // NaN falls back to the default
        self.particle_scale = if scale.is_nan() {
            1.0
        } else {
            scale.clamp(min, max)
        };
    }

    pub fn set_max_particles_per_tick(&mut self, max_particles: usize) {
        let (min, max) = MAX_PARTICLES_RANGE;
        self.max_particles_per_tick = max_particles.clamp(min, max);
    }

    /// Per-tick particle cap, if the budget is enabled
    pub fn effective_particle_cap(&self) -> Option<usize> {
        self.particle_budget.then_some(self.max_particles_per_tick)
    }

    /// Whether per-tick particle counts should be logged
    pub fn log_particle_counts(&self) -> bool {
        self.debug_mode || self.show_particle_count
    }
}
