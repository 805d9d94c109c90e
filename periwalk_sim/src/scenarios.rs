//! Named run presets.

use crate::config::WalkConfig;

/// Preset identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetId {
    /// 10×20 box, 100 particles, 100 steps, step length 0.5
    Reference,

    /// Reference setup with step length 0: nothing moves
    Frozen,

    /// A lone walker: moment of inertia stays exactly 0
    Single,

    /// 1000 steps, long enough for the box to saturate the spread
    LongWalk,

    /// 10 000 particles over 20 steps
    Crowd,
}

impl PresetId {
    /// Returns a list of all presets.
    pub fn all() -> Vec<PresetId> {
        vec![
            PresetId::Reference,
            PresetId::Frozen,
            PresetId::Single,
            PresetId::LongWalk,
            PresetId::Crowd,
        ]
    }

    /// Returns the preset name.
    pub fn name(&self) -> &'static str {
        match self {
            PresetId::Reference => "reference",
            PresetId::Frozen => "frozen",
            PresetId::Single => "single",
            PresetId::LongWalk => "long_walk",
            PresetId::Crowd => "crowd",
        }
    }

    /// Returns a description of the preset.
    pub fn description(&self) -> &'static str {
        match self {
            PresetId::Reference => "100 particles, 100 steps of 0.5 in a 10x20 box",
            PresetId::Frozen => "Reference box with zero step length; positions never change",
            PresetId::Single => "One particle; moment of inertia is identically zero",
            PresetId::LongWalk => "1000 steps; spread saturates at the uniform-box value",
            PresetId::Crowd => "10000 particles, 20 steps; tight statistics on the spread",
        }
    }

    /// Builds the run configuration for this preset.
    pub fn config(&self, seed: u64) -> WalkConfig {
        let reference = WalkConfig::default().with_seed(seed);
        match self {
            PresetId::Reference => reference,
            PresetId::Frozen => WalkConfig {
                step_length: 0.0,
                ..reference
            },
            PresetId::Single => WalkConfig {
                particle_count: 1,
                ..reference
            },
            PresetId::LongWalk => WalkConfig {
                number_steps: 1000,
                ..reference
            },
            PresetId::Crowd => WalkConfig {
                particle_count: 10_000,
                number_steps: 20,
                ..reference
            },
        }
    }
}

impl std::fmt::Display for PresetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for PresetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reference" | "default" => Ok(PresetId::Reference),
            "frozen" => Ok(PresetId::Frozen),
            "single" => Ok(PresetId::Single),
            "long_walk" | "longwalk" => Ok(PresetId::LongWalk),
            "crowd" => Ok(PresetId::Crowd),
            _ => Err(format!("Unknown preset: {}", s)),
        }
    }
}
