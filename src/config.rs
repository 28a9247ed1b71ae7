//! Persisted rhythm memory
//!
//! The memory is a JSON document holding every sequence the user configured
//! plus how many bars to arrange. Loading is forgiving: missing fields take
//! defaults and out-of-range values are clamped, so a hand-edited or older
//! file still produces a usable session.

use anyhow::{Context, Result};
use rhythmic_core::{RhythmComplexity, RhythmMode, RhythmParams, RhythmStyle, StepLayout};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MIN_STEPS: usize = 2;
pub const MAX_STEPS: usize = 64;
pub const MAX_SEQUENCES: usize = 14;
pub const MAX_PITCH: u32 = 84;
pub const MAX_CHANNEL: u32 = 15;
pub const MAX_BARS: usize = 256;
/// Upper bound for either half of a step size fraction
pub const PARTS_PER_BEAT: i64 = 24;

pub const DEFAULT_MEMORY_FILE: &str = "rhythm_memory.json";
pub const MEMORY_ENV_VAR: &str = "RHYTHMIC_MEMORY";

/// A seed in 0..1000, used whenever a record has none
pub fn fresh_seed() -> i64 {
    rand::random_range(0..1000)
}

/// Memory path from the environment, or the default file in the working directory
pub fn default_memory_path() -> PathBuf {
    std::env::var_os(MEMORY_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MEMORY_FILE))
}

pub fn clamp_steps(steps: i64) -> usize {
    steps.clamp(MIN_STEPS as i64, MAX_STEPS as i64) as usize
}

pub fn clamp_density(density: f64) -> f64 {
    if density.is_nan() {
        0.5
    } else {
        density.clamp(0.0, 1.0)
    }
}

pub fn clamp_step_part(part: i64) -> i64 {
    part.clamp(1, PARTS_PER_BEAT)
}

/// One configured sequence: generation parameters plus how its hits land
/// on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredSequence")]
pub struct SequenceConfig {
    pub mode: RhythmMode,
    pub steps: usize,
    pub density: f64,
    pub rotation: i64,
    pub complexity: RhythmComplexity,
    pub style: RhythmStyle,
    pub seed: i64,
    pub step_size_numerator: i64,
    pub step_size_denominator: i64,
    pub channel: u32,
    pub pitch: u32,
    pub invert: bool,
    pub generate_fading_notes: bool,
}

impl SequenceConfig {
    /// Fresh record with `steps` steps and a random seed
    pub fn with_steps(steps: usize) -> Self {
        Self {
            mode: RhythmMode::Euclidean,
            steps: clamp_steps(steps as i64),
            density: 0.5,
            rotation: 0,
            complexity: RhythmComplexity::Suave,
            style: RhythmStyle::Regular,
            seed: fresh_seed(),
            step_size_numerator: 1,
            step_size_denominator: 4,
            channel: 0,
            pitch: 0,
            invert: false,
            generate_fading_notes: false,
        }
    }

    pub fn params(&self) -> RhythmParams {
        RhythmParams {
            mode: self.mode,
            steps: self.steps,
            density: self.density,
            rotation: self.rotation,
            complexity: self.complexity,
            style: self.style,
            seed: self.seed,
        }
    }

    pub fn layout(&self) -> StepLayout {
        StepLayout::new(
            self.step_size_numerator,
            self.step_size_denominator,
            self.invert,
        )
    }
}

/// Loose on-disk form of [`SequenceConfig`]; every field may be missing or null.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StoredSequence {
    mode: Option<RhythmMode>,
    steps: Option<i64>,
    density: Option<f64>,
    rotation: Option<i64>,
    complexity: Option<RhythmComplexity>,
    style: Option<RhythmStyle>,
    seed: Option<i64>,
    step_size_numerator: Option<i64>,
    step_size_denominator: Option<i64>,
    channel: Option<i64>,
    pitch: Option<i64>,
    invert: Option<bool>,
    generate_fading_notes: Option<bool>,
}

impl From<StoredSequence> for SequenceConfig {
    fn from(s: StoredSequence) -> Self {
        Self {
            mode: s.mode.unwrap_or_default(),
            steps: clamp_steps(s.steps.unwrap_or(MIN_STEPS as i64)),
            density: clamp_density(s.density.unwrap_or(0.5)),
            rotation: s.rotation.unwrap_or(0).max(0),
            complexity: s.complexity.unwrap_or_default(),
            style: s.style.unwrap_or_default(),
            seed: s.seed.unwrap_or_else(fresh_seed),
            step_size_numerator: clamp_step_part(s.step_size_numerator.unwrap_or(1)),
            step_size_denominator: clamp_step_part(s.step_size_denominator.unwrap_or(4)),
            channel: s.channel.unwrap_or(0).clamp(0, MAX_CHANNEL as i64) as u32,
            pitch: s.pitch.unwrap_or(0).clamp(0, MAX_PITCH as i64) as u32,
            invert: s.invert.unwrap_or(false),
            generate_fading_notes: s.generate_fading_notes.unwrap_or(false),
        }
    }
}

/// Everything saved between sessions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RhythmMemory {
    pub sequences: Vec<SequenceConfig>,
    pub bar_amount: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StoredMemory {
    sequences: Option<Vec<SequenceConfig>>,
    bar_amount: Option<f64>,
}

impl StoredMemory {
    /// Apply the clamps; a missing or empty list becomes a fresh memory for the bar
    fn into_memory(self, beats_per_bar: i64) -> RhythmMemory {
        let mut sequences = self.sequences.unwrap_or_default();
        sequences.truncate(MAX_SEQUENCES);
        if sequences.is_empty() {
            sequences = RhythmMemory::fresh(beats_per_bar).sequences;
        }
        let bar_amount = match self.bar_amount {
            Some(bars) if bars.is_finite() => (bars as i64).clamp(1, MAX_BARS as i64) as usize,
            _ => 1,
        };
        RhythmMemory {
            sequences,
            bar_amount,
        }
    }
}

impl RhythmMemory {
    /// One sequence sized to four steps per beat
    pub fn fresh(beats_per_bar: i64) -> Self {
        Self {
            sequences: vec![SequenceConfig::with_steps(
                clamp_steps(beats_per_bar.saturating_mul(4)),
            )],
            bar_amount: 1,
        }
    }

    /// Parse a memory document for a bar of `beats_per_bar` beats
    pub fn from_json(json: &str, beats_per_bar: i64) -> Result<Self> {
        let stored: StoredMemory =
            serde_json::from_str(json).context("Invalid rhythm memory JSON")?;
        Ok(stored.into_memory(beats_per_bar))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize rhythm memory")
    }

    pub fn load(path: &Path, beats_per_bar: i64) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&contents, beats_per_bar)
            .with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Load `path`, falling back to a fresh memory when it is missing or broken
    pub fn load_or_fresh(path: &Path, beats_per_bar: i64) -> Self {
        if !path.exists() {
            tracing::info!("No rhythm memory at {}, starting fresh", path.display());
            return Self::fresh(beats_per_bar);
        }
        match Self::load(path, beats_per_bar) {
            Ok(memory) => {
                tracing::info!(
                    "Loaded {} sequence(s) from {}",
                    memory.sequences.len(),
                    path.display()
                );
                memory
            }
            Err(e) => {
                tracing::warn!("{:#}; starting fresh", e);
                Self::fresh(beats_per_bar)
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Saved rhythm memory to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let memory = RhythmMemory::from_json(r#"{"sequences": [{}]}"#, 4).unwrap();
        let s = &memory.sequences[0];
        assert_eq!(s.mode, RhythmMode::Euclidean);
        assert_eq!(s.steps, MIN_STEPS);
        assert_eq!(s.density, 0.5);
        assert_eq!(s.rotation, 0);
        assert_eq!(s.complexity, RhythmComplexity::Suave);
        assert_eq!(s.style, RhythmStyle::Regular);
        assert!((0..1000).contains(&s.seed));
        assert_eq!((s.step_size_numerator, s.step_size_denominator), (1, 4));
        assert_eq!(memory.bar_amount, 1);
    }

    #[test]
    fn test_nulls_take_defaults() {
        let memory =
            RhythmMemory::from_json(r#"{"sequences": [{"density": null, "mode": null, "seed": 9}]}"#, 4)
                .unwrap();
        assert_eq!(memory.sequences[0].density, 0.5);
        assert_eq!(memory.sequences[0].mode, RhythmMode::Euclidean);
        assert_eq!(memory.sequences[0].seed, 9);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let json = r#"{
            "sequences": [{
                "steps": 500, "density": 3.0, "rotation": -4,
                "stepSizeNumerator": 0, "stepSizeDenominator": 99,
                "channel": 40, "pitch": -2
            }],
            "barAmount": 0
        }"#;
        let memory = RhythmMemory::from_json(json, 4).unwrap();
        let s = &memory.sequences[0];
        assert_eq!(s.steps, MAX_STEPS);
        assert_eq!(s.density, 1.0);
        assert_eq!(s.rotation, 0);
        assert_eq!(s.step_size_numerator, 1);
        assert_eq!(s.step_size_denominator, PARTS_PER_BEAT);
        assert_eq!(s.channel, MAX_CHANNEL);
        assert_eq!(s.pitch, 0);
        assert_eq!(memory.bar_amount, 1);
    }

    #[test]
    fn test_unknown_mode_loads_as_euclidean() {
        let memory =
            RhythmMemory::from_json(r#"{"sequences": [{"mode": "bossaNova", "style": 2}]}"#, 4)
                .unwrap();
        assert_eq!(memory.sequences[0].mode, RhythmMode::Euclidean);
        assert_eq!(memory.sequences[0].style, RhythmStyle::Vivo);
    }

    #[test]
    fn test_empty_and_oversized_sequence_lists() {
        let memory = RhythmMemory::from_json(r#"{"sequences": []}"#, 4).unwrap();
        assert_eq!(memory.sequences.len(), 1);
        assert_eq!(memory.sequences[0].steps, 16);

        let memory = RhythmMemory::from_json(r#"{"barAmount": 2}"#, 3).unwrap();
        assert_eq!(memory.sequences[0].steps, 12);
        assert_eq!(memory.bar_amount, 2);

        let many = format!(
            r#"{{"sequences": [{}]}}"#,
            vec![r#"{"seed": 1}"#; 20].join(",")
        );
        let memory = RhythmMemory::from_json(&many, 4).unwrap();
        assert_eq!(memory.sequences.len(), MAX_SEQUENCES);
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let mut config = SequenceConfig::with_steps(12);
        config.mode = RhythmMode::QuestionAndAnswer;
        config.density = 0.25;
        config.rotation = 3;
        config.complexity = RhythmComplexity::Bold;
        config.style = RhythmStyle::Saltado;
        config.seed = 321;
        config.step_size_numerator = 1;
        config.step_size_denominator = 3;
        config.channel = 2;
        config.pitch = 36;
        config.invert = true;
        config.generate_fading_notes = true;
        let memory = RhythmMemory {
            sequences: vec![config],
            bar_amount: 4,
        };

        let json = memory.to_json().unwrap();
        assert!(json.contains("\"mode\": \"questionAndAnswer\""));
        assert!(json.contains("\"stepSizeDenominator\": 3"));
        assert_eq!(RhythmMemory::from_json(&json, 4).unwrap(), memory);
    }

    #[test]
    fn test_fresh_memory_sizes_steps_to_bar() {
        assert_eq!(RhythmMemory::fresh(4).sequences[0].steps, 16);
        assert_eq!(RhythmMemory::fresh(32).sequences[0].steps, MAX_STEPS);
        assert_eq!(RhythmMemory::fresh(0).sequences[0].steps, MIN_STEPS);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(RhythmMemory::from_json("not json", 4).is_err());
        assert!(RhythmMemory::from_json(r#"{"sequences": [{"steps": "many"}]}"#, 4).is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "rhythmic_config_test_{}.json",
            std::process::id()
        ));
        let memory = RhythmMemory::fresh(4);
        memory.save(&path).unwrap();
        assert_eq!(RhythmMemory::load(&path, 4).unwrap(), memory);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(RhythmMemory::load_or_fresh(&path, 4).sequences.len(), 1);
    }

    #[test]
    fn test_params_and_layout() {
        let mut config = SequenceConfig::with_steps(8);
        config.seed = 5;
        config.invert = true;
        let params = config.params();
        assert_eq!(params.steps, 8);
        assert_eq!(params.seed, 5);
        assert!(config.layout().invert);
    }
}
