//! Multi-sequence editing session
//!
//! Holds the rhythm memory, the sequence generated for each record, and which
//! record is being edited. Every parameter change regenerates only the
//! affected sequence.

use crate::config::{
    clamp_density, clamp_step_part, clamp_steps, fresh_seed, RhythmMemory, SequenceConfig,
    MAX_BARS, MAX_CHANNEL, MAX_PITCH, MAX_SEQUENCES,
};
use anyhow::{anyhow, bail, Result};
use rhythmic_core::{
    place_bar, place_bars, NotePlacement, RhythmComplexity, RhythmMode, RhythmStyle,
    RhythmicGenerator, Sequence, Timeline,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// A placed note with the pitch and envelope of the sequence that made it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrangedNote {
    pub pitch: u32,
    pub start: i64,
    pub end: i64,
    pub size: u8,
    pub accent: bool,
    pub probability: Option<f64>,
    pub fading: bool,
    pub continues_last_pattern: bool,
}

impl ArrangedNote {
    fn from_placement(placement: &NotePlacement, config: &SequenceConfig) -> Self {
        Self {
            pitch: config.pitch,
            start: placement.start,
            end: placement.end,
            size: placement.size,
            accent: placement.accent,
            probability: placement.probability,
            fading: config.generate_fading_notes,
            continues_last_pattern: placement.continues_last_pattern,
        }
    }
}

/// Notes for every channel, one list per bar
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrangement {
    pub bar_amount: usize,
    pub parts_per_bar: i64,
    pub channels: BTreeMap<u32, Vec<Vec<ArrangedNote>>>,
}

impl Arrangement {
    pub fn note_count(&self) -> usize {
        self.channels
            .values()
            .flat_map(|bars| bars.iter())
            .map(|notes| notes.len())
            .sum()
    }
}

pub struct RhythmSession {
    memory: RhythmMemory,
    generated: Vec<Sequence>,
    selected: usize,
    timeline: Timeline,
}

impl RhythmSession {
    pub fn new(memory: RhythmMemory, timeline: Timeline) -> Self {
        let mut session = Self {
            memory,
            generated: Vec::new(),
            selected: 0,
            timeline,
        };
        session.generate_all();
        session
    }

    pub fn memory(&self) -> &RhythmMemory {
        &self.memory
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn len(&self) -> usize {
        self.memory.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.sequences.is_empty()
    }

    pub fn current(&self) -> &SequenceConfig {
        &self.memory.sequences[self.selected]
    }

    pub fn current_sequence(&self) -> &Sequence {
        &self.generated[self.selected]
    }

    /// Records paired with their generated sequences
    pub fn entries(&self) -> impl Iterator<Item = (&SequenceConfig, &Sequence)> {
        self.memory.sequences.iter().zip(self.generated.iter())
    }

    pub fn generate_all(&mut self) {
        self.generated = self
            .memory
            .sequences
            .iter()
            .map(|config| RhythmicGenerator::generate(&config.params()))
            .collect();
    }

    fn generate_current(&mut self) {
        self.generated[self.selected] = RhythmicGenerator::generate(&self.current().params());
    }

    /// Swap in a new memory (after a load or a file change)
    pub fn replace_memory(&mut self, memory: RhythmMemory) {
        self.memory = memory;
        self.selected = self.selected.min(self.memory.sequences.len() - 1);
        self.generate_all();
    }

    /// Select by zero-based index
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.len() {
            bail!("No sequence {} (have {})", index + 1, self.len());
        }
        self.selected = index;
        Ok(())
    }

    /// Duplicate the current record with a fresh seed and select the copy
    pub fn add_sequence(&mut self) -> Result<usize> {
        if self.len() >= MAX_SEQUENCES {
            bail!("At most {} sequences", MAX_SEQUENCES);
        }
        let copy = SequenceConfig {
            seed: fresh_seed(),
            ..self.current().clone()
        };
        self.memory.sequences.push(copy);
        self.generated.push(Sequence::default());
        self.selected = self.len() - 1;
        self.generate_current();
        Ok(self.selected)
    }

    /// Remove the current record; the last one left cannot be removed
    pub fn remove_sequence(&mut self) -> bool {
        if self.len() <= 1 {
            return false;
        }
        self.memory.sequences.remove(self.selected);
        self.generated.remove(self.selected);
        self.selected = self.selected.min(self.len() - 1);
        true
    }

    /// Roll a new seed for the current record
    pub fn regenerate(&mut self) -> i64 {
        let seed = fresh_seed();
        self.memory.sequences[self.selected].seed = seed;
        self.generate_current();
        seed
    }

    /// Set one field of the current record from text.
    ///
    /// Numbers out of range are clamped the same way a loaded memory is.
    /// `channel` is one-based here, as shown to users.
    pub fn set(&mut self, field: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let regenerate = match field {
            "mode" => {
                let mode = RhythmMode::from_str(value)
                    .ok_or_else(|| anyhow!("Unknown mode '{}'", value))?;
                self.current_mut().mode = mode;
                true
            }
            "steps" => {
                self.current_mut().steps = clamp_steps(parse_int(field, value)?);
                true
            }
            "density" => {
                let density: f64 = value
                    .parse()
                    .map_err(|_| anyhow!("Invalid density '{}'", value))?;
                self.current_mut().density = clamp_density(density);
                true
            }
            "rotation" => {
                self.current_mut().rotation = parse_int(field, value)?.max(0);
                true
            }
            "complexity" => {
                let complexity = RhythmComplexity::from_str(value)
                    .ok_or_else(|| anyhow!("Unknown complexity '{}'", value))?;
                self.current_mut().complexity = complexity;
                true
            }
            "style" => {
                let style = RhythmStyle::from_str(value)
                    .ok_or_else(|| anyhow!("Unknown style '{}'", value))?;
                self.current_mut().style = style;
                true
            }
            "seed" => {
                self.current_mut().seed = parse_int(field, value)?.max(0);
                true
            }
            "channel" => {
                let channel = (parse_int(field, value)? - 1).clamp(0, MAX_CHANNEL as i64);
                self.current_mut().channel = channel as u32;
                false
            }
            "pitch" => {
                let pitch = parse_int(field, value)?.clamp(0, MAX_PITCH as i64);
                self.current_mut().pitch = pitch as u32;
                false
            }
            "step" => {
                let (num, den) = value
                    .split_once('/')
                    .ok_or_else(|| anyhow!("Step size must look like 1/4"))?;
                let num = clamp_step_part(parse_int(field, num.trim())?);
                let den = clamp_step_part(parse_int(field, den.trim())?);
                let current = self.current_mut();
                current.step_size_numerator = num;
                current.step_size_denominator = den;
                false
            }
            "invert" => {
                self.current_mut().invert = parse_bool(value)?;
                false
            }
            "fading" => {
                self.current_mut().generate_fading_notes = parse_bool(value)?;
                false
            }
            "bars" => {
                self.memory.bar_amount = parse_int(field, value)?.clamp(1, MAX_BARS as i64) as usize;
                false
            }
            _ => bail!("Unknown field '{}'", field),
        };
        if regenerate {
            self.generate_current();
        }
        Ok(())
    }

    fn current_mut(&mut self) -> &mut SequenceConfig {
        &mut self.memory.sequences[self.selected]
    }

    /// Placements of the current sequence in relative bar `bar`
    pub fn preview(&self, bar: usize) -> Vec<NotePlacement> {
        let config = self.current();
        place_bar(
            self.current_sequence(),
            &config.layout(),
            &self.timeline,
            bar as i64,
        )
    }

    /// Place every sequence into `bar_amount` bars, grouped by channel.
    ///
    /// Within a channel, notes keep sequence order and then step order.
    pub fn arrange(&self, bar_amount: usize) -> Arrangement {
        let mut channels: BTreeMap<u32, Vec<Vec<ArrangedNote>>> = BTreeMap::new();

        for (config, sequence) in self.entries() {
            if sequence.is_empty() {
                continue;
            }
            let bars = channels
                .entry(config.channel)
                .or_insert_with(|| vec![Vec::new(); bar_amount]);
            let placed = place_bars(sequence, &config.layout(), &self.timeline, bar_amount);
            for (notes, placements) in bars.iter_mut().zip(placed) {
                notes.extend(
                    placements
                        .iter()
                        .map(|p| ArrangedNote::from_placement(p, config)),
                );
            }
        }

        Arrangement {
            bar_amount,
            parts_per_bar: self.timeline.parts_per_bar(),
            channels,
        }
    }
}

fn parse_int(field: &str, value: &str) -> Result<i64> {
    value
        .parse()
        .map_err(|_| anyhow!("Invalid {} '{}'", field, value))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(anyhow!("Expected on/off, got '{}'", value)),
    }
}
