//! Placement of generated steps onto a bar-based timeline.
//!
//! A sequence loops for as long as it is placed: step index `s` reads
//! `sequence[s % len]`. Each step covers `step_size` beats, and the host
//! timeline divides every beat into `parts_per_beat` parts. Placement is
//! computed one bar at a time so notes can be written into per-bar patterns.

use crate::types::time::{beats, ceil_int, floor_int, time};
use crate::types::{Sequence, Time};
use num_traits::{CheckedDiv, CheckedMul};
use std::ops::Range;

/// Upper bound for `parts_per_beat` and for either half of a step size
pub const MAX_PARTS_PER_BEAT: i64 = 960;
pub const MAX_BEATS_PER_BAR: i64 = 256;

/// Host timeline geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Timeline {
    pub parts_per_beat: i64,
    pub beats_per_bar: i64,
    /// Note size given to accented hits; plain hits get three quarters of it
    pub note_size_max: u8,
}

impl Timeline {
    /// Both counts are clamped to at least 1 and to
    /// [`MAX_PARTS_PER_BEAT`] / [`MAX_BEATS_PER_BAR`].
    pub fn new(parts_per_beat: i64, beats_per_bar: i64, note_size_max: u8) -> Self {
        Self {
            parts_per_beat: parts_per_beat.clamp(1, MAX_PARTS_PER_BEAT),
            beats_per_bar: beats_per_bar.clamp(1, MAX_BEATS_PER_BAR),
            note_size_max,
        }
    }

    pub fn parts_per_bar(&self) -> i64 {
        self.parts_per_beat.saturating_mul(self.beats_per_bar)
    }

    /// Size for a placed hit
    pub fn note_size(&self, accented: bool) -> u8 {
        if accented {
            self.note_size_max
        } else {
            // round(max * 0.75), ties up
            ((self.note_size_max as u32 * 3 + 2) / 4) as u8
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(24, 8, 6)
    }
}

/// How a sequence is laid over the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepLayout {
    /// Beats per step
    pub step_size: Time,
    /// Place rests instead of hits
    pub invert: bool,
}

impl StepLayout {
    /// Step size of `numerator / denominator` beats; each part is clamped to
    /// `1..=MAX_PARTS_PER_BEAT`
    pub fn new(numerator: i64, denominator: i64, invert: bool) -> Self {
        Self {
            step_size: time(
                numerator.clamp(1, MAX_PARTS_PER_BEAT),
                denominator.clamp(1, MAX_PARTS_PER_BEAT),
            ),
            invert,
        }
    }
}

impl Default for StepLayout {
    fn default() -> Self {
        // sixteenth notes
        Self::new(1, 4, false)
    }
}

/// One note produced by placement, in parts relative to its bar
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NotePlacement {
    /// Index of the step in the looped sequence
    pub step: i64,
    pub start: i64,
    pub end: i64,
    pub size: u8,
    pub accent: bool,
    pub probability: Option<f64>,
    /// The step began in an earlier bar and was cut at this bar's start
    pub continues_last_pattern: bool,
}

impl NotePlacement {
    /// Display opacity; full when the step carries no probability
    pub fn opacity(&self) -> f64 {
        self.probability.unwrap_or(1.0)
    }
}

/// Range of looped step indices that touch bar `bar`.
///
/// `None` when the bar lies too far out for `i64` part positions.
pub fn step_range(layout: &StepLayout, timeline: &Timeline, bar: i64) -> Option<Range<i64>> {
    let bpb = beats(timeline.beats_per_bar);
    let first = bpb
        .checked_mul(&beats(bar))?
        .checked_div(&layout.step_size)?;
    let last = bpb
        .checked_mul(&beats(bar.checked_add(1)?))?
        .checked_div(&layout.step_size)?;
    Some(floor_int(first)..ceil_int(last))
}

/// Part where step `s` begins, counted from the start of bar 0
fn step_start(parts_per_step: Time, s: i64) -> Option<i64> {
    parts_per_step.checked_mul(&beats(s)).map(floor_int)
}

/// Place `sequence` into relative bar `bar`, returning notes in step order.
///
/// Steps that straddle a bar line are clipped to the bar; a step whose clipped
/// span is empty produces nothing. A bar whose part positions would overflow
/// gets no notes.
pub fn place_bar(
    sequence: &Sequence,
    layout: &StepLayout,
    timeline: &Timeline,
    bar: i64,
) -> Vec<NotePlacement> {
    if sequence.is_empty() {
        return Vec::new();
    }

    let parts_per_bar = timeline.parts_per_bar();
    let placement = step_range(layout, timeline, bar).zip(bar.checked_mul(parts_per_bar));
    let Some((steps, part_offset)) = placement else {
        return Vec::new();
    };
    let Some(parts_per_step) = layout
        .step_size
        .checked_mul(&beats(timeline.parts_per_beat))
    else {
        return Vec::new();
    };
    let len = sequence.len() as i64;

    steps
        .filter_map(|s| {
            let step = &sequence[s.rem_euclid(len) as usize];
            if step.active == layout.invert {
                return None;
            }

            let raw_start = step_start(parts_per_step, s)?.checked_sub(part_offset)?;
            let raw_end = step_start(parts_per_step, s.checked_add(1)?)?.checked_sub(part_offset)?;
            let start = raw_start.clamp(0, parts_per_bar);
            let end = raw_end.clamp(0, parts_per_bar);
            if start >= end {
                return None;
            }

            let accent = step.is_accented();
            Some(NotePlacement {
                step: s,
                start,
                end,
                size: timeline.note_size(accent),
                accent,
                probability: step.probability,
                continues_last_pattern: raw_start < 0,
            })
        })
        .collect()
}

/// Place `sequence` into `bar_count` consecutive bars
pub fn place_bars(
    sequence: &Sequence,
    layout: &StepLayout,
    timeline: &Timeline,
    bar_count: usize,
) -> Vec<Vec<NotePlacement>> {
    (0..bar_count as i64)
        .map(|bar| place_bar(sequence, layout, timeline, bar))
        .collect()
}
