//! Raw pattern algorithms, one per [`RhythmMode`].
//!
//! Each function returns a sequence of exactly `steps` slots (or one slot when
//! `steps` is zero) with only `active` set, except where a mode assigns
//! accents or probabilities itself. Rotation happens here, before any
//! post-processing pass sees the pattern.

use super::euclidean::{euclidean, pulse_count, round_half_up};
use super::rotate::rotate;
use crate::types::{Random, RhythmComplexity, RhythmStyle, Sequence, Step};

const LAYER_DIVISORS: [usize; 6] = [1, 2, 4, 8, 16, 32];

/// Golden-ratio increment for low-discrepancy sampling
const GOLDEN_STEP: f64 = 1.618;

pub fn euclidean_mode(steps: usize, density: f64, rotation: i64) -> Sequence {
    let pattern = euclidean(pulse_count(steps, density), steps);
    Sequence::from_flags(rotate(&pattern, rotation))
}

/// Runs of one or two pulses separated by gaps of one or two rests.
pub fn clusters(steps: usize, density: f64, rotation: i64, rng: &mut Random) -> Sequence {
    let steps = steps.max(1);
    let mut pattern = vec![false; steps];

    let mut remaining = pulse_count(steps, density);
    let mut cursor = 0;
    while remaining > 0 {
        let cluster = if rng.next() > 0.5 { 2 } else { 1 };
        let size = cluster.min(remaining);
        for j in 0..size {
            pattern[(cursor + j) % steps] = true;
        }
        remaining -= size;
        cursor += size + if rng.next() > 0.3 { 2 } else { 1 };
        if cursor >= steps * 2 {
            break;
        }
    }

    Sequence::from_flags(rotate(&pattern, rotation))
}

/// Coin flips biased against long runs of the same state.
pub fn balanced_binary(steps: usize, density: f64, rotation: i64, rng: &mut Random) -> Sequence {
    let steps = steps.max(1);
    let mut balance: i64 = 0;
    let pattern: Vec<bool> = (0..steps)
        .map(|_| {
            let threshold = density - balance as f64 * 0.2;
            let active = rng.next() < threshold;
            balance += if active { 1 } else { -1 };
            active
        })
        .collect();
    Sequence::from_flags(rotate(&pattern, rotation))
}

/// Euclidean base with accents favouring structurally strong positions.
pub fn accents(steps: usize, density: f64, rotation: i64, rng: &mut Random) -> Sequence {
    let mut base = euclidean_mode(steps, density, rotation);
    let last = base.len() - 1;
    for (i, step) in base.iter_mut().enumerate() {
        if !step.active {
            continue;
        }
        let strong = i == 0 || i == last || i % 4 == 0 || i % 3 == 0;
        let chance = if strong { 0.7 } else { 0.2 };
        step.accent = Some(rng.next() < chance);
    }
    base
}

/// Two periodic layers of different cycle lengths, merged.
pub fn polyrhythmic(steps: usize, density: f64, rotation: i64) -> Sequence {
    let steps = steps.max(1);
    let cycle_b = if steps % 4 == 0 {
        steps as f64 * 0.75
    } else {
        steps as f64 * 0.66
    };
    let len_b = (cycle_b.floor() as usize).max(2);

    let hits_a = round_half_up(steps as f64 * density / 2.0) as usize;
    let hits_b = round_half_up(len_b as f64 * density / 2.0) as usize;

    let pattern: Vec<Step> = (0..steps)
        .map(|i| Step::from_active(cycle_hit(i, hits_a, steps) || cycle_hit(i, hits_b, len_b)))
        .collect();
    Sequence::new(rotate(&pattern, rotation))
}

/// `(index * hits) mod len < hits`, computed without overflowing.
fn cycle_hit(index: usize, hits: usize, len: usize) -> bool {
    (index % len) * (hits % len) % len < hits
}

/// Nested power-of-two grids, coarsest first.
pub fn subdivision(steps: usize, density: f64, rotation: i64) -> Sequence {
    let steps = steps.max(1);
    let mut pattern = vec![false; steps];
    let layers: Vec<usize> = LAYER_DIVISORS
        .iter()
        .copied()
        .filter(|&l| l <= steps)
        .collect();
    let layers_to_use = (round_half_up(layers.len() as f64 * density) as usize)
        .max(1)
        .min(layers.len());

    for &layer in &layers[..layers_to_use] {
        let interval = steps as f64 / layer as f64;
        let mut position = 0.0;
        while position < steps as f64 {
            pattern[position.floor() as usize] = true;
            position += interval;
        }
    }

    Sequence::from_flags(rotate(&pattern, rotation))
}

/// Euclidean half followed by its reflection.
pub fn mirrored(steps: usize, density: f64, rotation: i64) -> Sequence {
    let half_steps = steps / 2;
    let half = euclidean_mode(half_steps, density, 0);

    let mut pattern = half.steps.clone();
    pattern.extend(half.steps[..half_steps].iter().rev().copied());

    let mut sequence = Sequence::new(pattern);
    sequence.fit_to(steps.max(1));
    Sequence::new(rotate(&sequence.steps, rotation))
}

/// Fixed edges, weak beats weighted by density and tagged with a playback
/// probability.
pub fn probabilistic(steps: usize, density: f64, rotation: i64, rng: &mut Random) -> Sequence {
    let steps = steps.max(1);
    let pattern: Vec<Step> = (0..steps)
        .map(|i| {
            if i == 0 || i == steps - 1 {
                Step::active()
            } else if i % 2 != 0 {
                Step {
                    active: rng.next() < density,
                    accent: None,
                    probability: Some(0.5 + density * 0.5),
                }
            } else {
                Step::from_active(rng.next() < density * 0.5)
            }
        })
        .collect();
    Sequence::new(rotate(&pattern, rotation))
}

/// A Euclidean phrase answered by a lightly mutated copy of itself.
pub fn question_and_answer(
    steps: usize,
    density: f64,
    rotation: i64,
    complexity: RhythmComplexity,
    rng: &mut Random,
) -> Sequence {
    let half_steps = steps / 2;
    let question = euclidean_mode(half_steps, density, 0);
    let mut answer = question.clone();

    let change = if complexity == RhythmComplexity::Bold { 0.3 } else { 0.15 };
    for step in answer.steps.iter_mut().take(half_steps) {
        if rng.next() < change {
            step.active = !step.active;
        }
    }

    let mut sequence = question;
    sequence.steps.extend(answer.steps);
    sequence.fit_to(steps.max(1));
    Sequence::new(rotate(&sequence.steps, rotation))
}

/// Density contour chosen by style, sampled along the golden ratio.
pub fn visual_shape(steps: usize, density: f64, rotation: i64, style: RhythmStyle) -> Sequence {
    let steps = steps.max(1);
    let pattern: Vec<bool> = (0..steps)
        .map(|i| {
            let progress = i as f64 / steps as f64;
            let local_density = match style {
                RhythmStyle::Regular => density,
                // Arch
                RhythmStyle::Saltado => density * (1.0 - (progress - 0.5).abs() * 2.0),
                // Ramp
                RhythmStyle::Vivo => density * progress,
            };
            (i as f64 * GOLDEN_STEP) % 1.0 < local_density
        })
        .collect();
    Sequence::from_flags(rotate(&pattern, rotation))
}
