//! Rhythm generation pipeline
//!
//! `generate` runs one mode algorithm to get the raw pattern, then the
//! complexity, style and safety passes in that order. All randomness comes
//! from a single [`Random`] seeded per call; nothing is shared between calls.

mod euclidean;
mod modes;
mod passes;
mod rotate;

#[cfg(test)]
mod tests;

pub use euclidean::{euclidean, pulse_count};
pub use passes::{apply_complexity, apply_style, ensure_musical_safety};
pub use rotate::rotate;

use crate::types::{Random, RhythmComplexity, RhythmMode, RhythmParams, RhythmStyle, Sequence};

/// Stateless entry point for rhythm generation
pub struct RhythmicGenerator;

impl RhythmicGenerator {
    /// Generate a finished sequence for `params`.
    ///
    /// Deterministic: identical params give identical sequences. A `steps` of
    /// zero is treated as one.
    pub fn generate(params: &RhythmParams) -> Sequence {
        let mut rng = Random::new(params.seed);
        let mut sequence = Self::raw_pattern(params, &mut rng);
        log::trace!("{} raw: {} active", params.mode, sequence.active_count());

        if params.complexity > RhythmComplexity::Suave {
            apply_complexity(&mut sequence, params.complexity, &mut rng);
        }
        apply_style(&mut sequence, params.style, &mut rng);
        ensure_musical_safety(&mut sequence, &mut rng);

        log::debug!(
            "generated {} steps={} density={} seed={}: {}/{} active",
            params.mode,
            params.steps,
            params.density,
            params.seed,
            sequence.active_count(),
            sequence.len()
        );
        sequence
    }

    /// Run only the mode algorithm, drawing from `rng`.
    ///
    /// The result is already rotated but has not been through the
    /// complexity, style or safety passes.
    pub fn raw_pattern(params: &RhythmParams, rng: &mut Random) -> Sequence {
        let RhythmParams {
            mode,
            steps,
            density,
            rotation,
            complexity,
            style,
            ..
        } = *params;

        match mode {
            RhythmMode::Euclidean => modes::euclidean_mode(steps, density, rotation),
            RhythmMode::Clusters => modes::clusters(steps, density, rotation, rng),
            RhythmMode::BalancedBinary => modes::balanced_binary(steps, density, rotation, rng),
            RhythmMode::Accents => modes::accents(steps, density, rotation, rng),
            RhythmMode::Polyrhythmic => modes::polyrhythmic(steps, density, rotation),
            RhythmMode::Subdivision => modes::subdivision(steps, density, rotation),
            RhythmMode::Mirrored => modes::mirrored(steps, density, rotation),
            RhythmMode::Probabilistic => modes::probabilistic(steps, density, rotation, rng),
            RhythmMode::QuestionAndAnswer => {
                modes::question_and_answer(steps, density, rotation, complexity, rng)
            }
            RhythmMode::VisualShape => modes::visual_shape(steps, density, rotation, style),
        }
    }
}

/// Generate a rhythm from loose arguments.
///
/// Same as [`RhythmicGenerator::generate`] with a [`RhythmParams`] built from
/// the arguments.
#[allow(clippy::too_many_arguments)]
pub fn generate(
    mode: RhythmMode,
    steps: usize,
    density: f64,
    rotation: i64,
    complexity: RhythmComplexity,
    style: RhythmStyle,
    seed: i64,
) -> Sequence {
    RhythmicGenerator::generate(&RhythmParams {
        mode,
        steps,
        density,
        rotation,
        complexity,
        style,
        seed,
    })
}
