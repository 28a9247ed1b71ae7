//! WASM bindings for rhythmic-core
//!
//! Exposes generation and bar placement to JavaScript editors. The plain
//! result types are always compiled so native callers can share them.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use crate::generator::RhythmicGenerator;
use crate::placement::NotePlacement;
use crate::types::{RhythmParams, Step};

/// A generated rhythm together with the parameters that produced it
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GeneratedRhythm {
    pub params: RhythmParams,
    pub steps: Vec<Step>,
    pub active_count: usize,
}

impl GeneratedRhythm {
    pub fn generate(params: RhythmParams) -> Self {
        let sequence = RhythmicGenerator::generate(&params);
        Self {
            params,
            active_count: sequence.active_count(),
            steps: sequence.into_steps(),
        }
    }
}

/// Notes for one bar, as handed to a JavaScript piano roll
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedBar {
    pub bar: i64,
    pub notes: Vec<NotePlacement>,
}

// ============================================================================
// WASM Bindings
// ============================================================================

#[cfg(feature = "wasm")]
fn fresh_seed() -> i64 {
    (js_sys::Math::random() * 1000.0).floor() as i64
}

/// Generate a rhythm. `mode` is a mode name (unknown names give Euclidean);
/// `complexity` and `style` are 0-2. A missing seed draws a fresh one, which
/// is reported back in `params.seed`.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn generate_rhythm(
    mode: &str,
    steps: u32,
    density: f64,
    rotation: i32,
    complexity: i32,
    style: i32,
    seed: Option<i32>,
) -> JsValue {
    use crate::types::{RhythmComplexity, RhythmMode, RhythmStyle};

    let params = RhythmParams {
        mode: RhythmMode::parse_or_default(mode),
        steps: steps as usize,
        density,
        rotation: rotation as i64,
        complexity: RhythmComplexity::from(complexity as i64),
        style: RhythmStyle::from(style as i64),
        seed: seed.map(i64::from).unwrap_or_else(fresh_seed),
    };
    serde_wasm_bindgen::to_value(&GeneratedRhythm::generate(params)).unwrap_or(JsValue::NULL)
}

/// Place previously generated steps into one bar of the host timeline.
/// Returns `null` when `steps` is not an array of step objects.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn place_rhythm_bar(
    steps: JsValue,
    step_numerator: i32,
    step_denominator: i32,
    invert: bool,
    bar: i32,
    parts_per_beat: i32,
    beats_per_bar: i32,
    note_size_max: u8,
) -> JsValue {
    use crate::placement::{place_bar, StepLayout, Timeline};
    use crate::types::Sequence;

    let steps: Vec<Step> = match serde_wasm_bindgen::from_value(steps) {
        Ok(steps) => steps,
        Err(_) => return JsValue::NULL,
    };
    let layout = StepLayout::new(step_numerator as i64, step_denominator as i64, invert);
    let timeline = Timeline::new(parts_per_beat as i64, beats_per_bar as i64, note_size_max);
    let placed = PlacedBar {
        bar: bar as i64,
        notes: place_bar(&Sequence::new(steps), &layout, &timeline, bar as i64),
    };
    serde_wasm_bindgen::to_value(&placed).unwrap_or(JsValue::NULL)
}
