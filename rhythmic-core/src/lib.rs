//! # Rhythmic Core
//!
//! WASM-compatible core library for procedural rhythm generation.
//! Turns a handful of parameters (mode, steps, density, rotation, complexity,
//! style, seed) into a fixed-length sequence of steps, deterministically.
//!
//! ## Features
//!
//! - **serde**: Enable JSON serialization for web interop and saved memories
//! - **wasm**: Enable WASM bindings via wasm-bindgen
//! - **colored**: Enable colored terminal output (disabled in WASM)
//!
//! ## Example
//!
//! ```
//! use rhythmic_core::{RhythmicGenerator, RhythmMode, RhythmParams};
//!
//! let params = RhythmParams::new(RhythmMode::Euclidean, 16, 0.25).with_seed(7);
//! let sequence = RhythmicGenerator::generate(&params);
//! assert_eq!(sequence.len(), 16);
//! ```

pub mod generator;
pub mod placement;
pub mod types;
pub mod wasm;

// Re-export commonly used types
pub use generator::{generate, RhythmicGenerator};
pub use placement::{place_bar, place_bars, NotePlacement, StepLayout, Timeline};
pub use types::{Random, RhythmComplexity, RhythmMode, RhythmParams, RhythmStyle, Sequence, Step};

pub use wasm::GeneratedRhythm;
