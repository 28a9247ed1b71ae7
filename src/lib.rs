//! # Rhythmic
//!
//! Command-line front end for the `rhythmic-core` rhythm engine. It keeps a
//! small set of sequence records on disk, regenerates their patterns as
//! parameters change, and draws how they land on a bar timeline.
//!
//! ## Modules
//!
//! - `config`: The persisted rhythm memory and the clamps applied when loading it.
//! - `session`: Multi-sequence editing state and channel arrangement.
//! - `commands`: The command registry shared by the REPL and one-shot mode.
//! - `repl`: The interactive loop, including reloading on file changes.
//! - `render`: Terminal drawing of sequences and bars.

pub mod commands;
pub mod config;
pub mod render;
pub mod repl;
pub mod session;

pub use crate::config::{RhythmMemory, SequenceConfig};
pub use crate::session::{ArrangedNote, Arrangement, RhythmSession};
