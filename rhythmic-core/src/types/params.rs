//! Generation parameters: algorithmic mode, complexity, style and the
//! combined parameter record passed to the generator.
//!
//! These are pure data types. Textual names follow the camelCase spelling used
//! by saved rhythm memories so records written by older editors still load.

use std::fmt;

/// Algorithm used to produce the raw pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum RhythmMode {
    #[default]
    Euclidean,
    Clusters,
    BalancedBinary,
    Accents,
    Polyrhythmic,
    Subdivision,
    Mirrored,
    Probabilistic,
    QuestionAndAnswer,
    VisualShape,
}

impl RhythmMode {
    pub const ALL: [RhythmMode; 10] = [
        RhythmMode::Euclidean,
        RhythmMode::Clusters,
        RhythmMode::BalancedBinary,
        RhythmMode::Accents,
        RhythmMode::Polyrhythmic,
        RhythmMode::Subdivision,
        RhythmMode::Mirrored,
        RhythmMode::Probabilistic,
        RhythmMode::QuestionAndAnswer,
        RhythmMode::VisualShape,
    ];

    /// Parse mode from string (case-insensitive, `-`/`_` ignored)
    pub fn from_str(s: &str) -> Option<RhythmMode> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "euclidean" | "euclid" => Some(RhythmMode::Euclidean),
            "clusters" | "cluster" => Some(RhythmMode::Clusters),
            "balancedbinary" | "balanced" => Some(RhythmMode::BalancedBinary),
            "accents" | "accent" => Some(RhythmMode::Accents),
            "polyrhythmic" | "poly" => Some(RhythmMode::Polyrhythmic),
            "subdivision" | "subdiv" => Some(RhythmMode::Subdivision),
            "mirrored" | "mirror" => Some(RhythmMode::Mirrored),
            "probabilistic" | "prob" => Some(RhythmMode::Probabilistic),
            "questionandanswer" | "qa" => Some(RhythmMode::QuestionAndAnswer),
            "visualshape" | "shape" => Some(RhythmMode::VisualShape),
            _ => None,
        }
    }

    /// Parse mode, falling back to Euclidean for anything unrecognized
    pub fn parse_or_default(s: &str) -> RhythmMode {
        Self::from_str(s).unwrap_or_default()
    }

    /// Get the stored (camelCase) name
    pub fn name(&self) -> &'static str {
        match self {
            RhythmMode::Euclidean => "euclidean",
            RhythmMode::Clusters => "clusters",
            RhythmMode::BalancedBinary => "balancedBinary",
            RhythmMode::Accents => "accents",
            RhythmMode::Polyrhythmic => "polyrhythmic",
            RhythmMode::Subdivision => "subdivision",
            RhythmMode::Mirrored => "mirrored",
            RhythmMode::Probabilistic => "probabilistic",
            RhythmMode::QuestionAndAnswer => "questionAndAnswer",
            RhythmMode::VisualShape => "visualShape",
        }
    }
}

impl fmt::Display for RhythmMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for RhythmMode {
    fn from(s: String) -> Self {
        RhythmMode::parse_or_default(&s)
    }
}

impl From<RhythmMode> for String {
    fn from(mode: RhythmMode) -> Self {
        mode.name().to_string()
    }
}

/// How hard the post-generation mutation pass shakes the pattern.
///
/// Ordered: `Suave < Notable < Bold`. Stored as 0/1/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "i64", into = "i64"))]
pub enum RhythmComplexity {
    #[default]
    Suave = 0,
    Notable = 1,
    Bold = 2,
}

impl RhythmComplexity {
    pub const ALL: [RhythmComplexity; 3] = [
        RhythmComplexity::Suave,
        RhythmComplexity::Notable,
        RhythmComplexity::Bold,
    ];

    /// Parse complexity from a name or its numeric code
    pub fn from_str(s: &str) -> Option<RhythmComplexity> {
        match s.trim().to_lowercase().as_str() {
            "suave" | "0" => Some(RhythmComplexity::Suave),
            "notable" | "1" => Some(RhythmComplexity::Notable),
            "bold" | "2" => Some(RhythmComplexity::Bold),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RhythmComplexity::Suave => "suave",
            RhythmComplexity::Notable => "notable",
            RhythmComplexity::Bold => "bold",
        }
    }

    /// Per-step chance used by the mutation passes; zero for Suave
    pub fn change_rate(&self) -> f64 {
        match self {
            RhythmComplexity::Suave => 0.0,
            RhythmComplexity::Notable => 0.15,
            RhythmComplexity::Bold => 0.3,
        }
    }
}

impl fmt::Display for RhythmComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<i64> for RhythmComplexity {
    fn from(code: i64) -> Self {
        match code {
            1 => RhythmComplexity::Notable,
            2 => RhythmComplexity::Bold,
            _ => RhythmComplexity::Suave,
        }
    }
}

impl From<RhythmComplexity> for i64 {
    fn from(c: RhythmComplexity) -> Self {
        c as i64
    }
}

/// Feel modifier applied after generation. Stored as 0/1/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "i64", into = "i64"))]
pub enum RhythmStyle {
    #[default]
    Regular = 0,
    /// Offbeat softening
    Saltado = 1,
    /// Ghost-note injection
    Vivo = 2,
}

impl RhythmStyle {
    pub const ALL: [RhythmStyle; 3] = [RhythmStyle::Regular, RhythmStyle::Saltado, RhythmStyle::Vivo];

    /// Parse style from a name or its numeric code
    pub fn from_str(s: &str) -> Option<RhythmStyle> {
        match s.trim().to_lowercase().as_str() {
            "regular" | "0" => Some(RhythmStyle::Regular),
            "saltado" | "1" => Some(RhythmStyle::Saltado),
            "vivo" | "2" => Some(RhythmStyle::Vivo),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RhythmStyle::Regular => "regular",
            RhythmStyle::Saltado => "saltado",
            RhythmStyle::Vivo => "vivo",
        }
    }
}

impl fmt::Display for RhythmStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<i64> for RhythmStyle {
    fn from(code: i64) -> Self {
        match code {
            1 => RhythmStyle::Saltado,
            2 => RhythmStyle::Vivo,
            _ => RhythmStyle::Regular,
        }
    }
}

impl From<RhythmStyle> for i64 {
    fn from(s: RhythmStyle) -> Self {
        s as i64
    }
}

/// Everything one `generate` call needs.
///
/// The generator does not clamp these; callers keep `steps` in 2..=64 and
/// `density` in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RhythmParams {
    pub mode: RhythmMode,
    pub steps: usize,
    pub density: f64,
    pub rotation: i64,
    pub complexity: RhythmComplexity,
    pub style: RhythmStyle,
    pub seed: i64,
}

impl RhythmParams {
    pub fn new(mode: RhythmMode, steps: usize, density: f64) -> Self {
        Self {
            mode,
            steps,
            density,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: i64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_complexity(mut self, complexity: RhythmComplexity) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_style(mut self, style: RhythmStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for RhythmParams {
    fn default() -> Self {
        Self {
            mode: RhythmMode::Euclidean,
            steps: 16,
            density: 0.5,
            rotation: 0,
            complexity: RhythmComplexity::Suave,
            style: RhythmStyle::Regular,
            seed: 0,
        }
    }
}
