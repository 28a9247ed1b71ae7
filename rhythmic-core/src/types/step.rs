//! A single rhythm step and the generated sequence that holds them.

#[cfg(feature = "colored")]
use colored::*;
use std::fmt;
use std::ops::{Index, IndexMut};

/// One discrete time slot of a rhythm.
///
/// `accent` and `probability` stay `None` until a mode or a post-processing
/// pass sets them, so callers can tell "not accented" from "never decided".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub active: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub accent: Option<bool>,
    /// Playback weight in (0, 1]; unrelated to the random draws made while generating.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub probability: Option<f64>,
}

impl Step {
    pub fn active() -> Self {
        Self {
            active: true,
            ..Self::default()
        }
    }

    pub fn rest() -> Self {
        Self::default()
    }

    pub fn from_active(active: bool) -> Self {
        Self {
            active,
            ..Self::default()
        }
    }

    pub fn is_accented(&self) -> bool {
        self.accent.unwrap_or(false)
    }

    /// Toggle the accent flag; an unset accent counts as `false`.
    pub fn toggle_accent(&mut self) {
        self.accent = Some(!self.is_accented());
    }

    fn symbol(&self) -> char {
        match (self.active, self.is_accented(), self.probability) {
            (false, _, _) => '.',
            (true, true, _) => 'X',
            (true, false, Some(p)) if p < 1.0 => 'o',
            (true, false, _) => 'x',
        }
    }
}

#[cfg(feature = "colored")]
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.symbol().to_string();
        let styled = match self.symbol() {
            '.' => symbol.bright_black(),
            'X' => symbol.bright_yellow().bold(),
            'o' => symbol.cyan().dimmed(),
            _ => symbol.bright_green(),
        };
        write!(f, "{}", styled)
    }
}

// Plain Display impl for non-colored builds (WASM)
#[cfg(not(feature = "colored"))]
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A generated rhythm: one [`Step`] per slot, in playback order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Sequence {
    pub steps: Vec<Step>,
}

impl Sequence {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Build a sequence of plain steps from on/off flags
    pub fn from_flags<I: IntoIterator<Item = bool>>(flags: I) -> Self {
        Self {
            steps: flags.into_iter().map(Step::from_active).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Step> {
        self.steps.iter_mut()
    }

    pub fn active_flags(&self) -> Vec<bool> {
        self.steps.iter().map(|s| s.active).collect()
    }

    pub fn active_count(&self) -> usize {
        self.steps.iter().filter(|s| s.active).count()
    }

    pub fn has_active(&self) -> bool {
        self.steps.iter().any(|s| s.active)
    }

    /// Append inactive steps up to `len`, or cut the tail down to it.
    pub fn fit_to(&mut self, len: usize) {
        self.steps.resize(len, Step::rest());
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl From<Vec<Step>> for Sequence {
    fn from(steps: Vec<Step>) -> Self {
        Self { steps }
    }
}

impl Index<usize> for Sequence {
    type Output = Step;

    fn index(&self, index: usize) -> &Step {
        &self.steps[index]
    }
}

impl IndexMut<usize> for Sequence {
    fn index_mut(&mut self, index: usize) -> &mut Step {
        &mut self.steps[index]
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 && i % 4 == 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}
