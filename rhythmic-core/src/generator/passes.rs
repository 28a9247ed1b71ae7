//! Post-processing stages, applied in order: complexity, style, safety.
//!
//! Each stage mutates the sequence in place and draws from the same
//! [`Random`] as the mode that produced it.

use crate::types::{Random, RhythmComplexity, RhythmStyle, Sequence};

/// Randomly flip steps or toggle accents. The downbeat is never touched.
///
/// A no-op at [`RhythmComplexity::Suave`], which draws nothing from `rng`.
pub fn apply_complexity(sequence: &mut Sequence, complexity: RhythmComplexity, rng: &mut Random) {
    if complexity == RhythmComplexity::Suave {
        return;
    }
    let rate = complexity.change_rate();
    for step in sequence.iter_mut().skip(1) {
        if rng.next() < rate {
            if rng.next() > 0.5 {
                step.active = !step.active;
            } else if step.active {
                step.toggle_accent();
            }
        }
    }
}

/// Saltado softens active offbeats; Vivo sprinkles ghost notes into rests.
pub fn apply_style(sequence: &mut Sequence, style: RhythmStyle, rng: &mut Random) {
    match style {
        RhythmStyle::Regular => {}
        RhythmStyle::Saltado => {
            for (i, step) in sequence.iter_mut().enumerate() {
                if i % 2 != 0 && step.active {
                    step.probability = Some(0.8);
                }
            }
        }
        RhythmStyle::Vivo => {
            for step in sequence.iter_mut() {
                if !step.active && rng.next() < 0.1 {
                    step.active = true;
                    step.probability = Some(0.4);
                }
            }
        }
    }
}

/// Repair degenerate output: never silent, usually a downbeat, sometimes an
/// accented closing step.
///
/// Only ever activates steps, so running it again on its own output can add
/// but never remove hits.
pub fn ensure_musical_safety(sequence: &mut Sequence, rng: &mut Random) {
    if sequence.is_empty() {
        return;
    }
    if !sequence.has_active() {
        sequence[0].active = true;
    }
    if !sequence[0].active && rng.next() < 0.9 {
        sequence[0].active = true;
    }
    let last = sequence.len() - 1;
    if last > 0 && !sequence[last].active && rng.next() < 0.5 {
        sequence[last].active = true;
        sequence[last].accent = Some(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Step;

    #[test]
    fn test_complexity_suave_is_noop_and_draws_nothing() {
        let mut seq = Sequence::from_flags([true, false, true, false]);
        let before = seq.clone();
        let mut rng = Random::new(8);
        apply_complexity(&mut seq, RhythmComplexity::Suave, &mut rng);
        assert_eq!(seq, before);
        assert_eq!(rng, Random::new(8));
    }

    #[test]
    fn test_complexity_keeps_downbeat() {
        for seed in 0..200 {
            let mut seq = Sequence::from_flags([true; 16]);
            let mut rng = Random::new(seed);
            apply_complexity(&mut seq, RhythmComplexity::Bold, &mut rng);
            assert!(seq[0].active);
            assert_eq!(seq[0].accent, None);
        }
    }

    #[test]
    fn test_complexity_changes_something_when_bold() {
        let original = Sequence::from_flags([true, false].repeat(16));
        let changed = (0..20).any(|seed| {
            let mut seq = original.clone();
            apply_complexity(&mut seq, RhythmComplexity::Bold, &mut Random::new(seed));
            seq != original
        });
        assert!(changed);
    }

    #[test]
    fn test_saltado_marks_active_offbeats() {
        let mut seq = Sequence::from_flags([true, true, false, true, true, false]);
        apply_style(&mut seq, RhythmStyle::Saltado, &mut Random::new(1));
        assert_eq!(seq[0].probability, None);
        assert_eq!(seq[1].probability, Some(0.8));
        assert_eq!(seq[3].probability, Some(0.8));
        assert_eq!(seq[4].probability, None);
        assert_eq!(seq[5].probability, None);
    }

    #[test]
    fn test_vivo_ghost_notes_only_fill_rests() {
        let base = Sequence::from_flags([true, false].repeat(32));
        let mut seq = base.clone();
        apply_style(&mut seq, RhythmStyle::Vivo, &mut Random::new(4));
        for (before, after) in base.iter().zip(seq.iter()) {
            if before.active {
                assert_eq!(after, before);
            } else if after.active {
                assert_eq!(after.probability, Some(0.4));
            }
        }
    }

    #[test]
    fn test_regular_style_is_noop() {
        let mut seq = Sequence::from_flags([false, true, false]);
        let before = seq.clone();
        let mut rng = Random::new(3);
        apply_style(&mut seq, RhythmStyle::Regular, &mut rng);
        assert_eq!(seq, before);
        assert_eq!(rng, Random::new(3));
    }

    #[test]
    fn test_safety_rescues_silence() {
        for seed in 0..50 {
            let mut seq = Sequence::from_flags([false; 8]);
            ensure_musical_safety(&mut seq, &mut Random::new(seed));
            assert!(seq[0].active);
        }
    }

    #[test]
    fn test_safety_closing_step_is_accented() {
        for seed in 0..50 {
            let mut seq = Sequence::from_flags([true, false, false, false]);
            ensure_musical_safety(&mut seq, &mut Random::new(seed));
            if seq[3].active {
                assert_eq!(seq[3].accent, Some(true));
            }
        }
    }

    #[test]
    fn test_safety_leaves_safe_sequence_alone() {
        let mut seq = Sequence::new(vec![Step::active(), Step::rest(), Step::active()]);
        let before = seq.clone();
        let mut rng = Random::new(12);
        ensure_musical_safety(&mut seq, &mut rng);
        assert_eq!(seq, before);
        assert_eq!(rng, Random::new(12));
    }

    #[test]
    fn test_safety_single_step() {
        let mut seq = Sequence::from_flags([false]);
        ensure_musical_safety(&mut seq, &mut Random::new(1));
        assert!(seq[0].active);
        assert_eq!(seq[0].accent, None);
    }

    #[test]
    fn test_safety_on_empty_does_nothing() {
        let mut seq = Sequence::default();
        ensure_musical_safety(&mut seq, &mut Random::new(1));
        assert!(seq.is_empty());
    }
}
