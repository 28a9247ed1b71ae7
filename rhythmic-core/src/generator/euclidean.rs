//! Even pulse distribution for Euclidean-style rhythms.

/// Spread `pulses` as evenly as possible across `steps` slots.
///
/// Uses a running accumulator: every slot adds `pulses`, and a slot fires when
/// the total reaches `steps`, which is then subtracted. For 4 pulses over 8
/// steps this fires on the odd slots. Returns a Vec<bool> where `true` = pulse.
///
/// `steps` is treated as at least 1 and `pulses` is clamped to `steps`, so the
/// result is never empty.
pub fn euclidean(pulses: usize, steps: usize) -> Vec<bool> {
    let steps = steps.max(1);
    let pulses = pulses.min(steps);

    let mut accumulator = 0;
    (0..steps)
        .map(|_| {
            accumulator += pulses;
            if accumulator >= steps {
                accumulator -= steps;
                true
            } else {
                false
            }
        })
        .collect()
}

/// Number of pulses a density asks for, never fewer than one
pub fn pulse_count(steps: usize, density: f64) -> usize {
    (round_half_up(steps as f64 * density) as usize).max(1)
}

/// Round to nearest with ties going up (2.5 -> 3, -2.5 -> -2)
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}
