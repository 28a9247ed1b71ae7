//! Cyclic rotation shared by every mode.

/// Rotate a pattern so element `i` moves to `i + rotation` (mod length).
///
/// Negative and oversized rotations are reduced into `0..len`; an empty
/// slice returns empty.
pub fn rotate<T: Clone>(pattern: &[T], rotation: i64) -> Vec<T> {
    let mut rotated = pattern.to_vec();
    let n = rotated.len();
    if n == 0 {
        return rotated;
    }
    let offset = rotation.rem_euclid(n as i64) as usize;
    if offset != 0 {
        rotated.rotate_right(offset);
    }
    rotated
}
