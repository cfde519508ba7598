use log::debug;

use crate::types::Vec3;

/// numpy-style sign: -1, 0 or 1, NaN stays NaN.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else if x == 0.0 {
        0.0
    } else {
        f64::NAN
    }
}

/// `out[i]` is true when any axis changes sign between samples `i` and `i + 1`.
/// A transition involving NaN never counts.
pub fn sign_changes(signal: &[Vec3]) -> Vec<bool> {
    signal
        .windows(2)
        .map(|pair| (0..3).any(|axis| (sign(pair[1][axis]) - sign(pair[0][axis])).abs() > 0.0))
        .collect()
}

/// `out[i]` is true when any axis of `|gyro[i + 1] - gyro[i]|` exceeds `threshold`.
pub fn threshold_crossings(gyro: &[Vec3], threshold: f64) -> Vec<bool> {
    gyro.windows(2)
        .map(|pair| (0..3).any(|axis| (pair[1][axis] - pair[0][axis]).abs() > threshold))
        .collect()
}

/// Finds candidate stroke events.
///
/// A difference index `i` qualifies when some gyro axis jumps by more than
/// `threshold` between samples `i` and `i + 1`, and both the gyro and the
/// acceleration signals reverse sign somewhere in the difference range
/// `[i - radius, i + radius)`. The event is reported as `i + 1`, the sample
/// after the jump. Output is ascending.
pub fn detect_candidates(acc: &[Vec3], gyro: &[Vec3], threshold: f64, radius: usize) -> Vec<usize> {
    let n = acc.len().min(gyro.len());
    if n < 2 {
        return Vec::new();
    }
    let acc = &acc[..n];
    let gyro = &gyro[..n];

    let crossings = threshold_crossings(gyro, threshold);
    let gyro_changes = sign_changes(gyro);
    let acc_changes = sign_changes(acc);
    let len = crossings.len();

    let mut candidates = Vec::new();
    for (i, crossed) in crossings.iter().enumerate() {
        if !crossed {
            continue;
        }
        let start = i.saturating_sub(radius);
        let end = (i + radius).min(len);
        let gyro_reversal = gyro_changes[start..end].iter().any(|c| *c);
        let acc_reversal = acc_changes[start..end].iter().any(|c| *c);

        if gyro_reversal && acc_reversal {
            candidates.push(i + 1);
        } else {
            debug!(
                "Jump at {} not confirmed (gyro reversal: {}, acc reversal: {})",
                i + 1,
                gyro_reversal,
                acc_reversal
            );
        }
    }

    candidates
}
