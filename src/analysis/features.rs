use log::debug;

use crate::types::{magnitude, ImuSeries, StrokeFeatures, StrokeType, StrokeWindow};

/// Slices a `window_len` window centred on each event.
///
/// The window covers `[event - half, event + half)` with `half = window_len / 2`.
/// Events whose window would cross either end of the series are dropped, as
/// is everything when `window_len` is zero or odd, so every returned window
/// has exactly `window_len` samples.
pub fn extract_windows(series: &ImuSeries, events: &[usize], window_len: usize) -> Vec<StrokeWindow> {
    let n = series.len();
    let half = window_len / 2;
    if window_len == 0 || half * 2 != window_len {
        return Vec::new();
    }

    events
        .iter()
        .filter_map(|&event| {
            if event < half || event + half > n {
                debug!("Event {} too close to the series boundary, window dropped", event);
                return None;
            }
            let start = event - half;
            let end = event + half;
            Some(StrokeWindow {
                event_index: event,
                start,
                acc: series.acc[start..end].to_vec(),
                gyro: series.gyro[start..end].to_vec(),
            })
        })
        .collect()
}

/// Coarse intensity bucket. Rows are tried in order, first match wins.
pub fn classify_stroke(peak_acceleration: f64, peak_rotation: f64) -> StrokeType {
    if peak_acceleration < 2.0 && peak_rotation < 200.0 {
        StrokeType::LightTouch
    } else if peak_acceleration < 5.0 && peak_rotation < 500.0 {
        StrokeType::Normal
    } else if peak_acceleration < 8.0 {
        StrokeType::Powerful
    } else {
        StrokeType::VeryPowerful
    }
}

fn peak_and_mean(magnitudes: &[f64]) -> (f64, f64) {
    if magnitudes.is_empty() {
        return (0.0, 0.0);
    }
    // NaN anywhere poisons both statistics
    if magnitudes.iter().any(|m| m.is_nan()) {
        return (f64::NAN, f64::NAN);
    }
    let peak = magnitudes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = magnitudes.iter().sum::<f64>() / magnitudes.len() as f64;
    (peak, mean)
}

/// Magnitude statistics for one window. `stroke_id` is 1-based.
pub fn window_features(stroke_id: usize, window: &StrokeWindow) -> StrokeFeatures {
    let acc_mag: Vec<f64> = window.acc.iter().map(magnitude).collect();
    let gyro_mag: Vec<f64> = window.gyro.iter().map(magnitude).collect();

    let (peak_acceleration, avg_acceleration) = peak_and_mean(&acc_mag);
    let (peak_rotation, avg_rotation) = peak_and_mean(&gyro_mag);
    let estimated_type = classify_stroke(peak_acceleration, peak_rotation);

    StrokeFeatures {
        stroke_id,
        event_index: window.event_index,
        peak_acceleration,
        peak_rotation,
        avg_acceleration,
        avg_rotation,
        stroke_power: peak_acceleration * peak_rotation,
        duration_points: window.len(),
        estimated_type,
        type_label: estimated_type.label().to_string(),
    }
}

/// Features for every window, numbered 1..=K in detection order.
pub fn analyze_windows(windows: &[StrokeWindow]) -> Vec<StrokeFeatures> {
    windows
        .iter()
        .enumerate()
        .map(|(i, window)| window_features(i + 1, window))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn ramp_series(n: usize) -> ImuSeries {
        let mut series = ImuSeries::with_capacity(n);
        for i in 0..n {
            let v = i as f64;
            series.push([v, 0.0, 0.0], [0.0, v, 0.0]);
        }
        series
    }

    #[test]
    fn test_windows_have_exact_length_and_stay_in_bounds() {
        let series = ramp_series(500);
        let windows = extract_windows(&series, &[50, 100, 250, 400, 401], 200);

        let kept: Vec<usize> = windows.iter().map(|w| w.event_index).collect();
        assert_eq!(kept, vec![100, 250, 400]);
        for w in &windows {
            assert_eq!(w.acc.len(), 200);
            assert_eq!(w.gyro.len(), 200);
            assert!(w.end() <= series.len());
            assert_eq!(w.start, w.event_index - 100);
            assert_eq!(w.acc[0][0], w.start as f64);
        }
    }

    #[test]
    fn test_window_may_end_exactly_at_series_end() {
        let series = ramp_series(10);
        let windows = extract_windows(&series, &[2, 8], 4);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[1].start, 6);
        assert_eq!(windows[1].end(), 10);
    }

    #[test]
    fn test_odd_or_zero_length_yields_nothing() {
        let series = ramp_series(100);
        assert!(extract_windows(&series, &[50], 21).is_empty());
        assert!(extract_windows(&series, &[50], 0).is_empty());
    }

    #[test]
    fn test_nan_sample_poisons_window_features() {
        let window = StrokeWindow {
            event_index: 1,
            start: 0,
            acc: vec![[1.0, 0.0, 0.0], [f64::NAN, 0.0, 0.0]],
            gyro: vec![[100.0, 0.0, 0.0], [100.0, 0.0, 0.0]],
        };
        let features = window_features(1, &window);
        assert!(features.peak_acceleration.is_nan());
        assert!(features.avg_acceleration.is_nan());
        assert_eq!(features.peak_rotation, 100.0);
        assert_eq!(features.estimated_type, StrokeType::VeryPowerful);
    }

    #[test]
    fn test_classification_table() {
        assert_eq!(classify_stroke(1.9, 199.0), StrokeType::LightTouch);
        assert_eq!(classify_stroke(2.0, 100.0), StrokeType::Normal);
        assert_eq!(classify_stroke(1.0, 200.0), StrokeType::Normal);
        assert_eq!(classify_stroke(4.9, 499.0), StrokeType::Normal);
        assert_eq!(classify_stroke(1.0, 500.0), StrokeType::Powerful);
        assert_eq!(classify_stroke(7.99, 10_000.0), StrokeType::Powerful);
        assert_eq!(classify_stroke(8.0, 0.0), StrokeType::VeryPowerful);
    }

    #[test]
    fn test_classification_is_total() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let acc = rng.random_range(-1.0..20.0);
            let rot = rng.random_range(-10.0..2000.0);
            let expected = if acc < 2.0 && rot < 200.0 {
                StrokeType::LightTouch
            } else if acc < 5.0 && rot < 500.0 {
                StrokeType::Normal
            } else if acc < 8.0 {
                StrokeType::Powerful
            } else {
                StrokeType::VeryPowerful
            };
            assert_eq!(classify_stroke(acc, rot), expected);
        }
        // NaN peaks still land in a bucket
        assert_eq!(classify_stroke(f64::NAN, f64::NAN), StrokeType::VeryPowerful);
    }

    #[test]
    fn test_window_features() {
        let window = StrokeWindow {
            event_index: 3,
            start: 1,
            acc: vec![[3.0, 4.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 2.0], [0.0, 0.0, 1.0]],
            gyro: vec![[100.0, 0.0, 0.0], [0.0, 300.0, 400.0], [0.0, 0.0, 0.0], [100.0, 0.0, 0.0]],
        };
        let f = window_features(1, &window);
        assert_eq!(f.stroke_id, 1);
        assert_eq!(f.event_index, 3);
        assert!((f.peak_acceleration - 5.0).abs() < 1e-9);
        assert!((f.avg_acceleration - 2.25).abs() < 1e-9);
        assert!((f.peak_rotation - 500.0).abs() < 1e-9);
        assert!((f.avg_rotation - 175.0).abs() < 1e-9);
        assert!((f.stroke_power - 2500.0).abs() < 1e-9);
        assert_eq!(f.duration_points, 4);
        assert_eq!(f.estimated_type, StrokeType::Powerful);
        assert_eq!(f.type_label, "powerful stroke");
    }

    #[test]
    fn test_analyze_windows_numbers_from_one() {
        let series = ramp_series(300);
        let windows = extract_windows(&series, &[100, 200], 100);
        let features = analyze_windows(&windows);
        let ids: Vec<usize> = features.iter().map(|f| f.stroke_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(analyze_windows(&[]).is_empty());
    }
}
