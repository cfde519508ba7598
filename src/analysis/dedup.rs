/// Collapses candidates closer than `min_gap` samples.
///
/// Greedy left to right: the first candidate is always kept, later ones only
/// when they are at least `min_gap` past the most recently kept event. Input
/// must be ascending; the output is an ascending subsequence of it.
pub fn dedup_events(candidates: &[usize], min_gap: usize) -> Vec<usize> {
    let mut kept: Vec<usize> = Vec::with_capacity(candidates.len());

    for &candidate in candidates {
        match kept.last() {
            Some(&last) if candidate.saturating_sub(last) < min_gap => {}
            _ => kept.push(candidate),
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_close_events_merge() {
        assert_eq!(dedup_events(&[10, 40], 75), vec![10]);
    }

    #[test]
    fn test_far_events_survive() {
        assert_eq!(dedup_events(&[10, 100], 75), vec![10, 100]);
    }

    #[test]
    fn test_gap_measured_from_last_kept() {
        // 40 and 80 are both within 75 of the kept 10
        assert_eq!(dedup_events(&[10, 40, 80, 90], 75), vec![10, 90]);
    }

    #[test]
    fn test_exact_gap_is_kept() {
        assert_eq!(dedup_events(&[0, 75, 149, 150], 75), vec![0, 75, 150]);
    }

    #[test]
    fn test_empty() {
        assert!(dedup_events(&[], 75).is_empty());
    }

    fn random_candidates(rng: &mut StdRng) -> Vec<usize> {
        let count = rng.random_range(0..60);
        let mut current = 0usize;
        (0..count)
            .map(|_| {
                current += rng.random_range(1..120);
                current
            })
            .collect()
    }

    #[test]
    fn test_idempotent_and_order_preserving() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let candidates = random_candidates(&mut rng);
            let min_gap = rng.random_range(1..150);
            let once = dedup_events(&candidates, min_gap);
            let twice = dedup_events(&once, min_gap);

            assert_eq!(once, twice);
            assert!(once.len() <= candidates.len());
            assert!(once.windows(2).all(|w| w[1] - w[0] >= min_gap));
            assert_eq!(once.first(), candidates.first());

            // subsequence of the input
            let mut it = candidates.iter();
            assert!(once.iter().all(|k| it.any(|c| c == k)));
        }
    }
}
