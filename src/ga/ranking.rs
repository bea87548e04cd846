//! Fitness ranking.

/// Orders population indices by descending fitness.
///
/// Each output slot, left to right, takes the highest fitness among the
/// indices not yet placed; ties go to the lowest original index, so equal
/// scores keep their population order. A NaN score never beats another
/// entry and sinks to the end.
///
/// # Complexity
/// O(n²) time by repeated linear scans. Selection depends on this exact
/// tie-break, and populations are small (tens).
pub fn rank(fitness: &[f64]) -> Vec<usize> {
    let n = fitness.len();
    let mut claimed = vec![false; n];
    let mut order = Vec::with_capacity(n);

    for _ in 0..n {
        let mut best: Option<usize> = None;
        for (i, &f) in fitness.iter().enumerate() {
            if claimed[i] {
                continue;
            }
            match best {
                None => best = Some(i),
                Some(b) if f > fitness[b] || (fitness[b].is_nan() && !f.is_nan()) => {
                    best = Some(i)
                }
                Some(_) => {}
            }
        }
        // n iterations over n entries: an unclaimed index always remains
        if let Some(b) = best {
            claimed[b] = true;
            order.push(b);
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descending() {
        assert_eq!(rank(&[0.1, 0.9, 0.5]), vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_keep_original_order() {
        assert_eq!(rank(&[0.5, 0.7, 0.5, 0.7, 0.5]), vec![1, 3, 0, 2, 4]);
        assert_eq!(rank(&[0.0, 0.0, 0.0]), vec![0, 1, 2]);
    }

    #[test]
    fn test_non_positive_scores() {
        // Zero and negative scores still rank normally
        assert_eq!(rank(&[-1.0, 0.0, -0.5]), vec![1, 2, 0]);
    }

    #[test]
    fn test_nan_sinks() {
        assert_eq!(rank(&[f64::NAN, 0.2, 0.4]), vec![2, 1, 0]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(rank(&[]).is_empty());
        assert_eq!(rank(&[0.3]), vec![0]);
    }
}
