//! Deterministic ranking and top-k selection.

/// Order items by a descending f64 key and keep the first `top_k`.
///
/// The sort is stable: exact ties preserve the input order, which for
/// catalog entities is their first-seen dataset order. Fewer items than
/// `top_k` returns all of them.
#[must_use]
pub fn rank_by<T, F>(mut items: Vec<T>, key: F, top_k: usize) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
    items.truncate(top_k);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_descending() {
        let ranked = rank_by(vec![("a", 0.2), ("b", 0.9), ("c", 0.5)], |x| x.1, 10);
        let names: Vec<&str> = ranked.iter().map(|x| x.0).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn exact_ties_preserve_input_order() {
        let ranked = rank_by(
            vec![("a", 0.65), ("b", 0.65), ("c", 0.9)],
            |x| x.1,
            10,
        );
        let names: Vec<&str> = ranked.iter().map(|x| x.0).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn truncates_to_top_k() {
        let ranked = rank_by(vec![("a", 1.0), ("b", 2.0), ("c", 3.0)], |x| x.1, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0, "c");
    }

    #[test]
    fn fewer_candidates_than_top_k_returns_all() {
        let ranked = rank_by(vec![("a", 1.0), ("b", 2.0), ("c", 3.0)], |x| x.1, 5);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn repeated_calls_return_identical_order() {
        let items = vec![("a", 0.5), ("b", 0.5), ("c", 0.5), ("d", 0.7)];
        let first = rank_by(items.clone(), |x| x.1, 10);
        let second = rank_by(items, |x| x.1, 10);
        let f: Vec<&str> = first.iter().map(|x| x.0).collect();
        let s: Vec<&str> = second.iter().map(|x| x.0).collect();
        assert_eq!(f, s);
        assert_eq!(f, vec!["d", "a", "b", "c"]);
    }
}
