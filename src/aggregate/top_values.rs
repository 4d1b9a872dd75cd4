//! Deterministic top-N frequency ranking.

use crate::types::cell_summary::RankedValue;
use std::collections::HashMap;

/// Counts non-missing values and returns the `n` most frequent, ordered by
/// descending count.
///
/// Values with equal counts are ordered lexicographically, so rankings are
/// reproducible across runs regardless of hash-map iteration order.
pub(crate) fn top_values<'a, I>(values: I, n: usize) -> Vec<RankedValue>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for value in values.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(value, count)| RankedValue {
            value: value.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(values: &[Option<&'static str>], n: usize) -> Vec<(String, u32)> {
        top_values(values.iter().copied(), n)
            .into_iter()
            .map(|r| (r.value, r.count))
            .collect()
    }

    #[test]
    fn orders_by_descending_count() {
        let values = [
            Some("crow"),
            Some("egret"),
            Some("crow"),
            Some("crow"),
            Some("egret"),
            Some("roller"),
        ];
        assert_eq!(
            rank(&values, 5),
            [
                ("crow".to_string(), 3),
                ("egret".to_string(), 2),
                ("roller".to_string(), 1),
            ]
        );
    }

    #[test]
    fn equal_counts_break_ties_lexicographically() {
        let values = [Some("roller"), Some("crow"), Some("egret")];
        assert_eq!(
            rank(&values, 5),
            [
                ("crow".to_string(), 1),
                ("egret".to_string(), 1),
                ("roller".to_string(), 1),
            ]
        );
    }

    #[test]
    fn truncates_to_n_and_skips_missing() {
        let values: Vec<Option<&'static str>> = vec![
            Some("a"),
            Some("a"),
            None,
            Some("b"),
            Some("c"),
            Some("d"),
            Some("e"),
            Some("f"),
            None,
        ];
        let ranked = rank(&values, 5);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0], ("a".to_string(), 2));
    }

    #[test]
    fn empty_input_ranks_nothing() {
        assert!(rank(&[], 5).is_empty());
        assert!(rank(&[None, None], 5).is_empty());
    }
}
