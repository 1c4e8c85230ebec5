//! Transaction data aggregation for the dashboard tables and charts.
//!
//! Provides pure functions to sum transactions by category, compute the
//! grand total, and collapse low-share categories into an "Other" bucket so
//! pie charts stay legible.

use std::collections::HashMap;

use crate::transaction::Transaction;

/// The label of the synthetic bucket that absorbs low-share categories.
pub(super) const OTHER_BUCKET_LABEL: &str = "Other";

/// The default minimum share (percent) a category needs to keep its own
/// chart slice. Zero disables collapsing.
pub(super) const DEFAULT_THRESHOLD_PERCENT: f64 = 4.0;

/// Which transaction field to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum GroupKey {
    /// The top-level classification (asset class).
    Category1,
    /// The purpose classification.
    Category2,
}

impl GroupKey {
    fn value<'a>(&self, transaction: &'a Transaction) -> &'a str {
        match self {
            GroupKey::Category1 => &transaction.category1,
            GroupKey::Category2 => &transaction.category2,
        }
    }
}

/// A category label and the sum of `total_price` over its transactions.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CategoryTotal {
    pub label: String,
    pub total: i64,
}

/// A slice of a pie chart: either a pass-through category or the synthetic
/// "Other" bucket.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ChartBucket {
    pub label: String,
    pub total: i64,
}

/// Sums `total_price` per group and sorts the groups by descending total.
///
/// The sort is stable; groups with equal totals keep the order in which
/// their key first appears in the input. Empty input yields an empty vector.
pub(super) fn summarize(transactions: &[Transaction], key: GroupKey) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for transaction in transactions {
        let label = key.value(transaction);

        if !totals.contains_key(label) {
            first_seen.push(label);
        }

        *totals.entry(label).or_insert(0) += transaction.total_price;
    }

    let mut summary: Vec<CategoryTotal> = first_seen
        .into_iter()
        .map(|label| CategoryTotal {
            label: label.to_owned(),
            total: totals[label],
        })
        .collect();

    summary.sort_by(|a, b| b.total.cmp(&a.total));
    summary
}

/// The sum of `total_price` over all transactions. Zero for empty input.
pub(super) fn grand_total(transactions: &[Transaction]) -> i64 {
    transactions
        .iter()
        .map(|transaction| transaction.total_price)
        .sum()
}

/// Merges categories whose share of the summary total is below
/// `threshold_percent` into a single trailing "Other" bucket.
///
/// Categories at or above the threshold pass through in input order; the
/// "Other" bucket, if any category fell below the threshold, is appended
/// last regardless of its own size. A threshold of zero (or less) disables
/// collapsing entirely.
///
/// A summary whose total is zero has no meaningful shares, so the function
/// returns an empty vector as the explicit "no aggregable data" result
/// instead of dividing by zero.
pub(super) fn collapse_long_tail(
    summary: &[CategoryTotal],
    threshold_percent: f64,
) -> Vec<ChartBucket> {
    let total: i64 = summary.iter().map(|group| group.total).sum();

    if total == 0 {
        return Vec::new();
    }

    if threshold_percent <= 0.0 {
        return summary
            .iter()
            .map(|group| ChartBucket {
                label: group.label.clone(),
                total: group.total,
            })
            .collect();
    }

    let mut buckets = Vec::new();
    let mut other_total = 0;
    let mut has_other = false;

    for group in summary {
        let share = group.total as f64 / total as f64 * 100.0;

        if share >= threshold_percent {
            buckets.push(ChartBucket {
                label: group.label.clone(),
                total: group.total,
            });
        } else {
            other_total += group.total;
            has_other = true;
        }
    }

    if has_other {
        buckets.push(ChartBucket {
            label: OTHER_BUCKET_LABEL.to_owned(),
            total: other_total,
        });
    }

    buckets
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{
        CategoryTotal, GroupKey, OTHER_BUCKET_LABEL, collapse_long_tail, grand_total, summarize,
    };
    use crate::transaction::Transaction;

    fn create_test_transaction(category1: &str, category2: &str, total_price: i64) -> Transaction {
        Transaction {
            id: 0,
            date: date!(2024 - 11 - 18),
            title: "test".to_owned(),
            account_name: "test account".to_owned(),
            category1: category1.to_owned(),
            category2: category2.to_owned(),
            purchased_number: None,
            unit_price: None,
            total_price,
        }
    }

    fn category_total(label: &str, total: i64) -> CategoryTotal {
        CategoryTotal {
            label: label.to_owned(),
            total,
        }
    }

    #[test]
    fn summarize_groups_and_sorts_descending() {
        let transactions = vec![
            create_test_transaction("現金", "生活防衛資金", 1000),
            create_test_transaction("投資信託", "投資資金", 8250),
            create_test_transaction("現金", "生活費", 750),
        ];

        let summary = summarize(&transactions, GroupKey::Category1);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0], category_total("投資信託", 8250));
        assert_eq!(summary[1], category_total("現金", 1750));
    }

    #[test]
    fn summarize_two_asset_classes() {
        // Two categories, fund 8250 and cash 1750, grand total 10000.
        let transactions = vec![
            create_test_transaction("投資信託", "投資資金", 8250),
            create_test_transaction("現金", "生活費", 1750),
        ];

        assert_eq!(grand_total(&transactions), 10000);
        assert_eq!(
            summarize(&transactions, GroupKey::Category1),
            vec![category_total("投資信託", 8250), category_total("現金", 1750)]
        );
    }

    #[test]
    fn summarize_empty_input_yields_empty_summary() {
        assert!(summarize(&[], GroupKey::Category1).is_empty());
        assert!(summarize(&[], GroupKey::Category2).is_empty());
    }

    #[test]
    fn summarize_preserves_first_seen_order_on_ties() {
        let transactions = vec![
            create_test_transaction("B", "x", 500),
            create_test_transaction("A", "x", 500),
            create_test_transaction("C", "x", 500),
        ];

        let summary = summarize(&transactions, GroupKey::Category1);

        let labels: Vec<&str> = summary.iter().map(|group| group.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "A", "C"]);
    }

    #[test]
    fn summarize_is_idempotent() {
        let transactions = vec![
            create_test_transaction("投資信託", "投資資金", 8250),
            create_test_transaction("現金", "生活費", 1750),
            create_test_transaction("株式", "投資資金", 4000),
        ];

        let first = summarize(&transactions, GroupKey::Category2);
        let second = summarize(&transactions, GroupKey::Category2);

        assert_eq!(first, second);
    }

    #[test]
    fn summary_totals_sum_to_grand_total_for_any_key() {
        let transactions = vec![
            create_test_transaction("投資信託", "投資資金", 8250),
            create_test_transaction("現金", "生活費", 1750),
            create_test_transaction("株式", "投資資金", 4000),
            create_test_transaction("現金", "生活防衛資金", 300),
        ];

        for key in [GroupKey::Category1, GroupKey::Category2] {
            let sum: i64 = summarize(&transactions, key)
                .iter()
                .map(|group| group.total)
                .sum();
            assert_eq!(sum, grand_total(&transactions));
        }
    }

    #[test]
    fn summary_is_sorted_non_increasing() {
        let transactions = vec![
            create_test_transaction("a", "x", 10),
            create_test_transaction("b", "x", 500),
            create_test_transaction("c", "x", 500),
            create_test_transaction("d", "x", 9000),
            create_test_transaction("e", "x", 1),
        ];

        let summary = summarize(&transactions, GroupKey::Category1);

        for pair in summary.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
    }

    #[test]
    fn grand_total_of_empty_input_is_zero() {
        assert_eq!(grand_total(&[]), 0);
    }

    #[test]
    fn collapse_keeps_groups_at_or_above_threshold() {
        // Shares 70%, 25%, and 5%: all at or above the 4% default.
        let summary = vec![
            category_total("a", 7000),
            category_total("b", 2500),
            category_total("c", 500),
        ];

        let buckets = collapse_long_tail(&summary, 4.0);

        assert_eq!(buckets.len(), 3);
        assert!(buckets.iter().all(|bucket| bucket.label != OTHER_BUCKET_LABEL));
    }

    #[test]
    fn collapse_merges_tail_into_trailing_other() {
        // At a 6% threshold the 5% group falls into "Other".
        let summary = vec![
            category_total("a", 7000),
            category_total("b", 2500),
            category_total("c", 500),
        ];

        let buckets = collapse_long_tail(&summary, 6.0);

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].label, "a");
        assert_eq!(buckets[1].label, "b");
        assert_eq!(buckets[2].label, OTHER_BUCKET_LABEL);
        assert_eq!(buckets[2].total, 500);
    }

    #[test]
    fn collapse_conserves_total_mass() {
        let summary = vec![
            category_total("a", 6000),
            category_total("b", 2000),
            category_total("c", 1500),
            category_total("d", 300),
            category_total("e", 200),
        ];
        let summary_total: i64 = summary.iter().map(|group| group.total).sum();

        for threshold in [0.0, 2.5, 4.0, 10.0, 50.0, 100.0] {
            let buckets = collapse_long_tail(&summary, threshold);
            let bucket_total: i64 = buckets.iter().map(|bucket| bucket.total).sum();
            assert_eq!(bucket_total, summary_total, "threshold {threshold}");
        }
    }

    #[test]
    fn collapse_with_zero_threshold_passes_through_unchanged() {
        let summary = vec![
            category_total("a", 9999),
            category_total("b", 1),
        ];

        let buckets = collapse_long_tail(&summary, 0.0);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "a");
        assert_eq!(buckets[1].label, "b");
        assert!(buckets.iter().all(|bucket| bucket.label != OTHER_BUCKET_LABEL));
    }

    #[test]
    fn collapse_with_zero_grand_total_returns_no_data() {
        assert!(collapse_long_tail(&[], 4.0).is_empty());

        let cancelling = vec![category_total("a", 500), category_total("b", -500)];
        assert!(collapse_long_tail(&cancelling, 4.0).is_empty());
    }

    #[test]
    fn other_is_appended_last_even_when_large() {
        // Many tiny groups together outweigh the single pass-through group.
        let mut summary = vec![category_total("big", 3000)];
        for i in 0..70 {
            summary.push(category_total(&format!("tiny{i}"), 100));
        }

        let buckets = collapse_long_tail(&summary, 4.0);

        let last = buckets.last().unwrap();
        assert_eq!(last.label, OTHER_BUCKET_LABEL);
        assert_eq!(last.total, 7000);
        assert!(last.total > buckets[0].total);
    }
}
