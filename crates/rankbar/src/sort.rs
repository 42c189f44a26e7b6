#![forbid(unsafe_code)]

//! Stable merge sort by amount.

use std::cmp::Ordering;

use rankbar_widgets::RowRecord;

use crate::options::SortOrder;

/// Sort records by `amount`, keeping the input order of equal amounts.
///
/// Amounts compare with [`f64::total_cmp`], so NaN sorts after every number
/// when ascending and before every number when descending.
///
/// ```
/// use rankbar::options::SortOrder;
/// use rankbar::sort::sort_by_amount;
/// use rankbar_widgets::RowRecord;
///
/// let rows = vec![
///     RowRecord::new("a", 5.0, 0.0),
///     RowRecord::new("b", 20.0, 0.0),
///     RowRecord::new("c", 1.0, 0.0),
/// ];
/// let sorted = sort_by_amount(rows, SortOrder::Desc);
/// let amounts: Vec<f64> = sorted.iter().map(|r| r.amount).collect();
/// assert_eq!(amounts, [20.0, 5.0, 1.0]);
/// ```
pub fn sort_by_amount(records: Vec<RowRecord>, order: SortOrder) -> Vec<RowRecord> {
    match order {
        SortOrder::Asc => merge_sort_by(records, &|a: &RowRecord, b: &RowRecord| {
            a.amount.total_cmp(&b.amount)
        }),
        SortOrder::Desc => merge_sort_by(records, &|a: &RowRecord, b: &RowRecord| {
            b.amount.total_cmp(&a.amount)
        }),
    }
}

/// Recursive top-down merge sort. Stable: on ties the left half wins.
pub fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);
    merge(left, right, compare)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        out.extend(if take_right { right.next() } else { left.next() });
    }
    out
}
