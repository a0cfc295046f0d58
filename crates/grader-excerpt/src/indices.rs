//! Index-set engine.
//!
//! Pure operations over sorted line-index sequences: locating matching
//! lines, merging index sets into a deduplicated union, and coalescing a set
//! into contiguous inclusive ranges.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::IndexSetError;

/// An inclusive range of line indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of indices covered.
    pub fn line_count(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    /// The lines this range covers, clipped to the end of `lines`.
    pub fn slice<'a, 'b>(&self, lines: &'a [&'b str]) -> &'a [&'b str] {
        if self.start >= lines.len() {
            return &[];
        }
        let end = self.end.min(lines.len() - 1);
        &lines[self.start..=end]
    }
}

impl From<(usize, usize)> for LineRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

/// Return every index whose item satisfies `predicate`, in ascending order.
pub fn find_indices<T, F>(items: &[T], mut predicate: F) -> Vec<usize>
where
    F: FnMut(&T) -> bool,
{
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| predicate(item).then_some(index))
        .collect()
}

/// First and last index satisfying `predicate`, or `None` if nothing matches.
pub fn first_and_last<T, F>(items: &[T], predicate: F) -> Option<(usize, usize)>
where
    F: FnMut(&T) -> bool,
{
    let matches = find_indices(items, predicate);
    Some((*matches.first()?, *matches.last()?))
}

/// Merge two ascending index sets into their sorted, deduplicated union.
///
/// Neither input is modified; callers must use the returned set. Fails with
/// [`IndexSetError::Unsorted`] if either input is out of order.
pub fn merge_sorted_sets(source: &[usize], target: &[usize]) -> Result<Vec<usize>, IndexSetError> {
    ensure_sorted(source, "source")?;
    ensure_sorted(target, "target")?;

    let mut merged = Vec::with_capacity(source.len() + target.len());
    let (mut i, mut j) = (0, 0);

    while i < source.len() && j < target.len() {
        let next = match source[i].cmp(&target[j]) {
            Ordering::Less => {
                i += 1;
                source[i - 1]
            }
            Ordering::Greater => {
                j += 1;
                target[j - 1]
            }
            Ordering::Equal => {
                i += 1;
                j += 1;
                source[i - 1]
            }
        };
        push_unique(&mut merged, next);
    }

    // At most one of the tails is non-empty
    for &value in source[i..].iter().chain(&target[j..]) {
        push_unique(&mut merged, value);
    }

    Ok(merged)
}

/// Coalesce an ascending index set into maximal runs of consecutive values.
///
/// A gap greater than one starts a new range. When the first element equals
/// `min_val` the first range starts at `min_val`, and when the last element
/// equals `max_val` the last range ends at `max_val`.
pub fn coalesce_ranges(
    sorted: &[usize],
    min_val: Option<usize>,
    max_val: Option<usize>,
) -> Result<Vec<LineRange>, IndexSetError> {
    ensure_sorted(sorted, "sorted")?;

    let Some((&first, rest)) = sorted.split_first() else {
        return Ok(Vec::new());
    };

    let mut ranges = Vec::new();
    let mut start = min_val.filter(|&min| min == first).unwrap_or(first);
    let mut previous = first;

    for &value in rest {
        if value - previous > 1 {
            ranges.push(LineRange::new(start, previous));
            start = value;
        }
        previous = value;
    }

    let end = max_val.filter(|&max| max == previous).unwrap_or(previous);
    ranges.push(LineRange::new(start, end));

    Ok(ranges)
}

fn ensure_sorted(values: &[usize], argument: &'static str) -> Result<(), IndexSetError> {
    match values.windows(2).position(|pair| pair[1] < pair[0]) {
        Some(offset) => Err(IndexSetError::Unsorted {
            argument,
            position: offset + 1,
            value: values[offset + 1],
        }),
        None => Ok(()),
    }
}

fn push_unique(values: &mut Vec<usize>, value: usize) {
    if values.last() != Some(&value) {
        values.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn ranges(pairs: &[(usize, usize)]) -> Vec<LineRange> {
        pairs.iter().copied().map(LineRange::from).collect()
    }

    #[test]
    fn test_find_indices_matches() {
        let items = ["a", "b", "a"];
        assert_eq!(find_indices(&items, |s| *s == "a"), vec![0, 2]);
    }

    #[test]
    fn test_find_indices_empty() {
        let items: [&str; 0] = [];
        assert!(find_indices(&items, |_| true).is_empty());
    }

    #[test]
    fn test_find_indices_no_match() {
        let items = ["x", "y"];
        assert!(find_indices(&items, |s| s.is_empty()).is_empty());
    }

    #[test]
    fn test_first_and_last() {
        let items = ["-", "a", "-", "b", "-"];
        assert_eq!(first_and_last(&items, |s| *s == "-"), Some((0, 4)));
        assert_eq!(first_and_last(&items, |s| *s == "a"), Some((1, 1)));
        assert_eq!(first_and_last(&items, |s| *s == "z"), None);
    }

    #[test]
    fn test_merge_interleaved() {
        let merged = merge_sorted_sets(&[1, 4, 6], &[2, 4, 5, 9]).unwrap();
        assert_eq!(merged, vec![1, 2, 4, 5, 6, 9]);
    }

    #[test]
    fn test_merge_with_empty() {
        assert_eq!(merge_sorted_sets(&[], &[3, 4]).unwrap(), vec![3, 4]);
        assert_eq!(merge_sorted_sets(&[3, 4], &[]).unwrap(), vec![3, 4]);
        assert!(merge_sorted_sets(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_merge_does_not_touch_inputs() {
        let source = vec![0, 1, 2];
        let target = vec![5];
        let merged = merge_sorted_sets(&source, &target).unwrap();
        assert_eq!(merged, vec![0, 1, 2, 5]);
        assert_eq!(source, vec![0, 1, 2]);
        assert_eq!(target, vec![5]);
    }

    #[test]
    fn test_merge_length_matches_union() {
        let cases: Vec<(Vec<usize>, Vec<usize>)> = vec![
            (vec![1, 1, 2], vec![2, 3, 3]),
            (vec![0, 5, 10], vec![1, 5, 10, 11]),
            (vec![7], vec![7]),
            (vec![], vec![4, 4, 4]),
        ];
        for (a, b) in &cases {
            let merged = merge_sorted_sets(a, b).unwrap();
            let union: BTreeSet<usize> = a.iter().chain(b.iter()).copied().collect();
            assert_eq!(merged, union.into_iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_merge_with_itself_is_idempotent() {
        let set = vec![2, 3, 3, 8];
        let once = merge_sorted_sets(&set, &set).unwrap();
        assert_eq!(once, vec![2, 3, 8]);
        assert_eq!(merge_sorted_sets(&once, &once).unwrap(), once);
    }

    #[test]
    fn test_merge_rejects_unsorted() {
        let err = merge_sorted_sets(&[3, 1], &[1, 2]).unwrap_err();
        assert_eq!(
            err,
            IndexSetError::Unsorted {
                argument: "source",
                position: 1,
                value: 1
            }
        );

        let err = merge_sorted_sets(&[1, 2], &[0, 9, 4]).unwrap_err();
        assert!(matches!(err, IndexSetError::Unsorted { argument: "target", position: 2, .. }));
    }

    #[test]
    fn test_coalesce_basic() {
        assert!(coalesce_ranges(&[], None, None).unwrap().is_empty());
        assert_eq!(coalesce_ranges(&[3], None, None).unwrap(), ranges(&[(3, 3)]));
        assert_eq!(
            coalesce_ranges(&[1, 2, 3, 7, 8, 10], None, None).unwrap(),
            ranges(&[(1, 3), (7, 8), (10, 10)])
        );
    }

    #[test]
    fn test_coalesce_with_bounds() {
        assert_eq!(
            coalesce_ranges(&[0, 1, 2], Some(0), Some(5)).unwrap(),
            ranges(&[(0, 2)])
        );
        assert_eq!(
            coalesce_ranges(&[0, 1, 5], Some(0), Some(5)).unwrap(),
            ranges(&[(0, 1), (5, 5)])
        );
    }

    #[test]
    fn test_coalesce_tolerates_duplicates() {
        assert_eq!(
            coalesce_ranges(&[1, 1, 2, 4, 4], None, None).unwrap(),
            ranges(&[(1, 2), (4, 4)])
        );
    }

    #[test]
    fn test_coalesce_rejects_unsorted() {
        let err = coalesce_ranges(&[3, 1, 2], None, None).unwrap_err();
        assert!(matches!(err, IndexSetError::Unsorted { argument: "sorted", position: 1, value: 1 }));
    }

    #[test]
    fn test_line_range_slice_clips() {
        let lines = ["a", "b", "c"];
        assert_eq!(LineRange::new(1, 5).slice(&lines), &["b", "c"]);
        assert_eq!(LineRange::new(0, 0).slice(&lines), &["a"]);
        assert!(LineRange::new(3, 4).slice(&lines).is_empty());
        assert_eq!(LineRange::new(1, 3).line_count(), 3);
    }
}
