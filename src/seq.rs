//! Generic sequence helpers: chunking, splitting, deduplication, flattening,
//! and sliding windows. All functions here are pure.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// Successive `size`-element chunks of `items`; the last chunk holds the
/// remainder. `size` must be non-zero.
pub fn chunks<T>(items: &[T], size: usize) -> impl Iterator<Item = &[T]> {
    items.chunks(size)
}

/// Split `items` into `parts` near-even chunks, spreading the remainder.
pub fn chunk_evenly<T: Clone>(items: &[T], parts: usize) -> Vec<Vec<T>> {
    if parts == 0 {
        return Vec::new();
    }
    let avg = items.len() as f64 / parts as f64;
    let mut out = Vec::with_capacity(parts);
    let mut last = 0.0_f64;
    while (last as usize) < items.len() {
        let start = last as usize;
        let end = ((last + avg) as usize).min(items.len());
        out.push(items[start..end].to_vec());
        last += avg;
    }
    out
}

/// Groups of elements between delimiter occurrences; empty groups (adjacent
/// or leading/trailing delimiters) are omitted.
pub fn split_by<'a, T: PartialEq>(
    items: &'a [T],
    delimiter: &'a T,
) -> impl Iterator<Item = &'a [T]> {
    items
        .split(move |item| item == delimiter)
        .filter(|group| !group.is_empty())
}

/// Remove duplicates, keeping the first occurrence of each element
pub fn dedup<T: Clone + Eq + Hash>(items: &[T]) -> Vec<T> {
    dedup_by_key(items, |item| item.clone())
}

/// Remove duplicates by a projected key, keeping the first occurrence
pub fn dedup_by_key<T, K, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if seen.insert(key(item)) {
            out.push(item.clone());
        }
    }
    out
}

/// An arbitrarily nested list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nested<T> {
    Item(T),
    List(Vec<Nested<T>>),
}

/// Flatten a nested list into a flat one, depth-first
pub fn flatten<T>(nested: Vec<Nested<T>>) -> Vec<T> {
    let mut out = Vec::new();
    flatten_into(nested, &mut out);
    out
}

fn flatten_into<T>(nested: Vec<Nested<T>>, out: &mut Vec<T>) {
    for node in nested {
        match node {
            Nested::Item(item) => out.push(item),
            Nested::List(list) => flatten_into(list, out),
        }
    }
}

/// Sliding windows of width `size` over any iterator.
///
/// Yields nothing when the source holds fewer than `size` elements.
pub fn windows<I>(iter: I, size: usize) -> Windows<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Clone,
{
    Windows {
        iter: iter.into_iter(),
        window: VecDeque::with_capacity(size),
        size,
    }
}

pub struct Windows<I: Iterator> {
    iter: I,
    window: VecDeque<I::Item>,
    size: usize,
}

impl<I> Iterator for Windows<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.size == 0 {
            return None;
        }
        while self.window.len() < self.size {
            self.window.push_back(self.iter.next()?);
        }
        let out: Vec<_> = self.window.iter().cloned().collect();
        self.window.pop_front();
        Some(out)
    }
}

/// Join elements matching `is_joiner` onto their predecessor with
/// `delimiter`. A matching element with no predecessor is kept as-is.
pub fn join_if<S, F>(items: &[S], is_joiner: F, delimiter: &str) -> Vec<String>
where
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.as_ref();
        if is_joiner(item) {
            if let Some(last) = out.last_mut() {
                last.push_str(delimiter);
                last.push_str(item);
                continue;
            }
        }
        out.push(item.to_owned());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_last_is_short() {
        let collected: Vec<&[i32]> = chunks(&[1, 2, 3, 4, 5], 2).collect();
        assert_eq!(collected, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
    }

    #[test]
    fn chunk_evenly_spreads_remainder() {
        let out = chunk_evenly(&[1, 2, 3, 4, 5], 2);
        assert_eq!(out.len(), 2);
        assert_eq!(out.concat(), vec![1, 2, 3, 4, 5]);

        let out = chunk_evenly(&[1, 2, 3, 4, 5, 6, 7], 3);
        assert_eq!(out.len(), 3);
        assert_eq!(out.concat(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(out.iter().all(|c| c.len() == 2 || c.len() == 3));
    }

    #[test]
    fn chunk_evenly_zero_parts_is_empty() {
        assert!(chunk_evenly::<i32>(&[1, 2, 3], 0).is_empty());
    }

    #[test]
    fn split_by_omits_empty_groups() {
        let items = [0, 1, 2, 0, 0, 3, 0];
        let groups: Vec<&[i32]> = split_by(&items, &0).collect();
        assert_eq!(groups, vec![&[1, 2][..], &[3][..]]);
    }

    #[test]
    fn dedup_preserves_first_occurrence_order() {
        assert_eq!(dedup(&[3, 1, 3, 2, 1, 3]), vec![3, 1, 2]);
    }

    #[test]
    fn dedup_by_key_compares_projection() {
        let pairs = [("a", 1), ("b", 1), ("c", 2)];
        assert_eq!(
            dedup_by_key(&pairs, |p| p.1),
            vec![("a", 1), ("c", 2)]
        );
    }

    #[test]
    fn flatten_mixed_nesting() {
        use Nested::{Item, List};
        let nested = vec![
            Item(1),
            List(vec![Item(2), List(vec![Item(3), Item(4)]), Item(5)]),
            Item(6),
        ];
        assert_eq!(flatten(nested), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn windows_width_and_count() {
        let out: Vec<Vec<i32>> = windows(vec![1, 2, 3, 4], 2).collect();
        assert_eq!(out, vec![vec![1, 2], vec![2, 3], vec![3, 4]]);
    }

    #[test]
    fn windows_short_source_yields_nothing() {
        let out: Vec<Vec<i32>> = windows(vec![1, 2], 3).collect();
        assert!(out.is_empty());
    }

    #[test]
    fn join_if_merges_into_predecessor() {
        let items = ["foo", "+", "bar", "baz", "+"];
        let out = join_if(&items, |s| s == "+", "");
        assert_eq!(out, vec!["foo+", "bar", "baz+"]);
    }

    #[test]
    fn join_if_leading_joiner_is_kept() {
        let items = ["+", "foo"];
        let out = join_if(&items, |s| s == "+", "-");
        assert_eq!(out, vec!["+", "foo"]);
    }
}
