//! Numeric and character ranges.
//!
//! A non-positive step yields an empty vector.

/// `start..=end` by `step`.
pub fn range(start: i64, end: i64, step: i64) -> Vec<i64> {
    if step <= 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut i = start;
    while i <= end {
        out.push(i);
        i = match i.checked_add(step) {
            Some(n) => n,
            None => break,
        };
    }
    out
}

/// `0..count` by `step`.
pub fn range_of(count: i64, step: i64) -> Vec<i64> {
    range(0, count - 1, step)
}

/// Copy of `arr[from..to]`, clamped to the slice bounds.
pub fn arr_range<T: Clone>(arr: &[T], from: usize, to: usize) -> Vec<T> {
    let to = to.min(arr.len());
    if from >= to {
        return Vec::new();
    }
    arr[from..to].to_vec()
}

/// Code points `start..end` (end exclusive) by `step`; gaps that are not valid
/// `char`s (surrogates) are skipped.
pub fn character_range(start: char, end: char, step: u32) -> Vec<char> {
    if step == 0 {
        return Vec::new();
    }
    (start as u32..end as u32)
        .step_by(step as usize)
        .filter_map(char::from_u32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_ranges() {
        assert_eq!(range(0, 3, 1), vec![0, 1, 2, 3]);
        assert_eq!(range(0, 21, 7), vec![0, 7, 14, 21]);
        assert!(range(0, 3, 0).is_empty());
        assert!(range(5, 3, 1).is_empty());
    }

    #[test]
    fn counted_ranges() {
        assert_eq!(range_of(3, 1), vec![0, 1, 2]);
        assert_eq!(range_of(22, 7), vec![0, 7, 14, 21]);
    }

    #[test]
    fn characters_and_slices() {
        let upper: String = character_range('A', 'F', 1).into_iter().collect();
        assert_eq!(upper, "ABCDE");
        assert_eq!(character_range('a', 'g', 2), vec!['a', 'c', 'e']);
        assert_eq!(arr_range(&[1, 2, 3, 4], 1, 3), vec![2, 3]);
        assert_eq!(arr_range(&[1, 2], 1, 10), vec![2]);
        assert!(arr_range(&[1, 2], 2, 1).is_empty());
    }
}
