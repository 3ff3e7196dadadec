//! Transition-point search over slices whose predicate holds for a prefix.
//!
//! Page and juz lookups depend on these being exact: an off-by-one here maps
//! verses to the wrong page without any other symptom.

/// Index of the first element for which `pred` is false.
///
/// `pred` must be true for a prefix of `items` and false afterwards. Returns
/// `items.len()` when it holds everywhere and `0` when it never holds.
pub fn binary_search_index<T, F>(items: &[T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let mut low = 0;
    let mut high = items.len();
    while low < high {
        let mid = low + (high - low) / 2;
        if pred(&items[mid]) {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    low
}

/// Position of the last element for which `pred` holds.
///
/// Callers guarantee that `pred` holds for `items[0]`. Debug builds assert
/// it; release builds fall back to position `0`.
pub fn binary_search_first_position<T, F>(items: &[T], pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let boundary = binary_search_index(items, pred);
    debug_assert!(
        boundary > 0,
        "binary search predicate must hold for the first element"
    );
    boundary.saturating_sub(1)
}

/// The last element for which `pred` holds.
///
/// # Panics
///
/// Panics if `items` is empty.
pub fn binary_search_first<T, F>(items: &[T], pred: F) -> &T
where
    F: FnMut(&T) -> bool,
{
    &items[binary_search_first_position(items, pred)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_transition_point() {
        let items = [1, 3, 5, 7, 9];
        assert_eq!(binary_search_index(&items, |&x| x <= 5), 3);
        assert_eq!(binary_search_index(&items, |&x| x < 1), 0);
        assert_eq!(binary_search_index(&items, |&x| x <= 9), 5);
        assert_eq!(binary_search_index::<i32, _>(&[], |_| true), 0);
    }

    #[test]
    fn returns_last_matching_element() {
        let starts = [1, 22, 42, 62];
        assert_eq!(*binary_search_first(&starts, |&p| p <= 1), 1);
        assert_eq!(*binary_search_first(&starts, |&p| p <= 21), 1);
        assert_eq!(*binary_search_first(&starts, |&p| p <= 22), 22);
        assert_eq!(*binary_search_first(&starts, |&p| p <= 600), 62);
    }

    #[test]
    fn matches_linear_scan_for_every_target() {
        let starts: Vec<u32> = (0..50).map(|n| n * 3 + 1).collect();
        for target in 1..160 {
            let expected = starts.iter().rposition(|&s| s <= target).unwrap();
            assert_eq!(
                binary_search_first_position(&starts, |&s| s <= target),
                expected
            );
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "must hold for the first element")]
    fn asserts_precondition_in_debug_builds() {
        binary_search_first(&[5, 6], |&x| x < 5);
    }
}
