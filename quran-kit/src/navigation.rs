use std::cmp::Ordering;

/// Entities that can be walked forward and backward in reading order.
pub trait Navigatable: Copy + Ord {
    fn next(&self) -> Option<Self>;
    fn previous(&self) -> Option<Self>;

    /// Inclusive run from `self` to `end`. See [`array`].
    fn array_to(self, end: Self) -> Vec<Self> {
        array(self, end)
    }
}

/// Inclusive, ordered run from `start` to `end` following `next` links.
///
/// # Panics
///
/// Panics if `end` precedes `start`.
pub fn array<T: Navigatable>(start: T, end: T) -> Vec<T> {
    array_with(start, end, T::cmp)
}

/// Like [`array`], ordering elements with `compare` instead of `Ord`.
///
/// # Panics
///
/// Panics if `end` precedes `start` under `compare`.
pub fn array_with<T, F>(start: T, end: T, compare: F) -> Vec<T>
where
    T: Navigatable,
    F: Fn(&T, &T) -> Ordering,
{
    assert!(
        compare(&start, &end) != Ordering::Greater,
        "range end precedes its start"
    );
    let mut items = vec![start];
    let mut current = start;
    while let Some(next) = current.next() {
        if compare(&next, &end) == Ordering::Greater {
            break;
        }
        items.push(next);
        current = next;
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Step(u8);

    impl Navigatable for Step {
        fn next(&self) -> Option<Self> {
            (self.0 < 10).then(|| Step(self.0 + 1))
        }

        fn previous(&self) -> Option<Self> {
            self.0.checked_sub(1).map(Step)
        }
    }

    #[test]
    fn builds_inclusive_run() {
        assert_eq!(array(Step(2), Step(5)), vec![Step(2), Step(3), Step(4), Step(5)]);
        assert_eq!(Step(7).array_to(Step(7)), vec![Step(7)]);
    }

    #[test]
    fn stops_at_last_element() {
        assert_eq!(array(Step(9), Step(10)).len(), 2);
    }

    #[test]
    #[should_panic(expected = "range end precedes its start")]
    fn rejects_reversed_bounds() {
        array(Step(5), Step(2));
    }

    #[test]
    fn honours_custom_comparator() {
        let run = array_with(Step(1), Step(4), |a, b| a.0.cmp(&b.0));
        assert_eq!(run.len(), 4);
    }
}
