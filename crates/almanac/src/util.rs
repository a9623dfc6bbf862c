//! Small sequence helpers.

/// The element at `index`, or `None` when the index is negative or past
/// the end.
///
/// # Examples
///
/// ```
/// use almanac::util::element_at;
///
/// let days = ["Mon", "Tue", "Wed"];
/// assert_eq!(element_at(&days, 1), Some(&"Tue"));
/// assert_eq!(element_at(&days, 3), None);
/// assert_eq!(element_at(&days, -1), None);
/// ```
pub fn element_at<T>(slice: &[T], index: isize) -> Option<&T> {
    usize::try_from(index).ok().and_then(|i| slice.get(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds_indexes_hit() {
        let items = [10, 20, 30];
        assert_eq!(element_at(&items, 0), Some(&10));
        assert_eq!(element_at(&items, 2), Some(&30));
    }

    #[test]
    fn test_out_of_bounds_indexes_miss() {
        let items = [10, 20, 30];
        assert_eq!(element_at(&items, 3), None);
        assert_eq!(element_at(&items, isize::MAX), None);
    }

    #[test]
    fn test_negative_indexes_miss() {
        let items = [10, 20, 30];
        assert_eq!(element_at(&items, -1), None);
        assert_eq!(element_at(&items, isize::MIN), None);
    }

    #[test]
    fn test_empty_slices_always_miss() {
        let empty: [i32; 0] = [];
        assert_eq!(element_at(&empty, 0), None);
    }
}
